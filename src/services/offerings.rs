use std::sync::Arc;

use async_trait::async_trait;

use super::{trainer_fields, EntityService};
use crate::{
    db::RecordStore,
    models::{
        offering::{Offering, OfferingFields, OfferingPayload},
        trainer::Trainer,
        MissingField,
    },
};

pub struct OfferingService {
    offerings: Arc<dyn RecordStore<Offering>>,
    trainers: Arc<dyn RecordStore<Trainer>>,
}

impl OfferingService {
    pub fn new(
        offerings: Arc<dyn RecordStore<Offering>>,
        trainers: Arc<dyn RecordStore<Trainer>>,
    ) -> Self {
        Self { offerings, trainers }
    }
}

#[async_trait]
impl EntityService for OfferingService {
    type Record = Offering;
    type Payload = OfferingPayload;

    const NAME: &'static str = "servicio";

    fn store(&self) -> &dyn RecordStore<Offering> {
        self.offerings.as_ref()
    }

    fn payload_id(payload: &OfferingPayload) -> Option<i32> {
        payload.offering.id
    }

    fn to_record(payload: &OfferingPayload) -> Result<Offering, MissingField> {
        payload.to_record()
    }

    fn merge(payload: &OfferingPayload, offering: &mut Offering) {
        payload.merge_into(offering);
    }

    async fn project(&self, offering: Offering) -> anyhow::Result<OfferingPayload> {
        Ok(OfferingPayload {
            offering: OfferingFields::from(&offering),
            trainer: trainer_fields(self.trainers.as_ref(), offering.trainer_id).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    fn hiit(trainer_id: Option<i32>) -> Offering {
        Offering {
            id: None,
            name: "HIIT".into(),
            description: "Intervalos".into(),
            price: 30.0,
            location: "Gimnasio Norte".into(),
            trainer_id,
        }
    }

    #[tokio::test]
    async fn test_projection_embeds_trainer_when_it_exists() {
        let trainers = Arc::new(MemoryStore::<Trainer>::default());
        trainers
            .save(Trainer {
                id: None,
                name: "Luis".into(),
                email: "l@x.com".into(),
                password: "pw".into(),
                specialties: vec!["crossfit".into()],
                profile_photo: None,
                certifications: Vec::new(),
            })
            .await
            .unwrap();
        let svc = OfferingService::new(Arc::new(MemoryStore::<Offering>::default()), trainers);

        let owned = svc.project(hiit(Some(1))).await.unwrap();
        let trainer = owned.trainer.unwrap();
        assert_eq!(trainer.name.as_deref(), Some("Luis"));

        let orphan = svc.project(hiit(Some(7))).await.unwrap();
        assert!(orphan.trainer.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_a_row_went_away() {
        let svc = OfferingService::new(
            Arc::new(MemoryStore::<Offering>::default()),
            Arc::new(MemoryStore::<Trainer>::default()),
        );
        svc.store().save(hiit(None)).await.unwrap();

        assert!(svc.delete(1).await.unwrap());
        assert!(!svc.delete(1).await.unwrap());
    }
}
