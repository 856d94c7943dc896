use std::sync::Arc;

use async_trait::async_trait;

use super::EntityService;
use crate::{
    db::RecordStore,
    models::{
        offering::{Offering, OfferingFields},
        review::{Review, ReviewFields},
        session::{Session, SessionFields},
        trainer::{Trainer, TrainerFields, TrainerPayload},
        MissingField, Owner,
    },
};

pub struct TrainerService {
    trainers: Arc<dyn RecordStore<Trainer>>,
    reviews: Arc<dyn RecordStore<Review>>,
    sessions: Arc<dyn RecordStore<Session>>,
    offerings: Arc<dyn RecordStore<Offering>>,
}

impl TrainerService {
    pub fn new(
        trainers: Arc<dyn RecordStore<Trainer>>,
        reviews: Arc<dyn RecordStore<Review>>,
        sessions: Arc<dyn RecordStore<Session>>,
        offerings: Arc<dyn RecordStore<Offering>>,
    ) -> Self {
        Self {
            trainers,
            reviews,
            sessions,
            offerings,
        }
    }
}

#[async_trait]
impl EntityService for TrainerService {
    type Record = Trainer;
    type Payload = TrainerPayload;

    const NAME: &'static str = "entrenador";

    fn store(&self) -> &dyn RecordStore<Trainer> {
        self.trainers.as_ref()
    }

    fn payload_id(payload: &TrainerPayload) -> Option<i32> {
        payload.trainer.id
    }

    fn to_record(payload: &TrainerPayload) -> Result<Trainer, MissingField> {
        payload.trainer.to_record()
    }

    fn merge(payload: &TrainerPayload, trainer: &mut Trainer) {
        payload.trainer.merge_into(trainer);
    }

    async fn project(&self, trainer: Trainer) -> anyhow::Result<TrainerPayload> {
        let mut payload = TrainerPayload {
            trainer: TrainerFields::from(&trainer),
            ..Default::default()
        };
        let Some(id) = trainer.id else {
            return Ok(payload);
        };

        let owner = Owner::Trainer(id);
        payload.resenias = self
            .reviews
            .find_by_owner(owner)
            .await?
            .iter()
            .map(ReviewFields::from)
            .collect();
        payload.sesiones = self
            .sessions
            .find_by_owner(owner)
            .await?
            .iter()
            .map(SessionFields::from)
            .collect();
        payload.servicios = self
            .offerings
            .find_by_owner(owner)
            .await?
            .iter()
            .map(OfferingFields::from)
            .collect();
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use chrono::NaiveDate;

    struct Fixture {
        service: TrainerService,
        reviews: Arc<MemoryStore<Review>>,
        sessions: Arc<MemoryStore<Session>>,
        offerings: Arc<MemoryStore<Offering>>,
    }

    fn fixture() -> Fixture {
        let reviews = Arc::new(MemoryStore::<Review>::default());
        let sessions = Arc::new(MemoryStore::<Session>::default());
        let offerings = Arc::new(MemoryStore::<Offering>::default());
        Fixture {
            service: TrainerService::new(
                Arc::new(MemoryStore::<Trainer>::default()),
                reviews.clone(),
                sessions.clone(),
                offerings.clone(),
            ),
            reviews,
            sessions,
            offerings,
        }
    }

    fn luis() -> TrainerPayload {
        TrainerPayload {
            trainer: TrainerFields {
                name: Some("Luis".into()),
                email: Some("l@x.com".into()),
                password: Some("pw".into()),
                specialties: Some(vec!["crossfit".into()]),
                certifications: Some(vec![b"%PDF-1.4".to_vec()]),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_projection_collects_back_references() {
        let f = fixture();
        let created = f.service.create(luis()).await.unwrap();
        let id = created.trainer.id;
        assert_eq!(id, Some(1));

        f.reviews
            .save(Review {
                id: None,
                rating: 4,
                comment: "Puntual".into(),
                client_id: Some(8),
                trainer_id: id,
            })
            .await
            .unwrap();
        f.sessions
            .save(Session {
                id: None,
                scheduled_at: NaiveDate::from_ymd_opt(2024, 7, 1)
                    .unwrap()
                    .and_hms_opt(18, 0, 0)
                    .unwrap(),
                status: "Pendiente".into(),
                client_id: Some(8),
                trainer_id: id,
            })
            .await
            .unwrap();
        f.offerings
            .save(Offering {
                id: None,
                name: "HIIT".into(),
                description: "Intervalos".into(),
                price: 30.0,
                location: "Gimnasio".into(),
                trainer_id: Some(2),
            })
            .await
            .unwrap();

        let trainer = f.service.get(1).await.unwrap().unwrap();
        assert_eq!(trainer.resenias.len(), 1);
        assert_eq!(trainer.sesiones.len(), 1);
        assert!(trainer.servicios.is_empty());
        assert_eq!(trainer.trainer.certifications, Some(vec![b"%PDF-1.4".to_vec()]));
    }

    #[tokio::test]
    async fn test_update_keeps_unsent_lists() {
        let f = fixture();
        f.service.create(luis()).await.unwrap();

        let patch = TrainerPayload {
            trainer: TrainerFields {
                id: Some(1),
                name: Some("Luis Pérez".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let updated = f.service.update(patch).await.unwrap();

        assert_eq!(updated.trainer.name.as_deref(), Some("Luis Pérez"));
        assert_eq!(updated.trainer.specialties, Some(vec!["crossfit".to_string()]));
        assert_eq!(updated.trainer.certifications.map(|c| c.len()), Some(1));
    }

    #[tokio::test]
    async fn test_delete_all_empties_store() {
        let f = fixture();
        f.service.create(luis()).await.unwrap();
        f.service.create(luis()).await.unwrap();

        assert!(f.service.delete_all().await);
        assert!(f.service.list().await.unwrap().is_empty());
    }
}
