use std::sync::Arc;

use async_trait::async_trait;

use super::{client_fields, trainer_fields, EntityService};
use crate::{
    db::RecordStore,
    models::{
        client::Client,
        session::{Session, SessionFields, SessionPayload},
        trainer::Trainer,
        MissingField,
    },
};

pub struct SessionService {
    sessions: Arc<dyn RecordStore<Session>>,
    clients: Arc<dyn RecordStore<Client>>,
    trainers: Arc<dyn RecordStore<Trainer>>,
}

impl SessionService {
    pub fn new(
        sessions: Arc<dyn RecordStore<Session>>,
        clients: Arc<dyn RecordStore<Client>>,
        trainers: Arc<dyn RecordStore<Trainer>>,
    ) -> Self {
        Self {
            sessions,
            clients,
            trainers,
        }
    }
}

#[async_trait]
impl EntityService for SessionService {
    type Record = Session;
    type Payload = SessionPayload;

    const NAME: &'static str = "sesion";

    fn store(&self) -> &dyn RecordStore<Session> {
        self.sessions.as_ref()
    }

    fn payload_id(payload: &SessionPayload) -> Option<i32> {
        payload.session.id
    }

    fn to_record(payload: &SessionPayload) -> Result<Session, MissingField> {
        payload.to_record()
    }

    fn merge(payload: &SessionPayload, session: &mut Session) {
        payload.merge_into(session);
    }

    async fn project(&self, session: Session) -> anyhow::Result<SessionPayload> {
        Ok(SessionPayload {
            session: SessionFields::from(&session),
            client: client_fields(self.clients.as_ref(), session.client_id).await?,
            trainer: trainer_fields(self.trainers.as_ref(), session.trainer_id).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::models::{client::ClientFields, trainer::TrainerFields};

    fn service() -> SessionService {
        SessionService::new(
            Arc::new(MemoryStore::<Session>::default()),
            Arc::new(MemoryStore::<Client>::default()),
            Arc::new(MemoryStore::<Trainer>::default()),
        )
    }

    fn booking() -> SessionPayload {
        serde_json::from_value(serde_json::json!({
            "fechaHora": "2024-06-03T07:30:00",
            "estado": "Pendiente",
            "cliente": {"idCliente": 1},
            "entrenador": {"idEntrenador": 2}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_update_cannot_reassign_references() {
        let svc = service();
        svc.create(booking()).await.unwrap();

        let patch = SessionPayload {
            session: SessionFields {
                id: Some(1),
                status: Some("Cancelada".into()),
                ..Default::default()
            },
            client: Some(ClientFields {
                id: Some(5),
                ..Default::default()
            }),
            trainer: Some(TrainerFields {
                id: Some(6),
                ..Default::default()
            }),
        };
        svc.update(patch).await.unwrap();

        let stored = svc.store().find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.status, "Cancelada");
        assert_eq!(stored.client_id, Some(1));
        assert_eq!(stored.trainer_id, Some(2));
    }

    #[tokio::test]
    async fn test_dangling_reference_projects_as_null() {
        let svc = service();
        let created = svc.create(booking()).await.unwrap();
        assert!(created.client.is_none());
        assert!(created.trainer.is_none());
        assert_eq!(created.session.status.as_deref(), Some("Pendiente"));
    }
}
