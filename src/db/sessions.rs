use async_trait::async_trait;
use sqlx::PgPool;

use super::{sync_id_sequence, RecordStore};
use crate::models::{session::Session, Owner};

pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Session> for PgSessionStore {
    async fn find_all(&self) -> anyhow::Result<Vec<Session>> {
        let sessions = sqlx::query_as::<_, Session>("SELECT * FROM sessions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(sessions)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(session)
    }

    async fn find_by_owner(&self, owner: Owner) -> anyhow::Result<Vec<Session>> {
        let (column, id) = match owner {
            Owner::Client(id) => ("client_id", id),
            Owner::Trainer(id) => ("trainer_id", id),
        };
        let sessions = sqlx::query_as::<_, Session>(&format!(
            "SELECT * FROM sessions WHERE {column} = $1 ORDER BY id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }

    async fn save(&self, session: Session) -> anyhow::Result<Session> {
        let saved = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (id, scheduled_at, status, client_id, trainer_id)
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('sessions', 'id'))::INT),
                     $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE
             SET scheduled_at = EXCLUDED.scheduled_at,
                 status = EXCLUDED.status,
                 client_id = EXCLUDED.client_id,
                 trainer_id = EXCLUDED.trainer_id
             RETURNING *",
        )
        .bind(session.id)
        .bind(session.scheduled_at)
        .bind(&session.status)
        .bind(session.client_id)
        .bind(session.trainer_id)
        .fetch_one(&self.pool)
        .await?;

        if session.id.is_some() {
            sync_id_sequence(&self.pool, "sessions").await?;
        }
        Ok(saved)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM sessions").execute(&self.pool).await?;
        Ok(())
    }
}
