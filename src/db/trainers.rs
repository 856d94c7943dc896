use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::{sync_id_sequence, RecordStore};
use crate::models::{trainer::Trainer, Owner};

#[derive(FromRow)]
struct CertificationRow {
    trainer_id: i32,
    document: Vec<u8>,
}

pub struct PgTrainerStore {
    pool: PgPool,
}

impl PgTrainerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn attach_certifications(&self, trainers: &mut [Trainer]) -> anyhow::Result<()> {
        let ids: Vec<i32> = trainers.iter().filter_map(|t| t.id).collect();
        if ids.is_empty() {
            return Ok(());
        }

        let rows = sqlx::query_as::<_, CertificationRow>(
            "SELECT trainer_id, document FROM trainer_certifications
             WHERE trainer_id = ANY($1)
             ORDER BY trainer_id, position",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_trainer: HashMap<i32, Vec<Vec<u8>>> = HashMap::new();
        for row in rows {
            by_trainer.entry(row.trainer_id).or_default().push(row.document);
        }
        for trainer in trainers.iter_mut() {
            if let Some(docs) = trainer.id.and_then(|id| by_trainer.remove(&id)) {
                trainer.certifications = docs;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore<Trainer> for PgTrainerStore {
    async fn find_all(&self) -> anyhow::Result<Vec<Trainer>> {
        let mut trainers = sqlx::query_as::<_, Trainer>("SELECT * FROM trainers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        self.attach_certifications(&mut trainers).await?;
        Ok(trainers)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Trainer>> {
        let trainer = sqlx::query_as::<_, Trainer>("SELECT * FROM trainers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(trainer) = trainer else {
            return Ok(None);
        };
        let mut found = [trainer];
        self.attach_certifications(&mut found).await?;
        let [trainer] = found;
        Ok(Some(trainer))
    }

    async fn find_by_owner(&self, _owner: Owner) -> anyhow::Result<Vec<Trainer>> {
        Ok(Vec::new())
    }

    /// The trainer row and its certification rows change in one transaction.
    async fn save(&self, trainer: Trainer) -> anyhow::Result<Trainer> {
        let mut tx = self.pool.begin().await?;

        let mut saved = sqlx::query_as::<_, Trainer>(
            "INSERT INTO trainers (id, name, email, password, specialties, profile_photo)
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('trainers', 'id'))::INT),
                     $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE
             SET name = EXCLUDED.name,
                 email = EXCLUDED.email,
                 password = EXCLUDED.password,
                 specialties = EXCLUDED.specialties,
                 profile_photo = EXCLUDED.profile_photo
             RETURNING *",
        )
        .bind(trainer.id)
        .bind(&trainer.name)
        .bind(&trainer.email)
        .bind(&trainer.password)
        .bind(&trainer.specialties)
        .bind(&trainer.profile_photo)
        .fetch_one(&mut *tx)
        .await?;

        let trainer_id = saved
            .id
            .ok_or_else(|| anyhow::anyhow!("trainers insert returned no id"))?;

        sqlx::query("DELETE FROM trainer_certifications WHERE trainer_id = $1")
            .bind(trainer_id)
            .execute(&mut *tx)
            .await?;

        for (position, document) in trainer.certifications.iter().enumerate() {
            sqlx::query(
                "INSERT INTO trainer_certifications (trainer_id, position, document)
                 VALUES ($1, $2, $3)",
            )
            .bind(trainer_id)
            .bind(i32::try_from(position)?)
            .bind(document)
            .execute(&mut *tx)
            .await?;
        }

        if trainer.id.is_some() {
            sync_id_sequence(&mut *tx, "trainers").await?;
        }
        tx.commit().await?;

        saved.certifications = trainer.certifications;
        Ok(saved)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM trainers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM trainers").execute(&self.pool).await?;
        Ok(())
    }
}
