use async_trait::async_trait;
use sqlx::PgPool;

use super::{sync_id_sequence, RecordStore};
use crate::models::{offering::Offering, Owner};

pub struct PgOfferingStore {
    pool: PgPool,
}

impl PgOfferingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Offering> for PgOfferingStore {
    async fn find_all(&self) -> anyhow::Result<Vec<Offering>> {
        let offerings = sqlx::query_as::<_, Offering>("SELECT * FROM offerings ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(offerings)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Offering>> {
        let offering = sqlx::query_as::<_, Offering>("SELECT * FROM offerings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(offering)
    }

    async fn find_by_owner(&self, owner: Owner) -> anyhow::Result<Vec<Offering>> {
        // Offerings only reference a trainer
        let Owner::Trainer(trainer_id) = owner else {
            return Ok(Vec::new());
        };
        let offerings = sqlx::query_as::<_, Offering>(
            "SELECT * FROM offerings WHERE trainer_id = $1 ORDER BY id",
        )
        .bind(trainer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(offerings)
    }

    async fn save(&self, offering: Offering) -> anyhow::Result<Offering> {
        let saved = sqlx::query_as::<_, Offering>(
            "INSERT INTO offerings (id, name, description, price, location, trainer_id)
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('offerings', 'id'))::INT),
                     $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE
             SET name = EXCLUDED.name,
                 description = EXCLUDED.description,
                 price = EXCLUDED.price,
                 location = EXCLUDED.location,
                 trainer_id = EXCLUDED.trainer_id
             RETURNING *",
        )
        .bind(offering.id)
        .bind(&offering.name)
        .bind(&offering.description)
        .bind(offering.price)
        .bind(&offering.location)
        .bind(offering.trainer_id)
        .fetch_one(&self.pool)
        .await?;

        if offering.id.is_some() {
            sync_id_sequence(&self.pool, "offerings").await?;
        }
        Ok(saved)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM offerings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM offerings").execute(&self.pool).await?;
        Ok(())
    }
}
