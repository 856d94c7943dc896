use async_trait::async_trait;
use sqlx::PgPool;

use super::{sync_id_sequence, RecordStore};
use crate::models::{review::Review, Owner};

pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Review> for PgReviewStore {
    async fn find_all(&self) -> anyhow::Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(review)
    }

    async fn find_by_owner(&self, owner: Owner) -> anyhow::Result<Vec<Review>> {
        let (column, id) = match owner {
            Owner::Client(id) => ("client_id", id),
            Owner::Trainer(id) => ("trainer_id", id),
        };
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT * FROM reviews WHERE {column} = $1 ORDER BY id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    async fn save(&self, review: Review) -> anyhow::Result<Review> {
        let saved = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (id, rating, comment, client_id, trainer_id)
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('reviews', 'id'))::INT),
                     $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE
             SET rating = EXCLUDED.rating,
                 comment = EXCLUDED.comment,
                 client_id = EXCLUDED.client_id,
                 trainer_id = EXCLUDED.trainer_id
             RETURNING *",
        )
        .bind(review.id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.client_id)
        .bind(review.trainer_id)
        .fetch_one(&self.pool)
        .await?;

        if review.id.is_some() {
            sync_id_sequence(&self.pool, "reviews").await?;
        }
        Ok(saved)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM reviews").execute(&self.pool).await?;
        Ok(())
    }
}
