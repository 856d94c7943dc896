use async_trait::async_trait;
use sqlx::PgPool;

use super::{sync_id_sequence, RecordStore};
use crate::models::{client::Client, Owner};

pub struct PgClientStore {
    pool: PgPool,
}

impl PgClientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Client> for PgClientStore {
    async fn find_all(&self) -> anyhow::Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(clients)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn find_by_owner(&self, _owner: Owner) -> anyhow::Result<Vec<Client>> {
        Ok(Vec::new())
    }

    async fn save(&self, client: Client) -> anyhow::Result<Client> {
        // $1 is NULL for new rows and lets the sequence pick the id
        let saved = sqlx::query_as::<_, Client>(
            "INSERT INTO clients
                (id, name, email, password, profile_photo, birth_year, height, weight, phone, location)
             VALUES (COALESCE($1, nextval(pg_get_serial_sequence('clients', 'id'))::INT),
                     $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (id) DO UPDATE
             SET name = EXCLUDED.name,
                 email = EXCLUDED.email,
                 password = EXCLUDED.password,
                 profile_photo = EXCLUDED.profile_photo,
                 birth_year = EXCLUDED.birth_year,
                 height = EXCLUDED.height,
                 weight = EXCLUDED.weight,
                 phone = EXCLUDED.phone,
                 location = EXCLUDED.location
             RETURNING *",
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.password)
        .bind(&client.profile_photo)
        .bind(client.birth_year)
        .bind(client.height)
        .bind(client.weight)
        .bind(&client.phone)
        .bind(&client.location)
        .fetch_one(&self.pool)
        .await?;

        if client.id.is_some() {
            sync_id_sequence(&self.pool, "clients").await?;
        }
        Ok(saved)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM clients").execute(&self.pool).await?;
        Ok(())
    }
}
