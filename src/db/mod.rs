pub mod clients;
pub mod memory;
pub mod offerings;
pub mod reviews;
pub mod sessions;
pub mod trainers;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::models::{
    client::Client, offering::Offering, review::Review, session::Session, trainer::Trainer,
    Owner, Record,
};

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the schema migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Persistence primitives for one record type.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    async fn find_all(&self) -> anyhow::Result<Vec<R>>;

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<R>>;

    /// Records whose foreign key points at `owner`.
    async fn find_by_owner(&self, owner: Owner) -> anyhow::Result<Vec<R>>;

    /// Insert when `record` has no id, otherwise insert-or-replace under that id.
    async fn save(&self, record: R) -> anyhow::Result<R>;

    async fn delete(&self, id: i32) -> anyhow::Result<()>;

    async fn delete_all(&self) -> anyhow::Result<()>;
}

/// One store per entity type, shared by the services that need them.
#[derive(Clone)]
pub struct Stores {
    pub clients: Arc<dyn RecordStore<Client>>,
    pub trainers: Arc<dyn RecordStore<Trainer>>,
    pub reviews: Arc<dyn RecordStore<Review>>,
    pub offerings: Arc<dyn RecordStore<Offering>>,
    pub sessions: Arc<dyn RecordStore<Session>>,
}

impl Stores {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            clients: Arc::new(clients::PgClientStore::new(pool.clone())),
            trainers: Arc::new(trainers::PgTrainerStore::new(pool.clone())),
            reviews: Arc::new(reviews::PgReviewStore::new(pool.clone())),
            offerings: Arc::new(offerings::PgOfferingStore::new(pool.clone())),
            sessions: Arc::new(sessions::PgSessionStore::new(pool.clone())),
        }
    }

    pub fn memory() -> Self {
        Self {
            clients: Arc::new(memory::MemoryStore::<Client>::default()),
            trainers: Arc::new(memory::MemoryStore::<Trainer>::default()),
            reviews: Arc::new(memory::MemoryStore::<Review>::default()),
            offerings: Arc::new(memory::MemoryStore::<Offering>::default()),
            sessions: Arc::new(memory::MemoryStore::<Session>::default()),
        }
    }
}

/// Move the key sequence of `table` past its highest id, so generated keys
/// never collide with ids supplied by callers.
pub(crate) async fn sync_id_sequence<'e, E>(executor: E, table: &str) -> anyhow::Result<()>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(&format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), GREATEST((SELECT MAX(id) FROM {table}), 1))"
    ))
    .execute(executor)
    .await?;
    Ok(())
}
