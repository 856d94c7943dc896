//! Bulk-delete entity tables.
//! Entities are purged sessions → reviews → services → clients → trainers
//! so that referencing rows go before the rows they point at.
//!
//! Usage: purge-data [--entity NAME]...
//!   --entity NAME : sesion | resenia | servicio | cliente | entrenador
//!                   (repeatable, all if not specified)

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use sportlink_api::{
    config::{Config, StorageBackend},
    db::{self, Stores},
    services::EntityService,
    AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Entity {
    Sesion,
    Resenia,
    Servicio,
    Cliente,
    Entrenador,
}

const PURGE_ORDER: [Entity; 5] = [
    Entity::Sesion,
    Entity::Resenia,
    Entity::Servicio,
    Entity::Cliente,
    Entity::Entrenador,
];

#[derive(Parser)]
#[command(name = "purge-data", about = "Delete every record of the given SportLink entities")]
struct Args {
    /// Entity to purge (repeatable, all if not specified)
    #[arg(long = "entity", value_enum)]
    entities: Vec<Entity>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable not set"))?;
    let pool = db::create_pool(&database_url, 5).await?;

    let config = Config {
        storage: StorageBackend::Postgres,
        database_url: Some(database_url),
        ..Config::default()
    };
    let state = AppState::new(Arc::new(config), Stores::postgres(&pool), Some(pool));

    tracing::info!("Starting data purge job...");

    for entity in PURGE_ORDER {
        if !args.entities.is_empty() && !args.entities.contains(&entity) {
            continue;
        }
        let purged = match entity {
            Entity::Sesion => state.sessions.delete_all().await,
            Entity::Resenia => state.reviews.delete_all().await,
            Entity::Servicio => state.offerings.delete_all().await,
            Entity::Cliente => state.clients.delete_all().await,
            Entity::Entrenador => state.trainers.delete_all().await,
        };
        if purged {
            tracing::info!("Purged {:?}", entity);
        } else {
            tracing::error!("Could not purge {:?} (still referenced?)", entity);
        }
    }

    tracing::info!("Data purge job completed");
    Ok(())
}
