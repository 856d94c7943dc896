use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sportlink_api::{
    config::{Config, ConfigError, StorageBackend},
    db::{self, Stores},
    routes, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sportlink_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let state = match config.storage {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let pool = db::create_pool(database_url, config.database_max_connections).await?;
            db::run_migrations(&pool).await?;
            info!("Database connected and migrations applied");
            AppState::new(config.clone(), Stores::postgres(&pool), Some(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage, data is lost on restart");
            AppState::new(config.clone(), Stores::memory(), None)
        }
    };

    let app = routes::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("SportLink API listening on {} (prefix {:?})", addr, config.api_prefix);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
