// Library exports for the api binary, the purge tool and tests
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::PgPool;

use config::Config;
use db::Stores;
use services::{
    clients::ClientService, offerings::OfferingService, reviews::ReviewService,
    sessions::SessionService, trainers::TrainerService,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// `None` when running on the in-memory store.
    pub db: Option<PgPool>,
    pub config: Arc<Config>,
    pub clients: Arc<ClientService>,
    pub trainers: Arc<TrainerService>,
    pub reviews: Arc<ReviewService>,
    pub offerings: Arc<OfferingService>,
    pub sessions: Arc<SessionService>,
}

impl AppState {
    pub fn new(config: Arc<Config>, stores: Stores, db: Option<PgPool>) -> Self {
        Self {
            db,
            config,
            clients: Arc::new(ClientService::new(stores.clients.clone(), stores.reviews.clone())),
            trainers: Arc::new(TrainerService::new(
                stores.trainers.clone(),
                stores.reviews.clone(),
                stores.sessions.clone(),
                stores.offerings.clone(),
            )),
            reviews: Arc::new(ReviewService::new(
                stores.reviews.clone(),
                stores.clients.clone(),
                stores.trainers.clone(),
            )),
            offerings: Arc::new(OfferingService::new(
                stores.offerings.clone(),
                stores.trainers.clone(),
            )),
            sessions: Arc::new(SessionService::new(
                stores.sessions,
                stores.clients,
                stores.trainers,
            )),
        }
    }

    /// Fresh in-memory state, used by `STORAGE=memory` and tests.
    pub fn in_memory(config: Config) -> Self {
        Self::new(Arc::new(config), Stores::memory(), None)
    }
}
