pub mod crud;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Entity routes under `{api_prefix}/{Entidad}`, plus `/health`.
pub fn router(state: AppState) -> Router {
    let prefix = state.config.api_prefix.clone();
    let body_limit = state.config.body_limit_mb * 1024 * 1024;

    // Any origin may call the API, as the web frontend is served separately
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .nest(&format!("{prefix}/Cliente"), crud::routes(state.clients.clone()))
        .nest(&format!("{prefix}/Entrenador"), crud::routes(state.trainers.clone()))
        .nest(&format!("{prefix}/Resenia"), crud::routes(state.reviews.clone()))
        .nest(&format!("{prefix}/Servicio"), crud::routes(state.offerings.clone()))
        .nest(&format!("{prefix}/Sesion"), crud::routes(state.sessions.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
