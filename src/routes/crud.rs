//! The six endpoints every entity exposes. Handlers only translate between
//! HTTP and [`EntityService`]; status codes follow the published API,
//! including 201 on update and 204 on both deletes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::services::EntityService;

type ApiError = (StatusCode, Json<Value>);

pub fn routes<V, S>(service: Arc<V>) -> Router<S>
where
    V: EntityService,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/obtenerTodos", get(list::<V>))
        .route("/obtener/{pk}", get(get_one::<V>))
        .route("/crear", post(create::<V>))
        .route("/actualizar", put(update::<V>))
        .route("/eliminarTodos", delete(delete_all::<V>))
        .route("/eliminar/{pk}", delete(delete_one::<V>))
        .with_state(service)
}

fn internal_error(e: anyhow::Error) -> ApiError {
    tracing::error!("request failed: {e:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

async fn list<V: EntityService>(
    State(service): State<Arc<V>>,
) -> Result<Json<Vec<V::Payload>>, ApiError> {
    service.list().await.map(Json).map_err(internal_error)
}

/// An unknown key answers 200 with an empty body.
async fn get_one<V: EntityService>(
    State(service): State<Arc<V>>,
    Path(pk): Path<i32>,
) -> Result<Response, ApiError> {
    match service.get(pk).await.map_err(internal_error)? {
        Some(payload) => Ok(Json(payload).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}

async fn create<V: EntityService>(
    State(service): State<Arc<V>>,
    Json(body): Json<V::Payload>,
) -> Result<(StatusCode, Json<V::Payload>), ApiError> {
    service
        .create(body)
        .await
        .map(|payload| (StatusCode::CREATED, Json(payload)))
        .map_err(internal_error)
}

async fn update<V: EntityService>(
    State(service): State<Arc<V>>,
    Json(body): Json<V::Payload>,
) -> Result<(StatusCode, Json<V::Payload>), ApiError> {
    service
        .update(body)
        .await
        .map(|payload| (StatusCode::CREATED, Json(payload)))
        .map_err(internal_error)
}

async fn delete_all<V: EntityService>(State(service): State<Arc<V>>) -> StatusCode {
    let removed = service.delete_all().await;
    tracing::debug!(entity = V::NAME, removed, "delete all handled");
    StatusCode::NO_CONTENT
}

async fn delete_one<V: EntityService>(
    State(service): State<Arc<V>>,
    Path(pk): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let removed = service.delete(pk).await.map_err(internal_error)?;
    tracing::debug!(entity = V::NAME, pk, removed, "delete handled");
    Ok(StatusCode::NO_CONTENT)
}
