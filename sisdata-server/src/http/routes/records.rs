//! Record endpoints
//!
//! - `/records`: GET list, POST create
//! - `/records/{id}`: GET fetch, PUT full replace, DELETE remove
//!
//! Both answer OPTIONS with an empty 200; any other verb is a 405.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, RecordId};
use crate::http::server::AppState;
use crate::record::Record;

/// Body of a successful create
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// GET /records - list every record
async fn list_records(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.records.list().await?;
    Ok(Json(records))
}

/// POST /records - create a record with a caller-chosen id
async fn create_record(
    State(state): State<Arc<AppState>>,
    JsonBody(record): JsonBody<Record>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state.records.create(record).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /records/{id}
async fn get_record(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<Record>, ApiError> {
    let record = state.records.get(id).await?;
    Ok(Json(record))
}

/// PUT /records/{id} - the path id wins over any id in the body
async fn update_record(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    JsonBody(record): JsonBody<Record>,
) -> Result<StatusCode, ApiError> {
    state.records.update(record.with_id(id)).await?;
    Ok(StatusCode::OK)
}

/// DELETE /records/{id}
async fn delete_record(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    state.records.delete(id).await?;
    Ok(StatusCode::OK)
}

/// OPTIONS - preflight, headers come from the cross-origin layer
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// HEAD - axum would otherwise answer it with the GET handler
async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

/// Record routes, relative to the API base path
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/records",
            get(list_records)
                .post(create_record)
                .options(preflight)
                .head(method_not_allowed),
        )
        .route(
            "/records/{*id}",
            get(get_record)
                .put(update_record)
                .delete(delete_record)
                .options(preflight)
                .head(method_not_allowed),
        )
}
