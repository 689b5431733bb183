//! REST API endpoints.
//!
//! Axum-based HTTP API for recording matches, managing decks and seasons,
//! and reading personal/global statistics. Read paths treat an empty store
//! as "no data yet", never as an error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod routes;
pub mod state;

use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::storage::StorageError> for ApiError {
    fn from(e: crate::storage::StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    Router::new()
        .route(
            "/api/records",
            get(routes::records::list_records).post(routes::records::create_record),
        )
        .route(
            "/api/records/:id",
            put(routes::records::update_record).delete(routes::records::delete_record),
        )
        .route(
            "/api/decks",
            get(routes::decks::list_decks).post(routes::decks::create_deck),
        )
        .route("/api/decks/:id", axum::routing::delete(routes::decks::delete_deck))
        .route(
            "/api/seasons",
            get(routes::seasons::list_seasons).post(routes::seasons::create_season),
        )
        .route("/api/seasons/:id", get(routes::seasons::get_season))
        .route(
            "/api/seasons/:id/templates",
            put(routes::seasons::replace_templates),
        )
        .route("/api/stats/personal", get(routes::stats::personal_stats))
        .route("/api/stats/global", get(routes::stats::global_stats))
        .route("/api/aggregate", post(routes::aggregate::trigger_aggregation))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
