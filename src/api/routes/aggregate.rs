//! Aggregation trigger endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::aggregate::{run_aggregation, AggregationStores};
use crate::api::state::AppState;

#[derive(Debug, Serialize)]
struct AggregationFailure {
    message: String,
    error: String,
}

/// Run the global aggregation job synchronously and report its summary.
/// The job reads flat files; it runs on the blocking pool.
pub async fn trigger_aggregation(State(state): State<AppState>) -> Response {
    let storage = state.storage.clone();
    let result = tokio::task::spawn_blocking(move || {
        let stores = AggregationStores::from_config(&storage);
        run_aggregation(&stores)
    })
    .await;

    match result {
        Ok(Ok(summary)) => (StatusCode::OK, Json(summary)).into_response(),
        Ok(Err(e)) => {
            error!("Aggregation run failed: {}", e);
            let body = AggregationFailure {
                message: "集計処理でエラーが発生しました".to_string(),
                error: e.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
        Err(e) => {
            error!("Aggregation task panicked: {}", e);
            let body = AggregationFailure {
                message: "集計処理でエラーが発生しました".to_string(),
                error: e.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
