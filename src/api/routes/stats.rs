//! Statistics read endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::personal::{compose_personal_stats, filter_records};
use crate::models::{AggregatedStat, MatchRecord, PersonalStats};
use crate::storage::{CollectionKind, JsonlCollection};

#[derive(Debug, Deserialize)]
pub struct PersonalStatsParams {
    pub user_id: String,
    pub deck_id: Option<String>,
    pub season_id: Option<String>,
}

/// Personal statistics, computed on read from the caller's records.
pub async fn personal_stats(
    State(state): State<AppState>,
    Query(params): Query<PersonalStatsParams>,
) -> Result<Json<PersonalStats>, ApiError> {
    let coll: JsonlCollection<MatchRecord> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::MatchRecords);
    let records = coll.scan_where(|r| r.user_id.as_str() == params.user_id)?;

    let filtered = filter_records(
        &records,
        params.deck_id.as_deref(),
        params.season_id.as_deref(),
    );

    Ok(Json(compose_personal_stats(&filtered)))
}

#[derive(Debug, Deserialize)]
pub struct GlobalStatsParams {
    pub season_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GlobalStatsResponse {
    pub stats: Vec<AggregatedStat>,
    pub total: u32,
}

/// Persisted global aggregates, as written by the last aggregation run.
/// An empty store means no run has happened yet and yields an empty list.
pub async fn global_stats(
    State(state): State<AppState>,
    Query(params): Query<GlobalStatsParams>,
) -> Result<Json<GlobalStatsResponse>, ApiError> {
    let coll: JsonlCollection<AggregatedStat> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::AggregatedStats);
    let stats = coll.scan_where(|s| {
        params
            .season_id
            .as_deref()
            .map_or(true, |id| s.season_id.as_str() == id)
    })?;
    let total = stats.len() as u32;
    Ok(Json(GlobalStatsResponse { stats, total }))
}
