//! Deck endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ClassName, Deck, MatchRecord};
use crate::storage::{CollectionKind, JsonlCollection};

#[derive(Debug, Deserialize)]
pub struct ListDecksParams {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DecksResponse {
    pub decks: Vec<Deck>,
    pub total: u32,
}

pub async fn list_decks(
    State(state): State<AppState>,
    Query(params): Query<ListDecksParams>,
) -> Result<Json<DecksResponse>, ApiError> {
    let coll: JsonlCollection<Deck> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::Decks);
    let decks = coll.scan_where(|d| {
        params
            .user_id
            .as_deref()
            .map_or(true, |id| d.user_id.as_str() == id)
    })?;
    let total = decks.len() as u32;
    Ok(Json(DecksResponse { decks, total }))
}

#[derive(Debug, Deserialize)]
pub struct CreateDeckRequest {
    pub user_id: String,
    pub class: ClassName,
    pub name: String,
}

pub async fn create_deck(
    State(state): State<AppState>,
    Json(req): Json<CreateDeckRequest>,
) -> Result<Json<Deck>, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Deck name must not be empty".to_string()));
    }

    let deck = Deck::new(req.user_id.into(), req.class, req.name);
    let coll: JsonlCollection<Deck> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::Decks);
    coll.append(&deck)?;

    Ok(Json(deck))
}

#[derive(Debug, Serialize)]
pub struct DeleteDeckResponse {
    pub deleted: bool,
    /// Records removed by the cascade
    pub records_deleted: u32,
}

/// Delete a deck and cascade to all of its match records.
pub async fn delete_deck(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteDeckResponse>, ApiError> {
    let decks: JsonlCollection<Deck> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::Decks);

    let deleted = decks.delete(&id)?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Deck {}", id)));
    }

    let records: JsonlCollection<MatchRecord> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::MatchRecords);
    let records_deleted = records.delete_where(|r| r.deck_id.as_str() == id)? as u32;

    info!(deck = %id, records_deleted, "Deck deleted with cascade");

    Ok(Json(DeleteDeckResponse {
        deleted,
        records_deleted,
    }))
}
