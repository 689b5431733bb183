//! Match record endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ClassName, MatchRecord, MatchRecordEdit};
use crate::storage::{CollectionKind, JsonlCollection};

#[derive(Debug, Deserialize)]
pub struct ListRecordsParams {
    pub user_id: Option<String>,
    pub deck_id: Option<String>,
    pub season_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub records: Vec<MatchRecord>,
    pub total: u32,
}

pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<ListRecordsParams>,
) -> Result<Json<RecordsResponse>, ApiError> {
    let coll: JsonlCollection<MatchRecord> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::MatchRecords);

    let records = coll.scan_where(|r| {
        params
            .user_id
            .as_deref()
            .map_or(true, |id| r.user_id.as_str() == id)
            && params
                .deck_id
                .as_deref()
                .map_or(true, |id| r.deck_id.as_str() == id)
            && params
                .season_id
                .as_deref()
                .map_or(true, |id| r.season_id.as_str() == id)
    })?;

    let total = records.len() as u32;
    Ok(Json(RecordsResponse { records, total }))
}

#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    pub user_id: String,
    pub deck_id: String,
    pub season_id: String,
    pub opponent_class: ClassName,
    pub opponent_deck_type: String,
    pub is_first_player: bool,
    pub is_win: bool,
}

pub async fn create_record(
    State(state): State<AppState>,
    Json(req): Json<CreateRecordRequest>,
) -> Result<Json<MatchRecord>, ApiError> {
    // Referential integrity is the application's job: the deck must exist
    // and belong to the same user.
    let decks: JsonlCollection<crate::models::Deck> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::Decks);
    let deck = decks
        .get(&req.deck_id)?
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown deck: {}", req.deck_id)))?;
    if deck.user_id.as_str() != req.user_id {
        return Err(ApiError::BadRequest(
            "Deck does not belong to this user".to_string(),
        ));
    }

    let record = MatchRecord::new(
        req.user_id.into(),
        req.deck_id.into(),
        req.season_id.into(),
        req.opponent_class,
        req.opponent_deck_type,
        req.is_first_player,
        req.is_win,
    );

    let coll: JsonlCollection<MatchRecord> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::MatchRecords);
    coll.append(&record)?;

    Ok(Json(record))
}

pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(edit): Json<MatchRecordEdit>,
) -> Result<Json<MatchRecord>, ApiError> {
    let coll: JsonlCollection<MatchRecord> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::MatchRecords);

    let mut record = coll
        .get(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("Record {}", id)))?;

    record.apply_edit(edit);
    coll.put(&record)?;

    Ok(Json(record))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let coll: JsonlCollection<MatchRecord> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::MatchRecords);

    let deleted = coll.delete(&id)?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Record {}", id)));
    }
    Ok(Json(DeleteResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_util::{delete, get_json, post_json, put_json, setup_state};
    use crate::models::{ClassName, Deck};
    use crate::storage::{CollectionKind, JsonlCollection};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_create_and_list_records() {
        let (tmp, state) = setup_state();
        let deck = Deck::new("user-1".into(), ClassName::Elf, "アグロエルフ".to_string());
        let decks: JsonlCollection<Deck> =
            JsonlCollection::for_kind(&state.storage, CollectionKind::Decks);
        decks.put(&deck).unwrap();

        let app = crate::api::build_router(state.clone());
        let body = serde_json::json!({
            "user_id": "user-1",
            "deck_id": deck.id.as_str(),
            "season_id": "season-1",
            "opponent_class": "ロイヤル",
            "opponent_deck_type": "ミッドレンジロイヤル",
            "is_first_player": true,
            "is_win": true,
        });
        let (status, json) = post_json(app, "/api/records", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["opponent_class"], "ロイヤル");

        let app = crate::api::build_router(state);
        let (status, json) = get_json(app, "/api/records?user_id=user-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 1);
        drop(tmp);
    }

    #[tokio::test]
    async fn test_create_record_unknown_deck_rejected() {
        let (_tmp, state) = setup_state();
        let app = crate::api::build_router(state);

        let body = serde_json::json!({
            "user_id": "user-1",
            "deck_id": "no-such-deck",
            "season_id": "season-1",
            "opponent_class": "ロイヤル",
            "opponent_deck_type": "x",
            "is_first_player": true,
            "is_win": true,
        });
        let (status, json) = post_json(app, "/api/records", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_create_record_wrong_owner_rejected() {
        let (_tmp, state) = setup_state();
        let deck = Deck::new("someone-else".into(), ClassName::Elf, "deck".to_string());
        let decks: JsonlCollection<Deck> =
            JsonlCollection::for_kind(&state.storage, CollectionKind::Decks);
        decks.put(&deck).unwrap();

        let app = crate::api::build_router(state);
        let body = serde_json::json!({
            "user_id": "user-1",
            "deck_id": deck.id.as_str(),
            "season_id": "season-1",
            "opponent_class": "ロイヤル",
            "opponent_deck_type": "x",
            "is_first_player": true,
            "is_win": true,
        });
        let (status, _) = post_json(app, "/api/records", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_record_replaces_result_fields() {
        let (_tmp, state) = setup_state();
        let deck = Deck::new("user-1".into(), ClassName::Elf, "deck".to_string());
        let decks: JsonlCollection<Deck> =
            JsonlCollection::for_kind(&state.storage, CollectionKind::Decks);
        decks.put(&deck).unwrap();

        let app = crate::api::build_router(state.clone());
        let body = serde_json::json!({
            "user_id": "user-1",
            "deck_id": deck.id.as_str(),
            "season_id": "season-1",
            "opponent_class": "ロイヤル",
            "opponent_deck_type": "x",
            "is_first_player": true,
            "is_win": true,
        });
        let (_, created) = post_json(app, "/api/records", body).await;
        let id = created["id"].as_str().unwrap().to_string();

        let app = crate::api::build_router(state);
        let edit = serde_json::json!({
            "opponent_class": "ウィッチ",
            "opponent_deck_type": "超越ウィッチ",
            "is_first_player": false,
            "is_win": false,
        });
        let (status, json) = put_json(app, &format!("/api/records/{}", id), edit).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["opponent_class"], "ウィッチ");
        assert_eq!(json["is_win"], false);
        assert_eq!(json["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_update_missing_record_is_404() {
        let (_tmp, state) = setup_state();
        let app = crate::api::build_router(state);
        let edit = serde_json::json!({
            "opponent_class": "ウィッチ",
            "opponent_deck_type": "x",
            "is_first_player": false,
            "is_win": false,
        });
        let (status, _) = put_json(app, "/api/records/nope", edit).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_record() {
        let (_tmp, state) = setup_state();
        let deck = Deck::new("user-1".into(), ClassName::Elf, "deck".to_string());
        let decks: JsonlCollection<Deck> =
            JsonlCollection::for_kind(&state.storage, CollectionKind::Decks);
        decks.put(&deck).unwrap();

        let app = crate::api::build_router(state.clone());
        let body = serde_json::json!({
            "user_id": "user-1",
            "deck_id": deck.id.as_str(),
            "season_id": "season-1",
            "opponent_class": "ロイヤル",
            "opponent_deck_type": "x",
            "is_first_player": true,
            "is_win": true,
        });
        let (_, created) = post_json(app, "/api/records", body).await;
        let id = created["id"].as_str().unwrap().to_string();

        let app = crate::api::build_router(state.clone());
        let (status, _) = delete(app, &format!("/api/records/{}", id)).await;
        assert_eq!(status, StatusCode::OK);

        let app = crate::api::build_router(state);
        let (_, json) = get_json(app, "/api/records").await;
        assert_eq!(json["total"], 0);
    }
}
