//! Season and deck-template endpoints.

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ClassName, DeckTemplate, Season};
use crate::storage::{CollectionKind, JsonlCollection};

#[derive(Debug, Serialize)]
pub struct SeasonsResponse {
    pub seasons: Vec<Season>,
    pub total: u32,
}

pub async fn list_seasons(
    State(state): State<AppState>,
) -> Result<Json<SeasonsResponse>, ApiError> {
    let coll: JsonlCollection<Season> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::Seasons);
    let seasons = coll.scan_all()?;
    let total = seasons.len() as u32;
    Ok(Json(SeasonsResponse { seasons, total }))
}

pub async fn get_season(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Season>, ApiError> {
    let coll: JsonlCollection<Season> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::Seasons);
    let season = coll
        .get(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("Season {}", id)))?;
    Ok(Json(season))
}

#[derive(Debug, Deserialize)]
pub struct CreateSeasonRequest {
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

pub async fn create_season(
    State(state): State<AppState>,
    Json(req): Json<CreateSeasonRequest>,
) -> Result<Json<Season>, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Season name must not be empty".to_string(),
        ));
    }

    let mut season = Season::new(req.name);
    season.start_date = req.start_date;
    season.end_date = req.end_date;

    let coll: JsonlCollection<Season> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::Seasons);
    coll.append(&season)?;

    Ok(Json(season))
}

#[derive(Debug, Deserialize)]
pub struct TemplateInput {
    pub class: ClassName,
    pub deck_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ReplaceTemplatesRequest {
    pub templates: Vec<TemplateInput>,
}

/// Replace a season's template list wholesale. Templates have no per-item
/// endpoint; the list is always rewritten as a unit.
pub async fn replace_templates(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReplaceTemplatesRequest>,
) -> Result<Json<Season>, ApiError> {
    let coll: JsonlCollection<Season> =
        JsonlCollection::for_kind(&state.storage, CollectionKind::Seasons);
    let mut season = coll
        .get(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("Season {}", id)))?;

    let templates: Vec<DeckTemplate> = req
        .templates
        .into_iter()
        .map(|t| {
            let mut template = DeckTemplate::new(season.id.clone(), t.class, t.deck_name);
            template.description = t.description;
            template.display_order = t.display_order;
            template.is_active = t.is_active;
            template
        })
        .collect();

    info!(season = %season.id, count = templates.len(), "Replacing template list");

    season.set_templates(&templates);
    coll.put(&season)?;

    Ok(Json(season))
}

#[cfg(test)]
mod tests {
    use crate::api::test_util::{get_json, post_json, put_json, setup_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_create_and_get_season() {
        let (_tmp, state) = setup_state();

        let app = crate::api::build_router(state.clone());
        let body = serde_json::json!({
            "name": "2026年8月シーズン",
            "start_date": "2026-08-01",
            "end_date": "2026-08-31",
        });
        let (status, created) = post_json(app, "/api/seasons", body).await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_str().unwrap().to_string();

        let app = crate::api::build_router(state);
        let (status, json) = get_json(app, &format!("/api/seasons/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "2026年8月シーズン");
        assert_eq!(json["start_date"], "2026-08-01");
    }

    #[tokio::test]
    async fn test_create_season_empty_name_rejected() {
        let (_tmp, state) = setup_state();
        let app = crate::api::build_router(state);
        let (status, _) = post_json(app, "/api/seasons", serde_json::json!({"name": ""})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_seasons() {
        let (_tmp, state) = setup_state();
        for name in ["第1シーズン", "第2シーズン"] {
            let app = crate::api::build_router(state.clone());
            post_json(app, "/api/seasons", serde_json::json!({"name": name})).await;
        }
        let app = crate::api::build_router(state);
        let (status, json) = get_json(app, "/api/seasons").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 2);
    }

    #[tokio::test]
    async fn test_replace_templates_rewrites_list() {
        let (_tmp, state) = setup_state();

        let app = crate::api::build_router(state.clone());
        let (_, created) =
            post_json(app, "/api/seasons", serde_json::json!({"name": "s"})).await;
        let id = created["id"].as_str().unwrap().to_string();

        let app = crate::api::build_router(state.clone());
        let body = serde_json::json!({
            "templates": [
                {"class": "エルフ", "deck_name": "アグロエルフ"},
                {"class": "ウィッチ", "deck_name": "超越ウィッチ", "is_active": false},
            ]
        });
        let (status, json) = put_json(app, &format!("/api/seasons/{}/templates", id), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["deck_templates"].as_array().unwrap().len(), 2);
        assert_eq!(json["deck_templates"][1]["is_active"], false);

        // A second PUT replaces, never appends.
        let app = crate::api::build_router(state.clone());
        let body = serde_json::json!({
            "templates": [
                {"class": "ロイヤル", "deck_name": "ミッドレンジロイヤル"},
            ]
        });
        let (status, json) = put_json(app, &format!("/api/seasons/{}/templates", id), body).await;
        assert_eq!(status, StatusCode::OK);
        let templates = json["deck_templates"].as_array().unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0]["deck_name"], "ミッドレンジロイヤル");
    }

    #[tokio::test]
    async fn test_replace_templates_missing_season_is_404() {
        let (_tmp, state) = setup_state();
        let app = crate::api::build_router(state);
        let body = serde_json::json!({"templates": []});
        let (status, _) = put_json(app, "/api/seasons/nope/templates", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
