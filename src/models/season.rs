//! Season model — a competitive period with its curated deck templates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ClassName, SeasonId, TemplateId};

/// A curated (class, archetype-name) pair registered for a season.
///
/// Templates decide whether an opponent's free-text deck type counts as a
/// known archetype or falls into the per-class other bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckTemplate {
    /// Unique identifier
    pub id: TemplateId,

    /// Owning season
    pub season_id: SeasonId,

    /// Class the archetype belongs to
    pub class: ClassName,

    /// Archetype name, e.g. "アグロエルフ"
    pub deck_name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional display-order position
    #[serde(default)]
    pub display_order: Option<i32>,

    /// Inactive templates are excluded from known-archetype matching but
    /// retained for history.
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// When this template was created
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl DeckTemplate {
    /// Create a new active template for a season.
    pub fn new(season_id: SeasonId, class: ClassName, deck_name: String) -> Self {
        let id = TemplateId::generate(&[season_id.as_str(), class.as_str(), &deck_name]);
        Self {
            id,
            season_id,
            class,
            deck_name,
            description: None,
            display_order: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Outcome of parsing a season's embedded template payload.
///
/// The payload may arrive either as a structured JSON array or as a JSON
/// string containing serialized JSON. Anything malformed is treated as an
/// empty list; the tolerance lives here and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedTemplates {
    Ok(Vec<DeckTemplate>),
    Empty,
}

impl ParsedTemplates {
    /// The template list, empty when the payload was absent or malformed.
    pub fn into_vec(self) -> Vec<DeckTemplate> {
        match self {
            ParsedTemplates::Ok(list) => list,
            ParsedTemplates::Empty => Vec::new(),
        }
    }
}

/// A competitive period scoping match records and their known archetypes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    /// Unique identifier
    pub id: SeasonId,

    /// Human-readable name, e.g. "2026年8月シーズン"
    pub name: String,

    /// Start of the period (None if open)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// End of the period (None if current)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Embedded ordered template list, stored as one structured field.
    /// Either a JSON array of templates or a string of serialized JSON.
    #[serde(default)]
    pub deck_templates: serde_json::Value,
}

impl Season {
    /// Create a new Season with a fresh ID and no templates.
    pub fn new(name: String) -> Self {
        Self {
            id: SeasonId::random(),
            name,
            start_date: None,
            end_date: None,
            deck_templates: serde_json::Value::Null,
        }
    }

    /// Replace the entire template list. Templates have no per-item
    /// persistence; edits always rewrite the list as a unit.
    pub fn set_templates(&mut self, templates: &[DeckTemplate]) {
        self.deck_templates = serde_json::to_value(templates).unwrap_or(serde_json::Value::Null);
    }

    /// Parse the embedded template payload.
    ///
    /// Returns `Empty` for null/missing payloads and for anything that does
    /// not deserialize; a malformed payload is logged and never fatal.
    pub fn parse_templates(&self) -> ParsedTemplates {
        let value = match &self.deck_templates {
            serde_json::Value::Null => return ParsedTemplates::Empty,
            // Tolerate the serialized-string shape.
            serde_json::Value::String(s) => match serde_json::from_str::<serde_json::Value>(s) {
                Ok(v) => v,
                Err(e) => {
                    warn!(season = %self.id, "Malformed template payload: {}", e);
                    return ParsedTemplates::Empty;
                }
            },
            other => other.clone(),
        };

        match serde_json::from_value::<Vec<DeckTemplate>>(value) {
            Ok(list) => ParsedTemplates::Ok(list),
            Err(e) => {
                warn!(season = %self.id, "Template list did not deserialize: {}", e);
                ParsedTemplates::Empty
            }
        }
    }
}
