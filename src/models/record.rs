//! Match record model — one recorded game outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClassName, DeckId, RecordId, SeasonId, UserId};

/// A single recorded match, owned by the user who played it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique identifier
    pub id: RecordId,

    /// Owning user
    pub user_id: UserId,

    /// The user's deck used in the match
    pub deck_id: DeckId,

    /// Competitive season during which the match occurred
    pub season_id: SeasonId,

    /// Opponent's class
    pub opponent_class: ClassName,

    /// Opponent's deck archetype, free text. Whether it matches a season
    /// template is decided by the classification layer, not here.
    pub opponent_deck_type: String,

    /// Whether the record's owner went first
    pub is_first_player: bool,

    /// Whether the record's owner won
    pub is_win: bool,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Create a new MatchRecord with a fresh ID.
    pub fn new(
        user_id: UserId,
        deck_id: DeckId,
        season_id: SeasonId,
        opponent_class: ClassName,
        opponent_deck_type: String,
        is_first_player: bool,
        is_win: bool,
    ) -> Self {
        Self {
            id: RecordId::random(),
            user_id,
            deck_id,
            season_id,
            opponent_class,
            opponent_deck_type,
            is_first_player,
            is_win,
            created_at: Utc::now(),
        }
    }

    /// Replace the user-editable fields. Identity, ownership, and the
    /// creation timestamp never change after the fact.
    pub fn apply_edit(&mut self, edit: MatchRecordEdit) {
        self.opponent_class = edit.opponent_class;
        self.opponent_deck_type = edit.opponent_deck_type;
        self.is_first_player = edit.is_first_player;
        self.is_win = edit.is_win;
    }
}

/// The fields a user may change on an existing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecordEdit {
    pub opponent_class: ClassName,
    pub opponent_deck_type: String,
    pub is_first_player: bool,
    pub is_win: bool,
}
