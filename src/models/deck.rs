//! Deck model — a named deck owned by a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClassName, DeckId, UserId};

/// A user's deck, tagged with its class.
///
/// Every match record references one of its owner's decks; deleting a deck
/// cascades to delete all of its records (enforced at the handler layer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Unique identifier
    pub id: DeckId,

    /// Owning user
    pub user_id: UserId,

    /// Class this deck belongs to
    pub class: ClassName,

    /// Free-text deck name
    pub name: String,

    /// When this deck was created
    pub created_at: DateTime<Utc>,
}

impl Deck {
    /// Create a new Deck with a fresh ID.
    pub fn new(user_id: UserId, class: ClassName, name: String) -> Self {
        Self {
            id: DeckId::random(),
            user_id,
            class,
            name,
            created_at: Utc::now(),
        }
    }
}
