//! Record classification — pure functions mapping a match record to its
//! dimension keys.

use std::collections::{HashMap, HashSet};

use crate::models::{ClassName, Deck, MatchRecord};

/// Turn-order key for the persisted turnOrder dimension.
pub const FIRST_PLAYER_KEY: &str = "first";
pub const SECOND_PLAYER_KEY: &str = "second";

/// Classification outcome for the deck-archetype dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckTypeKey {
    /// Either the known archetype name or the per-class other label
    pub key: String,
    /// True when the deck type did not match any active template
    pub is_others: bool,
}

/// The per-class fallback label for untracked archetypes.
pub fn others_label(class: ClassName) -> String {
    format!("その他（{}）", class)
}

/// Classify a record's opponent deck type against the season's known
/// archetypes. Unknown types are bucketed per opponent class, never merged
/// into one global bucket.
pub fn deck_type_key(
    record: &MatchRecord,
    known_templates: &HashMap<ClassName, HashSet<String>>,
) -> DeckTypeKey {
    let known = known_templates
        .get(&record.opponent_class)
        .map(|names| names.contains(&record.opponent_deck_type))
        .unwrap_or(false);

    if known {
        DeckTypeKey {
            key: record.opponent_deck_type.clone(),
            is_others: false,
        }
    } else {
        DeckTypeKey {
            key: others_label(record.opponent_class),
            is_others: true,
        }
    }
}

/// Two-sided matchup key: the recording user's own class versus the
/// opponent's class.
pub fn matchup_key(my_class: ClassName, opponent_class: ClassName) -> String {
    format!("{} vs {}", my_class, opponent_class)
}

/// Turn-order key from the record's first-player flag.
pub fn turn_order_key(record: &MatchRecord) -> &'static str {
    if record.is_first_player {
        FIRST_PLAYER_KEY
    } else {
        SECOND_PLAYER_KEY
    }
}

/// Build the deck id → class lookup used to resolve a record's own class.
pub fn deck_class_lookup(decks: &[Deck]) -> HashMap<&str, ClassName> {
    decks.iter().map(|d| (d.id.as_str(), d.class)).collect()
}

/// Resolve a record's own class via its deck. None when the deck no longer
/// exists; such records are skipped for the matchup dimension only.
pub fn resolve_my_class(
    record: &MatchRecord,
    deck_classes: &HashMap<&str, ClassName>,
) -> Option<ClassName> {
    deck_classes.get(record.deck_id.as_str()).copied()
}
