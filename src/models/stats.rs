//! Statistic models: the rollup primitive, personal stat breakdowns, and
//! persisted aggregation rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ClassName, SeasonId, StatId};

/// The universal statistic primitive: games, wins, losses, win rate.
///
/// `win_rate` is a percentage in 0–100, rounded to one decimal place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rollup {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
}

/// Per-opponent-class rollup in a personal stats response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassStat {
    pub class: ClassName,
    #[serde(flatten)]
    pub rollup: Rollup,
}

/// Per-deck-archetype rollup in a personal stats response, with the
/// turn-order split nested inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckTypeStat {
    /// Raw opponent deck type string as recorded
    pub deck_type: String,
    #[serde(flatten)]
    pub rollup: Rollup,
    /// Rollup over the subset where the owner went first
    pub first_player_stats: Rollup,
    /// Rollup over the subset where the owner went second
    pub second_player_stats: Rollup,
}

/// A single user's statistics over a filtered record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalStats {
    pub overall: Rollup,
    /// Always exactly seven entries, one per class, zero-filled when absent.
    pub by_class: Vec<ClassStat>,
    pub by_deck_type: Vec<DeckTypeStat>,
}

/// The dimension a persisted aggregate row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatsType {
    #[serde(rename = "class")]
    Class,
    #[serde(rename = "deck")]
    Deck,
    #[serde(rename = "matchup")]
    Matchup,
    #[serde(rename = "turnOrder")]
    TurnOrder,
}

impl StatsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsType::Class => "class",
            StatsType::Deck => "deck",
            StatsType::Matchup => "matchup",
            StatsType::TurnOrder => "turnOrder",
        }
    }
}

impl fmt::Display for StatsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dimension-specific payload carried alongside an aggregate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatMetadata {
    Matchup {
        my_class: ClassName,
        opponent_class: ClassName,
    },
    Deck {
        deck_name: String,
        class_name: ClassName,
        #[serde(default)]
        is_others: bool,
    },
    Class {
        class_name: ClassName,
    },
}

/// One persisted global-aggregation row: (season, dimension, key) → rollup.
///
/// The full row set for a season is replaced wholesale on every aggregation
/// run; rows are never patched individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedStat {
    /// `<seasonId>#<statsType>#<statsKey>`, unique per run
    pub id: StatId,

    /// Season this row belongs to
    pub season_id: SeasonId,

    /// Season name, denormalized at aggregation time
    pub season_name: String,

    /// Dimension
    pub stats_type: StatsType,

    /// Dimension-specific key, e.g. a class name or "エルフ vs ロイヤル"
    pub stats_key: String,

    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,

    /// Percentage in 0–100, one decimal place
    pub win_rate: f64,

    /// Dimension-specific structured payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<StatMetadata>,

    /// Execution timestamp of the job that produced this row
    pub updated_at: DateTime<Utc>,
}

impl AggregatedStat {
    /// Composite row id. Season-scoped so reruns overwrite rather than
    /// collide across seasons or dimensions.
    pub fn row_id(season_id: &SeasonId, stats_type: StatsType, stats_key: &str) -> StatId {
        StatId::new(format!("{}#{}#{}", season_id, stats_type.as_str(), stats_key))
    }

    /// Build a row from a computed rollup.
    pub fn from_rollup(
        season_id: SeasonId,
        season_name: String,
        stats_type: StatsType,
        stats_key: String,
        rollup: Rollup,
        metadata: Option<StatMetadata>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Self::row_id(&season_id, stats_type, &stats_key),
            season_id,
            season_name,
            stats_type,
            stats_key,
            total_games: rollup.total_games,
            wins: rollup.wins,
            losses: rollup.losses,
            win_rate: rollup.win_rate,
            metadata,
            updated_at,
        }
    }
}
