//! Global aggregation job.
//!
//! Batch recompute of site-wide statistics from the full match history:
//! 1. Scan all match records, decks, and seasons
//! 2. Join records to decks for the two-sided matchup dimension
//! 3. Per season: delete the previous row set, recompute the four
//!    dimensions, and persist the replacement in bounded batches
//!
//! The job is idempotent per invocation but not safely re-entrant; the
//! external trigger is expected to run it serially.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::calculate::classify::{
    deck_class_lookup, deck_type_key, matchup_key, resolve_my_class, turn_order_key,
    FIRST_PLAYER_KEY, SECOND_PLAYER_KEY,
};
use crate::calculate::rollup;
use crate::calculate::templates::resolve_known_templates;
use crate::models::{
    AggregatedStat, ClassName, Deck, MatchRecord, Season, StatMetadata, StatsType,
};
use crate::storage::{CollectionKind, JsonlCollection, StorageConfig, StorageError};

/// Store-imposed cap on rows per batched write.
pub const WRITE_BATCH_SIZE: usize = 25;

/// Errors that can occur during aggregation.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// The collections the job reads and writes, constructed explicitly and
/// passed in so tests can point them at a scratch directory.
pub struct AggregationStores {
    pub records: JsonlCollection<MatchRecord>,
    pub decks: JsonlCollection<Deck>,
    pub seasons: JsonlCollection<Season>,
    pub stats: JsonlCollection<AggregatedStat>,
}

impl AggregationStores {
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            records: JsonlCollection::for_kind(config, CollectionKind::MatchRecords),
            decks: JsonlCollection::for_kind(config, CollectionKind::Decks),
            seasons: JsonlCollection::for_kind(config, CollectionKind::Seasons),
            stats: JsonlCollection::for_kind(config, CollectionKind::AggregatedStats),
        }
    }
}

/// Outcome of one aggregation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationSummary {
    /// Seasons that had records and were recomputed
    pub processed_seasons: u32,
    /// Records contributing to the recomputed seasons
    pub total_records: u32,
    /// Seasons whose recompute failed; the rest of the batch still ran
    pub failed_seasons: u32,
}

/// Run the full aggregation batch.
///
/// Every registered season gets its previous rows deleted, so a season whose
/// records have all been removed ends up empty rather than stale. A failure
/// in one season is logged and does not abort the others; store scan failure
/// up front aborts the whole run.
pub fn run_aggregation(stores: &AggregationStores) -> Result<AggregationSummary, AggregateError> {
    let records = stores.records.scan_all()?;
    let decks = stores.decks.scan_all()?;
    let seasons = stores.seasons.scan_all()?;

    info!(
        records = records.len(),
        decks = decks.len(),
        seasons = seasons.len(),
        "Starting aggregation run"
    );

    let deck_classes = deck_class_lookup(&decks);
    let now = Utc::now();

    let mut by_season: HashMap<&str, Vec<&MatchRecord>> = HashMap::new();
    for record in &records {
        by_season
            .entry(record.season_id.as_str())
            .or_default()
            .push(record);
    }

    // Records whose season id matches no registered season have no template
    // context and no identity scope; they are skipped, not fatal.
    let registered: std::collections::HashSet<&str> =
        seasons.iter().map(|s| s.id.as_str()).collect();
    for (season_id, group) in &by_season {
        if !registered.contains(season_id) {
            warn!(
                season = season_id,
                count = group.len(),
                "Records reference an unregistered season; skipping them"
            );
        }
    }

    let mut summary = AggregationSummary::default();

    for season in &seasons {
        let season_records: Vec<&MatchRecord> = by_season
            .get(season.id.as_str())
            .cloned()
            .unwrap_or_default();

        match aggregate_season(stores, season, &season_records, &deck_classes, now) {
            Ok(written) => {
                if !season_records.is_empty() {
                    summary.processed_seasons += 1;
                    summary.total_records += season_records.len() as u32;
                }
                debug!(season = %season.id, rows = written, "Season aggregated");
            }
            Err(e) => {
                error!(season = %season.id, "Season aggregation failed: {}", e);
                summary.failed_seasons += 1;
            }
        }
    }

    info!(
        processed_seasons = summary.processed_seasons,
        total_records = summary.total_records,
        failed_seasons = summary.failed_seasons,
        "Aggregation run finished"
    );

    Ok(summary)
}

/// Replace one season's persisted rows: delete-then-rewrite, writes batched.
fn aggregate_season(
    stores: &AggregationStores,
    season: &Season,
    records: &[&MatchRecord],
    deck_classes: &HashMap<&str, ClassName>,
    now: DateTime<Utc>,
) -> Result<usize, AggregateError> {
    let season_id = season.id.clone();
    stores
        .stats
        .delete_where(|row| row.season_id == season_id)?;

    if records.is_empty() {
        return Ok(0);
    }

    let rows = compute_season_rows(season, records, deck_classes, now);
    for chunk in rows.chunks(WRITE_BATCH_SIZE) {
        stores.stats.put_many(chunk)?;
    }
    Ok(rows.len())
}

/// Compute the four dimension rollups for one season's records.
///
/// Pure; row order is deterministic so repeated runs over unchanged input
/// produce identical output apart from `updated_at`.
pub fn compute_season_rows(
    season: &Season,
    records: &[&MatchRecord],
    deck_classes: &HashMap<&str, ClassName>,
    now: DateTime<Utc>,
) -> Vec<AggregatedStat> {
    let known_templates = resolve_known_templates(season);
    let mut rows = Vec::new();

    let make_row = |stats_type, stats_key: String, group: &[&MatchRecord], metadata| {
        AggregatedStat::from_rollup(
            season.id.clone(),
            season.name.clone(),
            stats_type,
            stats_key,
            rollup(group.iter().copied()),
            metadata,
            now,
        )
    };

    // Class dimension: only classes that actually appear.
    for class in ClassName::ALL {
        let group: Vec<&MatchRecord> = records
            .iter()
            .copied()
            .filter(|r| r.opponent_class == class)
            .collect();
        if group.is_empty() {
            continue;
        }
        rows.push(make_row(
            StatsType::Class,
            class.as_str().to_string(),
            &group,
            Some(StatMetadata::Class { class_name: class }),
        ));
    }

    // Deck dimension: known archetypes keep their name, the rest land in the
    // per-class other bucket.
    let mut deck_groups: BTreeMap<String, (Vec<&MatchRecord>, ClassName, bool)> = BTreeMap::new();
    for record in records {
        let key = deck_type_key(record, &known_templates);
        let entry = deck_groups
            .entry(key.key)
            .or_insert_with(|| (Vec::new(), record.opponent_class, key.is_others));
        entry.0.push(record);
    }
    for (key, (group, class, is_others)) in &deck_groups {
        rows.push(make_row(
            StatsType::Deck,
            key.clone(),
            group,
            Some(StatMetadata::Deck {
                deck_name: key.clone(),
                class_name: *class,
                is_others: *is_others,
            }),
        ));
    }

    // Matchup dimension: two-sided, requires the deck join. Records whose
    // deck no longer exists are skipped here and only here.
    let mut matchup_groups: BTreeMap<String, (Vec<&MatchRecord>, ClassName, ClassName)> =
        BTreeMap::new();
    for record in records {
        let Some(my_class) = resolve_my_class(record, deck_classes) else {
            debug!(record = %record.id, deck = %record.deck_id, "Deck not found; record skipped for matchup");
            continue;
        };
        let key = matchup_key(my_class, record.opponent_class);
        let entry = matchup_groups
            .entry(key)
            .or_insert_with(|| (Vec::new(), my_class, record.opponent_class));
        entry.0.push(record);
    }
    for (key, (group, my_class, opponent_class)) in &matchup_groups {
        rows.push(make_row(
            StatsType::Matchup,
            key.clone(),
            group,
            Some(StatMetadata::Matchup {
                my_class: *my_class,
                opponent_class: *opponent_class,
            }),
        ));
    }

    // Turn-order dimension: only non-empty keys.
    for key in [FIRST_PLAYER_KEY, SECOND_PLAYER_KEY] {
        let group: Vec<&MatchRecord> = records
            .iter()
            .copied()
            .filter(|r| turn_order_key(r) == key)
            .collect();
        if group.is_empty() {
            continue;
        }
        rows.push(make_row(StatsType::TurnOrder, key.to_string(), &group, None));
    }

    rows
}
