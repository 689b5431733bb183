//! Personal stats composer.
//!
//! Synchronous and pure: safe to recompute on every filter change. The
//! caller applies deck/season filtering before composing.

use std::collections::HashMap;

use super::rollup;
use crate::models::{ClassName, ClassStat, DeckTypeStat, MatchRecord, PersonalStats};

/// Filter a user's records by deck and/or season. A `None` filter passes
/// everything through; both filters compose by logical AND.
pub fn filter_records(
    records: &[MatchRecord],
    deck_id: Option<&str>,
    season_id: Option<&str>,
) -> Vec<MatchRecord> {
    records
        .iter()
        .filter(|r| deck_id.map_or(true, |id| r.deck_id.as_str() == id))
        .filter(|r| season_id.map_or(true, |id| r.season_id.as_str() == id))
        .cloned()
        .collect()
}

/// Compose overall, per-class, and per-deck-archetype statistics for one
/// user's record set.
///
/// `by_class` always contains all seven classes, zero-filled where no games
/// exist. `by_deck_type` groups by the raw opponent deck type string; no
/// template resolution happens here.
pub fn compose_personal_stats(records: &[MatchRecord]) -> PersonalStats {
    let overall = rollup(records);

    let mut by_class: Vec<ClassStat> = ClassName::ALL
        .into_iter()
        .map(|class| ClassStat {
            class,
            rollup: rollup(records.iter().filter(|r| r.opponent_class == class)),
        })
        .collect();
    by_class.sort_by(|a, b| b.rollup.total_games.cmp(&a.rollup.total_games));

    let mut groups: HashMap<&str, Vec<&MatchRecord>> = HashMap::new();
    for record in records {
        groups
            .entry(record.opponent_deck_type.as_str())
            .or_default()
            .push(record);
    }

    let mut by_deck_type: Vec<DeckTypeStat> = groups
        .into_iter()
        .map(|(deck_type, group)| {
            let first: Vec<&MatchRecord> =
                group.iter().copied().filter(|r| r.is_first_player).collect();
            let second: Vec<&MatchRecord> =
                group.iter().copied().filter(|r| !r.is_first_player).collect();
            DeckTypeStat {
                deck_type: deck_type.to_string(),
                rollup: rollup(group.iter().copied()),
                first_player_stats: rollup(first),
                second_player_stats: rollup(second),
            }
        })
        .collect();
    by_deck_type.sort_by(|a, b| {
        b.rollup
            .total_games
            .cmp(&a.rollup.total_games)
            .then_with(|| a.deck_type.cmp(&b.deck_type))
    });

    PersonalStats {
        overall,
        by_class,
        by_deck_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        deck_id: &str,
        season_id: &str,
        opponent: ClassName,
        deck_type: &str,
        first: bool,
        win: bool,
    ) -> MatchRecord {
        MatchRecord::new(
            "user-1".into(),
            deck_id.into(),
            season_id.into(),
            opponent,
            deck_type.to_string(),
            first,
            win,
        )
    }

    #[test]
    fn test_by_class_always_has_seven_entries() {
        let stats = compose_personal_stats(&[]);
        assert_eq!(stats.by_class.len(), 7);
        assert!(stats
            .by_class
            .iter()
            .all(|c| c.rollup.total_games == 0 && c.rollup.win_rate == 0.0));
        assert_eq!(stats.overall.total_games, 0);
    }

    #[test]
    fn test_by_class_includes_zero_game_classes() {
        let records = vec![
            record("d1", "s1", ClassName::Royal, "ミッドレンジロイヤル", true, true),
            record("d1", "s1", ClassName::Royal, "ミッドレンジロイヤル", false, false),
        ];
        let stats = compose_personal_stats(&records);

        assert_eq!(stats.by_class.len(), 7);
        assert_eq!(stats.by_class[0].class, ClassName::Royal);
        assert_eq!(stats.by_class[0].rollup.total_games, 2);
        // The remaining six classes are present with zero games.
        assert!(stats.by_class[1..].iter().all(|c| c.rollup.total_games == 0));
    }

    #[test]
    fn test_by_class_sorted_by_total_games_desc() {
        let mut records = vec![
            record("d1", "s1", ClassName::Witch, "超越ウィッチ", true, true),
        ];
        for _ in 0..3 {
            records.push(record("d1", "s1", ClassName::Dragon, "ランプドラゴン", true, false));
        }
        let stats = compose_personal_stats(&records);

        assert_eq!(stats.by_class[0].class, ClassName::Dragon);
        assert_eq!(stats.by_class[1].class, ClassName::Witch);
    }

    #[test]
    fn test_by_deck_type_groups_raw_strings() {
        let records = vec![
            record("d1", "s1", ClassName::Elf, "アグロエルフ", true, true),
            record("d1", "s1", ClassName::Elf, "アグロエルフ", false, false),
            record("d1", "s1", ClassName::Elf, "謎のデッキ", true, true),
        ];
        let stats = compose_personal_stats(&records);

        assert_eq!(stats.by_deck_type.len(), 2);
        assert_eq!(stats.by_deck_type[0].deck_type, "アグロエルフ");
        assert_eq!(stats.by_deck_type[0].rollup.total_games, 2);
        // No template awareness: the unknown type keeps its raw name.
        assert_eq!(stats.by_deck_type[1].deck_type, "謎のデッキ");
    }

    #[test]
    fn test_turn_order_split_sums_to_group() {
        let records = vec![
            record("d1", "s1", ClassName::Elf, "アグロエルフ", true, true),
            record("d1", "s1", ClassName::Elf, "アグロエルフ", true, false),
            record("d1", "s1", ClassName::Elf, "アグロエルフ", false, true),
            record("d1", "s1", ClassName::Elf, "アグロエルフ", false, true),
        ];
        let stats = compose_personal_stats(&records);

        let group = &stats.by_deck_type[0];
        let first = &group.first_player_stats;
        let second = &group.second_player_stats;

        assert_eq!(first.wins + second.wins, group.rollup.wins);
        assert_eq!(first.losses + second.losses, group.rollup.losses);
        assert_eq!(
            first.total_games + second.total_games,
            group.rollup.total_games
        );
        assert_eq!(first.total_games, 2);
        assert_eq!(first.wins, 1);
        assert_eq!(second.wins, 2);
    }

    #[test]
    fn test_filter_by_deck_and_season_composes_with_and() {
        let records = vec![
            record("d1", "s1", ClassName::Elf, "a", true, true),
            record("d1", "s2", ClassName::Elf, "b", true, true),
            record("d2", "s1", ClassName::Elf, "c", true, true),
        ];

        assert_eq!(filter_records(&records, None, None).len(), 3);
        assert_eq!(filter_records(&records, Some("d1"), None).len(), 2);
        assert_eq!(filter_records(&records, None, Some("s1")).len(), 2);

        let both = filter_records(&records, Some("d1"), Some("s1"));
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].opponent_deck_type, "a");
    }

    #[test]
    fn test_overall_matches_record_count() {
        let records = vec![
            record("d1", "s1", ClassName::Elf, "a", true, true),
            record("d1", "s1", ClassName::Royal, "b", false, false),
            record("d1", "s1", ClassName::Witch, "c", true, true),
        ];
        let stats = compose_personal_stats(&records);
        assert_eq!(stats.overall.total_games, 3);
        assert_eq!(stats.overall.wins, 2);
        assert_eq!(stats.overall.win_rate, 66.7);
    }
}
