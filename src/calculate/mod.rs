//! Statistics calculation engine.
//!
//! Pure functions turning match records into win/loss/win-rate summaries:
//! - the rollup primitive shared by every dimension
//! - per-dimension classification keys
//! - the personal stats composer
//! - season template resolution

pub mod classify;
pub mod personal;
pub mod templates;

use crate::models::{MatchRecord, Rollup};

/// Round a percentage to one decimal place, half-up on the first decimal.
/// Boundary values depend on this exact rule (66.65 → 66.7, not 66.6).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reduce a set of records into the universal statistic primitive.
///
/// Empty input produces the all-zero rollup with win rate 0, never NaN.
pub fn rollup<'a, I>(records: I) -> Rollup
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut total_games = 0u32;
    let mut wins = 0u32;

    for record in records {
        total_games += 1;
        if record.is_win {
            wins += 1;
        }
    }

    let losses = total_games - wins;
    let win_rate = if total_games > 0 {
        round1((wins as f64 / total_games as f64) * 100.0)
    } else {
        0.0
    };

    Rollup {
        total_games,
        wins,
        losses,
        win_rate,
    }
}
