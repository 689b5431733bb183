//! Core data models for the match ledger.

mod class;
mod deck;
mod ids;
mod record;
mod season;
mod stats;

pub use class::*;
pub use deck::*;
pub use ids::*;
pub use record::*;
pub use season::*;
pub use stats::*;
