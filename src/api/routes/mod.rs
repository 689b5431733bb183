pub mod aggregate;
pub mod decks;
pub mod records;
pub mod seasons;
pub mod stats;
