//! # Duel Ledger
//!
//! A match ledger and win-rate aggregation service for card game ladders.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (records, decks, seasons, stats)
//! - **storage**: Flat-file JSONL collections
//! - **calculate**: Rollups, archetype classification, personal stats
//! - **aggregate**: The global statistics batch job
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod aggregate;
pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
