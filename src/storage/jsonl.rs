//! JSONL (JSON Lines) collections.
//!
//! Each collection is one file where every line is a valid JSON object
//! representing one entity. Collections expose the abstract store operations
//! the rest of the crate works against: full scan, keyed get, upsert, delete.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};
use crate::models::{AggregatedStat, Deck, MatchRecord, Season};

/// The four persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    MatchRecords,
    Decks,
    Seasons,
    AggregatedStats,
}

impl CollectionKind {
    /// Get the filename for this collection.
    pub fn filename(&self) -> &'static str {
        match self {
            CollectionKind::MatchRecords => "match_records.jsonl",
            CollectionKind::Decks => "decks.jsonl",
            CollectionKind::Seasons => "seasons.jsonl",
            CollectionKind::AggregatedStats => "aggregated_stats.jsonl",
        }
    }
}

/// Entities addressable by a unique key within their collection.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for MatchRecord {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Keyed for Deck {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Keyed for Season {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Keyed for AggregatedStat {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// A typed JSONL-backed collection.
pub struct JsonlCollection<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned + Keyed + Clone> JsonlCollection<T> {
    /// Create a collection over the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create the collection for a kind under the configured data directory.
    pub fn for_kind(config: &StorageConfig, kind: CollectionKind) -> Self {
        Self::new(config.collections_dir().join(kind.filename()))
    }

    /// Check if the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Read every entity in the collection. A missing file is an empty
    /// collection; malformed lines are skipped with a warning.
    pub fn scan_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();
        let mut line_num = 0;

        for line in reader.lines() {
            line_num += 1;
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        line_num, self.path, e
                    );
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read entities matching a predicate.
    pub fn scan_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.scan_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }

    /// Get a single entity by key.
    pub fn get(&self, key: &str) -> Result<Option<T>, StorageError> {
        let all = self.scan_all()?;
        Ok(all.into_iter().find(|e| e.key() == key))
    }

    /// Insert or replace a single entity, keyed by `Keyed::key`.
    pub fn put(&self, entity: &T) -> Result<(), StorageError> {
        let mut all = self.scan_all()?;
        all.retain(|e| e.key() != entity.key());
        all.push(entity.clone());
        self.write_all(&all)?;
        Ok(())
    }

    /// Insert or replace a batch of entities in one read-write pass.
    pub fn put_many(&self, entities: &[T]) -> Result<usize, StorageError> {
        if entities.is_empty() {
            return Ok(0);
        }

        let mut all = self.scan_all()?;
        for entity in entities {
            all.retain(|e| e.key() != entity.key());
            all.push(entity.clone());
        }
        self.write_all(&all)?;
        Ok(entities.len())
    }

    /// Delete an entity by key. Returns whether anything was removed.
    pub fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let all = self.scan_all()?;
        let before = all.len();
        let kept: Vec<T> = all.into_iter().filter(|e| e.key() != key).collect();
        let removed = kept.len() != before;
        if removed {
            self.write_all(&kept)?;
        }
        Ok(removed)
    }

    /// Delete every entity matching a predicate. Returns the removed count.
    pub fn delete_where<F>(&self, predicate: F) -> Result<usize, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.scan_all()?;
        let before = all.len();
        let kept: Vec<T> = all.into_iter().filter(|e| !predicate(e)).collect();
        let removed = before - kept.len();
        if removed > 0 {
            self.write_all(&kept)?;
        }
        Ok(removed)
    }

    /// Append a single entity without key checking. Only safe for freshly
    /// generated ids.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended entity to {:?}", self.path);
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}
