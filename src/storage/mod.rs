//! Persistence collaborators.
//!
//! The computation core is storage-agnostic: it consumes plain in-memory
//! snapshots. These repositories own the snapshots' lifecycle — JSONL files
//! on disk, one entity per line — and are injected into the core's callers.

use std::path::PathBuf;
use thiserror::Error;

use crate::models::{MatchRecord, Participation, Player, PlayerId};

mod json;
pub use json::{JsonlReader, JsonlStore, JsonlWriter};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join("players.jsonl")
    }

    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join("matches.jsonl")
    }

    pub fn participations_path(&self) -> PathBuf {
        self.data_dir.join("participations.jsonl")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Read/write access to the player roster.
pub trait RosterRepository {
    /// Load the full roster snapshot.
    fn load_players(&self) -> Result<Vec<Player>, StorageError>;

    /// Insert or update a player by id.
    fn save_player(&self, player: &Player) -> Result<(), StorageError>;

    /// Remove a player. Returns whether a record was deleted.
    fn delete_player(&self, player_id: &PlayerId) -> Result<bool, StorageError>;
}

/// Read/append access to the match history. Matches are never edited or
/// deleted once recorded.
pub trait MatchRepository {
    /// Load the full match history snapshot.
    fn load_matches(&self) -> Result<Vec<MatchRecord>, StorageError>;

    /// Load the full participation snapshot.
    fn load_participations(&self) -> Result<Vec<Participation>, StorageError>;

    /// Append a completed match with its participations. Participations
    /// duplicating an already-stored player/match combination are dropped.
    fn record_match(
        &self,
        record: &MatchRecord,
        participations: &[Participation],
    ) -> Result<(), StorageError>;
}
