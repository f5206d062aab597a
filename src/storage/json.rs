//! JSONL (JSON Lines) storage.
//!
//! JSONL is the source of truth for the roster and match history. Each line
//! is a valid JSON object representing one entity.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{MatchRepository, RosterRepository, StorageConfig, StorageError};
use crate::models::{MatchId, MatchRecord, Participation, Player, PlayerId};

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single entity to the file.
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

    /// Append multiple entities to the file.
    pub fn append_batch(&self, entities: &[T]) -> Result<usize, StorageError> {
        if entities.is_empty() {
            return Ok(0);
        }

        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Appended {} entities to {:?}", count, self.path);

        Ok(count)
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

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Read all entities from the file. A missing file reads as empty;
    /// malformed lines are skipped with a warning.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
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
}

/// Roster and match repositories backed by JSONL files in a data directory.
pub struct JsonlStore {
    config: StorageConfig,
}

impl JsonlStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }
}

impl RosterRepository for JsonlStore {
    fn load_players(&self) -> Result<Vec<Player>, StorageError> {
        JsonlReader::new(self.config.players_path()).read_all()
    }

    fn save_player(&self, player: &Player) -> Result<(), StorageError> {
        let mut players = self.load_players()?;
        match players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player.clone(),
            None => players.push(player.clone()),
        }
        JsonlWriter::new(self.config.players_path()).write_all(&players)?;
        Ok(())
    }

    fn delete_player(&self, player_id: &PlayerId) -> Result<bool, StorageError> {
        let mut players = self.load_players()?;
        let before = players.len();
        players.retain(|p| &p.id != player_id);

        if players.len() == before {
            return Ok(false);
        }

        JsonlWriter::new(self.config.players_path()).write_all(&players)?;
        Ok(true)
    }
}

impl MatchRepository for JsonlStore {
    fn load_matches(&self) -> Result<Vec<MatchRecord>, StorageError> {
        JsonlReader::new(self.config.matches_path()).read_all()
    }

    fn load_participations(&self) -> Result<Vec<Participation>, StorageError> {
        JsonlReader::new(self.config.participations_path()).read_all()
    }

    fn record_match(
        &self,
        record: &MatchRecord,
        participations: &[Participation],
    ) -> Result<(), StorageError> {
        JsonlWriter::new(self.config.matches_path()).append(record)?;

        let mut seen: HashSet<(MatchId, PlayerId)> = self
            .load_participations()?
            .into_iter()
            .map(|row| (row.match_id, row.player_id))
            .collect();

        let fresh: Vec<Participation> = participations
            .iter()
            .filter(|row| seen.insert((row.match_id.clone(), row.player_id.clone())))
            .cloned()
            .collect();

        if fresh.len() < participations.len() {
            warn!(
                "Dropped {} duplicate participation(s) for match {}",
                participations.len() - fresh.len(),
                record.id
            );
        }

        JsonlWriter::new(self.config.participations_path()).append_batch(&fresh)?;
        Ok(())
    }
}
