//! Persistent storage using SQLite (rusqlite)
//!
//! This module provides:
//! - OS-standard data directory location (via `directories` crate)
//! - SQLite database with schema versioning
//! - Per-mode high scores, written only when beaten
//! - A history of finished games with their played words

use derive_more::{Display, Error, From};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::app::mode::GameMode;
use crate::app::session::{EndReason, PlayedWord};

/// Current schema version. Bump this when making schema changes.
/// Version history:
/// - v1: meta and high_scores tables
/// - v2: added games history table
const SCHEMA_VERSION: u32 = 2;

/// Errors that can occur during storage operations.
#[derive(Debug, Display, Error, From)]
pub enum StorageError {
    /// Database error from SQLite
    #[display("database error: {_0}")]
    #[from]
    Database(rusqlite::Error),
    /// Played words could not be encoded
    #[display("could not encode played words: {_0}")]
    #[from]
    Encode(serde_json::Error),
    /// Could not determine data directory
    #[display("could not determine data directory")]
    NoDataDirectory,
    /// Schema version mismatch (future version)
    #[display("database schema version {found} is newer than supported version {supported}")]
    FutureSchemaVersion { found: u32, supported: u32 },
    /// Failed to create data directory
    #[display("failed to create data directory: {_0}")]
    CreateDirFailed(std::io::Error),
    /// Migration failed
    #[display("migration from v{from} to v{to} failed: {reason}")]
    MigrationFailed { from: u32, to: u32, reason: String },
}

/// A finished game, as handed to a [`HighScoreStore`].
#[derive(Debug, Clone)]
pub struct GameRecord<'a> {
    pub mode: GameMode,
    pub score: u32,
    pub outcome: EndReason,
    pub words: &'a [PlayedWord],
}

/// A row from the games history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub mode: GameMode,
    pub score: u32,
    pub outcome: EndReason,
    pub word_count: usize,
    pub finished_at: i64,
}

/// Where high scores live between games.
pub trait HighScoreStore {
    /// Best score recorded for a mode, 0 if none.
    fn high_score(&self, mode: GameMode) -> Result<u32, StorageError>;

    /// Best score for every mode that has one, in menu order.
    fn high_scores(&self) -> Result<Vec<(GameMode, u32)>, StorageError> {
        let mut best = Vec::new();
        for mode in GameMode::all() {
            let score = self.high_score(*mode)?;
            if score > 0 {
                best.push((*mode, score));
            }
        }
        Ok(best)
    }

    /// Most recent finished games, newest first.
    fn recent_games(&self, limit: usize) -> Result<Vec<GameSummary>, StorageError>;

    /// Record a finished game. Returns true when it set a new high score.
    fn record_game(&mut self, record: &GameRecord<'_>) -> Result<bool, StorageError>;
}

/// High scores kept only for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryScores {
    best: HashMap<GameMode, u32>,
    games: Vec<GameSummary>,
}

impl MemoryScores {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryScores {
    fn high_score(&self, mode: GameMode) -> Result<u32, StorageError> {
        Ok(self.best.get(&mode).copied().unwrap_or(0))
    }

    fn recent_games(&self, limit: usize) -> Result<Vec<GameSummary>, StorageError> {
        Ok(self.games.iter().rev().take(limit).cloned().collect())
    }

    fn record_game(&mut self, record: &GameRecord<'_>) -> Result<bool, StorageError> {
        self.games.push(GameSummary {
            mode: record.mode,
            score: record.score,
            outcome: record.outcome,
            word_count: record.words.len(),
            finished_at: now_millis(),
        });
        let best = self.best.entry(record.mode).or_insert(0);
        if record.score > *best {
            *best = record.score;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// The main storage handle for Rack Rush data.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create the storage database.
    ///
    /// Uses OS-standard directories:
    /// - Linux: `$XDG_DATA_HOME/rackrush/` or `~/.local/share/rackrush/`
    /// - macOS: `~/Library/Application Support/rackrush/`
    pub fn open() -> Result<Self, StorageError> {
        let data_dir = Self::data_dir()?;
        std::fs::create_dir_all(&data_dir).map_err(StorageError::CreateDirFailed)?;
        Self::open_at(data_dir.join("rackrush.db"))
    }

    /// Open or create a database at a specific path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path.as_ref())?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        info!(path = %path.as_ref().display(), "opened score database");
        Ok(storage)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Get the OS-standard data directory for Rack Rush
    pub fn data_dir() -> Result<PathBuf, StorageError> {
        ProjectDirs::from("", "", "rackrush")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StorageError::NoDataDirectory)
    }

    /// Total number of finished games recorded.
    pub fn game_count(&self) -> Result<i64, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
        Ok(count)
    }

    // Private helper methods

    fn initialize_schema(&self) -> Result<(), StorageError> {
        let current_version = self.get_schema_version()?;

        if current_version == 0 {
            self.create_schema()?;
        } else if current_version < SCHEMA_VERSION {
            self.migrate_schema(current_version)?;
        } else if current_version > SCHEMA_VERSION {
            // Database is from a newer version of Rack Rush
            return Err(StorageError::FutureSchemaVersion {
                found: current_version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<u32, StorageError> {
        let table_exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='meta'",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        let version: Option<u32> = self
            .conn
            .query_row("SELECT schema_version FROM meta LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(version.unwrap_or(0))
    }

    fn create_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            -- Meta table: schema version and creation time
            CREATE TABLE meta (
                schema_version INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            );

            -- One row per mode, replaced only by a better score
            CREATE TABLE high_scores (
                mode TEXT PRIMARY KEY,
                score INTEGER NOT NULL,
                achieved_at INTEGER NOT NULL
            );
            "#,
        )?;
        self.create_games_table()?;

        self.conn.execute(
            "INSERT INTO meta (schema_version, created_at) VALUES (?1, ?2)",
            params![SCHEMA_VERSION, now_millis()],
        )?;

        Ok(())
    }

    fn create_games_table(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            -- Finished games, append-only
            CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                mode TEXT NOT NULL,
                score INTEGER NOT NULL,
                outcome TEXT NOT NULL,
                words TEXT NOT NULL,
                finished_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_games_mode ON games (mode);
            "#,
        )?;
        Ok(())
    }

    fn migrate_schema(&self, from_version: u32) -> Result<(), StorageError> {
        let mut current_version = from_version;

        while current_version < SCHEMA_VERSION {
            match current_version {
                1 => {
                    // v1 -> v2: games history
                    self.create_games_table()?;
                    current_version = 2;
                }
                _ => {
                    return Err(StorageError::MigrationFailed {
                        from: current_version,
                        to: SCHEMA_VERSION,
                        reason: format!("no migration path from version {}", current_version),
                    });
                }
            }
        }

        self.conn.execute(
            "UPDATE meta SET schema_version = ?1",
            params![SCHEMA_VERSION],
        )?;
        info!(from = from_version, to = SCHEMA_VERSION, "migrated score database");

        Ok(())
    }
}

impl HighScoreStore for Storage {
    fn high_score(&self, mode: GameMode) -> Result<u32, StorageError> {
        let score: Option<u32> = self
            .conn
            .query_row(
                "SELECT score FROM high_scores WHERE mode = ?1",
                params![mode.key()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(score.unwrap_or(0))
    }

    fn high_scores(&self) -> Result<Vec<(GameMode, u32)>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT mode, score FROM high_scores ORDER BY mode")?;
        let rows = stmt.query_map([], |row| {
            let mode: String = row.get(0)?;
            let score: u32 = row.get(1)?;
            Ok((mode, score))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (mode, score) = row?;
            if let Some(mode) = GameMode::from_key(&mode) {
                result.push((mode, score));
            }
        }
        Ok(result)
    }

    fn recent_games(&self, limit: usize) -> Result<Vec<GameSummary>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT mode, score, outcome, words, finished_at FROM games ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            let mode: String = row.get(0)?;
            let score: u32 = row.get(1)?;
            let outcome: String = row.get(2)?;
            let words: String = row.get(3)?;
            let finished_at: i64 = row.get(4)?;
            Ok((mode, score, outcome, words, finished_at))
        })?;

        let mut games = Vec::new();
        for row in rows {
            let (mode, score, outcome, words, finished_at) = row?;
            let (Some(mode), Some(outcome)) =
                (GameMode::from_key(&mode), EndReason::from_key(&outcome))
            else {
                continue;
            };
            let word_count = serde_json::from_str::<Vec<serde_json::Value>>(&words)
                .map(|w| w.len())
                .unwrap_or(0);
            games.push(GameSummary {
                mode,
                score,
                outcome,
                word_count,
                finished_at,
            });
        }
        Ok(games)
    }

    fn record_game(&mut self, record: &GameRecord<'_>) -> Result<bool, StorageError> {
        let words = serde_json::to_string(record.words)?;
        let now = now_millis();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO games (mode, score, outcome, words, finished_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.mode.key(),
                record.score,
                record.outcome.key(),
                words,
                now
            ],
        )?;
        // A zero score never beats anything, not even an empty slot
        let changed = if record.score > 0 {
            tx.execute(
                "INSERT INTO high_scores (mode, score, achieved_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(mode) DO UPDATE SET score = excluded.score, achieved_at = excluded.achieved_at
                 WHERE excluded.score > high_scores.score",
                params![record.mode.key(), record.score, now],
            )?
        } else {
            0
        };
        tx.commit()?;

        let is_new_high = changed > 0;
        debug!(mode = record.mode.key(), score = record.score, is_new_high, "recorded game");
        Ok(is_new_high)
    }
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mode: GameMode, score: u32, words: &[PlayedWord]) -> GameRecord<'_> {
        GameRecord {
            mode,
            score,
            outcome: EndReason::TimeUp,
            words,
        }
    }

    fn sample_words() -> Vec<PlayedWord> {
        vec![
            PlayedWord {
                word: "CAT".to_string(),
                score: 10,
                played_at: 1,
            },
            PlayedWord {
                word: "CATS".to_string(),
                score: 6,
                played_at: 2,
            },
        ]
    }

    #[test]
    fn test_storage_creation() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.game_count().unwrap(), 0);
        assert!(storage.high_scores().unwrap().is_empty());
    }

    #[test]
    fn test_schema_version_is_current() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.get_schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_high_score_starts_at_zero() {
        let storage = Storage::open_in_memory().unwrap();
        for mode in GameMode::all() {
            assert_eq!(storage.high_score(*mode).unwrap(), 0);
        }
    }

    #[test]
    fn test_high_score_only_written_when_beaten() {
        let mut storage = Storage::open_in_memory().unwrap();
        let words = sample_words();

        assert!(storage.record_game(&record(GameMode::Blitz, 40, &words)).unwrap());
        assert_eq!(storage.high_score(GameMode::Blitz).unwrap(), 40);

        assert!(!storage.record_game(&record(GameMode::Blitz, 25, &words)).unwrap());
        assert!(!storage.record_game(&record(GameMode::Blitz, 40, &words)).unwrap());
        assert_eq!(storage.high_score(GameMode::Blitz).unwrap(), 40);

        assert!(storage.record_game(&record(GameMode::Blitz, 41, &words)).unwrap());
        assert_eq!(storage.high_score(GameMode::Blitz).unwrap(), 41);
    }

    #[test]
    fn test_modes_are_independent() {
        let mut storage = Storage::open_in_memory().unwrap();
        storage.record_game(&record(GameMode::Blitz, 90, &[])).unwrap();
        storage.record_game(&record(GameMode::Marathon, 300, &[])).unwrap();

        assert_eq!(storage.high_score(GameMode::Blitz).unwrap(), 90);
        assert_eq!(storage.high_score(GameMode::Classic).unwrap(), 0);
        assert_eq!(storage.high_score(GameMode::Marathon).unwrap(), 300);
        assert_eq!(
            storage.high_scores().unwrap(),
            vec![(GameMode::Blitz, 90), (GameMode::Marathon, 300)]
        );
    }

    #[test]
    fn test_every_game_is_recorded() {
        let mut storage = Storage::open_in_memory().unwrap();
        let words = sample_words();
        storage.record_game(&record(GameMode::Classic, 16, &words)).unwrap();
        storage.record_game(&record(GameMode::Classic, 3, &[])).unwrap();

        assert_eq!(storage.game_count().unwrap(), 2);
        let recent = storage.recent_games(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].score, 3);
        assert_eq!(recent[0].word_count, 0);
        assert_eq!(recent[1].score, 16);
        assert_eq!(recent[1].word_count, 2);
        assert_eq!(recent[1].outcome, EndReason::TimeUp);
    }

    #[test]
    fn test_zero_score_is_not_a_high_score() {
        let mut storage = Storage::open_in_memory().unwrap();
        assert!(!storage.record_game(&record(GameMode::Blitz, 0, &[])).unwrap());

        let rows: i64 = storage
            .conn
            .query_row("SELECT COUNT(*) FROM high_scores", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 0);
        assert!(storage.high_scores().unwrap().is_empty());
        assert_eq!(storage.game_count().unwrap(), 1);
    }

    #[test]
    fn test_migrate_from_v1() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE meta (schema_version INTEGER NOT NULL, created_at INTEGER NOT NULL);
            CREATE TABLE high_scores (mode TEXT PRIMARY KEY, score INTEGER NOT NULL, achieved_at INTEGER NOT NULL);
            INSERT INTO meta VALUES (1, 0);
            INSERT INTO high_scores VALUES ('classic', 120, 0);
            "#,
        )
        .unwrap();
        let storage = Storage { conn };
        storage.initialize_schema().unwrap();

        assert_eq!(storage.get_schema_version().unwrap(), SCHEMA_VERSION);
        assert_eq!(storage.high_score(GameMode::Classic).unwrap(), 120);
        assert_eq!(storage.game_count().unwrap(), 0);
    }

    #[test]
    fn test_future_schema_is_refused() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE meta (schema_version INTEGER NOT NULL, created_at INTEGER NOT NULL);
             INSERT INTO meta VALUES (99, 0);",
        )
        .unwrap();
        let storage = Storage { conn };
        let err = storage.initialize_schema().unwrap_err();
        assert!(matches!(
            err,
            StorageError::FutureSchemaVersion {
                found: 99,
                supported: SCHEMA_VERSION
            }
        ));
    }

    #[test]
    fn test_memory_scores() {
        let mut scores = MemoryScores::new();
        assert_eq!(scores.high_score(GameMode::Classic).unwrap(), 0);
        assert!(scores.record_game(&record(GameMode::Classic, 12, &[])).unwrap());
        assert!(!scores.record_game(&record(GameMode::Classic, 11, &[])).unwrap());
        assert_eq!(scores.high_score(GameMode::Classic).unwrap(), 12);
        assert!(!scores.record_game(&record(GameMode::Blitz, 0, &[])).unwrap());

        assert_eq!(scores.high_scores().unwrap(), vec![(GameMode::Classic, 12)]);
        let recent = scores.recent_games(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].mode, GameMode::Blitz);
        assert_eq!(recent[1].score, 11);
    }

    #[test]
    fn test_data_dir() {
        // Should not panic, should return a path
        let result = Storage::data_dir();
        if let Ok(path) = result {
            assert!(path.to_string_lossy().contains("rackrush"));
        }
    }
}
