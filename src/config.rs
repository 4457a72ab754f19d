//! Settings file and command line
//!
//! Settings come from an optional TOML file in the OS config directory
//! (`~/.config/rackrush/config.toml` on Linux). Command-line flags win over
//! the file; a missing default file means defaults.
//!
//! ```toml
//! default_mode = "blitz"
//! dictionary = "/usr/share/dict/scrabble.txt"
//! log_filter = "rackrush=debug"
//!
//! [modes.blitz]
//! time_limit_secs = 120
//! ```

use clap::Parser;
use derive_more::{Display, Error};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::app::mode::{GameMode, ModeRules, ModeTable};

/// Rack Rush - race the clock on a 15x15 word board
#[derive(Parser, Debug, Default)]
#[command(name = "rackrush")]
#[command(about = "Single-player timed word-building game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Mode highlighted on the menu
    #[arg(short, long, value_enum)]
    pub mode: Option<GameMode>,

    /// Settings file (default: OS config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Word list to validate against, one word per line
    #[arg(short, long)]
    pub dictionary: Option<PathBuf>,

    /// Keep high scores in memory only
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[display("{mode} needs a time limit and target above zero")]
    InvalidRules { mode: GameMode },
}

/// Per-mode override; unset fields keep the mode's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModeOverride {
    pub time_limit_secs: Option<u32>,
    pub target_score: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModeOverrides {
    pub blitz: ModeOverride,
    pub classic: ModeOverride,
    pub marathon: ModeOverride,
}

impl ModeOverrides {
    fn get(&self, mode: GameMode) -> ModeOverride {
        match mode {
            GameMode::Blitz => self.blitz,
            GameMode::Classic => self.classic,
            GameMode::Marathon => self.marathon,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub default_mode: GameMode,
    /// Word list file; the built-in list when unset
    pub dictionary: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
    pub modes: ModeOverrides,
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// tried, and a missing file there yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no settings file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Parse a TOML settings file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.mode_table()?;
        info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// `config.toml` in the OS config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "rackrush").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Fold command-line flags over the file settings.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(mode) = cli.mode {
            self.default_mode = mode;
        }
        if let Some(dictionary) = &cli.dictionary {
            self.dictionary = Some(dictionary.clone());
        }
    }

    /// Mode rules with overrides applied. Zero limits are refused.
    pub fn mode_table(&self) -> Result<ModeTable, ConfigError> {
        let mut table = ModeTable::default();
        for &mode in GameMode::all() {
            let defaults = mode.default_rules();
            let over = self.modes.get(mode);
            let rules = ModeRules {
                time_limit_secs: over.time_limit_secs.unwrap_or(defaults.time_limit_secs),
                target_score: over.target_score.unwrap_or(defaults.target_score),
            };
            if rules.time_limit_secs == 0 || rules.target_score == 0 {
                return Err(ConfigError::InvalidRules { mode });
            }
            table.set(mode, rules);
        }
        Ok(table)
    }
}
