//! Game modes: time limit and target score

use serde::{Deserialize, Serialize};
use std::fmt;

/// Timer length and winning score for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeRules {
    pub time_limit_secs: u32,
    pub target_score: u32,
}

/// Selectable game mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Three minutes, 150 points to win
    Blitz,
    /// Five minutes, 250 points to win
    #[default]
    Classic,
    /// Ten minutes, 500 points to win
    Marathon,
}

impl GameMode {
    /// Get all modes in menu order
    pub fn all() -> &'static [GameMode] {
        &[GameMode::Blitz, GameMode::Classic, GameMode::Marathon]
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Blitz => "Blitz",
            GameMode::Classic => "Classic",
            GameMode::Marathon => "Marathon",
        }
    }

    /// Stable key used in storage and config files.
    pub fn key(&self) -> &'static str {
        match self {
            GameMode::Blitz => "blitz",
            GameMode::Classic => "classic",
            GameMode::Marathon => "marathon",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.key() == key)
    }

    pub fn default_rules(&self) -> ModeRules {
        match self {
            GameMode::Blitz => ModeRules {
                time_limit_secs: 180,
                target_score: 150,
            },
            GameMode::Classic => ModeRules {
                time_limit_secs: 300,
                target_score: 250,
            },
            GameMode::Marathon => ModeRules {
                time_limit_secs: 600,
                target_score: 500,
            },
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rules in effect for every mode, after config overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTable {
    blitz: ModeRules,
    classic: ModeRules,
    marathon: ModeRules,
}

impl Default for ModeTable {
    fn default() -> Self {
        Self {
            blitz: GameMode::Blitz.default_rules(),
            classic: GameMode::Classic.default_rules(),
            marathon: GameMode::Marathon.default_rules(),
        }
    }
}

impl ModeTable {
    pub fn rules(&self, mode: GameMode) -> ModeRules {
        match mode {
            GameMode::Blitz => self.blitz,
            GameMode::Classic => self.classic,
            GameMode::Marathon => self.marathon,
        }
    }

    pub fn set(&mut self, mode: GameMode, rules: ModeRules) {
        match mode {
            GameMode::Blitz => self.blitz = rules,
            GameMode::Classic => self.classic = rules,
            GameMode::Marathon => self.marathon = rules,
        }
    }
}
