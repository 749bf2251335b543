//! Game configuration loaded from JSON.
//!
//! ```json
//! { "max_rounds": 5, "seed": 42 }
//! ```
//!
//! Both fields are optional. Without a seed every game is dealt from entropy.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::round::new_game;
use super::state::GameState;
use super::targets::{DealError, TARGETS_PER_SIDE};

/// Settings for dealing and playing a game.
///
/// # Example
/// ```
/// use air_poker::engine::GameConfig;
///
/// let config = GameConfig::default().with_seed(7);
/// let state = config.new_game().unwrap();
/// assert_eq!(state.max_rounds, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rounds per game. Each round consumes one target per side, so at
    /// most five.
    pub max_rounds: u32,

    /// Random seed for reproducible deals and opponent choices.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: TARGETS_PER_SIDE as u32,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the number of rounds.
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 || self.max_rounds as usize > TARGETS_PER_SIDE {
            return Err(ConfigError::InvalidMaxRounds(self.max_rounds));
        }
        Ok(())
    }

    /// A generator seeded from `seed`, or from entropy when unset.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Deal a game with the default dealer and this configuration's generator.
    pub fn new_game(&self) -> Result<GameState, DealError> {
        new_game(self.max_rounds, &mut self.rng())
    }
}

/// Errors that can occur when loading game configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file could not be read.
    IoError(String),
    /// The JSON could not be parsed.
    ParseError(String),
    /// Round count outside 1..=5.
    InvalidMaxRounds(u32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {}", e),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
            Self::InvalidMaxRounds(n) => {
                write!(f, "Invalid max rounds: {} (must be 1-{})", n, TARGETS_PER_SIDE)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
