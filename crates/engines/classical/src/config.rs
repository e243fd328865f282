//! Engine configuration, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```toml
//! depth = 4
//! seed = 42
//!
//! [weights]
//! mobility = 8
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read engine config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize engine config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Tunable terms of the static evaluation, in centipawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Per legal move of difference between the two sides.
    pub mobility: i32,
    /// Bonus for a side that has castled.
    pub castled: i32,
    /// Score of a checkmate.
    pub mate: i32,
    /// Penalty charged to the side that steered into a draw.
    pub draw: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            mobility: 5,
            castled: 85,
            mate: 10_000,
            draw: 5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search depth in plies used by [`crate::ClassicalEngine::search_default`].
    pub depth: u8,
    pub use_opening_book: bool,
    /// The book is only consulted while the move log is at most this long.
    pub book_max_plies: usize,
    /// Seed for the book's random choice; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub weights: EvalWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            use_opening_book: true,
            book_max_plies: 7,
            seed: None,
            weights: EvalWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
