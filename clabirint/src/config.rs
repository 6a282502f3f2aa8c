use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithms::is_valid_size;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid grid size {0}, expected an odd number of at least 3")]
    InvalidGridSize(usize),
    #[error("invalid exit count {0}, expected at least 1")]
    InvalidExitCount(usize),
}

/// Parameters of a maze session.
///
/// Fields missing when deserializing take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub size: usize,
    pub exits: usize,
    pub delay_ms: u64,
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: 21,
            exits: 2,
            delay_ms: 100,
            seed: None,
        }
    }
}

impl MazeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, value: usize) -> Self {
        self.size = value;
        self
    }

    pub fn exits(mut self, value: usize) -> Self {
        self.exits = value;
        self
    }

    pub fn delay_ms(mut self, value: u64) -> Self {
        self.delay_ms = value;
        self
    }

    pub fn seed(mut self, value: Option<u64>) -> Self {
        self.seed = value;
        self
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_size(self.size) {
            return Err(ConfigError::InvalidGridSize(self.size));
        }
        if self.exits == 0 {
            return Err(ConfigError::InvalidExitCount(self.exits));
        }
        Ok(())
    }
}
