//! Game configuration - board shape and the ordered level list
//!
//! Loaded once per session and never mutated. The default reproduces the
//! shipped game: an 8x8 board with 6 gem kinds and three levels.
//!
//! ```json
//! {
//!   "grid_size": 8,
//!   "gem_kinds": 6,
//!   "levels": [
//!     { "level": 1, "target": 500, "moves": 20 },
//!     { "level": 2, "target": 1000, "moves": 25 }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    DEFAULT_GEM_KINDS, DEFAULT_GRID_SIZE, MAX_GEM_KINDS, MAX_GRID_SIZE, MIN_GEM_KINDS,
    MIN_GRID_SIZE,
};

/// One level's goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// 1-based level number; must equal the record's position in the list
    pub level: u32,
    /// Score needed to clear the level
    pub target: u32,
    /// Successful swaps available
    pub moves: u32,
}

impl LevelConfig {
    pub const fn new(level: u32, target: u32, moves: u32) -> Self {
        Self {
            level,
            target,
            moves,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: usize,
    pub gem_kinds: u8,
    pub levels: Vec<LevelConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            gem_kinds: DEFAULT_GEM_KINDS,
            levels: vec![
                LevelConfig::new(1, 500, 20),
                LevelConfig::new(2, 1000, 25),
                LevelConfig::new(3, 1500, 30),
            ],
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size {0} is outside {}..={}", MIN_GRID_SIZE, MAX_GRID_SIZE)]
    GridSize(usize),
    #[error("gem kinds {0} is outside {}..={}", MIN_GEM_KINDS, MAX_GEM_KINDS)]
    GemKinds(u8),
    #[error("level list is empty")]
    NoLevels,
    #[error("level record #{index} is numbered {found}")]
    LevelNumber { index: usize, found: u32 },
    #[error("level {0} has no moves")]
    NoMoves(u32),
    #[error("level {0} has no target")]
    NoTarget(u32),
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config")]
    Parse(#[from] serde_json::Error),
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if !(MIN_GEM_KINDS..=MAX_GEM_KINDS).contains(&self.gem_kinds) {
            return Err(ConfigError::GemKinds(self.gem_kinds));
        }
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        for (index, level) in self.levels.iter().enumerate() {
            if level.level as usize != index + 1 {
                return Err(ConfigError::LevelNumber {
                    index,
                    found: level.level,
                });
            }
            if level.moves == 0 {
                return Err(ConfigError::NoMoves(level.level));
            }
            if level.target == 0 {
                return Err(ConfigError::NoTarget(level.level));
            }
        }
        Ok(())
    }

    pub fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Config for a 1-based level number
    pub fn level(&self, level: u32) -> Option<&LevelConfig> {
        let idx = (level as usize).checked_sub(1)?;
        self.levels.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_shipped_levels() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.gem_kinds, 6);
        assert_eq!(config.level_count(), 3);
        assert_eq!(config.level(1), Some(&LevelConfig::new(1, 500, 20)));
        assert_eq!(config.level(3), Some(&LevelConfig::new(3, 1500, 30)));
        assert_eq!(config.level(0), None);
        assert_eq!(config.level(4), None);
    }

    #[test]
    fn test_parse_partial_document_uses_defaults() {
        let config =
            GameConfig::from_json_str(r#"{"levels":[{"level":1,"target":90,"moves":2}]}"#)
                .unwrap();
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.levels, vec![LevelConfig::new(1, 90, 2)]);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let mut config = GameConfig::default();
        config.grid_size = 2;
        assert!(matches!(config.validate(), Err(ConfigError::GridSize(2))));

        let mut config = GameConfig::default();
        config.gem_kinds = 2;
        assert!(matches!(config.validate(), Err(ConfigError::GemKinds(2))));
    }

    #[test]
    fn test_rejects_bad_levels() {
        let mut config = GameConfig::default();
        config.levels.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoLevels)));

        let mut config = GameConfig::default();
        config.levels[1].level = 5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LevelNumber { index: 1, found: 5 })
        ));

        let mut config = GameConfig::default();
        config.levels[0].moves = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoMoves(1))));

        let mut config = GameConfig::default();
        config.levels[2].target = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoTarget(3))));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
