use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snake::Position;

pub const GRID_SIZE: i32 = 20;
pub const CELL_SIZE: u32 = 20;
pub const TICK_INTERVAL_MS: u64 = 100;

/// Head first, facing right.
pub const INITIAL_SNAKE: [Position; 3] =
    [Position::new(10, 10), Position::new(9, 10), Position::new(8, 10)];
pub const INITIAL_FOOD: Position = Position::new(15, 15);

// The opening layout must fit on the board.
const MIN_GRID_SIZE: i32 = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("grid size {0} is too small, it must be at least 16")]
    GridTooSmall(i32),
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("a {grid_size}x{grid_size} board of {cell_size}px cells does not fit in u32 pixels")]
    BoardTooLarge { grid_size: i32, cell_size: u32 },
}

/// Board and pacing settings for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square board
    pub grid_size: i32,
    /// Pixel size of one cell in the projected scene
    pub cell_size: u32,
    /// Milliseconds between two ticks
    pub tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { grid_size: GRID_SIZE, cell_size: CELL_SIZE, tick_ms: TICK_INTERVAL_MS }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if (self.grid_size as u32).checked_mul(self.cell_size).is_none() {
            return Err(ConfigError::BoardTooLarge {
                grid_size: self.grid_size,
                cell_size: self.cell_size,
            });
        }

        Ok(self)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_opening_layout_fits_default_board() {
        let config = GameConfig::default();
        assert!(INITIAL_SNAKE.iter().all(|p| p.is_within(config.grid_size)));
        assert!(INITIAL_FOOD.is_within(config.grid_size));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let small = GameConfig { grid_size: 15, ..Default::default() };
        assert!(matches!(small.validate(), Err(ConfigError::GridTooSmall(15))));

        let no_cells = GameConfig { cell_size: 0, ..Default::default() };
        assert!(matches!(no_cells.validate(), Err(ConfigError::ZeroCellSize)));

        let frozen = GameConfig { tick_ms: 0, ..Default::default() };
        assert!(matches!(frozen.validate(), Err(ConfigError::ZeroTickInterval)));

        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_board() {
        let huge = GameConfig { cell_size: 300_000_000, ..Default::default() };
        assert!(matches!(
            huge.validate(),
            Err(ConfigError::BoardTooLarge { grid_size: 20, cell_size: 300_000_000 })
        ));

        // 20 * 214_748_364 still fits.
        let largest = GameConfig { cell_size: u32::MAX / 20, ..Default::default() };
        let config = largest.validate().unwrap();
        let state = crate::state::GameState::new(config.grid_size);
        let scene = crate::render::render(&state, config.cell_size);
        assert_eq!(scene.board.width, 20 * (u32::MAX / 20));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "tick_ms": 60 }"#).unwrap();
        assert_eq!(config.tick_ms, 60);
        assert_eq!(config.grid_size, GRID_SIZE);
        assert_eq!(config.cell_size, CELL_SIZE);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/tick-snake.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
