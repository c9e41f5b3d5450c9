mod config;
mod game;
mod input;
mod render;
mod session;
mod snake;
mod state;
mod term;
mod ticker;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{Config, WriteLogger};

use config::GameConfig;

/// Screen coordinates, column first.
pub type Coords = (u16, u16);

#[derive(Parser)]
#[command(name = "tick-snake")]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// JSON file with any of grid_size, cell_size, tick_ms
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the board
    #[arg(long)]
    grid_size: Option<i32>,

    /// Pixel size of a cell in the projected scene. Only the pixel geometry
    /// changes, the terminal always draws a cell two columns wide
    #[arg(long)]
    cell_size: Option<u32>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Where to write the log, the screen belongs to the game
    #[arg(long, default_value = "tick-snake.log")]
    log_file: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }

        Ok(config.validate()?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("failed to initialize logger")?;

    let config = cli.game_config()?;
    info!("starting with {:?}", config);

    let mut game = game::SnakeGame::new(config)?;
    let res = game.run();
    if let Err(e) = &res {
        error!("session ended with an error: {:#}", e);
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["tick-snake"]).unwrap();

        assert_eq!(cli.game_config().unwrap(), GameConfig::default());
        assert_eq!(cli.log_file, PathBuf::from("tick-snake.log"));
        assert_eq!(cli.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from(["tick-snake", "--grid-size", "30", "--tick-ms", "80"]).unwrap();
        let config = cli.game_config().unwrap();

        assert_eq!(config.grid_size, 30);
        assert_eq!(config.tick_ms, 80);
        assert_eq!(config.cell_size, 20);
    }

    #[test]
    fn test_cli_cell_size_reaches_config() {
        let cli = Cli::try_parse_from(["tick-snake", "--cell-size", "8"]).unwrap();
        let config = cli.game_config().unwrap();

        assert_eq!(config.cell_size, 8);
        assert_eq!(config.grid_size, 20);
    }

    #[test]
    fn test_cli_rejects_invalid_config() {
        let cli = Cli::try_parse_from(["tick-snake", "--grid-size", "10"]).unwrap();
        assert!(cli.game_config().is_err());
    }

    #[test]
    fn test_cli_log_level() {
        let cli = Cli::try_parse_from(["tick-snake", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }
}
