//! Console settings read from the environment.

use std::fs;
use std::path::PathBuf;

use tracing::info;
use wheelshow_session::domain::config::GameConfig;

use crate::error::AppError;

const PUZZLES: &str = "WHEELSHOW_PUZZLES";
const CONFIG: &str = "WHEELSHOW_CONFIG";
const PLAYERS: &str = "WHEELSHOW_PLAYERS";
const SEED: &str = "WHEELSHOW_SEED";
const DEFAULT_PLAYERS: usize = 3;

/// Where the console finds its puzzles, rules, and players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Puzzle file (`.json`, `.yaml`, or `.yml`).
    pub puzzles: PathBuf,
    /// Optional YAML game configuration.
    pub game_config: Option<PathBuf>,
    /// Player names in seat order.
    pub players: Vec<String>,
    /// Seed for a reproducible show.
    pub seed: Option<u64>,
}

impl ConsoleConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `WHEELSHOW_PUZZLES` is unset or
    /// `WHEELSHOW_SEED` is not a number.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the puzzle path is missing or the seed
    /// is not a number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let puzzles = lookup(PUZZLES)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| AppError::Config(format!("{PUZZLES} environment variable must be set")))?;
        let game_config = lookup(CONFIG)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let mut players: Vec<String> = lookup(PLAYERS)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        if players.is_empty() {
            players = (1..=DEFAULT_PLAYERS).map(|n| format!("Player {n}")).collect();
        }
        let seed = lookup(SEED)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| AppError::Config(format!("{SEED} must be a valid u64: {e}")))
            })
            .transpose()?;
        Ok(Self {
            puzzles,
            game_config,
            players,
            seed,
        })
    }

    /// Loads the game configuration, or the defaults when none is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read and
    /// `AppError::Game` if it is not a valid configuration.
    pub fn load_game_config(&self) -> Result<GameConfig, AppError> {
        let Some(path) = &self.game_config else {
            return Ok(GameConfig::default());
        };
        let raw = fs::read_to_string(path)?;
        let config = GameConfig::from_yaml_str(&raw)?;
        info!(path = %path.display(), "loaded game configuration");
        Ok(config)
    }
}
