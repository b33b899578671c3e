use serde::{Deserialize, Serialize};
use tracing::warn;

use std::path::Path;

use crate::board::Player;
use crate::error::ConfigError;
use crate::{DEFAULT_COLS, DEFAULT_ROWS};

/// The largest board, in cells, a config file may ask for
pub const MAX_BOARD_CELLS: usize = 4096;

/// The deepest search a config file may ask for
pub const MAX_SEARCH_DEPTH: i32 = 12;

/// Top-level application configuration, loadable from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub display: DisplayConfig,
}

/// Board size, search depth and seating
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Plies searched by the computer player on each of its turns
    pub search_depth: i32,
    pub computer_player: Player,
    /// Mark winning and losing columns for the human player
    pub show_hints: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            search_depth: 4,
            computer_player: Player::Two,
            show_hints: true,
        }
    }
}

/// Colours used by the terminal front end
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub player_one_color: TokenColor,
    pub player_two_color: TokenColor,
    pub board_color: TokenColor,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            player_one_color: TokenColor::Red,
            player_two_color: TokenColor::Yellow,
            board_color: TokenColor::Blue,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenColor {
    Red,
    Yellow,
    Blue,
    Green,
    Magenta,
    Cyan,
    White,
    Black,
}

impl AppConfig {
    /// Loads configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file, falling back to defaults if the file
    /// does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks configuration values without building a board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.rows == 0 || self.game.cols == 0 {
            return Err(ConfigError::Validation(
                "game.rows and game.cols must be >= 1".into(),
            ));
        }
        match self.game.rows.checked_mul(self.game.cols) {
            Some(cells) if cells <= MAX_BOARD_CELLS => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "game.rows * game.cols must be <= {}",
                    MAX_BOARD_CELLS
                )))
            }
        }
        if self.game.search_depth < 1 || self.game.search_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "game.search_depth must be in [1, {}]",
                MAX_SEARCH_DEPTH
            )));
        }
        if self.display.player_one_color == self.display.player_two_color {
            return Err(ConfigError::Validation(
                "display.player_one_color and display.player_two_color must differ".into(),
            ));
        }
        Ok(())
    }

    /// A TOML string with all default values, for writing an example config file
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
