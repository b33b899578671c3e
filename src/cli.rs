//! Command-line interface for the Connect 4 game.

use clap::Parser;

use std::path::PathBuf;

use connect4_engine::board::Player;
use connect4_engine::config::AppConfig;

/// Play Connect 4 against a minimax computer opponent
#[derive(Parser, Debug)]
#[command(name = "connect4")]
#[command(about = "Play Connect 4 against a minimax computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "connect4.toml")]
    pub config: PathBuf,

    /// Plies searched by the computer, overriding the config file
    #[arg(short, long, allow_negative_numbers = true)]
    pub depth: Option<i32>,

    /// Let the computer make the first move
    #[arg(long)]
    pub computer_first: bool,

    /// Hide the winning/losing column hints
    #[arg(long)]
    pub no_hints: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(depth) = self.depth {
            config.game.search_depth = depth;
        }
        if self.computer_first {
            config.game.computer_player = Player::One;
        }
        if self.no_hints {
            config.game.show_hints = false;
        }
    }
}
