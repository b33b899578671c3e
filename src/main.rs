use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};

use connect4_engine::board::GameResult;
use connect4_engine::config::AppConfig;
use connect4_engine::error::{GameError, IllegalMoveError};
use connect4_engine::game::Game;

mod cli;
use cli::Cli;

mod terminal;
use terminal::render;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut game = Game::from_config(&config.game)?;
    info!(
        rows = config.game.rows,
        cols = config.game.cols,
        depth = game.depth(),
        computer = %game.computer(),
        "starting game"
    );

    let stdin = stdin();

    println!("Welcome to Connect 4\n");
    println!(
        "You are {}, the computer is {}.",
        game.human(),
        game.computer()
    );

    // game loop
    loop {
        let board_hints = if config.game.show_hints {
            game.human_hints()?
        } else {
            None
        };
        render(game.board(), board_hints.as_deref(), &config.display)
            .context("failed to draw board")?;

        match game.result() {
            GameResult::InProgress => {
                if game.is_computer_turn() {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
                    spinner.set_message("Computer is thinking...");
                    spinner.enable_steady_tick(80);

                    let reply = game.computer_move();
                    spinner.finish_and_clear();

                    let (column, _) = reply?;
                    println!("Computer plays column {}", column + 1);
                    continue;
                }

                print!("Move input > ");
                stdout().flush().context("failed to flush to stdout")?;
                let mut input_str = String::new();
                if stdin.read_line(&mut input_str)? == 0 {
                    // end of input
                    return Ok(());
                }

                let column = match input_str.trim().parse::<usize>() {
                    Ok(column @ 1..=usize::MAX) => column - 1,
                    _ => {
                        println!("Invalid number: {}", input_str.trim());
                        continue;
                    }
                };

                match game.play(column) {
                    Ok(_) => {}
                    Err(GameError::IllegalMove(IllegalMoveError::OutOfRange { cols, .. })) => {
                        println!(
                            "Invalid move, column {} out of range. Columns must be between 1 and {}",
                            column + 1,
                            cols
                        );
                    }
                    Err(GameError::IllegalMove(IllegalMoveError::ColumnFull { .. })) => {
                        println!("Invalid move, column {} full", column + 1);
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            // end states
            GameResult::Win(player) if player == game.computer() => {
                println!("The computer wins. You lost.");
                break;
            }
            GameResult::Win(_) => {
                println!("You win!");
                break;
            }
            GameResult::Draw => {
                println!("Draw!");
                break;
            }
        }
    }

    debug!(moves = ?game.history(), "game finished");
    Ok(())
}
