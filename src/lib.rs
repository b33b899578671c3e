//! A Connect 4 engine for playing against a depth-limited computer opponent
//!
//! The computer picks its moves with a minimax game tree search using
//! alpha-beta pruning, looking a fixed number of plies ahead.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{board::{Board, Player}, search::{search, is_win_score}};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_moves("112233")?;
//! let outcome = search(&board, 4, Player::One)?;
//!
//! assert_eq!(outcome.best_move, Some(3));
//! assert!(is_win_score(outcome.score));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod board;

pub mod search;

pub mod analysis;

pub mod game;

pub mod config;

pub mod error;


/// The default number of rows of the game board
pub const DEFAULT_ROWS: usize = 6;

/// The default number of columns of the game board
pub const DEFAULT_COLS: usize = 7;

/// The number of tokens that must line up to win
pub const CONNECT: usize = 4;

// the standard board must be able to hold a winning line in either direction
const_assert!(DEFAULT_ROWS >= CONNECT && DEFAULT_COLS >= CONNECT);
