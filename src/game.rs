//! A single human versus computer match

use tracing::{debug, info};

use crate::analysis::{hints, Hint};
use crate::board::{Board, GameResult, Player};
use crate::config::GameConfig;
use crate::error::{GameError, SearchError};
use crate::search::search;

/// Turn order and move history for one game
///
/// [`Player::One`] always moves first. Once the board shows a win or a draw
/// no further moves are accepted.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    computer: Player,
    depth: i32,
    history: Vec<usize>,
}

impl Game {
    pub fn new(rows: usize, cols: usize, computer: Player, depth: i32) -> Result<Self, GameError> {
        if depth < 1 {
            return Err(SearchError::InvalidArgument(format!(
                "the computer needs a search depth of at least 1, got {}",
                depth
            ))
            .into());
        }
        Ok(Self {
            board: Board::new(rows, cols)?,
            to_move: Player::One,
            computer,
            depth,
            history: Vec::new(),
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        Self::new(
            config.rows,
            config.cols,
            config.computer_player,
            config.search_depth,
        )
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn computer(&self) -> Player {
        self.computer
    }

    pub fn human(&self) -> Player {
        self.computer.opponent()
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn is_computer_turn(&self) -> bool {
        self.to_move == self.computer
    }

    /// Columns played so far, in order
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn result(&self) -> GameResult {
        self.board.evaluate_terminal()
    }

    /// Plays `column` for the side to move
    ///
    /// An illegal move leaves the game as it was, with the same side to move.
    pub fn play(&mut self, column: usize) -> Result<GameResult, GameError> {
        if self.result().is_terminal() {
            return Err(GameError::GameOver);
        }
        let row = self.board.apply_move(column, self.to_move)?;
        info!(player = %self.to_move, column, row, "move played");

        self.history.push(column);
        self.to_move = self.to_move.opponent();

        let result = self.result();
        if result.is_terminal() {
            info!(?result, moves = self.history.len(), "game over");
        }
        Ok(result)
    }

    /// Per-column hints for the human, or `None` unless the human is to move in
    /// a game still in progress
    pub fn human_hints(&self) -> Result<Option<Vec<Hint>>, GameError> {
        if self.is_computer_turn() || self.result().is_terminal() {
            return Ok(None);
        }
        Ok(Some(hints(&self.board, self.depth, self.human())?))
    }

    /// Searches for and plays the computer's reply, returning the column played
    pub fn computer_move(&mut self) -> Result<(usize, GameResult), GameError> {
        if self.result().is_terminal() {
            return Err(GameError::GameOver);
        }
        if !self.is_computer_turn() {
            return Err(GameError::NotComputerTurn);
        }

        let outcome = search(&self.board, self.depth, self.computer)?;
        let column = outcome.best_move.ok_or(GameError::NoMoveAvailable)?;
        debug!(score = outcome.score, column, "computer chose move");

        let result = self.play(column)?;
        Ok((column, result))
    }
}
