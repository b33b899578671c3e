//! Depth-limited minimax search with alpha-beta pruning

use tracing::debug;

use std::convert::TryFrom;

use crate::board::{Board, Player};
use crate::error::SearchError;

/// The base score of a won position
pub const WIN_SCORE: i32 = 1000;

/// Whether a score reports a forced win for the searching player
pub fn is_win_score(score: i32) -> bool {
    score >= WIN_SCORE
}

/// Whether a score reports a forced loss for the searching player
pub fn is_loss_score(score: i32) -> bool {
    score <= -WIN_SCORE
}

/// The score and recommended column of a search
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchOutcome {
    pub score: i32,
    /// `None` when the position was terminal, the depth was 0 or no column was playable
    pub best_move: Option<usize>,
}

/// Searches `board` to `depth` plies and recommends a column for `player`
///
/// The caller's board is never modified. A negative depth is rejected.
pub fn search(board: &Board, depth: i32, player: Player) -> Result<SearchOutcome, SearchError> {
    Ok(Searcher::new(depth)?.search(board, player))
}

// static evaluation from the point of view of `player`, with `depth` plies left
fn evaluate(board: &Board, player: Player, depth: u32) -> i32 {
    let magnitude = WIN_SCORE.saturating_add(i32::try_from(depth).unwrap_or(i32::MAX));
    if board.check_winner(player) {
        magnitude
    } else if board.check_winner(player.opponent()) {
        -magnitude
    } else {
        0
    }
}

/// A depth-limited minimax agent
///
/// # Position Scoring
/// Scores are from the point of view of the searching player. A position the
/// player has won scores `WIN_SCORE` plus the number of plies that were still
/// left to search when the win was found, so quicker wins score higher and
/// slower losses score less negatively. Every other leaf, drawn or not,
/// scores 0.
///
/// # Move Selection
/// Columns are tried in ascending order and only a strictly better score
/// replaces the current best, so the lowest column wins any tie.
#[derive(Clone, Debug)]
pub struct Searcher {
    depth: u32,
    pruning: bool,

    /// The number of nodes visited by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a new alpha-beta `Searcher` for a fixed depth
    pub fn new(depth: i32) -> Result<Self, SearchError> {
        let depth = u32::try_from(depth).map_err(|_| {
            SearchError::InvalidArgument(format!("search depth must be >= 0, got {}", depth))
        })?;
        Ok(Self {
            depth,
            pruning: true,
            node_count: 0,
        })
    }

    /// Disables alpha-beta cutoffs, searching the full minimax tree
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Searches a private copy of `board` for the best column for `player`
    pub fn search(&mut self, board: &Board, player: Player) -> SearchOutcome {
        let start = self.node_count;
        let mut scratch = board.clone();
        let (score, best_move) =
            self.minimax(&mut scratch, self.depth, i32::MIN, i32::MAX, true, player);

        debug!(
            %player,
            depth = self.depth,
            pruning = self.pruning,
            nodes = self.node_count - start,
            score,
            ?best_move,
            "search finished"
        );
        SearchOutcome { score, best_move }
    }

    /// The exact minimax value for `player` of playing `column` on `board`
    ///
    /// Returns `None` if the column is not playable or the depth is 0.
    pub fn score_move(&mut self, board: &Board, column: usize, player: Player) -> Option<i32> {
        let depth = self.depth.checked_sub(1)?;
        let mut scratch = board.clone();
        let mut child = scratch.play_scoped(column, player).ok()?;
        let (score, _) = self.minimax(&mut child, depth, i32::MIN, i32::MAX, false, player);
        Some(score)
    }

    /// Performs the game tree search on `board`, restoring it before returning
    ///
    /// `player` is always the maximising side; `maximizing` says whether it is
    /// also the side to move at this node.
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        player: Player,
    ) -> (i32, Option<usize>) {
        self.node_count += 1;

        if depth == 0 || board.check_winner(player) || board.check_winner(player.opponent()) {
            return (evaluate(board, player, depth), None);
        }

        let mover = if maximizing { player } else { player.opponent() };
        let mut best_score = 0;
        let mut best_move = None;

        for column in 0..board.cols() {
            let score = match board.play_scoped(column, mover) {
                Ok(mut child) => {
                    self.minimax(&mut child, depth - 1, alpha, beta, !maximizing, player)
                        .0
                }
                Err(_) => continue,
            };

            if maximizing {
                if best_move.is_none() || score > best_score {
                    best_score = score;
                    best_move = Some(column);
                }
                alpha = alpha.max(score);
            } else {
                if best_move.is_none() || score < best_score {
                    best_score = score;
                    best_move = Some(column);
                }
                beta = beta.min(score);
            }

            // the other side will never let play reach this node
            if self.pruning && beta <= alpha {
                break;
            }
        }

        match best_move {
            Some(_) => (best_score, best_move),
            // no playable column
            None => (evaluate(board, player, depth), None),
        }
    }
}
