//! Per-column move analysis, used for move hints

use rayon::prelude::*;
use tracing::trace;

use crate::board::{Board, Player};
use crate::error::SearchError;
use crate::search::{is_loss_score, is_win_score, Searcher};

/// How a column looks for the player about to move
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Hint {
    /// Leads to a forced win within the search depth
    Winning,
    /// Loses by force within the search depth
    Losing,
    /// Neither side can force a result within the search depth
    Neutral,
    /// The column cannot be played
    Unplayable,
}

impl From<Option<i32>> for Hint {
    fn from(score: Option<i32>) -> Self {
        match score {
            Some(score) if is_win_score(score) => Hint::Winning,
            Some(score) if is_loss_score(score) => Hint::Losing,
            Some(_) => Hint::Neutral,
            None => Hint::Unplayable,
        }
    }
}

/// Scores every column of `board` for `player`, searching `depth` plies deep
///
/// Each column is searched on its own copy of the board across the rayon thread
/// pool. Unplayable columns score `None`, as do all columns of a finished game
/// or a depth 0 search.
pub fn column_scores(
    board: &Board,
    depth: i32,
    player: Player,
) -> Result<Vec<Option<i32>>, SearchError> {
    let searcher = Searcher::new(depth)?;
    if searcher.depth() == 0 || board.evaluate_terminal().is_terminal() {
        return Ok(vec![None; board.cols()]);
    }

    let scores = (0..board.cols())
        .into_par_iter()
        .map(|column| {
            let mut searcher = searcher.clone();
            let score = searcher.score_move(board, column, player);
            trace!(column, ?score, nodes = searcher.node_count, "column scored");
            score
        })
        .collect();
    Ok(scores)
}

/// Hints for every column of `board` for `player`
pub fn hints(board: &Board, depth: i32, player: Player) -> Result<Vec<Hint>, SearchError> {
    Ok(column_scores(board, depth, player)?
        .into_iter()
        .map(Hint::from)
        .collect())
}

/// The lowest column holding the highest score, matching the choice of a search
pub fn best_column(scores: &[Option<i32>]) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (column, score) in scores.iter().enumerate() {
        if let Some(score) = *score {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((column, score)),
            }
        }
    }
    best.map(|(column, _)| column)
}
