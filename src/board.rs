//! The Connect 4 grid: move legality, gravity and win/draw detection

use serde::{Deserialize, Serialize};

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::{BoardError, IllegalMoveError};
use crate::{CONNECT, DEFAULT_COLS, DEFAULT_ROWS};

/// One of the two sides of a game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// +1 for the first player, -1 for the second
    pub fn sign(self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
        }
    }

    /// 0 for an empty cell, otherwise the sign of the occupying player
    pub fn sign(self) -> i32 {
        self.player().map_or(0, Player::sign)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// The state of a game, always derived from a [`Board`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameResult {
    InProgress,
    Win(Player),
    Draw,
}

impl GameResult {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }
}

// horizontal, vertical, diagonal ↘ and diagonal ↙ (rows grow downwards)
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A Connect 4 board of arbitrary size
///
/// Cells are stored row by row, with row 0 at the top of the grid and
/// `rows() - 1` at the bottom. Tokens fall to the lowest empty cell of a column,
/// so an empty cell never has an occupied cell above it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    // number of tokens in each column
    heights: Vec<usize>,
}

impl Board {
    /// Creates an empty board with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        let size = rows.checked_mul(cols).filter(|&size| size > 0);
        match size {
            Some(size) => Ok(Self {
                rows,
                cols,
                cells: vec![Cell::Empty; size],
                heights: vec![0; cols],
            }),
            None => Err(BoardError::InvalidDimensions { rows, cols }),
        }
    }

    /// Creates an empty board with the standard 6x7 dimensions
    pub fn standard() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cells: vec![Cell::Empty; DEFAULT_ROWS * DEFAULT_COLS],
            heights: vec![0; DEFAULT_COLS],
        }
    }

    /// Builds a standard board from a string of 1-indexed column digits
    ///
    /// Players alternate, starting with [`Player::One`]. The string is rejected
    /// if any move is illegal or is played after the game has ended.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, BoardError> {
        let mut board = Self::standard();
        board.play_sequence(moves)?;
        Ok(board)
    }

    /// Plays a string of 1-indexed column digits onto this board, alternating
    /// players from whoever is next by token count
    pub fn play_sequence<S: AsRef<str>>(&mut self, moves: S) -> Result<(), BoardError> {
        for (index, column_char) in moves.as_ref().chars().enumerate() {
            let column = match column_char.to_digit(10) {
                Some(digit @ 1..=9) => digit as usize - 1,
                _ => return Err(BoardError::InvalidMoveChar(column_char)),
            };
            if self.evaluate_terminal().is_terminal() {
                return Err(BoardError::GameOver { index });
            }
            let player = self.next_player();
            self.apply_move(column, player)?;
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The number of tokens on the board
    pub fn num_moves(&self) -> usize {
        self.heights.iter().sum()
    }

    /// The player to move if both sides have alternated from an empty board
    pub fn next_player(&self) -> Player {
        if self.num_moves() % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }

    /// The number of tokens in a column, or `None` if it is out of range
    pub fn height(&self, column: usize) -> Option<usize> {
        self.heights.get(column).copied()
    }

    /// Returns the cell at `(row, column)`, with row 0 at the top
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        if row < self.rows && column < self.cols {
            Some(self.cell(row, column))
        } else {
            None
        }
    }

    fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row * self.cols + column]
    }

    fn cell_mut(&mut self, row: usize, column: usize) -> &mut Cell {
        &mut self.cells[row * self.cols + column]
    }

    /// Whether a token can be dropped into `column`
    ///
    /// Out-of-range columns are simply not legal.
    pub fn is_legal_move(&self, column: usize) -> bool {
        column < self.cols && self.cell(0, column).is_empty()
    }

    /// All legal columns in ascending order
    pub fn legal_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cols).filter(move |&column| self.is_legal_move(column))
    }

    /// Drops a token for `player` into `column`, returning the row it landed on
    ///
    /// The board is left untouched if the move is illegal.
    pub fn apply_move(&mut self, column: usize, player: Player) -> Result<usize, IllegalMoveError> {
        if column >= self.cols {
            return Err(IllegalMoveError::OutOfRange {
                column,
                cols: self.cols,
            });
        }
        let row = (0..self.rows)
            .rev()
            .find(|&row| self.cell(row, column).is_empty())
            .ok_or(IllegalMoveError::ColumnFull { column })?;

        *self.cell_mut(row, column) = player.into();
        self.heights[column] += 1;
        Ok(row)
    }

    /// Removes the topmost token of `column`, returning what was there
    pub fn undo_move(&mut self, column: usize) -> Option<Cell> {
        let height = self.height(column)?;
        if height == 0 {
            return None;
        }
        let row = self.rows - height;
        let removed = std::mem::replace(self.cell_mut(row, column), Cell::Empty);
        self.heights[column] -= 1;
        Some(removed)
    }

    /// Applies a move that is undone again when the returned guard is dropped
    ///
    /// Guards nest, so a search can walk down a line of play on one board and
    /// get the original position back as each level returns.
    pub fn play_scoped(
        &mut self,
        column: usize,
        player: Player,
    ) -> Result<ScopedMove<'_>, IllegalMoveError> {
        self.apply_move(column, player)?;
        Ok(ScopedMove {
            board: self,
            column,
        })
    }

    /// Whether `player` has four consecutive tokens in any direction
    pub fn check_winner(&self, player: Player) -> bool {
        let target = Cell::from(player);
        (0..self.rows).any(|row| {
            (0..self.cols).any(|column| {
                self.cell(row, column) == target
                    && DIRECTIONS
                        .iter()
                        .any(|&(d_row, d_col)| self.line_from(row, column, d_row, d_col, target))
            })
        })
    }

    // whether the CONNECT cells starting at (row, column) along the direction all hold target
    fn line_from(&self, row: usize, column: usize, d_row: isize, d_col: isize, target: Cell) -> bool {
        (1..CONNECT as isize).all(|step| {
            let r = row as isize + d_row * step;
            let c = column as isize + d_col * step;
            r >= 0
                && c >= 0
                && (r as usize) < self.rows
                && (c as usize) < self.cols
                && self.cell(r as usize, c as usize) == target
        })
    }

    /// Whether no column can take another token
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|column| !self.cell(0, column).is_empty())
    }

    /// Derives the state of the game from the board
    ///
    /// A win for the first player is reported before a win for the second, and
    /// any win takes precedence over a full board.
    pub fn evaluate_terminal(&self) -> GameResult {
        if self.check_winner(Player::One) {
            GameResult::Win(Player::One)
        } else if self.check_winner(Player::Two) {
            GameResult::Win(Player::Two)
        } else if self.is_full() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// A copy of the board with its columns in reverse order
    pub fn mirrored(&self) -> Self {
        let mut mirror = self.clone();
        for row in 0..self.rows {
            for column in 0..self.cols {
                *mirror.cell_mut(row, self.cols - 1 - column) = self.cell(row, column);
            }
        }
        mirror.heights.reverse();
        mirror
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for column in 0..self.cols {
                let symbol = match self.cell(row, column) {
                    Cell::Empty => '.',
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A move applied by [`Board::play_scoped`], undone when dropped
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    column: usize,
}

impl Deref for ScopedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        self.board.undo_move(self.column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_gravity(board: &Board) {
        for column in 0..board.cols() {
            for row in 1..board.rows() {
                if board.get(row, column) == Some(Cell::Empty) {
                    assert_eq!(
                        board.get(row - 1, column),
                        Some(Cell::Empty),
                        "floating token above ({}, {})\n{}",
                        row,
                        column,
                        board
                    );
                }
            }
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4, 5).unwrap();
        assert_eq!((board.rows(), board.cols()), (4, 5));
        for row in 0..4 {
            for column in 0..5 {
                assert_eq!(board.get(row, column), Some(Cell::Empty));
            }
        }
        assert_eq!(board.evaluate_terminal(), GameResult::InProgress);
    }

    #[test]
    fn test_cell_encoding() {
        let mut board = Board::default();
        assert_eq!(board, Board::standard());
        board.apply_move(0, Player::One).unwrap();
        board.apply_move(1, Player::Two).unwrap();

        let signs: Vec<i32> = (0..3)
            .map(|column| board.get(5, column).map_or(i32::MIN, Cell::sign))
            .collect();
        assert_eq!(signs, vec![1, -1, 0]);
        assert_eq!(Player::One.sign(), -Player::Two.sign());
        assert_eq!(Cell::from(Player::Two).sign(), Player::Two.sign());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Board::new(0, 7),
            Err(BoardError::InvalidDimensions { rows: 0, cols: 7 })
        );
        assert_eq!(
            Board::new(6, 0),
            Err(BoardError::InvalidDimensions { rows: 6, cols: 0 })
        );
        assert!(Board::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_out_of_range_is_not_legal() {
        let board = Board::standard();
        for column in 7..20 {
            assert!(!board.is_legal_move(column));
        }
        assert!(!board.is_legal_move(usize::MAX));
        assert!((0..7).all(|column| board.is_legal_move(column)));
    }

    #[test]
    fn test_apply_move_stacks_from_bottom() {
        let mut board = Board::standard();
        assert_eq!(board.apply_move(3, Player::One), Ok(5));
        assert_eq!(board.apply_move(3, Player::Two), Ok(4));
        assert_eq!(board.get(5, 3), Some(Cell::PlayerOne));
        assert_eq!(board.get(4, 3), Some(Cell::PlayerTwo));
        assert_eq!(board.height(3), Some(2));
    }

    #[test]
    fn test_single_row_column_fills() {
        let mut board = Board::new(1, 3).unwrap();
        assert_eq!(board.apply_move(1, Player::One), Ok(0));
        assert!(!board.is_legal_move(1));

        let before = board.clone();
        assert_eq!(
            board.apply_move(1, Player::Two),
            Err(IllegalMoveError::ColumnFull { column: 1 })
        );
        assert_eq!(
            board.apply_move(1, Player::Two),
            Err(IllegalMoveError::ColumnFull { column: 1 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_out_of_range_leaves_board() {
        let mut board = Board::from_moves("4455").unwrap();
        let before = board.clone();
        assert_eq!(
            board.apply_move(7, Player::One),
            Err(IllegalMoveError::OutOfRange { column: 7, cols: 7 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_gravity_after_play() {
        let board = Board::from_moves("1234567123456712345671").unwrap();
        assert_gravity(&board);
        assert_gravity(&board.mirrored());
    }

    #[test]
    fn test_undo_restores_position() {
        let mut board = Board::from_moves("443").unwrap();
        let before = board.clone();
        board.apply_move(4, Player::Two).unwrap();
        assert_eq!(board.undo_move(4), Some(Cell::PlayerTwo));
        assert_eq!(board, before);
        assert_eq!(board.undo_move(0), None);
        assert_eq!(board.undo_move(42), None);
    }

    #[test]
    fn test_scoped_moves_nest() {
        let mut board = Board::from_moves("44").unwrap();
        let before = board.clone();
        {
            let mut first = board.play_scoped(2, Player::One).unwrap();
            assert_eq!(first.get(5, 2), Some(Cell::PlayerOne));
            {
                let second = first.play_scoped(2, Player::Two).unwrap();
                assert_eq!(second.height(2), Some(2));
            }
            assert_eq!(first.height(2), Some(1));
        }
        assert_eq!(board, before);
        assert!(board.play_scoped(9, Player::One).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::standard();
        for column in 2..6 {
            board.apply_move(column, Player::One).unwrap();
        }
        assert!(board.check_winner(Player::One));
        assert!(!board.check_winner(Player::Two));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::standard();
        for _ in 0..4 {
            board.apply_move(6, Player::Two).unwrap();
        }
        assert!(board.check_winner(Player::Two));
        assert!(!board.check_winner(Player::One));
    }

    #[test]
    fn test_diagonal_down_right_win() {
        // ↘ from the top left of the line: (2,0), (3,1), (4,2), (5,3)
        let mut board = Board::standard();
        for (column, fillers) in [(0, 3), (1, 2), (2, 1), (3, 0)].iter() {
            for _ in 0..*fillers {
                board.apply_move(*column, Player::Two).unwrap();
            }
            board.apply_move(*column, Player::One).unwrap();
        }
        assert_eq!(board.get(2, 0), Some(Cell::PlayerOne));
        assert_eq!(board.get(5, 3), Some(Cell::PlayerOne));
        assert!(board.check_winner(Player::One));
        assert!(!board.check_winner(Player::Two));
    }

    #[test]
    fn test_diagonal_down_left_win() {
        // ↙ from the top right of the line: (2,6), (3,5), (4,4), (5,3)
        let mut board = Board::standard();
        for (column, fillers) in [(6, 3), (5, 2), (4, 1), (3, 0)].iter() {
            for _ in 0..*fillers {
                board.apply_move(*column, Player::One).unwrap();
            }
            board.apply_move(*column, Player::Two).unwrap();
        }
        assert!(board.check_winner(Player::Two));
        assert!(!board.check_winner(Player::One));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::standard();
        for column in 0..3 {
            board.apply_move(column, Player::One).unwrap();
        }
        board.apply_move(3, Player::Two).unwrap();
        assert!(!board.check_winner(Player::One));
        assert_eq!(board.evaluate_terminal(), GameResult::InProgress);
    }

    #[test]
    fn test_no_wrap_around_rows() {
        // tokens at the end of one row and the start of the next must not connect
        let mut board = Board::new(2, 4).unwrap();
        for column in 0..2 {
            board.apply_move(column, Player::One).unwrap();
        }
        for column in 2..4 {
            board.apply_move(column, Player::Two).unwrap();
            board.apply_move(column, Player::One).unwrap();
        }
        assert_eq!(board.get(0, 3), Some(Cell::PlayerOne));
        assert_eq!(board.get(1, 0), Some(Cell::PlayerOne));
        assert!(!board.check_winner(Player::One));
    }

    #[test]
    fn test_full_board_draw() {
        // columns filled in pairs of rows with alternating colours never line up four
        let mut board = Board::standard();
        for column in 0..7 {
            for row in 0..6 {
                let player = if (row / 2 + column) % 2 == 0 {
                    Player::One
                } else {
                    Player::Two
                };
                board.apply_move(column, player).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(!board.check_winner(Player::One));
        assert!(!board.check_winner(Player::Two));
        assert_eq!(board.evaluate_terminal(), GameResult::Draw);
    }

    #[test]
    fn test_win_takes_precedence_over_draw() {
        let mut board = Board::new(1, 4).unwrap();
        for column in 0..4 {
            board.apply_move(column, Player::Two).unwrap();
        }
        assert!(board.is_full());
        assert_eq!(board.evaluate_terminal(), GameResult::Win(Player::Two));
    }

    #[test]
    fn test_from_moves_rejects_bad_input() {
        assert_eq!(
            Board::from_moves("44a"),
            Err(BoardError::InvalidMoveChar('a'))
        );
        assert_eq!(Board::from_moves("0"), Err(BoardError::InvalidMoveChar('0')));
        assert_eq!(
            Board::from_moves("8"),
            Err(BoardError::Illegal(IllegalMoveError::OutOfRange {
                column: 7,
                cols: 7
            }))
        );
        assert_eq!(
            Board::from_moves("1111111"),
            Err(BoardError::Illegal(IllegalMoveError::ColumnFull { column: 0 }))
        );
        assert_eq!(
            Board::from_moves("12121211"),
            Err(BoardError::GameOver { index: 7 })
        );
    }

    #[test]
    fn test_mirrored() {
        let board = Board::from_moves("1127").unwrap();
        let mirror = board.mirrored();
        assert_eq!(mirror.get(5, 6), Some(Cell::PlayerOne));
        assert_eq!(mirror.get(4, 6), Some(Cell::PlayerTwo));
        assert_eq!(mirror.get(5, 0), Some(Cell::PlayerTwo));
        assert_eq!(mirror.height(6), Some(2));
        assert_eq!(mirror.mirrored(), board);
    }

    #[test]
    fn test_display() {
        let board = Board::from_moves("12").unwrap();
        let text = board.to_string();
        assert_eq!(text.lines().count(), 6);
        assert_eq!(text.lines().last(), Some("XO....."));
    }
}
