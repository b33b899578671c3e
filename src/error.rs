use std::path::PathBuf;

/// A move that could not be applied to a board
///
/// Failing to apply a move never mutates the board, so callers can simply
/// ask for another column
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMoveError {
    #[error("column {column} out of range for a board with {cols} columns")]
    OutOfRange { column: usize, cols: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// Errors that can occur when building a board
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board dimensions {rows}x{cols}, both must be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("could not parse '{0}' as a valid move")]
    InvalidMoveChar(char),

    #[error("invalid position, game is over before move {index}")]
    GameOver { index: usize },

    #[error("illegal move: {0}")]
    Illegal(#[from] IllegalMoveError),
}

/// Errors that can occur when starting a search
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors that can occur while driving a game
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the game is already over")]
    GameOver,

    #[error("it is not the computer's turn")]
    NotComputerTurn,

    #[error("search returned no move for a game in progress")]
    NoMoveAvailable,

    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMoveError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("board error: {0}")]
    Board(#[from] BoardError),
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
