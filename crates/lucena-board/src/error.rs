//! Error types for board construction.

/// Errors that occur when building a [`Board`](crate::Board) from external input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The FEN string could not be parsed.
    #[error("invalid FEN: {fen}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
    },
    /// The FEN parsed but does not describe a legal chess position.
    #[error("illegal position: {fen}")]
    IllegalPosition {
        /// The FEN string describing the illegal position.
        fen: String,
    },
}
