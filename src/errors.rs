use std::io;

/// Errors raised while loading a grid from text.
///
/// Only load-time failures live here. Out-of-bounds access and span/word
/// length mismatches are assertion failures (they are unreachable on valid
/// inputs) and abort with context instead.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("grid is empty after comment stripping")]
    EmptyGrid,

    #[error("row {row} has {len} cells; expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("invalid cell '{ch}' at ({row},{col}); cells are '#', '.', or 'A'-'Z'")]
    InvalidCell { ch: char, row: usize, col: usize },

    #[error("failed to read grid from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}
