//! Error types for the nimq crate

use thiserror::Error;

/// Main error type for the nimq crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action: pile {pile} does not exist (state has {num_piles} piles)")]
    PileOutOfRange { pile: usize, num_piles: usize },

    #[error(
        "invalid action: cannot take {take} from pile {pile} ({remaining} remaining, at most {max_take} per turn)"
    )]
    InvalidTake {
        pile: usize,
        take: u32,
        remaining: u32,
        max_take: u32,
    },

    #[error("no actions available for state {state} (caller must check is_terminal first)")]
    NoActions { state: String },

    #[error("corrupt agent file '{path}': {message}")]
    CorruptData { path: String, message: String },

    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
