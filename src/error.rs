//! Error types shared by the game and search halves of the crate.
//!
//! Only recoverable conditions live here. Calling-sequence mistakes (for
//! example asking for the terminal cost of a non-terminal node) are
//! assertions, and an unreachable goal is reported as data in
//! [`crate::search::SearchSolution`], not as an error.

use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A game or state-space parameter is outside its valid range.
    #[error("{parameter}: should be in {range}, found {value}")]
    Configuration {
        parameter: &'static str,
        value: u64,
        range: String,
    },

    /// An externally supplied move index cannot be played from the current state.
    #[error("illegal move {index}: {reason}")]
    IllegalMove { index: usize, reason: &'static str },

    /// A move was requested for the player who is not on turn.
    #[error("it is not the {expected} player's turn")]
    OutOfTurn { expected: &'static str },

    #[error("game already over")]
    GameOver,

    #[error("vertex index {index} out of range (state space has {size} vertices)")]
    UnknownVertex { index: usize, size: usize },

    #[error("invalid vertex '{text}': {reason}")]
    InvalidVertex { text: String, reason: String },

    #[error("duplicate vertex '{0}'")]
    DuplicateVertex(String),

    /// Two search solutions that cannot be compared with each other.
    #[error("cannot compare searches: {reason}")]
    ComparisonMismatch { reason: String },

    /// Allocation failed while building a tree or a state space.
    #[error("out of memory while {operation}")]
    ResourceExhaustion { operation: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
