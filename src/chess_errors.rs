//! Errors used throughout the engine.
//!
//! `EngineError` is the single recoverable error type of the crate. Every
//! variant describes malformed external input (FEN text, move text, protocol
//! commands, option values) or a request that is illegal in the current
//! position. Broken internal invariants are not represented here: those are
//! programming errors and panic instead.
//!
//! Usage guidelines:
//! - Parsing and validation functions return `Result<_, EngineError>`.
//! - The protocol loop turns any `EngineError` into a single diagnostic line
//!   and leaves the current position untouched.

use thiserror::Error;

/// Unified recoverable error type for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The FEN placement/side/castling/en-passant/clock fields are malformed
    /// or describe an inconsistent position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A square in text form was not `a1`..`h8`.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Move text could not be parsed as long algebraic notation.
    #[error("invalid move text: {0}")]
    InvalidMoveText(String),

    /// Move text parsed, but the move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// `undo` was requested with no applied move to take back.
    #[error("no moves to undo")]
    NothingToUndo,

    /// A protocol command was missing arguments or had malformed ones.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// `setoption` named an unknown option or carried a bad value.
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
