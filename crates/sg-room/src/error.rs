//! Room client error types.
//!
//! Nothing here is fatal to the board: a failed or malformed config fetch
//! is reported to the caller, which falls back to a standalone setup.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomError {
    /// Transport-level failure.
    #[error("room request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status (unknown room, already submitted, ...).
    #[error("room service returned {0}")]
    Status(reqwest::StatusCode),

    /// Response decoded but was missing or mangled where it matters.
    #[error("malformed room response: {0}")]
    Malformed(String),
}
