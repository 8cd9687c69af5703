//! Async client for the Sigil room service.
//!
//! The room service hands out per-participant brush configs, collects one
//! PNG stroke from each participant, and reports how many have submitted.
//! This crate models that boundary only: form-POST requests, JSON
//! responses, and a completion-poll loop. It never touches the board; the
//! embedding application wires the two together.

mod client;
mod error;
mod types;

pub use client::RoomClient;
pub use error::RoomError;
pub use types::{ConfigEnvelope, CreatedRoom, Progress, SessionKey};
