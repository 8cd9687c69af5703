//! Board layer: turns pointer events into brush strokes.
//!
//! Sits between the embedding shell (which produces raw pointer events and
//! owns the UI) and the simulation/render crates. The [`Board`] routes
//! normalized input to its [`sg_core::Brush`], paints resulting frames onto
//! its [`sg_render::Surface`], tracks the ink gauge, and reports lifecycle
//! signals (`DrawingStarted`, `StrokeComplete`) as return values rather than
//! callbacks.

pub mod board;
pub mod input;

pub use board::{Board, BoardSignal, InkGauge};
pub use input::{InputEvent, PointerPhase, RawPointer, normalize};
