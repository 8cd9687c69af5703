//! Render error types.

use thiserror::Error;

/// Errors from surface construction or capture.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Surface dimensions must be non-zero.
    #[error("invalid surface size {0}x{1}")]
    ZeroSized(u32, u32),

    /// PNG encoding error
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
