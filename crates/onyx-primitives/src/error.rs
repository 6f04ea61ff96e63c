//! Common error types for primitives

use thiserror::Error;

/// Primitive parsing error
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// Invalid byte length
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        got: usize,
    },
}
