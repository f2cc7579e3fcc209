//! Error types for image comparison.
//!
//! The color formulas themselves never fail: bad numeric input turns into `NaN`
//! and is handed back to the caller unchanged. Errors only arise when whole images
//! or buffers are compared and their shapes do not line up.

use thiserror::Error;

/// Result type alias for image comparison operations
pub type CompareResult<T> = Result<T, CompareError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// The two images do not share the same dimensions.
    #[error("image dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    /// A chunk must cover at least one pixel in each direction.
    #[error("chunk size must be non-zero, got {width}x{height}")]
    InvalidChunkSize { width: u32, height: u32 },

    /// A raw buffer is not `width * height * 4` bytes long.
    #[error("buffer holds {actual} bytes, expected {expected} for a {width}x{height} RGBA image")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The parallel worker pool has shut down or dropped a reply.
    #[error("comparison worker pool is unavailable")]
    WorkerUnavailable,
}

/// Returned when a formula name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color-difference formula `{0}`")]
pub struct ParseFormulaError(pub String);
