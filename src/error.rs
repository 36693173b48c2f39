use alloc::string::String;
use enough::StopReason;

/// Errors from surface construction and whole-surface conversion.
///
/// The per-pixel codecs never fail; these only arise when validating
/// buffers or running a cancellable conversion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("row stride {stride} is smaller than a row of pixels ({min} bytes)")]
    InvalidStride { stride: usize, min: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionsMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
