use thiserror::Error;

/// Errors returned by bounds-checked byte access and formatting.
///
/// # Examples
/// ```
/// use pcapview_core::bytes::ByteError;
///
/// let err = ByteError::OutOfBounds { offset: 20, needed: 4, actual: 22 };
/// assert!(err.to_string().contains("out of bounds"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ByteError {
    #[error("read out of bounds: need {needed} bytes at offset {offset}, buffer has {actual}")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        actual: usize,
    },
    #[error("invalid {what} length: expected {expected}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: &'static str,
        actual: usize,
    },
    #[error("invalid hex byte: {token:?}")]
    InvalidHex { token: String },
}
