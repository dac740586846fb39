use thiserror::Error;

/// Fatal rejection of a capture buffer.
///
/// Messages carry a single classification and never expose offsets; any
/// record-level problem after the header is handled by stopping iteration
/// instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    #[error("invalid capture file: truncated global header")]
    TooShort,
    #[error("invalid capture file: header magic number mismatch")]
    InvalidHeader,
}
