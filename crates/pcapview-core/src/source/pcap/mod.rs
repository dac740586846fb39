//! Legacy libpcap buffer source.
//!
//! `reader` validates the 24-byte global header (four accepted magic
//! encodings); `parser` walks the record stream of a fully resident buffer and
//! stops, without error, at the first truncated or malformed record.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::CaptureError;
pub use parser::PcapBufferSource;
pub use reader::{CaptureHeader, TimestampPrecision};
