//! Bounds-checked byte access and text rendering of raw bytes.
//!
//! `reader` owns all integer reads (fixed width, explicit byte order);
//! `format` turns byte ranges into MAC, IP and hex text. Both are pure.

pub mod error;
pub mod format;
pub mod reader;

pub use error::ByteError;
pub use format::{HexCase, format_bytes, format_ip, format_mac, parse_hex_string, to_hex_string};
pub use reader::{ByteOrder, ByteReader};
