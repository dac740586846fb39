//! Frame decoding modules.
//!
//! Each layer follows the same split:
//! - `layout`: byte offsets, ranges and protocol constants (source of truth)
//! - per-protocol parsers (`ethernet`, `ipv4`, `tcp`, `udp`) reading through
//!   `bytes::ByteReader`, never by direct indexing
//! - `frame`: composes the layers into one flat `FrameRecord`
//!
//! Parsers are pure and contain no I/O.

pub mod ethernet;
pub mod frame;
pub mod ipv4;
pub mod label;
pub mod layout;
pub mod tcp;
pub mod udp;

pub use frame::{decode_frame, decode_frame_with, frame_timestamp};
pub use label::{ParseProtocolError, Protocol};
pub use tcp::{TcpFlag, decode_tcp_flags, tcp_flags_from_value};
