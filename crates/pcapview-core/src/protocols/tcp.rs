use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bytes::{ByteError, ByteReader};

use super::layout;

/// TCP control bit, in wire bit order (FIN is bit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TcpFlag {
    Fin,
    Syn,
    Rst,
    Psh,
    Ack,
    Urg,
}

impl TcpFlag {
    pub const ALL: [TcpFlag; 6] = [
        TcpFlag::Fin,
        TcpFlag::Syn,
        TcpFlag::Rst,
        TcpFlag::Psh,
        TcpFlag::Ack,
        TcpFlag::Urg,
    ];

    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TcpFlag::Fin => "FIN",
            TcpFlag::Syn => "SYN",
            TcpFlag::Rst => "RST",
            TcpFlag::Psh => "PSH",
            TcpFlag::Ack => "ACK",
            TcpFlag::Urg => "URG",
        }
    }
}

impl fmt::Display for TcpFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode the low six control bits of a TCP flags byte.
///
/// ECE/CWR (bits 6 and 7) are ignored.
///
/// # Examples
/// ```
/// use pcapview_core::{TcpFlag, decode_tcp_flags};
///
/// assert_eq!(decode_tcp_flags(0x12), vec![TcpFlag::Syn, TcpFlag::Ack]);
/// assert!(decode_tcp_flags(0xc0).is_empty());
/// ```
pub fn decode_tcp_flags(byte: u8) -> Vec<TcpFlag> {
    let bits = byte & layout::TCP_FLAG_MASK;
    TcpFlag::ALL
        .into_iter()
        .filter(|flag| bits & flag.bit() != 0)
        .collect()
}

/// Lenient variant for values that did not come from a single byte field.
///
/// Anything that does not fit in a byte decodes to an empty set.
///
/// # Examples
/// ```
/// use pcapview_core::{TcpFlag, tcp_flags_from_value};
///
/// assert_eq!(tcp_flags_from_value(1u32), vec![TcpFlag::Fin]);
/// assert!(tcp_flags_from_value(256u32).is_empty());
/// assert!(tcp_flags_from_value(-1i64).is_empty());
/// ```
pub fn tcp_flags_from_value<T: TryInto<u8>>(value: T) -> Vec<TcpFlag> {
    match value.try_into() {
        Ok(byte) => decode_tcp_flags(byte),
        Err(_) => Vec::new(),
    }
}

/// Fixed 20-byte part of a TCP header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub seq: u32,
    pub ack: u32,
    pub flags: Vec<TcpFlag>,
    pub window: u16,
    pub checksum: u16,
}

/// Parse the fixed TCP header.
///
/// # Errors
/// Returns `ByteError::OutOfBounds` when fewer than 20 bytes are present.
pub fn parse_tcp(segment: &[u8]) -> Result<TcpHeader, ByteError> {
    let reader = ByteReader::new(segment);
    reader.require_len(layout::TCP_MIN_HEADER_LEN)?;
    Ok(TcpHeader {
        src_port: reader.read_u16_be(layout::TCP_SRC_PORT_RANGE)?,
        dst_port: reader.read_u16_be(layout::TCP_DST_PORT_RANGE)?,
        seq: reader.read_u32_be(layout::TCP_SEQ_RANGE)?,
        ack: reader.read_u32_be(layout::TCP_ACK_RANGE)?,
        flags: decode_tcp_flags(reader.read_u8(layout::TCP_FLAGS_OFFSET)?),
        window: reader.read_u16_be(layout::TCP_WINDOW_RANGE)?,
        checksum: reader.read_u16_be(layout::TCP_CHECKSUM_RANGE)?,
    })
}
