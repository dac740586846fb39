use crate::bytes::{ByteError, ByteReader, format_ip};

use super::layout;

/// Fixed part of an IPv4 header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Header {
    pub source: String,
    pub destination: String,
    pub protocol: u8,
    pub ttl: u8,
    pub identification: u16,
    pub checksum: u16,
    /// Header length in bytes as announced by IHL (may be below 20 when malformed).
    pub header_len: usize,
}

/// Parse an IPv4 header.
///
/// Returns `Ok(None)` when the version nibble is not 4.
///
/// # Errors
/// Returns `ByteError::OutOfBounds` when fewer than 20 bytes are present.
pub fn parse_ipv4(packet: &[u8]) -> Result<Option<Ipv4Header>, ByteError> {
    let reader = ByteReader::new(packet);
    reader.require_len(layout::IPV4_MIN_HEADER_LEN)?;

    let version_ihl = reader.read_u8(layout::IPV4_VERSION_IHL_OFFSET)?;
    if version_ihl >> 4 != layout::IPV4_VERSION {
        return Ok(None);
    }

    Ok(Some(Ipv4Header {
        source: format_ip(reader.read_slice(layout::IPV4_SRC_RANGE)?)?,
        destination: format_ip(reader.read_slice(layout::IPV4_DST_RANGE)?)?,
        protocol: reader.read_u8(layout::IPV4_PROTOCOL_OFFSET)?,
        ttl: reader.read_u8(layout::IPV4_TTL_OFFSET)?,
        identification: reader.read_u16_be(layout::IPV4_ID_RANGE)?,
        checksum: reader.read_u16_be(layout::IPV4_CHECKSUM_RANGE)?,
        header_len: usize::from(version_ihl & 0x0f) * 4,
    }))
}

/// Transport bytes following the IPv4 header, if the header is well formed.
pub fn ipv4_payload<'a>(packet: &'a [u8], header: &Ipv4Header) -> Option<&'a [u8]> {
    if header.header_len < layout::IPV4_MIN_HEADER_LEN {
        return None;
    }
    ByteReader::new(packet).read_tail(header.header_len).ok()
}
