use crate::bytes::{ByteError, ByteReader};

use super::layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub length: u16,
    pub checksum: u16,
}

/// Parse the 8-byte UDP header.
///
/// # Errors
/// Returns `ByteError::OutOfBounds` when fewer than 8 bytes are present.
pub fn parse_udp(datagram: &[u8]) -> Result<UdpHeader, ByteError> {
    let reader = ByteReader::new(datagram);
    reader.require_len(layout::UDP_HEADER_LEN)?;
    Ok(UdpHeader {
        src_port: reader.read_u16_be(layout::UDP_SRC_PORT_RANGE)?,
        dst_port: reader.read_u16_be(layout::UDP_DST_PORT_RANGE)?,
        length: reader.read_u16_be(layout::UDP_LENGTH_RANGE)?,
        checksum: reader.read_u16_be(layout::UDP_CHECKSUM_RANGE)?,
    })
}
