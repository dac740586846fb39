use crate::bytes::{ByteError, ByteReader, format_mac};

use super::layout;

/// Ethernet II header with MACs already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetHeader {
    pub dst_mac: String,
    pub src_mac: String,
    pub ether_type: u16,
}

impl EthernetHeader {
    pub fn is_vlan_tagged(&self) -> bool {
        matches!(
            self.ether_type,
            layout::ETHERTYPE_VLAN | layout::ETHERTYPE_QINQ
        )
    }
}

/// Parse the 14-byte Ethernet header at the start of a frame.
///
/// # Errors
/// Returns `ByteError::OutOfBounds` for frames shorter than 14 bytes.
pub fn parse_ethernet(frame: &[u8]) -> Result<EthernetHeader, ByteError> {
    let reader = ByteReader::new(frame);
    reader.require_len(layout::ETHERNET_HEADER_LEN)?;
    Ok(EthernetHeader {
        dst_mac: format_mac(reader.read_slice(layout::DST_MAC_RANGE)?)?,
        src_mac: format_mac(reader.read_slice(layout::SRC_MAC_RANGE)?)?,
        ether_type: reader.read_u16_be(layout::ETHER_TYPE_RANGE)?,
    })
}
