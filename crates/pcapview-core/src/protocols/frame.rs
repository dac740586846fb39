use crate::FrameRecord;
use crate::bytes::{ByteReader, HexCase, to_hex_string};

use super::ethernet::parse_ethernet;
use super::ipv4::{ipv4_payload, parse_ipv4};
use super::label::Protocol;
use super::layout;
use super::tcp::parse_tcp;
use super::udp::parse_udp;

pub const MAX_MICROS: u32 = 999_999;

/// Seconds plus the microsecond remainder clamped to `0..=999_999`.
pub fn frame_timestamp(ts_sec: u32, ts_usec: u32) -> f64 {
    f64::from(ts_sec) + f64::from(ts_usec.min(MAX_MICROS)) / 1_000_000.0
}

/// Decode one captured Ethernet frame into a flat record.
///
/// Returns `None` for frames shorter than the Ethernet header and for
/// VLAN-tagged frames. Inner headers that are cut short leave their fields
/// unset instead of failing the frame.
///
/// # Examples
/// ```
/// use pcapview_core::{Protocol, decode_frame};
///
/// let mut frame = vec![0xff; 6];
/// frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 1]);
/// frame.extend_from_slice(&[0x08, 0x06]);
/// frame.extend_from_slice(&[0u8; 28]);
///
/// let record = decode_frame(&frame, 10, 500_000).unwrap();
/// assert_eq!(record.protocol, Protocol::Arp);
/// assert_eq!(record.source, "02:00:00:00:00:01");
/// assert_eq!(record.timestamp, 10.5);
/// assert!(record.port.is_none());
/// ```
pub fn decode_frame(frame: &[u8], ts_sec: u32, ts_usec: u32) -> Option<FrameRecord> {
    decode_frame_with(frame, ts_sec, ts_usec, HexCase::default())
}

/// `decode_frame` with an explicit case for `raw_hex`.
pub fn decode_frame_with(
    frame: &[u8],
    ts_sec: u32,
    ts_usec: u32,
    hex_case: HexCase,
) -> Option<FrameRecord> {
    let ethernet = match parse_ethernet(frame) {
        Ok(header) => header,
        Err(err) => {
            tracing::trace!(len = frame.len(), %err, "dropping frame without Ethernet header");
            return None;
        }
    };
    if ethernet.is_vlan_tagged() {
        tracing::trace!(
            ether_type = %format!("0x{:04x}", ethernet.ether_type),
            "dropping VLAN-tagged frame"
        );
        return None;
    }

    let mut record = FrameRecord {
        timestamp: frame_timestamp(ts_sec, ts_usec),
        length: frame.len(),
        raw_hex: to_hex_string(frame, hex_case),
        source: ethernet.src_mac.clone(),
        destination: ethernet.dst_mac.clone(),
        protocol: Protocol::Unknown(ethernet.ether_type),
        port: None,
        dst_port: None,
        flags: Vec::new(),
        src_mac: ethernet.src_mac,
        dst_mac: ethernet.dst_mac,
        ether_type: ethernet.ether_type,
        ip_ttl: None,
        ip_id: None,
        ip_checksum: None,
        tcp_seq: None,
        tcp_ack: None,
        tcp_window: None,
        tcp_checksum: None,
        udp_length: None,
        udp_checksum: None,
    };

    match record.ether_type {
        layout::ETHERTYPE_IPV4 => {
            if let Ok(packet) = ByteReader::new(frame).read_tail(layout::ETHERNET_HEADER_LEN) {
                apply_ipv4(&mut record, packet);
            }
        }
        layout::ETHERTYPE_ARP => record.protocol = Protocol::Arp,
        layout::ETHERTYPE_IPV6 => record.protocol = Protocol::Ipv6,
        _ => {}
    }

    Some(record)
}

fn apply_ipv4(record: &mut FrameRecord, packet: &[u8]) {
    let header = match parse_ipv4(packet) {
        Ok(Some(header)) => header,
        Ok(None) => {
            tracing::trace!("IPv4 EtherType without an IPv4 version nibble");
            return;
        }
        Err(err) => {
            tracing::trace!(%err, "IPv4 header truncated");
            return;
        }
    };
    let payload = ipv4_payload(packet, &header);

    record.protocol = Protocol::from_ip_number(header.protocol);
    record.ip_ttl = Some(header.ttl);
    record.ip_id = Some(header.identification);
    record.ip_checksum = Some(header.checksum);
    record.source = header.source;
    record.destination = header.destination;

    let Some(payload) = payload else {
        return;
    };
    match header.protocol {
        layout::IP_PROTO_TCP => {
            if let Ok(tcp) = parse_tcp(payload) {
                if tcp.dst_port == layout::SMTP_PORT {
                    record.protocol = Protocol::Smtp;
                }
                record.port = Some(tcp.src_port);
                record.dst_port = Some(tcp.dst_port);
                record.flags = tcp.flags;
                record.tcp_seq = Some(tcp.seq);
                record.tcp_ack = Some(tcp.ack);
                record.tcp_window = Some(tcp.window);
                record.tcp_checksum = Some(tcp.checksum);
            }
        }
        layout::IP_PROTO_UDP => {
            if let Ok(udp) = parse_udp(payload) {
                record.port = Some(udp.src_port);
                record.dst_port = Some(udp.dst_port);
                record.udp_length = Some(udp.length);
                record.udp_checksum = Some(udp.checksum);
            }
        }
        _ => {}
    }
}
