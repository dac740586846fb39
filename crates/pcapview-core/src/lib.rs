//! pcapview core library for offline libpcap decoding.
//!
//! A capture buffer flows through three layers: `source` validates the
//! global header and walks packet records, `protocols` decodes each
//! Ethernet frame into a flat [`FrameRecord`] (Ethernet, IPv4, TCP, UDP), and
//! `analysis` folds the records into a [`CaptureSummary`]. Parsing is
//! byte-oriented and side-effect free; file reads are confined to
//! [`decode_capture_file`].
//!
//! Invariants:
//! - Only a malformed global header is an error. A truncated or malformed
//!   record ends iteration and every record decoded before it is kept.
//! - Records keep capture order; VLAN-tagged and sub-Ethernet frames are
//!   skipped without ending iteration.
//! - Top-N lists are sorted by count; equal counts keep first-seen order.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use pcapview_core::{DecodeOptions, decode_capture_file};
//!
//! let result = decode_capture_file(Path::new("capture.pcap"), &DecodeOptions::default())?;
//! println!("packets: {}", result.summary.total_packets);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod analysis;
pub mod bytes;
pub mod hexdump;
pub mod protocols;
pub mod source;

pub use analysis::{
    AnalysisError, decode_capture, decode_capture_file, summarize, timestamp_to_rfc3339,
};
pub use bytes::{HexCase, format_bytes, format_ip};
pub use hexdump::{HexDump, HexRow};
pub use protocols::{
    Protocol, TcpFlag, decode_frame, decode_frame_with, decode_tcp_flags, tcp_flags_from_value,
};
pub use source::{CaptureError, PacketEvent, PcapBufferSource, StopReason};

/// Default length of the top source / destination lists.
pub const DEFAULT_TOP_N: usize = 3;

/// One decoded Ethernet frame.
///
/// `source` / `destination` hold dotted IPv4 addresses when an IPv4 header
/// was decoded and colon-separated MAC addresses otherwise.
///
/// # Examples
/// ```
/// use pcapview_core::{Protocol, decode_frame};
///
/// let mut frame = vec![0xff; 6];
/// frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 1, 0x86, 0xdd]);
/// frame.extend_from_slice(&[0u8; 40]);
///
/// let record = decode_frame(&frame, 0, 0).unwrap();
/// assert_eq!(record.protocol, Protocol::Ipv6);
/// assert_eq!(record.length, 54);
/// assert_eq!(record.destination, "FF:FF:FF:FF:FF:FF");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Seconds since the epoch with microsecond fraction.
    pub timestamp: f64,
    /// Captured frame length in bytes.
    pub length: usize,
    /// Space-separated hex of the whole captured frame.
    pub raw_hex: String,
    pub source: String,
    pub destination: String,
    pub protocol: Protocol,
    /// TCP/UDP source port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_port: Option<u16>,
    /// Set TCP flags in `FIN, SYN, RST, PSH, ACK, URG` order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<TcpFlag>,
    pub src_mac: String,
    pub dst_mac: String,
    pub ether_type: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_ttl: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_checksum: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_seq: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_ack: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_window: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_checksum: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp_checksum: Option<u16>,
}

/// Address with its occurrence count.
///
/// # Examples
/// ```
/// use pcapview_core::AddressCount;
///
/// let entry = AddressCount {
///     address: "10.0.0.1".to_string(),
///     count: 4,
/// };
/// assert_eq!(entry.count, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressCount {
    pub address: String,
    pub count: u64,
}

/// Aggregate statistics over decoded records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSummary {
    pub total_packets: u64,
    /// Sum of captured frame lengths.
    pub total_bytes: u64,
    /// Record count per protocol label, in label order.
    pub protocols: BTreeMap<String, u64>,
    /// Most frequent sources, count descending.
    pub top_sources: Vec<AddressCount>,
    /// Most frequent destinations, count descending.
    pub top_destinations: Vec<AddressCount>,
}

/// Everything decoded from one capture buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureResult {
    pub records: Vec<FrameRecord>,
    pub summary: CaptureSummary,
    /// Space-separated hex of the entire input, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_hex: Option<String>,
}

/// Knobs for [`decode_capture`].
///
/// # Examples
/// ```
/// use pcapview_core::{DecodeOptions, HexCase};
///
/// let options = DecodeOptions {
///     top_n: 10,
///     ..DecodeOptions::default()
/// };
/// assert!(options.include_full_hex);
/// assert_eq!(options.hex_case, HexCase::Lower);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Render the whole input as `full_hex`.
    pub include_full_hex: bool,
    /// Length of the top source / destination lists.
    pub top_n: usize,
    pub hex_case: HexCase,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            include_full_hex: true,
            top_n: DEFAULT_TOP_N,
            hex_case: HexCase::default(),
        }
    }
}
