pub mod pcap;

pub use pcap::{CaptureError, CaptureHeader, PcapBufferSource, TimestampPrecision};

/// One raw packet record borrowed from the capture buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketEvent<'a> {
    pub ts_sec: u32,
    /// Sub-second part already scaled to microseconds (not yet clamped).
    pub ts_usec: u32,
    /// Length of the frame on the wire, before snap-length truncation.
    pub original_len: u32,
    pub data: &'a [u8],
}

impl PacketEvent<'_> {
    /// True when fewer bytes were stored than were seen on the wire.
    pub fn is_snapped(&self) -> bool {
        (self.data.len() as u64) < u64::from(self.original_len)
    }
}

/// Why record iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The buffer ended exactly on a record boundary.
    Exhausted,
    ZeroLength,
    TruncatedHeader,
    TruncatedPayload,
    OffsetOverflow,
}
