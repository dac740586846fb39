use crate::bytes::ByteReader;
use crate::source::{PacketEvent, StopReason};

use super::error::CaptureError;
use super::layout;
use super::reader::{CaptureHeader, read_capture_header};

/// Iterator over the packet records of an in-memory libpcap buffer.
///
/// Construction validates the global header; iteration then yields one
/// `PacketEvent` per record and ends at the first sign of truncation,
/// recording why in `stop_reason`.
pub struct PcapBufferSource<'a> {
    header: CaptureHeader,
    reader: ByteReader<'a>,
    offset: usize,
    stop: Option<StopReason>,
}

impl<'a> PcapBufferSource<'a> {
    /// Validate the global header and position the cursor on the first record.
    ///
    /// # Errors
    /// Returns `CaptureError` when the header is short or the magic is unknown.
    pub fn new(data: &'a [u8]) -> Result<Self, CaptureError> {
        let header = read_capture_header(data)?;
        tracing::debug!(
            byte_order = ?header.byte_order,
            precision = ?header.precision,
            version = %format!("{}.{}", header.version_major, header.version_minor),
            snaplen = header.snaplen,
            linktype = header.linktype,
            "capture header validated"
        );
        if header.linktype != layout::LINKTYPE_ETHERNET {
            tracing::warn!(
                linktype = header.linktype,
                "non-Ethernet link type, decoding frames as Ethernet"
            );
        }
        Ok(Self {
            header,
            reader: ByteReader::new(data),
            offset: layout::GLOBAL_HEADER_LEN,
            stop: None,
        })
    }

    pub fn header(&self) -> &CaptureHeader {
        &self.header
    }

    /// Why iteration ended; `None` while records remain.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop
    }

    fn next_record(&mut self) -> Result<PacketEvent<'a>, StopReason> {
        let total = self.reader.len();
        if self.offset >= total {
            return Err(StopReason::Exhausted);
        }

        let header_end = self
            .offset
            .checked_add(layout::RECORD_HEADER_LEN)
            .ok_or(StopReason::OffsetOverflow)?;
        let record = self
            .reader
            .read_slice(self.offset..header_end)
            .map_err(|_| StopReason::TruncatedHeader)?;
        let record = ByteReader::new(record);
        let order = self.header.byte_order;

        let read = |range| {
            record
                .read_u32(range, order)
                .map_err(|_| StopReason::TruncatedHeader)
        };
        let ts_sec = read(layout::TS_SEC_RANGE)?;
        let ts_frac = read(layout::TS_FRAC_RANGE)?;
        let captured_len = read(layout::CAPTURED_LEN_RANGE)?;
        let original_len = read(layout::ORIGINAL_LEN_RANGE)?;

        if captured_len == 0 {
            return Err(StopReason::ZeroLength);
        }
        let captured_len =
            usize::try_from(captured_len).map_err(|_| StopReason::OffsetOverflow)?;
        let end = header_end
            .checked_add(captured_len)
            .ok_or(StopReason::OffsetOverflow)?;
        if end > total {
            return Err(StopReason::TruncatedPayload);
        }
        let data = self
            .reader
            .read_slice(header_end..end)
            .map_err(|_| StopReason::TruncatedPayload)?;

        self.offset = end;
        Ok(PacketEvent {
            ts_sec,
            ts_usec: self.header.precision.to_micros(ts_frac),
            original_len,
            data,
        })
    }
}

impl<'a> Iterator for PcapBufferSource<'a> {
    type Item = PacketEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stop.is_some() {
            return None;
        }
        match self.next_record() {
            Ok(event) => Some(event),
            Err(reason) => {
                if reason != StopReason::Exhausted {
                    tracing::debug!(
                        ?reason,
                        remaining = self.reader.len().saturating_sub(self.offset),
                        "record iteration stopped early"
                    );
                }
                self.stop = Some(reason);
                None
            }
        }
    }
}
