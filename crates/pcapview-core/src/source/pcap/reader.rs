use crate::bytes::{ByteOrder, ByteReader};

use super::error::CaptureError;
use super::layout;

const MICROS_PER_NANO_DIVISOR: u32 = 1_000;

/// Resolution of the sub-second timestamp field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampPrecision {
    Micro,
    Nano,
}

impl TimestampPrecision {
    /// Scale a raw sub-second value to microseconds.
    pub fn to_micros(self, frac: u32) -> u32 {
        match self {
            TimestampPrecision::Micro => frac,
            TimestampPrecision::Nano => frac / MICROS_PER_NANO_DIVISOR,
        }
    }
}

/// Validated global header. Only byte order and precision drive decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureHeader {
    pub byte_order: ByteOrder,
    pub precision: TimestampPrecision,
    pub version_major: u16,
    pub version_minor: u16,
    pub snaplen: u32,
    pub linktype: u32,
}

/// Map the first four bytes onto one of the accepted magic encodings.
///
/// # Examples
/// ```
/// use pcapview_core::bytes::ByteOrder;
/// use pcapview_core::source::pcap::reader::magic_format;
/// use pcapview_core::source::TimestampPrecision;
///
/// let format = magic_format([0xd4, 0xc3, 0xb2, 0xa1]);
/// assert_eq!(format, Some((ByteOrder::Little, TimestampPrecision::Micro)));
/// ```
pub fn magic_format(magic: [u8; 4]) -> Option<(ByteOrder, TimestampPrecision)> {
    match u32::from_be_bytes(magic) {
        layout::MAGIC_MICROS => Some((ByteOrder::Big, TimestampPrecision::Micro)),
        layout::MAGIC_MICROS_SWAPPED => Some((ByteOrder::Little, TimestampPrecision::Micro)),
        layout::MAGIC_NANOS => Some((ByteOrder::Big, TimestampPrecision::Nano)),
        layout::MAGIC_NANOS_SWAPPED => Some((ByteOrder::Little, TimestampPrecision::Nano)),
        _ => None,
    }
}

/// Validate the 24-byte global header at the start of `data`.
///
/// # Errors
/// `CaptureError::TooShort` when fewer than 24 bytes are present,
/// `CaptureError::InvalidHeader` when the magic number is not recognized.
pub fn read_capture_header(data: &[u8]) -> Result<CaptureHeader, CaptureError> {
    let reader = ByteReader::new(data);
    reader
        .require_len(layout::GLOBAL_HEADER_LEN)
        .map_err(|_| CaptureError::TooShort)?;

    let magic = reader
        .read_slice(layout::MAGIC_RANGE)
        .ok()
        .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
        .ok_or(CaptureError::TooShort)?;
    let (byte_order, precision) = magic_format(magic).ok_or(CaptureError::InvalidHeader)?;

    let read_u16 = |range| {
        reader
            .read_u16(range, byte_order)
            .map_err(|_| CaptureError::TooShort)
    };
    let read_u32 = |range| {
        reader
            .read_u32(range, byte_order)
            .map_err(|_| CaptureError::TooShort)
    };

    Ok(CaptureHeader {
        byte_order,
        precision,
        version_major: read_u16(layout::VERSION_MAJOR_RANGE)?,
        version_minor: read_u16(layout::VERSION_MINOR_RANGE)?,
        snaplen: read_u32(layout::SNAPLEN_RANGE)?,
        linktype: read_u32(layout::LINKTYPE_RANGE)?,
    })
}

#[cfg(test)]
mod tests {
    use super::{TimestampPrecision, magic_format, read_capture_header};
    use crate::bytes::ByteOrder;
    use crate::source::pcap::error::CaptureError;
    use crate::source::pcap::layout;

    fn le_header(magic: u32, linktype: u32) -> Vec<u8> {
        let mut header = Vec::with_capacity(layout::GLOBAL_HEADER_LEN);
        header.extend_from_slice(&magic.to_le_bytes());
        header.extend_from_slice(&2u16.to_le_bytes());
        header.extend_from_slice(&4u16.to_le_bytes());
        header.extend_from_slice(&0i32.to_le_bytes());
        header.extend_from_slice(&0u32.to_le_bytes());
        header.extend_from_slice(&65535u32.to_le_bytes());
        header.extend_from_slice(&linktype.to_le_bytes());
        header
    }

    #[test]
    fn detects_all_magic_encodings() {
        assert_eq!(
            magic_format([0xa1, 0xb2, 0xc3, 0xd4]),
            Some((ByteOrder::Big, TimestampPrecision::Micro))
        );
        assert_eq!(
            magic_format([0xd4, 0xc3, 0xb2, 0xa1]),
            Some((ByteOrder::Little, TimestampPrecision::Micro))
        );
        assert_eq!(
            magic_format([0xa1, 0xb2, 0x3c, 0x4d]),
            Some((ByteOrder::Big, TimestampPrecision::Nano))
        );
        assert_eq!(
            magic_format([0x4d, 0x3c, 0xb2, 0xa1]),
            Some((ByteOrder::Little, TimestampPrecision::Nano))
        );
        assert_eq!(magic_format([0x0a, 0x0d, 0x0d, 0x0a]), None);
    }

    #[test]
    fn header_fields_follow_byte_order() {
        let header = read_capture_header(&le_header(layout::MAGIC_MICROS, 1)).unwrap();
        assert_eq!(header.byte_order, ByteOrder::Little);
        assert_eq!(header.version_major, 2);
        assert_eq!(header.version_minor, 4);
        assert_eq!(header.snaplen, 65535);
        assert_eq!(header.linktype, layout::LINKTYPE_ETHERNET);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let data = le_header(layout::MAGIC_MICROS, 1);
        let err = read_capture_header(&data[..23]).unwrap_err();
        assert_eq!(err, CaptureError::TooShort);
    }

    #[test]
    fn unknown_magic_is_rejected() {
        let mut data = le_header(layout::MAGIC_MICROS, 1);
        data[0] ^= 0xff;
        let err = read_capture_header(&data).unwrap_err();
        assert_eq!(err, CaptureError::InvalidHeader);
        assert!(err.to_string().contains("magic number mismatch"));
    }

    #[test]
    fn nanos_scale_to_micros() {
        assert_eq!(TimestampPrecision::Nano.to_micros(1_500_000), 1_500);
        assert_eq!(TimestampPrecision::Micro.to_micros(1_500), 1_500);
    }
}
