use std::fs;
use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::bytes::to_hex_string;
use crate::protocols::decode_frame_with;
use crate::source::{CaptureError, PcapBufferSource};
use crate::{CaptureResult, DecodeOptions};

mod summary;

pub use summary::summarize;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Read a capture file fully into memory and decode it.
///
/// # Errors
/// Returns `AnalysisError::Io` when the file cannot be read and
/// `AnalysisError::Capture` when its header is rejected.
pub fn decode_capture_file(
    path: &Path,
    options: &DecodeOptions,
) -> Result<CaptureResult, AnalysisError> {
    let data = fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "capture file loaded");
    Ok(decode_capture(&data, options)?)
}

/// Decode an in-memory libpcap buffer into records and summary.
///
/// # Errors
/// Only header problems are fatal; truncated or malformed records end the
/// record sequence early and unsupported frames are skipped.
pub fn decode_capture(data: &[u8], options: &DecodeOptions) -> Result<CaptureResult, CaptureError> {
    let mut source = PcapBufferSource::new(data)?;
    let mut records = Vec::new();
    let mut dropped = 0u64;
    let mut snapped = 0u64;

    for event in source.by_ref() {
        if event.is_snapped() {
            snapped += 1;
            tracing::trace!(
                captured = event.data.len(),
                original = event.original_len,
                "frame truncated by snap length"
            );
        }
        match decode_frame_with(event.data, event.ts_sec, event.ts_usec, options.hex_case) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    tracing::debug!(
        records = records.len(),
        dropped,
        snapped,
        stop = ?source.stop_reason(),
        "capture decoded"
    );

    let summary = summarize(&records, options.top_n);
    let full_hex = options
        .include_full_hex
        .then(|| to_hex_string(data, options.hex_case));

    Ok(CaptureResult {
        records,
        summary,
        full_hex,
    })
}

/// Render a record timestamp as RFC 3339, when representable.
///
/// # Examples
/// ```
/// use pcapview_core::timestamp_to_rfc3339;
///
/// assert_eq!(timestamp_to_rfc3339(0.0).as_deref(), Some("1970-01-01T00:00:00Z"));
/// assert_eq!(
///     timestamp_to_rfc3339(1.5).as_deref(),
///     Some("1970-01-01T00:00:01.5Z")
/// );
/// ```
pub fn timestamp_to_rfc3339(ts: f64) -> Option<String> {
    let micros = (ts * 1_000_000.0).round() as i128;
    OffsetDateTime::from_unix_timestamp_nanos(micros * 1_000)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}

#[cfg(test)]
mod tests {
    use super::{decode_capture, timestamp_to_rfc3339};
    use crate::DecodeOptions;
    use crate::bytes::HexCase;
    use crate::source::CaptureError;

    fn capture(records: &[&[u8]]) -> Vec<u8> {
        let mut out = vec![0xd4, 0xc3, 0xb2, 0xa1, 2, 0, 4, 0];
        out.extend_from_slice(&[0u8; 8]);
        out.extend_from_slice(&65535u32.to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());
        for (idx, data) in records.iter().enumerate() {
            out.extend_from_slice(&(idx as u32).to_le_bytes());
            out.extend_from_slice(&0u32.to_le_bytes());
            out.extend_from_slice(&(data.len() as u32).to_le_bytes());
            out.extend_from_slice(&(data.len() as u32).to_le_bytes());
            out.extend_from_slice(data);
        }
        out
    }

    fn arp_frame() -> Vec<u8> {
        let mut frame = vec![0xff; 6];
        frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 1, 0x08, 0x06]);
        frame.extend_from_slice(&[0u8; 28]);
        frame
    }

    #[test]
    fn dropped_frames_do_not_stop_iteration() {
        let mut vlan = vec![0u8; 12];
        vlan.extend_from_slice(&[0x81, 0x00, 0, 0]);
        let short = [0u8; 5];
        let arp = arp_frame();
        let data = capture(&[&vlan, &short, &arp]);

        let result = decode_capture(&data, &DecodeOptions::default()).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].timestamp, 2.0);
    }

    #[test]
    fn full_hex_is_optional() {
        let data = capture(&[]);
        let options = DecodeOptions {
            include_full_hex: false,
            ..DecodeOptions::default()
        };
        assert!(decode_capture(&data, &options).unwrap().full_hex.is_none());

        let options = DecodeOptions {
            hex_case: HexCase::Upper,
            ..DecodeOptions::default()
        };
        let full_hex = decode_capture(&data, &options).unwrap().full_hex.unwrap();
        assert!(full_hex.starts_with("D4 C3 B2 A1"));
    }

    #[test]
    fn top_n_option_bounds_lists() {
        let frames: Vec<Vec<u8>> = (1..=6u8)
            .map(|last| {
                let mut frame = arp_frame();
                frame[11] = last;
                frame
            })
            .collect();
        let refs: Vec<&[u8]> = frames.iter().map(Vec::as_slice).collect();
        let data = capture(&refs);

        let options = DecodeOptions {
            top_n: 5,
            ..DecodeOptions::default()
        };
        let result = decode_capture(&data, &options).unwrap();
        assert_eq!(result.summary.top_sources.len(), 5);
        let result = decode_capture(&data, &DecodeOptions::default()).unwrap();
        assert_eq!(result.summary.top_sources.len(), 3);
    }

    #[test]
    fn bad_header_is_fatal() {
        let mut data = capture(&[&arp_frame()]);
        data[3] = 0x00;
        let err = decode_capture(&data, &DecodeOptions::default()).unwrap_err();
        assert_eq!(err, CaptureError::InvalidHeader);
    }

    #[test]
    fn rfc3339_rendering() {
        assert_eq!(
            timestamp_to_rfc3339(1_700_000_000.25).as_deref(),
            Some("2023-11-14T22:13:20.25Z")
        );
    }
}
