//! Offset / hex / ASCII rendering of byte buffers.
//!
//! Rows are 16 bytes wide with an extra gap after the eighth byte:
//!
//! ```text
//! 00000000  d4 c3 b2 a1 02 00 04 00  00 00 00 00 00 00 00 00  |................|
//! 00000010  ff ff 00 00 01 00 00 00                           |........        |
//! ```
//!
//! Rendering is stateless and row-addressable: rendering rows `0..n` in one
//! call produces the same text as concatenating any split of that range.

use std::borrow::Cow;
use std::fmt::{self, Write};
use std::ops::Range;

use crate::bytes::{ByteError, parse_hex_string};

pub const BYTES_PER_ROW: usize = 16;
const GROUP_SIZE: usize = 8;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexRow {
    pub offset: usize,
    /// Hex column, padded to full width for short rows.
    pub hex: String,
    /// Printable ASCII (`.` otherwise), padded to 16 columns.
    pub ascii: String,
}

impl HexRow {
    fn new(offset: usize, chunk: &[u8]) -> Self {
        let mut hex = String::with_capacity(BYTES_PER_ROW * 3 + 1);
        for idx in 0..BYTES_PER_ROW {
            if idx == GROUP_SIZE {
                hex.push(' ');
            }
            match chunk.get(idx) {
                Some(byte) => {
                    let _ = write!(hex, "{byte:02x} ");
                }
                None => hex.push_str("   "),
            }
        }
        let mut ascii: String = chunk
            .iter()
            .map(|&byte| {
                if (0x20..=0x7e).contains(&byte) {
                    byte as char
                } else {
                    '.'
                }
            })
            .collect();
        while ascii.len() < BYTES_PER_ROW {
            ascii.push(' ');
        }
        Self { offset, hex, ascii }
    }
}

impl fmt::Display for HexRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}  {} |{}|", self.offset, self.hex, self.ascii)
    }
}

/// A byte buffer viewed as hex dump rows.
///
/// # Examples
/// ```
/// use pcapview_core::HexDump;
///
/// let dump = HexDump::from_hex_str("48 65 6c 6c 6f").unwrap();
/// assert_eq!(dump.row_count(), 1);
/// assert!(dump.render().ends_with("|Hello           |\n"));
/// ```
#[derive(Debug, Clone)]
pub struct HexDump<'a> {
    bytes: Cow<'a, [u8]>,
}

impl<'a> HexDump<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes: Cow::Borrowed(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.bytes.len().div_ceil(BYTES_PER_ROW)
    }

    /// Rows in `rows`, clamped to the rows that exist.
    pub fn rows(&self, rows: Range<usize>) -> Vec<HexRow> {
        let end = rows.end.min(self.row_count());
        (rows.start.min(end)..end)
            .map(|row| {
                let start = row * BYTES_PER_ROW;
                let stop = (start + BYTES_PER_ROW).min(self.bytes.len());
                HexRow::new(start, &self.bytes[start..stop])
            })
            .collect()
    }

    /// Render a row range; every row ends with a newline.
    pub fn render_rows(&self, rows: Range<usize>) -> String {
        let mut out = String::new();
        for row in self.rows(rows) {
            let _ = writeln!(out, "{row}");
        }
        out
    }

    pub fn render(&self) -> String {
        self.render_rows(0..self.row_count())
    }
}

impl HexDump<'static> {
    /// Build a dump from space-separated hex (the `raw_hex` / `full_hex` form).
    ///
    /// # Errors
    /// Returns `ByteError::InvalidHex` for tokens that are not hex bytes.
    pub fn from_hex_str(hex: &str) -> Result<Self, ByteError> {
        Ok(Self {
            bytes: Cow::Owned(parse_hex_string(hex)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{BYTES_PER_ROW, HexDump};

    #[test]
    fn full_row_layout() {
        let bytes: Vec<u8> = (0..16).collect();
        let dump = HexDump::new(&bytes);
        assert_eq!(
            dump.render(),
            "00000000  00 01 02 03 04 05 06 07  08 09 0a 0b 0c 0d 0e 0f  |................|\n"
        );
    }

    #[test]
    fn short_row_is_padded() {
        let dump = HexDump::new(b"AB\x00");
        let rendered = dump.render();
        let full_width = HexDump::new(&[0u8; 16]).render();
        assert_eq!(rendered.len(), full_width.len());
        assert!(rendered.starts_with("00000000  41 42 00 "));
        assert!(rendered.ends_with("|AB.             |\n"));
    }

    #[test]
    fn offsets_advance_by_sixteen() {
        let bytes = vec![0x41u8; 40];
        let rows = HexDump::new(&bytes).rows(0..10);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].offset, 16);
        assert_eq!(rows[2].offset, 32);
        assert!(rows[2].to_string().starts_with("00000020  "));
    }

    #[test]
    fn chunked_rendering_matches_single_pass() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(BYTES_PER_ROW * 7 + 5).collect();
        let dump = HexDump::new(&bytes);
        let whole = dump.render();
        let mut pieces = String::new();
        for range in [0..2, 2..3, 3..7, 7..100] {
            pieces.push_str(&dump.render_rows(range));
        }
        assert_eq!(whole, pieces);
    }

    #[test]
    fn out_of_range_rows_render_nothing() {
        let dump = HexDump::new(&[1, 2, 3]);
        assert!(dump.render_rows(5..9).is_empty());
        assert!(HexDump::new(&[]).render().is_empty());
    }

    #[test]
    fn hex_string_input_matches_bytes() {
        let from_hex = HexDump::from_hex_str("de ad be ef").unwrap();
        let from_bytes = HexDump::new(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(from_hex.render(), from_bytes.render());
        assert!(HexDump::from_hex_str("de ad xx").is_err());
    }
}
