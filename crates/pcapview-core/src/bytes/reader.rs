use std::ops::Range;

use super::error::ByteError;

/// Byte order used for multi-byte integer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

/// Bounds-checked reads over a borrowed byte buffer.
///
/// Every read either returns the requested value or `ByteError::OutOfBounds`;
/// nothing panics on short input.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), ByteError> {
        if self.data.len() < needed {
            return Err(ByteError::OutOfBounds {
                offset: 0,
                needed,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], ByteError> {
        self.data
            .get(range.clone())
            .ok_or(ByteError::OutOfBounds {
                offset: range.start,
                needed: range.end.saturating_sub(range.start),
                actual: self.data.len(),
            })
    }

    /// Everything from `offset` to the end of the buffer.
    pub fn read_tail(&self, offset: usize) -> Result<&'a [u8], ByteError> {
        self.read_slice(offset..self.data.len())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ByteError> {
        self.data
            .get(offset)
            .copied()
            .ok_or(ByteError::OutOfBounds {
                offset,
                needed: 1,
                actual: self.data.len(),
            })
    }

    pub fn read_u16(&self, range: Range<usize>, order: ByteOrder) -> Result<u16, ByteError> {
        let bytes = self.read_array::<2>(range)?;
        Ok(match order {
            ByteOrder::Big => u16::from_be_bytes(bytes),
            ByteOrder::Little => u16::from_le_bytes(bytes),
        })
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, ByteError> {
        self.read_u16(range, ByteOrder::Big)
    }

    /// Read a 32-bit integer; fails when `range.start + 4` exceeds the buffer.
    pub fn read_u32(&self, range: Range<usize>, order: ByteOrder) -> Result<u32, ByteError> {
        let bytes = self.read_array::<4>(range)?;
        Ok(match order {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        })
    }

    pub fn read_u32_be(&self, range: Range<usize>) -> Result<u32, ByteError> {
        self.read_u32(range, ByteOrder::Big)
    }

    fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], ByteError> {
        let bytes = self.read_slice(range)?;
        <[u8; N]>::try_from(bytes).map_err(|_| ByteError::InvalidLength {
            what: "integer field",
            expected: "range matching the integer width",
            actual: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteOrder, ByteReader};
    use crate::bytes::error::ByteError;

    #[test]
    fn read_u32_in_both_orders() {
        let data = [0x78, 0x56, 0x34, 0x12];
        let reader = ByteReader::new(&data);
        assert_eq!(reader.read_u32(0..4, ByteOrder::Little).unwrap(), 0x1234_5678);
        assert_eq!(reader.read_u32(0..4, ByteOrder::Big).unwrap(), 0x7856_3412);
    }

    #[test]
    fn read_u32_past_end_is_out_of_bounds() {
        let data = [0u8; 6];
        let reader = ByteReader::new(&data);
        let err = reader.read_u32(3..7, ByteOrder::Little).unwrap_err();
        assert_eq!(
            err,
            ByteError::OutOfBounds {
                offset: 3,
                needed: 4,
                actual: 6,
            }
        );
    }

    #[test]
    fn read_u32_at_exact_end_succeeds() {
        let data = [0, 0, 0, 0, 0, 1];
        let reader = ByteReader::new(&data);
        assert_eq!(reader.read_u32_be(2..6).unwrap(), 1);
    }

    #[test]
    fn mismatched_range_width_is_rejected() {
        let data = [0u8; 8];
        let reader = ByteReader::new(&data);
        let err = reader.read_u16_be(0..3).unwrap_err();
        assert!(matches!(err, ByteError::InvalidLength { .. }));
    }

    #[test]
    fn read_u8_and_tail() {
        let data = [1, 2, 3];
        let reader = ByteReader::new(&data);
        assert_eq!(reader.read_u8(2).unwrap(), 3);
        assert!(reader.read_u8(3).is_err());
        assert_eq!(reader.read_tail(1).unwrap(), &[2, 3]);
        assert_eq!(reader.read_tail(3).unwrap(), &[] as &[u8]);
        assert!(reader.read_tail(4).is_err());
    }

    #[test]
    fn require_len_reports_actual_size() {
        let data = [0u8; 10];
        let reader = ByteReader::new(&data);
        assert!(reader.require_len(10).is_ok());
        let err = reader.require_len(14).unwrap_err();
        assert!(err.to_string().contains("buffer has 10"));
    }
}
