pub const GLOBAL_HEADER_LEN: usize = 24;
pub const RECORD_HEADER_LEN: usize = 16;

pub const MAGIC_RANGE: std::ops::Range<usize> = 0..4;
pub const VERSION_MAJOR_RANGE: std::ops::Range<usize> = 4..6;
pub const VERSION_MINOR_RANGE: std::ops::Range<usize> = 6..8;
pub const SNAPLEN_RANGE: std::ops::Range<usize> = 16..20;
pub const LINKTYPE_RANGE: std::ops::Range<usize> = 20..24;

pub const TS_SEC_RANGE: std::ops::Range<usize> = 0..4;
pub const TS_FRAC_RANGE: std::ops::Range<usize> = 4..8;
pub const CAPTURED_LEN_RANGE: std::ops::Range<usize> = 8..12;
pub const ORIGINAL_LEN_RANGE: std::ops::Range<usize> = 12..16;

// Magic values as read big-endian from the first four bytes.
pub const MAGIC_MICROS: u32 = 0xa1b2_c3d4;
pub const MAGIC_MICROS_SWAPPED: u32 = 0xd4c3_b2a1;
pub const MAGIC_NANOS: u32 = 0xa1b2_3c4d;
pub const MAGIC_NANOS_SWAPPED: u32 = 0x4d3c_b2a1;

pub const LINKTYPE_ETHERNET: u32 = 1;
