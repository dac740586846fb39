use std::fmt::Write;
use std::net::{Ipv4Addr, Ipv6Addr};

use super::error::ByteError;

const MAC_LEN: usize = 6;
const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Letter case used when rendering bytes as hex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HexCase {
    #[default]
    Lower,
    Upper,
}

/// Format a 6-byte MAC address as `AA:BB:CC:DD:EE:FF`.
///
/// # Examples
/// ```
/// use pcapview_core::bytes::format_mac;
///
/// let mac = format_mac(&[0x00, 0x1b, 0x2c, 0x3d, 0x4e, 0x5f]).unwrap();
/// assert_eq!(mac, "00:1B:2C:3D:4E:5F");
/// assert!(format_mac(&[0u8; 5]).is_err());
/// ```
///
/// # Errors
/// Returns `ByteError::InvalidLength` unless exactly six bytes are given.
pub fn format_mac(bytes: &[u8]) -> Result<String, ByteError> {
    if bytes.len() != MAC_LEN {
        return Err(ByteError::InvalidLength {
            what: "MAC address",
            expected: "6 bytes",
            actual: bytes.len(),
        });
    }
    let mut out = String::with_capacity(MAC_LEN * 3);
    for (idx, byte) in bytes.iter().enumerate() {
        if idx > 0 {
            out.push(':');
        }
        let _ = write!(out, "{byte:02X}");
    }
    Ok(out)
}

/// Format an IP address: 4 bytes as dot-decimal, 16 bytes as IPv6 text.
///
/// # Examples
/// ```
/// use pcapview_core::format_ip;
///
/// assert_eq!(format_ip(&[192, 168, 1, 1]).unwrap(), "192.168.1.1");
/// assert!(format_ip(&[10, 0, 0]).is_err());
/// ```
///
/// # Errors
/// Returns `ByteError::InvalidLength` for any other length.
pub fn format_ip(bytes: &[u8]) -> Result<String, ByteError> {
    if let Ok(v4) = <[u8; 4]>::try_from(bytes) {
        return Ok(Ipv4Addr::from(v4).to_string());
    }
    if let Ok(v6) = <[u8; 16]>::try_from(bytes) {
        return Ok(Ipv6Addr::from(v6).to_string());
    }
    Err(ByteError::InvalidLength {
        what: "IP address",
        expected: "4 or 16 bytes",
        actual: bytes.len(),
    })
}

/// Render bytes as space-separated two-digit hex.
///
/// # Examples
/// ```
/// use pcapview_core::bytes::{HexCase, to_hex_string};
///
/// assert_eq!(to_hex_string(&[0, 255, 16], HexCase::Lower), "00 ff 10");
/// assert_eq!(to_hex_string(&[0xab], HexCase::Upper), "AB");
/// ```
pub fn to_hex_string(bytes: &[u8], case: HexCase) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (idx, byte) in bytes.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        let _ = match case {
            HexCase::Lower => write!(out, "{byte:02x}"),
            HexCase::Upper => write!(out, "{byte:02X}"),
        };
    }
    out
}

/// Parse whitespace-separated hex byte tokens back into bytes.
///
/// # Errors
/// Returns `ByteError::InvalidHex` for the first token that is not one or two
/// hex digits.
pub fn parse_hex_string(hex: &str) -> Result<Vec<u8>, ByteError> {
    hex.split_whitespace()
        .map(|token| {
            if token.len() > 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ByteError::InvalidHex {
                    token: token.to_string(),
                });
            }
            u8::from_str_radix(token, 16).map_err(|_| ByteError::InvalidHex {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Human-readable byte count with one decimal (1024 base).
///
/// # Examples
/// ```
/// use pcapview_core::format_bytes;
///
/// assert_eq!(format_bytes(1023), "1023.0 B");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", SIZE_UNITS[unit])
}
