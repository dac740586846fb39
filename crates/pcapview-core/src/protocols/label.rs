use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layout;

/// Protocol label attached to every decoded frame.
///
/// Unrecognized values are kept as data rather than errors: `Ip(n)` for an
/// unknown IPv4 protocol number, `Unknown(ethertype)` for an unknown or
/// undecodable link-layer payload.
///
/// # Examples
/// ```
/// use pcapview_core::Protocol;
///
/// assert_eq!(Protocol::Ip(47).to_string(), "IP(47)");
/// assert_eq!(Protocol::Unknown(0x88cc).to_string(), "Unknown(0x88cc)");
/// assert_eq!("SMTP".parse::<Protocol>().unwrap(), Protocol::Smtp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
    Arp,
    Ipv6,
    Smtp,
    Ip(u8),
    Unknown(u16),
}

impl Protocol {
    /// Classify an IPv4 protocol number (before any port heuristics).
    pub fn from_ip_number(number: u8) -> Self {
        match number {
            layout::IP_PROTO_ICMP => Protocol::Icmp,
            layout::IP_PROTO_TCP => Protocol::Tcp,
            layout::IP_PROTO_UDP => Protocol::Udp,
            other => Protocol::Ip(other),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => f.write_str("TCP"),
            Protocol::Udp => f.write_str("UDP"),
            Protocol::Icmp => f.write_str("ICMP"),
            Protocol::Arp => f.write_str("ARP"),
            Protocol::Ipv6 => f.write_str("IPv6"),
            Protocol::Smtp => f.write_str("SMTP"),
            Protocol::Ip(number) => write!(f, "IP({number})"),
            Protocol::Unknown(ether_type) => write!(f, "Unknown(0x{ether_type:04x})"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized protocol label: {0:?}")]
pub struct ParseProtocolError(String);

impl FromStr for Protocol {
    type Err = ParseProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseProtocolError(s.to_string());
        match s {
            "TCP" => return Ok(Protocol::Tcp),
            "UDP" => return Ok(Protocol::Udp),
            "ICMP" => return Ok(Protocol::Icmp),
            "ARP" => return Ok(Protocol::Arp),
            "IPv6" => return Ok(Protocol::Ipv6),
            "SMTP" => return Ok(Protocol::Smtp),
            _ => {}
        }
        if let Some(number) = s.strip_prefix("IP(").and_then(|rest| rest.strip_suffix(')')) {
            return number.parse().map(Protocol::Ip).map_err(|_| err());
        }
        if let Some(hex) = s
            .strip_prefix("Unknown(0x")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return u16::from_str_radix(hex, 16)
                .map(Protocol::Unknown)
                .map_err(|_| err());
        }
        Err(err())
    }
}

impl From<Protocol> for String {
    fn from(value: Protocol) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Protocol {
    type Error = ParseProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
