// Ethernet II
pub const ETHERNET_HEADER_LEN: usize = 14;
pub const DST_MAC_RANGE: std::ops::Range<usize> = 0..6;
pub const SRC_MAC_RANGE: std::ops::Range<usize> = 6..12;
pub const ETHER_TYPE_RANGE: std::ops::Range<usize> = 12..14;

pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_ARP: u16 = 0x0806;
pub const ETHERTYPE_IPV6: u16 = 0x86dd;
pub const ETHERTYPE_VLAN: u16 = 0x8100;
pub const ETHERTYPE_QINQ: u16 = 0x88a8;

// IPv4, offsets relative to the start of the IP header
pub const IPV4_MIN_HEADER_LEN: usize = 20;
pub const IPV4_VERSION_IHL_OFFSET: usize = 0;
pub const IPV4_ID_RANGE: std::ops::Range<usize> = 4..6;
pub const IPV4_TTL_OFFSET: usize = 8;
pub const IPV4_PROTOCOL_OFFSET: usize = 9;
pub const IPV4_CHECKSUM_RANGE: std::ops::Range<usize> = 10..12;
pub const IPV4_SRC_RANGE: std::ops::Range<usize> = 12..16;
pub const IPV4_DST_RANGE: std::ops::Range<usize> = 16..20;
pub const IPV4_VERSION: u8 = 4;

pub const IP_PROTO_ICMP: u8 = 1;
pub const IP_PROTO_TCP: u8 = 6;
pub const IP_PROTO_UDP: u8 = 17;

// TCP, offsets relative to the start of the TCP header
pub const TCP_MIN_HEADER_LEN: usize = 20;
pub const TCP_SRC_PORT_RANGE: std::ops::Range<usize> = 0..2;
pub const TCP_DST_PORT_RANGE: std::ops::Range<usize> = 2..4;
pub const TCP_SEQ_RANGE: std::ops::Range<usize> = 4..8;
pub const TCP_ACK_RANGE: std::ops::Range<usize> = 8..12;
pub const TCP_FLAGS_OFFSET: usize = 13;
pub const TCP_WINDOW_RANGE: std::ops::Range<usize> = 14..16;
pub const TCP_CHECKSUM_RANGE: std::ops::Range<usize> = 16..18;
pub const TCP_FLAG_MASK: u8 = 0x3f;

// UDP
pub const UDP_HEADER_LEN: usize = 8;
pub const UDP_SRC_PORT_RANGE: std::ops::Range<usize> = 0..2;
pub const UDP_DST_PORT_RANGE: std::ops::Range<usize> = 2..4;
pub const UDP_LENGTH_RANGE: std::ops::Range<usize> = 4..6;
pub const UDP_CHECKSUM_RANGE: std::ops::Range<usize> = 6..8;

pub const SMTP_PORT: u16 = 25;
