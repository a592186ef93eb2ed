use core::{fmt, mem};

/// 48-bit IEEE 802 MAC address, stored verbatim as it appears on the wire.
#[repr(transparent)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    pub const LEN: usize = 6;

    pub const BROADCAST: MacAddr = MacAddr([0xFF; 6]);

    #[inline]
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    #[inline]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    #[inline]
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Group bit (least significant bit of the first octet) is set.
    #[inline]
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 == 0x01
    }

    #[inline]
    pub fn is_unicast(&self) -> bool {
        !self.is_multicast()
    }

    /// U/L bit (second least significant bit of the first octet) is set.
    #[inline]
    pub fn is_locally_administered(&self) -> bool {
        self.0[0] & 0x02 == 0x02
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl From<MacAddr> for [u8; 6] {
    fn from(addr: MacAddr) -> Self {
        addr.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

/// Ethernet header, which is present at the beginning of every Ethernet frame.
///
/// Unlike a classic Ethernet II header this one stops after the two
/// addresses. The type tags that follow are decoded one by one into
/// [`PayloadSegment`](crate::PayloadSegment)s.
#[repr(C, packed)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct FrameHeader {
    /// Destination MAC address.
    pub destination: MacAddr,
    /// Source MAC address.
    pub source: MacAddr,
}

impl FrameHeader {
    pub const LEN: usize = mem::size_of::<FrameHeader>();

    #[inline]
    pub const fn new(destination: MacAddr, source: MacAddr) -> Self {
        Self {
            destination,
            source,
        }
    }

    /// Takes both addresses verbatim from the first 12 bytes.
    pub fn from_bytes(bytes: &[u8; FrameHeader::LEN]) -> Self {
        let mut destination = [0u8; 6];
        let mut source = [0u8; 6];
        destination.copy_from_slice(&bytes[..6]);
        source.copy_from_slice(&bytes[6..]);
        Self::new(MacAddr(destination), MacAddr(source))
    }

    pub fn to_bytes(&self) -> [u8; FrameHeader::LEN] {
        let mut bytes = [0u8; FrameHeader::LEN];
        bytes[..6].copy_from_slice(&{ self.destination }.0);
        bytes[6..].copy_from_slice(&{ self.source }.0);
        bytes
    }
}

/// Protocol identifier carried in a type tag.
///
/// Only used to name well-known values, the payloads themselves are passed
/// through undecoded.
#[repr(u16)]
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub enum EtherType {
    Loop = 0x0060,
    Ipv4 = 0x0800,
    Arp = 0x0806,
    Ieee8021q = 0x8100,
    Ipv6 = 0x86DD,
    Ieee8021ad = 0x88A8,
    Ieee8021MacSec = 0x88E5,
    Ieee8021ah = 0x88E7,
    Ieee8021mvrp = 0x88F5,
    FibreChannel = 0x8906,
    Infiniband = 0x8915,
    LoopbackIeee8023 = 0x9000,
    Ieee8021QinQ1 = 0x9100,
    Ieee8021QinQ2 = 0x9200,
    Ieee8021QinQ3 = 0x9300,
}

impl TryFrom<u16> for EtherType {
    /// The unknown value.
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Ok(match value {
            0x0060 => EtherType::Loop,
            0x0800 => EtherType::Ipv4,
            0x0806 => EtherType::Arp,
            0x8100 => EtherType::Ieee8021q,
            0x86DD => EtherType::Ipv6,
            0x88A8 => EtherType::Ieee8021ad,
            0x88E5 => EtherType::Ieee8021MacSec,
            0x88E7 => EtherType::Ieee8021ah,
            0x88F5 => EtherType::Ieee8021mvrp,
            0x8906 => EtherType::FibreChannel,
            0x8915 => EtherType::Infiniband,
            0x9000 => EtherType::LoopbackIeee8023,
            0x9100 => EtherType::Ieee8021QinQ1,
            0x9200 => EtherType::Ieee8021QinQ2,
            0x9300 => EtherType::Ieee8021QinQ3,
            other => return Err(other),
        })
    }
}

impl From<EtherType> for u16 {
    fn from(ether_type: EtherType) -> Self {
        ether_type as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_header_len() {
        assert_eq!(FrameHeader::LEN, 12);
        assert_eq!(mem::size_of::<FrameHeader>(), FrameHeader::LEN);
        assert_eq!(mem::size_of::<MacAddr>(), MacAddr::LEN);
    }

    #[test]
    fn test_header_bytes_verbatim() {
        let bytes = [
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6,
        ];
        let hdr = FrameHeader::from_bytes(&bytes);
        assert_eq!({ hdr.destination }, MacAddr([1, 2, 3, 4, 5, 6]));
        assert_eq!({ hdr.source }, MacAddr([0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6]));
        assert_eq!(hdr.to_bytes(), bytes);
    }

    #[test]
    fn test_mac_addr_flags() {
        assert!(MacAddr::BROADCAST.is_broadcast());
        assert!(MacAddr::BROADCAST.is_multicast());
        assert!(MacAddr([0x01, 0x00, 0x5E, 0, 0, 1]).is_multicast());
        assert!(MacAddr([0x00, 0x1B, 0x21, 0, 0, 1]).is_unicast());
        assert!(MacAddr([0x02, 0, 0, 0, 0, 1]).is_locally_administered());
        assert!(!MacAddr([0x00, 0x1B, 0x21, 0, 0, 1]).is_locally_administered());
    }

    #[test]
    fn test_mac_addr_display() {
        let addr = MacAddr([0x00, 0x1B, 0x21, 0x0A, 0xBC, 0xFF]);
        assert_eq!(addr.to_string(), "00:1b:21:0a:bc:ff");
    }

    #[test]
    fn test_ether_type_conversions() {
        assert_eq!(EtherType::try_from(0x0800), Ok(EtherType::Ipv4));
        assert_eq!(EtherType::try_from(0x8100), Ok(EtherType::Ieee8021q));
        assert_eq!(EtherType::try_from(0x1234), Err(0x1234));
        assert_eq!(u16::from(EtherType::Ipv6), 0x86DD);
    }
}
