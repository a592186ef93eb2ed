use alloc::vec::Vec;

use crate::{eth::EtherType, vlan::VlanTag};

/// One typed piece of the payload following the frame header, introduced on
/// the wire by a 2-byte type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub enum PayloadSegment {
    /// Any payload which is not a VLAN tag. Holds every byte between its type
    /// tag and the frame check sequence.
    Generic { ether_type: u16, data: Vec<u8> },
    /// 802.1Q tag following a `0x8100` type tag.
    Vlan(VlanTag),
}

impl PayloadSegment {
    /// Length of the type tag preceding every segment.
    pub const TYPE_LEN: usize = 2;

    /// The type tag which introduced this segment.
    #[inline]
    pub fn ether_type(&self) -> u16 {
        match self {
            PayloadSegment::Generic { ether_type, .. } => *ether_type,
            PayloadSegment::Vlan(_) => VlanTag::TPID,
        }
    }

    /// Well-known protocol of the type tag, if any.
    #[inline]
    pub fn protocol(&self) -> Option<EtherType> {
        EtherType::try_from(self.ether_type()).ok()
    }

    /// Bytes of the segment after its type tag.
    pub fn data(&self) -> &[u8] {
        match self {
            PayloadSegment::Generic { data, .. } => data.as_slice(),
            PayloadSegment::Vlan(tag) => tag.as_bytes().as_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes the segment occupies on the wire, type tag included.
    #[inline]
    pub fn wire_len(&self) -> usize {
        Self::TYPE_LEN + self.len()
    }

    #[inline]
    pub fn is_vlan(&self) -> bool {
        matches!(self, PayloadSegment::Vlan(_))
    }

    #[inline]
    pub fn as_vlan(&self) -> Option<&VlanTag> {
        match self {
            PayloadSegment::Vlan(tag) => Some(tag),
            PayloadSegment::Generic { .. } => None,
        }
    }

    #[inline]
    pub fn as_vlan_mut(&mut self) -> Option<&mut VlanTag> {
        match self {
            PayloadSegment::Vlan(tag) => Some(tag),
            PayloadSegment::Generic { .. } => None,
        }
    }
}

impl From<VlanTag> for PayloadSegment {
    fn from(tag: VlanTag) -> Self {
        PayloadSegment::Vlan(tag)
    }
}
