use core::mem;

use crate::frame::FrameError;

/// IEEE 802.1Q tag as stored after a `0x8100` type tag.
///
/// Four bytes: the Tag Protocol Identifier followed by the Tag Control
/// Information, both big-endian. The TCI packs PCP (bits 15-13), DEI (bit 12)
/// and the VLAN ID (bits 11-0).
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct VlanTag {
    bytes: [u8; 4],
}

impl VlanTag {
    pub const LEN: usize = mem::size_of::<VlanTag>();

    /// TPID of a customer VLAN tag.
    pub const TPID: u16 = 0x8100;

    pub const MAX_PCP: u8 = 0x07;
    pub const MAX_VID: u16 = 0x0FFF;

    const PCP_SHIFT: u16 = 13;
    const PCP_MASK: u16 = 0xE000;
    const DEI_SHIFT: u16 = 12;
    const DEI_MASK: u16 = 0x1000;
    const VID_MASK: u16 = 0x0FFF;

    /// Builds a tag with the `0x8100` TPID.
    ///
    /// # Errors
    ///
    /// `FrameError::InvalidFieldValue` if `pcp` does not fit in 3 bits or
    /// `vid` does not fit in 12 bits.
    pub fn new(pcp: u8, dei: bool, vid: u16) -> Result<Self, FrameError> {
        let mut tag = Self::from_raw(Self::TPID, 0);
        tag.set_pcp(pcp)?;
        tag.set_dei(dei);
        tag.set_vid(vid)?;
        Ok(tag)
    }

    /// Builds a tag from raw TPID and TCI values.
    #[inline]
    pub const fn from_raw(tpid: u16, tci: u16) -> Self {
        let tpid = tpid.to_be_bytes();
        let tci = tci.to_be_bytes();
        Self {
            bytes: [tpid[0], tpid[1], tci[0], tci[1]],
        }
    }

    /// Takes the four storage bytes verbatim.
    #[inline]
    pub const fn from_bytes(bytes: [u8; VlanTag::LEN]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub const fn to_bytes(&self) -> [u8; VlanTag::LEN] {
        self.bytes
    }

    /// The four storage bytes as they appear on the wire.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; VlanTag::LEN] {
        &self.bytes
    }

    #[inline]
    pub fn tpid(&self) -> u16 {
        u16::from_be_bytes([self.bytes[0], self.bytes[1]])
    }

    #[inline]
    pub fn set_tpid(&mut self, tpid: u16) {
        self.bytes[..2].copy_from_slice(&tpid.to_be_bytes());
    }

    #[inline]
    pub fn tci(&self) -> u16 {
        u16::from_be_bytes([self.bytes[2], self.bytes[3]])
    }

    /// Overwrites the whole TCI, no range checks apply.
    #[inline]
    pub fn set_tci(&mut self, tci: u16) {
        self.bytes[2..].copy_from_slice(&tci.to_be_bytes());
    }

    /// Priority Code Point.
    #[inline]
    pub fn pcp(&self) -> u8 {
        ((self.tci() & Self::PCP_MASK) >> Self::PCP_SHIFT) as u8
    }

    /// Drop Eligible Indicator.
    #[inline]
    pub fn dei(&self) -> bool {
        self.tci() & Self::DEI_MASK == Self::DEI_MASK
    }

    /// VLAN Identifier.
    #[inline]
    pub fn vid(&self) -> u16 {
        self.tci() & Self::VID_MASK
    }

    /// Sets the 3-bit Priority Code Point, preserving DEI and VID.
    ///
    /// # Errors
    ///
    /// `FrameError::InvalidFieldValue` if `pcp > 7`. The tag is left as is.
    pub fn set_pcp(&mut self, pcp: u8) -> Result<(), FrameError> {
        if pcp > Self::MAX_PCP {
            return Err(FrameError::InvalidFieldValue {
                field: "pcp",
                value: pcp.into(),
                max: Self::MAX_PCP.into(),
            });
        }
        let tci = (self.tci() & !Self::PCP_MASK) | (u16::from(pcp) << Self::PCP_SHIFT);
        self.set_tci(tci);
        Ok(())
    }

    /// Sets the Drop Eligible Indicator, preserving PCP and VID.
    #[inline]
    pub fn set_dei(&mut self, dei: bool) {
        let tci = (self.tci() & !Self::DEI_MASK) | (u16::from(dei) << Self::DEI_SHIFT);
        self.set_tci(tci);
    }

    /// Sets the 12-bit VLAN Identifier, preserving PCP and DEI.
    ///
    /// # Errors
    ///
    /// `FrameError::InvalidFieldValue` if `vid > 4095`. The tag is left as is.
    pub fn set_vid(&mut self, vid: u16) -> Result<(), FrameError> {
        if vid > Self::MAX_VID {
            return Err(FrameError::InvalidFieldValue {
                field: "vid",
                value: vid,
                max: Self::MAX_VID,
            });
        }
        let tci = (self.tci() & !Self::VID_MASK) | vid;
        self.set_tci(tci);
        Ok(())
    }
}

impl TryFrom<&[u8]> for VlanTag {
    type Error = FrameError;

    /// Requires exactly [`VlanTag::LEN`] bytes.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; VlanTag::LEN] =
            bytes.try_into().map_err(|_| FrameError::InvalidLength {
                expected: VlanTag::LEN,
                found: bytes.len(),
            })?;
        Ok(Self::from_bytes(bytes))
    }
}
