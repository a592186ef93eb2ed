use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace};

use crate::{
    crc::{crc32, Crc32},
    eth::FrameHeader,
    segment::PayloadSegment,
    vlan::VlanTag,
};

/// Errors that can occur while loading a frame or editing its fields.
///
/// All of them describe malformed input, none is worth retrying.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The input exceeds [`Frame::MAX_LEN`].
    FrameTooLarge { len: usize },
    /// The input cannot hold the header and the frame check sequence.
    FrameTooShort { len: usize },
    /// A type tag or tag body would cross into the frame check sequence.
    /// `needed` bytes were required at `offset`, only `available` were left.
    TruncatedSegment {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// A bit-field write with a value wider than the field.
    InvalidFieldValue {
        field: &'static str,
        value: u16,
        max: u16,
    },
    /// A fixed-size value was built from a slice of the wrong length.
    InvalidLength { expected: usize, found: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::FrameTooLarge { len } => write!(
                f,
                "frame of {} bytes exceeds the maximum of {} bytes",
                len,
                Frame::MAX_LEN
            ),
            FrameError::FrameTooShort { len } => write!(
                f,
                "frame of {} bytes is shorter than the minimum of {} bytes",
                len,
                Frame::MIN_LEN
            ),
            FrameError::TruncatedSegment {
                offset,
                needed,
                available,
            } => write!(
                f,
                "truncated segment at offset {}: needed {} bytes, {} available",
                offset, needed, available
            ),
            FrameError::InvalidFieldValue { field, value, max } => {
                write!(f, "value {} out of range for {} (max {})", value, field, max)
            }
            FrameError::InvalidLength { expected, found } => {
                write!(f, "expected {} bytes, found {}", expected, found)
            }
        }
    }
}

impl core::error::Error for FrameError {}

/// An Ethernet frame held in an owned, fixed-capacity buffer together with
/// its decoded header and payload segments.
///
/// Layout on the wire:
///
/// | Offset         | Field                                   |
/// |----------------|-----------------------------------------|
/// | 0..6           | destination MAC                         |
/// | 6..12          | source MAC                              |
/// | 12..len-4      | type tags, each followed by its payload |
/// | len-4..len     | frame check sequence, big-endian CRC-32 |
///
/// A `0x8100` type tag is followed by the 4 bytes of a [`VlanTag`] and
/// decoding continues after it. Any other type tag claims everything up to
/// the frame check sequence, so nothing can follow a generic payload.
#[derive(Clone)]
pub struct Frame {
    buf: [u8; Frame::MAX_LEN],
    len: usize,
    header: FrameHeader,
    segments: Vec<PayloadSegment>,
}

impl Frame {
    /// Largest frame accepted, header and frame check sequence included.
    pub const MAX_LEN: usize = 1518;
    /// Length of the trailing frame check sequence.
    pub const FCS_LEN: usize = 4;
    /// Smallest frame accepted: a header and a frame check sequence.
    pub const MIN_LEN: usize = FrameHeader::LEN + Frame::FCS_LEN;

    /// Creates an empty frame. Nothing is parsed until [`Frame::load`].
    pub fn new() -> Self {
        Self {
            buf: [0; Frame::MAX_LEN],
            len: 0,
            header: FrameHeader::default(),
            segments: Vec::new(),
        }
    }

    /// Copies `data` into the frame and decodes it, replacing whatever the
    /// frame held before.
    ///
    /// On error the frame keeps its previous contents.
    ///
    /// # Errors
    ///
    /// * `FrameError::FrameTooLarge` if `data` is longer than [`Frame::MAX_LEN`].
    /// * `FrameError::FrameTooShort` if `data` is shorter than [`Frame::MIN_LEN`].
    /// * `FrameError::TruncatedSegment` if a type tag or a VLAN tag would
    ///   overlap the frame check sequence.
    pub fn load(&mut self, data: &[u8]) -> Result<(), FrameError> {
        let (header, segments) = Self::parse(data).inspect_err(|err| {
            debug!("rejecting frame of {} bytes: {}", data.len(), err);
        })?;

        self.buf[..data.len()].copy_from_slice(data);
        self.buf[data.len()..].fill(0);
        self.len = data.len();
        self.header = header;
        self.segments = segments;
        Ok(())
    }

    /// Appends the CRC-32 of `body` as the frame check sequence and loads the
    /// result.
    ///
    /// # Errors
    ///
    /// Same as [`Frame::load`], with the limits applying to `body` plus the
    /// 4 bytes of the frame check sequence.
    pub fn seal(body: &[u8]) -> Result<Self, FrameError> {
        let len = body.len() + Frame::FCS_LEN;
        if len > Frame::MAX_LEN {
            return Err(FrameError::FrameTooLarge { len });
        }
        let mut bytes = [0u8; Frame::MAX_LEN];
        bytes[..body.len()].copy_from_slice(body);
        bytes[body.len()..len].copy_from_slice(&crc32(body).to_be_bytes());

        let mut frame = Self::new();
        frame.load(&bytes[..len])?;
        Ok(frame)
    }

    fn parse(data: &[u8]) -> Result<(FrameHeader, Vec<PayloadSegment>), FrameError> {
        if data.len() > Frame::MAX_LEN {
            return Err(FrameError::FrameTooLarge { len: data.len() });
        }
        if data.len() < Frame::MIN_LEN {
            return Err(FrameError::FrameTooShort { len: data.len() });
        }

        let mut header_bytes = [0u8; FrameHeader::LEN];
        header_bytes.copy_from_slice(&data[..FrameHeader::LEN]);
        let header = FrameHeader::from_bytes(&header_bytes);

        let end = data.len() - Frame::FCS_LEN;
        let mut offset = FrameHeader::LEN;
        let mut segments = Vec::new();

        while offset < end {
            let ether_type = read_u16_be(data, offset, end)?;
            offset += PayloadSegment::TYPE_LEN;

            if ether_type == VlanTag::TPID {
                let available = end - offset;
                if available < VlanTag::LEN {
                    return Err(FrameError::TruncatedSegment {
                        offset,
                        needed: VlanTag::LEN,
                        available,
                    });
                }
                let mut tag = [0u8; VlanTag::LEN];
                tag.copy_from_slice(&data[offset..offset + VlanTag::LEN]);
                let tag = VlanTag::from_bytes(tag);
                trace!(
                    "vlan tag at offset {}: tpid {:#06x} pcp {} dei {} vid {}",
                    offset,
                    tag.tpid(),
                    tag.pcp(),
                    tag.dei(),
                    tag.vid()
                );
                segments.push(PayloadSegment::Vlan(tag));
                offset += VlanTag::LEN;
            } else {
                trace!(
                    "generic payload at offset {}: type {:#06x}, {} bytes",
                    offset,
                    ether_type,
                    end - offset
                );
                segments.push(PayloadSegment::Generic {
                    ether_type,
                    data: data[offset..end].to_vec(),
                });
                offset = end;
            }
        }

        Ok((header, segments))
    }

    #[inline]
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Decoded segments in wire order: zero or more VLAN tags, then at most
    /// one generic payload.
    #[inline]
    pub fn segments(&self) -> &[PayloadSegment] {
        &self.segments
    }

    pub fn vlan_tags(&self) -> impl Iterator<Item = &VlanTag> {
        self.segments.iter().filter_map(PayloadSegment::as_vlan)
    }

    /// The raw frame, frame check sequence included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Everything between the header and the frame check sequence.
    pub fn payload(&self) -> &[u8] {
        if self.len < Frame::MIN_LEN {
            return &[];
        }
        &self.buf[FrameHeader::LEN..self.len - Frame::FCS_LEN]
    }

    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload().len()
    }

    /// The frame check sequence carried by the frame, read big-endian.
    ///
    /// # Errors
    ///
    /// `FrameError::FrameTooShort` if the frame holds fewer than
    /// [`Frame::MIN_LEN`] bytes, e.g. before the first successful load.
    pub fn fcs(&self) -> Result<u32, FrameError> {
        let end = self.checked_body_end()?;
        let mut fcs = [0u8; Frame::FCS_LEN];
        fcs.copy_from_slice(&self.buf[end..self.len]);
        Ok(u32::from_be_bytes(fcs))
    }

    /// The CRC-32 of everything preceding the frame check sequence.
    ///
    /// # Errors
    ///
    /// `FrameError::FrameTooShort`, as for [`Frame::fcs`].
    pub fn compute_fcs(&self) -> Result<u32, FrameError> {
        let end = self.checked_body_end()?;
        let mut crc = Crc32::new();
        crc.update(&self.buf[..end]);
        Ok(crc.finalize())
    }

    /// Whether the carried frame check sequence matches the computed one.
    ///
    /// A mismatch is not an error, deciding what to do with a damaged frame
    /// is up to the caller. An empty frame never validates.
    pub fn validate(&self) -> bool {
        match (self.fcs(), self.compute_fcs()) {
            (Ok(carried), Ok(computed)) => {
                if carried != computed {
                    debug!(
                        "frame check sequence mismatch: carried {:#010x}, computed {:#010x}",
                        carried, computed
                    );
                }
                carried == computed
            }
            _ => false,
        }
    }

    fn checked_body_end(&self) -> Result<usize, FrameError> {
        if self.len < Frame::MIN_LEN {
            return Err(FrameError::FrameTooShort { len: self.len });
        }
        Ok(self.len - Frame::FCS_LEN)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("len", &self.len)
            .field("header", &self.header)
            .field("segments", &self.segments)
            .field("fcs", &self.fcs().ok())
            .finish()
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Frame {}

impl TryFrom<&[u8]> for Frame {
    type Error = FrameError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        let mut frame = Self::new();
        frame.load(data)?;
        Ok(frame)
    }
}

/// Reads the big-endian `u16` at `offset`, which must end before `end`.
#[inline]
fn read_u16_be(data: &[u8], offset: usize, end: usize) -> Result<u16, FrameError> {
    let available = end - offset;
    if available < PayloadSegment::TYPE_LEN {
        return Err(FrameError::TruncatedSegment {
            offset,
            needed: PayloadSegment::TYPE_LEN,
            available,
        });
    }
    Ok(u16::from_be_bytes([data[offset], data[offset + 1]]))
}
