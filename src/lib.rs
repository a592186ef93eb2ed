#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;

pub mod crc;
pub mod eth;
pub mod frame;
pub mod segment;
pub mod vlan;

pub use crc::{crc32, Crc32};
pub use eth::{EtherType, FrameHeader, MacAddr};
pub use frame::{Frame, FrameError};
pub use segment::PayloadSegment;
pub use vlan::VlanTag;
