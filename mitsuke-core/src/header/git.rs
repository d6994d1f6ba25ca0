//! Headers of git's object-store files.
//!
//! All multi-byte fields are in network byte order.
//! See `Documentation/gitformat-pack.txt` in the git tree.

use crate::header::Header;
use crate::view::Endian;

pub const PACK_MAGIC: [u8; 4] = *b"PACK";
pub const INDEX_MAGIC: [u8; 4] = [0xFF, 0x74, 0x4F, 0x63];
pub const MIDX_MAGIC: [u8; 4] = *b"MIDX";

pub const FANOUT_ENTRIES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackHeader {
    pub signature: [u8; 4],
    pub version: u32,
    pub objects: u32,
}

impl Header for PackHeader {
    const SIZE: usize = 12;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        PackHeader {
            signature: signature(bytes),
            version: endian.read_u32(&bytes[4..8]),
            objects: endian.read_u32(&bytes[8..12]),
        }
    }
}

/// Magic, version and fan-out table shared by every `.idx` version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub signature: [u8; 4],
    pub version: u32,
    /// `fanout[n]` counts objects whose first hash byte is `<= n`.
    pub fanout: [u32; FANOUT_ENTRIES],
}

impl IndexHeader {
    /// Number of objects in the pack, from the last fan-out slot.
    pub fn total_objects(&self) -> u32 {
        self.fanout[FANOUT_ENTRIES - 1]
    }
}

impl Header for IndexHeader {
    const SIZE: usize = 8 + FANOUT_ENTRIES * 4;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        let mut fanout = [0u32; FANOUT_ENTRIES];
        for (slot, chunk) in fanout.iter_mut().zip(bytes[8..].chunks_exact(4)) {
            *slot = endian.read_u32(chunk);
        }
        IndexHeader {
            signature: signature(bytes),
            version: endian.read_u32(&bytes[4..8]),
            fanout,
        }
    }
}

/// Version 3 index header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index3Header {
    pub signature: [u8; 4],
    pub version: u32,
    pub header_len: u32,
    pub objects: u32,
    pub object_formats: u32,
}

impl Header for Index3Header {
    const SIZE: usize = 20;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        Index3Header {
            signature: signature(bytes),
            version: endian.read_u32(&bytes[4..8]),
            header_len: endian.read_u32(&bytes[8..12]),
            objects: endian.read_u32(&bytes[12..16]),
            object_formats: endian.read_u32(&bytes[16..20]),
        }
    }
}

/// Multi-pack-index header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidxHeader {
    pub signature: [u8; 4],
    pub version: u8,
    /// 1 = SHA-1, 2 = SHA-256.
    pub oid_version: u8,
    pub chunks: u8,
    pub base_midx_files: u8,
    pub pack_files: u32,
}

impl Header for MidxHeader {
    const SIZE: usize = 12;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        MidxHeader {
            signature: signature(bytes),
            version: bytes[4],
            oid_version: bytes[5],
            chunks: bytes[6],
            base_midx_files: bytes[7],
            pack_files: endian.read_u32(&bytes[8..12]),
        }
    }
}

fn signature(bytes: &[u8]) -> [u8; 4] {
    [bytes[0], bytes[1], bytes[2], bytes[3]]
}
