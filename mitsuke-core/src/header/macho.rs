use crate::header::Header;
use crate::view::Endian;
use goblin::mach::fat::FAT_MAGIC;
use goblin::mach::header::{
    MH_CIGAM, MH_CIGAM_64, MH_MAGIC, MH_MAGIC_64, SIZEOF_HEADER_32, SIZEOF_HEADER_64,
};

/// Universal binaries with 64-bit offsets.
pub const FAT_MAGIC_64: u32 = 0xcafe_babf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachWidth {
    Bits32,
    Bits64,
}

impl MachWidth {
    /// Size of `mach_header` / `mach_header_64`.
    pub fn header_size(self) -> usize {
        match self {
            MachWidth::Bits32 => SIZEOF_HEADER_32,
            MachWidth::Bits64 => SIZEOF_HEADER_64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MachWidth::Bits32 => "32-bit",
            MachWidth::Bits64 => "64-bit",
        }
    }
}

/// Which of the four thin Mach-O magics a file starts with.
///
/// The magic is compared as a big-endian word; `MH_MAGIC*` then means the
/// header fields are big-endian and `MH_CIGAM*` means they are little-endian.
pub fn thin_magic(prefix: [u8; 4]) -> Option<(MachWidth, Endian)> {
    match u32::from_be_bytes(prefix) {
        MH_MAGIC => Some((MachWidth::Bits32, Endian::Big)),
        MH_MAGIC_64 => Some((MachWidth::Bits64, Endian::Big)),
        MH_CIGAM => Some((MachWidth::Bits32, Endian::Little)),
        MH_CIGAM_64 => Some((MachWidth::Bits64, Endian::Little)),
        _ => None,
    }
}

pub fn is_fat_magic(prefix: [u8; 4]) -> bool {
    matches!(u32::from_be_bytes(prefix), FAT_MAGIC | FAT_MAGIC_64)
}

/// The fields common to `mach_header` and `mach_header_64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachHeader {
    pub magic: u32,
    pub cputype: u32,
    pub cpusubtype: u32,
    /// `MH_OBJECT`, `MH_EXECUTE`, ... (1 through 11 are recognized).
    pub filetype: u32,
    pub ncmds: u32,
    pub sizeofcmds: u32,
    pub flags: u32,
}

impl Header for MachHeader {
    const SIZE: usize = SIZEOF_HEADER_32;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        let field = |i: usize| endian.read_u32(&bytes[i * 4..i * 4 + 4]);
        MachHeader {
            magic: field(0),
            cputype: field(1),
            cpusubtype: field(2),
            filetype: field(3),
            ncmds: field(4),
            sizeofcmds: field(5),
            flags: field(6),
        }
    }
}

/// `fat_header`, always big-endian on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatHeader {
    pub magic: u32,
    pub nfat_arch: u32,
}

impl Header for FatHeader {
    const SIZE: usize = 8;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        FatHeader {
            magic: endian.read_u32(&bytes[0..4]),
            nfat_arch: endian.read_u32(&bytes[4..8]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thin_magics_imply_byte_order() {
        assert_eq!(
            thin_magic([0xFE, 0xED, 0xFA, 0xCE]),
            Some((MachWidth::Bits32, Endian::Big))
        );
        assert_eq!(
            thin_magic([0xCF, 0xFA, 0xED, 0xFE]),
            Some((MachWidth::Bits64, Endian::Little))
        );
        assert_eq!(thin_magic([0xFE, 0xED, 0xFA, 0xCD]), None);
    }

    #[test]
    fn fat_magics() {
        assert!(is_fat_magic([0xCA, 0xFE, 0xBA, 0xBE]));
        assert!(is_fat_magic([0xCA, 0xFE, 0xBA, 0xBF]));
        assert!(!is_fat_magic([0xCA, 0xFE, 0xD0, 0x0D]));
    }

    #[test]
    fn header_sizes() {
        assert_eq!(MachWidth::Bits32.header_size(), 28);
        assert_eq!(MachWidth::Bits64.header_size(), 32);
    }
}
