use crate::header::Header;
use crate::view::Endian;
use goblin::elf::header::{EI_CLASS, EI_DATA, ELFCLASS32, ELFCLASS64, ELFDATA2MSB};

/// The leading part of an ELF file header: identification bytes plus object type.
///
/// Both `Elf32_Ehdr` and `Elf64_Ehdr` share this prefix, so it can be decoded
/// before the file class is known.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElfPrefix {
    /// ELF identification bytes (magic number and other information).
    ///
    /// The first 4 bytes should be `0x7F`, `'E'`, `'L'`, `'F'`.
    /// Byte 4 encodes the class (32/64-bit), byte 5 the data encoding.
    pub e_ident: [u8; 16],

    /// Object file type (e.g. relocatable, executable, shared, core).
    ///
    /// Common values:
    /// - `ET_NONE` (0): No file type
    /// - `ET_REL` (1): Relocatable file
    /// - `ET_EXEC` (2): Executable file
    /// - `ET_DYN` (3): Shared object
    /// - `ET_CORE` (4): Core dump
    pub e_type: u16,
}

impl ElfPrefix {
    /// Byte order selected by `e_ident[EI_DATA]`.
    ///
    /// Anything other than `ELFDATA2MSB` is read as little-endian, including
    /// invalid encodings.
    pub fn endian_of(data: u8) -> Endian {
        if data == ELFDATA2MSB {
            Endian::Big
        } else {
            Endian::Little
        }
    }

    /// "32-bit", "64-bit", or `None` for an unknown class byte.
    pub fn class_name(&self) -> Option<&'static str> {
        match self.e_ident[EI_CLASS] {
            ELFCLASS32 => Some("32-bit"),
            ELFCLASS64 => Some("64-bit"),
            _ => None,
        }
    }

    pub fn endian(&self) -> Endian {
        Self::endian_of(self.e_ident[EI_DATA])
    }
}

impl Header for ElfPrefix {
    const SIZE: usize = 18;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        let mut e_ident = [0u8; 16];
        e_ident.copy_from_slice(&bytes[..16]);
        ElfPrefix {
            e_ident,
            e_type: endian.read_u16(&bytes[16..18]),
        }
    }
}
