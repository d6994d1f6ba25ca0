use crate::header::Header;
use crate::view::Endian;
use goblin::pe::header::{
    COFF_MACHINE_ARM64, COFF_MACHINE_ARMNT, COFF_MACHINE_X86, COFF_MACHINE_X86_64, PE_MAGIC,
};

/// Import libraries and big-object files both open with these four bytes.
pub const ANON_OBJECT_PREFIX: [u8; 4] = [0x00, 0x00, 0xFF, 0xFF];

/// `ClassID` of an `/bigobj` object file.
pub const BIG_OBJ_MAGIC: [u8; 16] = [
    0xc7, 0xa1, 0xba, 0xd1, 0xee, 0xba, 0xa9, 0x4b, 0xaf, 0x20, 0xfa, 0xf6, 0x6a, 0xa4, 0xdc,
    0xb8,
];

/// `ClassID` of an object compiled with `/GL` (link-time code generation).
pub const CL_GL_OBJ_MAGIC: [u8; 16] = [
    0x38, 0xfe, 0xb3, 0x0c, 0xa5, 0xd9, 0xab, 0x4d, 0xac, 0x9b, 0xd6, 0xb6, 0x22, 0x26, 0x53,
    0xc2,
];

/// Leading empty resource entry of a compiled `.res` file.
pub const WIN_RES_MAGIC: [u8; 16] = [
    0x00, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0xFF, 0xFF, 0x00,
    0x00,
];

pub const PDB_MAGIC: &[u8] = b"Microsoft C/C++ MSF 7.00\r\n";

pub const DOS_HEADER_SIZE: usize = 0x40;

/// Slot read for the PE header offset.
pub const PE_POINTER_OFFSET: usize = 0x32;

/// `e_lfanew`, where linkers actually store the PE header offset.
pub const E_LFANEW_OFFSET: usize = 0x3c;

/// `"PE\0\0"`.
pub fn pe_signature() -> [u8; 4] {
    PE_MAGIC.to_le_bytes()
}

/// Everything of the anonymous object header up to and including `ClassID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnonObjectPrefix {
    pub sig1: u16,
    pub sig2: u16,
    pub version: u16,
    pub machine: u16,
    pub time_date_stamp: u32,
    pub class_id: [u8; 16],
}

impl AnonObjectPrefix {
    pub const CLASS_ID_OFFSET: usize = 12;
}

impl Header for AnonObjectPrefix {
    const SIZE: usize = Self::CLASS_ID_OFFSET + 16;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        let mut class_id = [0u8; 16];
        class_id.copy_from_slice(&bytes[Self::CLASS_ID_OFFSET..Self::SIZE]);
        AnonObjectPrefix {
            sig1: endian.read_u16(&bytes[0..2]),
            sig2: endian.read_u16(&bytes[2..4]),
            version: endian.read_u16(&bytes[4..6]),
            machine: endian.read_u16(&bytes[6..8]),
            time_date_stamp: endian.read_u32(&bytes[8..12]),
            class_id,
        }
    }
}

/// Display name of a COFF `Machine` value.
pub fn machine_name(machine: u16) -> Option<&'static str> {
    Some(match machine {
        COFF_MACHINE_X86 => "i386",
        COFF_MACHINE_X86_64 => "x86-64",
        COFF_MACHINE_ARM64 => "ARM64",
        COFF_MACHINE_ARMNT => "ARM Thumb-2",
        0x01f0 => "PowerPC",
        0x0184 => "Alpha",
        0x0284 => "Alpha 64",
        0x0166 => "MIPS R4000",
        0x0268 => "Motorola 68000",
        0x0290 => "PA-RISC",
        _ => return None,
    })
}
