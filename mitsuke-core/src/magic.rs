//! Leading-byte dispatcher for object files, executables and toolchain artifacts.

use goblin::elf::header::{EI_DATA, ELFMAG, ET_CORE, ET_DYN, ET_EXEC, ET_REL};
use goblin::mach::header::{
    MH_BUNDLE, MH_CORE, MH_DSYM, MH_DYLIB, MH_DYLIB_STUB, MH_DYLINKER, MH_EXECUTE, MH_FVMLIB,
    MH_KEXT_BUNDLE, MH_OBJECT, MH_PRELOAD,
};
use goblin::pe::header::DOS_MAGIC;

use crate::container;
use crate::format::{FormatResult, FormatTag};
use crate::header::coff::{
    self, AnonObjectPrefix, ANON_OBJECT_PREFIX, BIG_OBJ_MAGIC, CL_GL_OBJ_MAGIC, DOS_HEADER_SIZE,
    E_LFANEW_OFFSET, PDB_MAGIC, PE_POINTER_OFFSET, WIN_RES_MAGIC,
};
use crate::header::elf::ElfPrefix;
use crate::header::macho::{self, FatHeader, MachHeader};
use crate::view::{ByteView, Endian};

/// Shortest input the classifier looks at.
pub const MIN_LEN: usize = 4;

/// Upper bound on `nfat_arch`; Java class files share `CAFEBABE` but carry a
/// major version of 45 or more in the same byte.
pub const MAX_FAT_ARCHES: u8 = 43;

pub const BITCODE_WRAPPER_MAGIC: [u8; 4] = [0xDE, 0xC0, 0x17, 0x0B];
pub const BITCODE_MAGIC: [u8; 4] = [b'B', b'C', 0xC0, 0xDE];
pub const WASM_MAGIC: [u8; 4] = *b"\0asm";
pub const ARCHIVE_MAGIC: &[u8] = b"!<arch>\n";
pub const THIN_ARCHIVE_MAGIC: &[u8] = b"!<thin>\n";

/// Plain COFF objects, keyed by the leading byte of their little-endian
/// `Machine` field, with the second bytes accepted for it.
pub const COFF_MACHINE_RULES: &[(u8, &[u8])] = &[
    // PowerPC, Alpha, Alpha 64, MIPS R4000, mc68k, i386, ARM Thumb-2
    (0xF0, &[0x01, 0x02]),
    (0x83, &[0x01, 0x02]),
    (0x84, &[0x01, 0x02]),
    (0x66, &[0x01, 0x02]),
    (0x50, &[0x01, 0x02]),
    (0x4C, &[0x01, 0x02]),
    (0xC4, &[0x01, 0x02]),
    // PA-RISC, mc68k Windows
    (0x90, &[0x02]),
    (0x68, &[0x02]),
    // x86-64, ARM64
    (0x64, &[0x86, 0xAA]),
];

/// Classifies `view` by its leading bytes.
///
/// Returns [`FormatTag::Zip`] for anything carrying a ZIP envelope; callers
/// refine that with [`container::detect`].
pub fn classify(view: ByteView<'_>) -> FormatResult {
    if view.len() < MIN_LEN {
        return FormatResult::none();
    }

    let matched = match view.byte_at(0) {
        0x00 => classify_leading_zero(view),
        0xDE => view
            .starts_with(&BITCODE_WRAPPER_MAGIC)
            .then(|| FormatResult::new(FormatTag::Bitcode, "LLVM bitcode wrapper")),
        b'B' => view
            .starts_with(&BITCODE_MAGIC)
            .then(|| FormatTag::Bitcode.into()),
        b'!' => classify_archive(view),
        0x7F => classify_elf(view),
        0xCA => classify_universal(view),
        0xFE | 0xCE | 0xCF => classify_thin_macho(view),
        b'M' => classify_microsoft(view),
        b'P' => container::envelope(view).map(|envelope| envelope.result()),
        _ => None,
    };

    matched
        .or_else(|| classify_coff_machine(view))
        .unwrap_or_else(FormatResult::none)
}

fn magic_word(view: ByteView<'_>) -> Option<[u8; 4]> {
    view.get(0, 4)?.try_into().ok()
}

fn classify_leading_zero(view: ByteView<'_>) -> Option<FormatResult> {
    if view.starts_with(&ANON_OBJECT_PREFIX) {
        let result = match view.read_header::<AnonObjectPrefix>(0, Endian::Little) {
            Some(hdr) if hdr.class_id == BIG_OBJ_MAGIC => FormatResult::new(
                FormatTag::CoffObject,
                with_machine("COFF big object file", hdr.machine),
            ),
            Some(hdr) if hdr.class_id == CL_GL_OBJ_MAGIC => FormatResult::new(
                FormatTag::CoffClGlObject,
                with_machine(FormatTag::CoffClGlObject.description(), hdr.machine),
            ),
            _ => FormatTag::CoffImportLibrary.into(),
        };
        return Some(result);
    }

    if view.starts_with(&WIN_RES_MAGIC) {
        return Some(FormatTag::WindowsResource.into());
    }

    // IMAGE_FILE_MACHINE_UNKNOWN
    if view.byte_at(1) == 0 {
        return Some(FormatTag::CoffObject.into());
    }

    if view.starts_with(&WASM_MAGIC) {
        let label = match view.read_u32(4, Endian::Little) {
            Some(version) => format!("WebAssembly binary, version {}", version),
            None => FormatTag::WasmObject.description().to_string(),
        };
        return Some(FormatResult::new(FormatTag::WasmObject, label));
    }

    None
}

fn classify_archive(view: ByteView<'_>) -> Option<FormatResult> {
    if view.starts_with(ARCHIVE_MAGIC) {
        Some(FormatTag::Archive.into())
    } else if view.starts_with(THIN_ARCHIVE_MAGIC) {
        Some(FormatResult::new(FormatTag::Archive, "ar archive (thin)"))
    } else {
        None
    }
}

fn classify_elf(view: ByteView<'_>) -> Option<FormatResult> {
    if !view.starts_with(ELFMAG) {
        return None;
    }

    let endian = ElfPrefix::endian_of(view.byte_at(EI_DATA));
    let prefix = view.read_header::<ElfPrefix>(0, endian)?;

    let (tag, kind) = match prefix.e_type {
        ET_REL => (FormatTag::ElfRelocatable, "relocatable"),
        ET_EXEC => (FormatTag::ElfExecutable, "executable"),
        ET_DYN => (FormatTag::ElfSharedObject, "shared object"),
        ET_CORE => (FormatTag::ElfCore, "core file"),
        _ => (FormatTag::Elf, "file"),
    };
    let label = format!(
        "ELF {} {} {}",
        prefix.class_name().unwrap_or("unknown-class"),
        endian.abbrev(),
        kind
    );
    Some(FormatResult::new(tag, label))
}

fn classify_universal(view: ByteView<'_>) -> Option<FormatResult> {
    if !macho::is_fat_magic(magic_word(view)?) {
        return None;
    }
    // The sentinel for a short view is never below the bound.
    if view.byte_at(7) >= MAX_FAT_ARCHES {
        return None;
    }
    let fat = view.read_header::<FatHeader>(0, Endian::Big)?;
    Some(FormatResult::new(
        FormatTag::MachoUniversalBinary,
        format!("Mach-O universal binary with {} architectures", fat.nfat_arch),
    ))
}

fn classify_thin_macho(view: ByteView<'_>) -> Option<FormatResult> {
    let (width, endian) = macho::thin_magic(magic_word(view)?)?;
    if view.len() < width.header_size() {
        return None;
    }
    let header = view.read_header::<MachHeader>(0, endian)?;

    let (tag, kind) = match header.filetype {
        MH_OBJECT => (FormatTag::MachoObject, "object"),
        MH_EXECUTE => (FormatTag::MachoExecutable, "executable"),
        MH_FVMLIB => (FormatTag::MachoFixedVmSharedLib, "fixed VM shared library"),
        MH_CORE => (FormatTag::MachoCore, "core"),
        MH_PRELOAD => (FormatTag::MachoPreloadExecutable, "preloaded executable"),
        MH_DYLIB => (
            FormatTag::MachoDynamicSharedLib,
            "dynamically linked shared library",
        ),
        MH_DYLINKER => (FormatTag::MachoDynamicLinker, "dynamic linker"),
        MH_BUNDLE => (FormatTag::MachoBundle, "bundle"),
        MH_DYLIB_STUB => (FormatTag::MachoDynamicSharedLibStub, "shared library stub"),
        MH_DSYM => (FormatTag::MachoDsymCompanion, "dSYM companion file"),
        MH_KEXT_BUNDLE => (FormatTag::MachoKextBundle, "kernel extension bundle"),
        _ => return None,
    };
    let label = format!("Mach-O {} {} {}", width.name(), endian.abbrev(), kind);
    Some(FormatResult::new(tag, label))
}

fn classify_microsoft(view: ByteView<'_>) -> Option<FormatResult> {
    if view.starts_with(PDB_MAGIC) {
        return Some(FormatTag::Pdb.into());
    }
    if !view.starts_with(&DOS_MAGIC.to_le_bytes()) || view.len() < DOS_HEADER_SIZE {
        return None;
    }

    let signature = coff::pe_signature();
    [E_LFANEW_OFFSET, PE_POINTER_OFFSET]
        .into_iter()
        .filter_map(|slot| view.read_u32(slot, Endian::Little))
        .filter_map(|offset| usize::try_from(offset).ok())
        .map(|offset| view.sub_view(offset))
        .find(|pe| pe.starts_with(&signature))
        .map(|pe| {
            let label = match pe.read_u16(4, Endian::Little) {
                Some(machine) => with_machine(FormatTag::PecoffExecutable.description(), machine),
                None => FormatTag::PecoffExecutable.description().to_string(),
            };
            FormatResult::new(FormatTag::PecoffExecutable, label)
        })
}

fn classify_coff_machine(view: ByteView<'_>) -> Option<FormatResult> {
    let (lead, second) = (view.byte_at(0), view.byte_at(1));
    COFF_MACHINE_RULES
        .iter()
        .find(|(rule_lead, accepted)| *rule_lead == lead && accepted.contains(&second))
        .map(|_| {
            let machine = u16::from_le_bytes([lead, second]);
            FormatResult::new(
                FormatTag::CoffObject,
                with_machine(FormatTag::CoffObject.description(), machine),
            )
        })
}

fn with_machine(base: &str, machine: u16) -> String {
    match coff::machine_name(machine) {
        Some(name) => format!("{}, {}", base, name),
        None => format!("{}, machine {:#06x}", base, machine),
    }
}
