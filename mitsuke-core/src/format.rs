use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatTag {
    None,

    // ELF
    Elf,
    ElfRelocatable,
    ElfExecutable,
    ElfSharedObject,
    ElfCore,

    // Mach-O
    MachoObject,
    MachoExecutable,
    MachoFixedVmSharedLib,
    MachoCore,
    MachoPreloadExecutable,
    MachoDynamicSharedLib,
    MachoDynamicLinker,
    MachoBundle,
    MachoDynamicSharedLibStub,
    MachoDsymCompanion,
    MachoKextBundle,
    MachoUniversalBinary,

    // COFF / PE
    CoffObject,
    CoffImportLibrary,
    CoffClGlObject,
    WindowsResource,
    PecoffExecutable,

    // Toolchain artifacts
    Archive,
    Bitcode,
    WasmObject,
    Pdb,

    // ZIP family
    Zip,
    Docx,
    Pptx,
    Xlsx,

    // git object store
    GitPack,
    GitPackIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Unknown,
    Elf,
    MachO,
    Coff,
    Archive,
    Bitcode,
    Wasm,
    Pdb,
    Zip,
    Office,
    Git,
}

impl FormatTag {
    pub const ALL: [FormatTag; 33] = [
        FormatTag::None,
        FormatTag::Elf,
        FormatTag::ElfRelocatable,
        FormatTag::ElfExecutable,
        FormatTag::ElfSharedObject,
        FormatTag::ElfCore,
        FormatTag::MachoObject,
        FormatTag::MachoExecutable,
        FormatTag::MachoFixedVmSharedLib,
        FormatTag::MachoCore,
        FormatTag::MachoPreloadExecutable,
        FormatTag::MachoDynamicSharedLib,
        FormatTag::MachoDynamicLinker,
        FormatTag::MachoBundle,
        FormatTag::MachoDynamicSharedLibStub,
        FormatTag::MachoDsymCompanion,
        FormatTag::MachoKextBundle,
        FormatTag::MachoUniversalBinary,
        FormatTag::CoffObject,
        FormatTag::CoffImportLibrary,
        FormatTag::CoffClGlObject,
        FormatTag::WindowsResource,
        FormatTag::PecoffExecutable,
        FormatTag::Archive,
        FormatTag::Bitcode,
        FormatTag::WasmObject,
        FormatTag::Pdb,
        FormatTag::Zip,
        FormatTag::Docx,
        FormatTag::Pptx,
        FormatTag::Xlsx,
        FormatTag::GitPack,
        FormatTag::GitPackIndex,
    ];

    /// Stable snake_case identifier, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            FormatTag::None => "none",
            FormatTag::Elf => "elf",
            FormatTag::ElfRelocatable => "elf_relocatable",
            FormatTag::ElfExecutable => "elf_executable",
            FormatTag::ElfSharedObject => "elf_shared_object",
            FormatTag::ElfCore => "elf_core",
            FormatTag::MachoObject => "macho_object",
            FormatTag::MachoExecutable => "macho_executable",
            FormatTag::MachoFixedVmSharedLib => "macho_fixed_vm_shared_lib",
            FormatTag::MachoCore => "macho_core",
            FormatTag::MachoPreloadExecutable => "macho_preload_executable",
            FormatTag::MachoDynamicSharedLib => "macho_dynamic_shared_lib",
            FormatTag::MachoDynamicLinker => "macho_dynamic_linker",
            FormatTag::MachoBundle => "macho_bundle",
            FormatTag::MachoDynamicSharedLibStub => "macho_dynamic_shared_lib_stub",
            FormatTag::MachoDsymCompanion => "macho_dsym_companion",
            FormatTag::MachoKextBundle => "macho_kext_bundle",
            FormatTag::MachoUniversalBinary => "macho_universal_binary",
            FormatTag::CoffObject => "coff_object",
            FormatTag::CoffImportLibrary => "coff_import_library",
            FormatTag::CoffClGlObject => "coff_cl_gl_object",
            FormatTag::WindowsResource => "windows_resource",
            FormatTag::PecoffExecutable => "pecoff_executable",
            FormatTag::Archive => "archive",
            FormatTag::Bitcode => "bitcode",
            FormatTag::WasmObject => "wasm_object",
            FormatTag::Pdb => "pdb",
            FormatTag::Zip => "zip",
            FormatTag::Docx => "docx",
            FormatTag::Pptx => "pptx",
            FormatTag::Xlsx => "xlsx",
            FormatTag::GitPack => "gitpack",
            FormatTag::GitPackIndex => "gitpkindex",
        }
    }

    /// Label used when a detector has no decoded metadata to add.
    pub fn description(self) -> &'static str {
        match self {
            FormatTag::None => "Unknown data",
            FormatTag::Elf => "ELF",
            FormatTag::ElfRelocatable => "ELF relocatable object",
            FormatTag::ElfExecutable => "ELF executable",
            FormatTag::ElfSharedObject => "ELF shared object",
            FormatTag::ElfCore => "ELF core dump",
            FormatTag::MachoObject => "Mach-O object",
            FormatTag::MachoExecutable => "Mach-O executable",
            FormatTag::MachoFixedVmSharedLib => "Mach-O fixed VM shared library",
            FormatTag::MachoCore => "Mach-O core file",
            FormatTag::MachoPreloadExecutable => "Mach-O preloaded executable",
            FormatTag::MachoDynamicSharedLib => "Mach-O dynamically linked shared library",
            FormatTag::MachoDynamicLinker => "Mach-O dynamic linker",
            FormatTag::MachoBundle => "Mach-O bundle",
            FormatTag::MachoDynamicSharedLibStub => "Mach-O shared library stub",
            FormatTag::MachoDsymCompanion => "Mach-O dSYM companion file",
            FormatTag::MachoKextBundle => "Mach-O kernel extension bundle",
            FormatTag::MachoUniversalBinary => "Mach-O universal binary",
            FormatTag::CoffObject => "COFF object file",
            FormatTag::CoffImportLibrary => "COFF import library",
            FormatTag::CoffClGlObject => "COFF object (/GL, link-time code generation)",
            FormatTag::WindowsResource => "Windows compiled resource file (.res)",
            FormatTag::PecoffExecutable => "PE/COFF executable",
            FormatTag::Archive => "ar archive",
            FormatTag::Bitcode => "LLVM bitcode",
            FormatTag::WasmObject => "WebAssembly binary",
            FormatTag::Pdb => "Microsoft program database (PDB)",
            FormatTag::Zip => "Zip archive data",
            FormatTag::Docx => "Microsoft Word (.docx)",
            FormatTag::Pptx => "Microsoft PowerPoint (.pptx)",
            FormatTag::Xlsx => "Microsoft Excel (.xlsx)",
            FormatTag::GitPack => "Git pack file",
            FormatTag::GitPackIndex => "Git pack index file",
        }
    }

    pub fn family(self) -> Family {
        match self {
            FormatTag::None => Family::Unknown,
            FormatTag::Elf
            | FormatTag::ElfRelocatable
            | FormatTag::ElfExecutable
            | FormatTag::ElfSharedObject
            | FormatTag::ElfCore => Family::Elf,
            FormatTag::MachoObject
            | FormatTag::MachoExecutable
            | FormatTag::MachoFixedVmSharedLib
            | FormatTag::MachoCore
            | FormatTag::MachoPreloadExecutable
            | FormatTag::MachoDynamicSharedLib
            | FormatTag::MachoDynamicLinker
            | FormatTag::MachoBundle
            | FormatTag::MachoDynamicSharedLibStub
            | FormatTag::MachoDsymCompanion
            | FormatTag::MachoKextBundle
            | FormatTag::MachoUniversalBinary => Family::MachO,
            FormatTag::CoffObject
            | FormatTag::CoffImportLibrary
            | FormatTag::CoffClGlObject
            | FormatTag::WindowsResource
            | FormatTag::PecoffExecutable => Family::Coff,
            FormatTag::Archive => Family::Archive,
            FormatTag::Bitcode => Family::Bitcode,
            FormatTag::WasmObject => Family::Wasm,
            FormatTag::Pdb => Family::Pdb,
            FormatTag::Zip => Family::Zip,
            FormatTag::Docx | FormatTag::Pptx | FormatTag::Xlsx => Family::Office,
            FormatTag::GitPack | FormatTag::GitPackIndex => Family::Git,
        }
    }
}

impl std::str::FromStr for FormatTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        FormatTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.name() == wanted)
            .ok_or_else(|| format!("Unknown format tag: {}", s))
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Unknown => "unknown",
            Family::Elf => "ELF",
            Family::MachO => "Mach-O",
            Family::Coff => "COFF/PE",
            Family::Archive => "archive",
            Family::Bitcode => "bitcode",
            Family::Wasm => "WebAssembly",
            Family::Pdb => "PDB",
            Family::Zip => "ZIP",
            Family::Office => "OOXML",
            Family::Git => "git",
        };
        write!(f, "{}", name)
    }
}

/// One classification: the tag plus a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatResult {
    pub tag: FormatTag,
    pub label: String,
}

impl FormatResult {
    pub fn new(tag: FormatTag, label: impl Into<String>) -> Self {
        Self {
            tag,
            label: label.into(),
        }
    }

    pub fn none() -> Self {
        Self::from(FormatTag::None)
    }

    pub fn is_none(&self) -> bool {
        self.tag == FormatTag::None
    }
}

impl From<FormatTag> for FormatResult {
    fn from(tag: FormatTag) -> Self {
        Self::new(tag, tag.description())
    }
}

impl fmt::Display for FormatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_parse_back() {
        let mut seen = HashSet::new();
        for tag in FormatTag::ALL {
            assert!(seen.insert(tag.name()), "duplicate name {}", tag.name());
            assert_eq!(tag.name().parse::<FormatTag>(), Ok(tag));
        }
        assert!("ELF_EXECUTABLE".parse::<FormatTag>().is_ok());
        assert!("coff".parse::<FormatTag>().is_err());
    }

    #[test]
    fn none_result() {
        let result = FormatResult::none();
        assert!(result.is_none());
        assert_eq!(result.label, "Unknown data");
        assert_eq!(FormatTag::Docx.family(), Family::Office);
    }
}
