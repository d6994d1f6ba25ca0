//! Known inputs and the classification each one must produce.

use mitsuke_core::{identify, ByteView, FormatTag};
use std::io::Write;

fn tag_of(bytes: &[u8]) -> FormatTag {
    identify(ByteView::new(bytes)).tag
}

#[test]
fn elf_little_endian_executable() {
    let bytes = [
        0x7F, 0x45, 0x4C, 0x46, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x02, 0x00,
    ];
    let result = identify(ByteView::new(&bytes));
    assert_eq!(result.tag, FormatTag::ElfExecutable);
    assert_eq!(result.label, "ELF 32-bit LSB executable");
}

#[test]
fn unix_archive() {
    assert_eq!(tag_of(b"!<arch>\n"), FormatTag::Archive);
}

#[test]
fn git_pack_reports_version_and_objects() {
    let bytes = [
        0x50, 0x41, 0x43, 0x4B, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x05,
    ];
    let result = identify(ByteView::new(&bytes));
    assert_eq!(result.tag, FormatTag::GitPack);
    assert!(result.label.contains("version 2"), "{}", result.label);
    assert!(result.label.contains("objects 5"), "{}", result.label);
}

#[test]
fn zip_without_office_markers() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"PK\x03\x04");
    bytes.extend_from_slice(&[0x14, 0x00]);
    bytes.extend_from_slice(&[0u8; 12]);
    bytes.extend_from_slice(&20u32.to_le_bytes());
    bytes.extend_from_slice(&20u32.to_le_bytes());
    bytes.extend_from_slice(&8u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(b"mimetype");
    bytes.extend_from_slice(b"application/epub+zip");
    bytes.extend_from_slice(b"PK\x01\x02");
    bytes.resize(bytes.len() + 42, 0);

    let result = identify(ByteView::new(&bytes));
    assert_eq!(result.tag, FormatTag::Zip);
    assert_eq!(result.label, "Zip archive data");
}

#[test]
fn macho_64_big_endian_executable() {
    let mut bytes = vec![0u8; 32];
    bytes[..4].copy_from_slice(&[0xFE, 0xED, 0xFA, 0xCF]);
    bytes[4..8].copy_from_slice(&0x0100_0012u32.to_be_bytes());
    bytes[12..16].copy_from_slice(&2u32.to_be_bytes());

    let result = identify(ByteView::new(&bytes));
    assert_eq!(result.tag, FormatTag::MachoExecutable);
    assert_eq!(result.label, "Mach-O 64-bit MSB executable");
}

#[test]
fn raw_bitcode_is_not_an_archive() {
    assert_eq!(tag_of(b"BC\xC0\xDE\x35\x14\x00\x00"), FormatTag::Bitcode);
}

#[test]
fn office_documents_from_disk() {
    let mut docx = b"PK\x03\x04".to_vec();
    docx.resize(26, 0);
    docx.extend_from_slice(&(19u16).to_le_bytes());
    docx.extend_from_slice(&0u16.to_le_bytes());
    docx.extend_from_slice(b"[Content_Types].xml");
    docx.extend_from_slice(b"PK\x03\x04");
    docx.resize(docx.len() + 22, 0);
    docx.extend_from_slice(&(17u16).to_le_bytes());
    docx.extend_from_slice(&0u16.to_le_bytes());
    docx.extend_from_slice(b"word/document.xml");
    docx.extend_from_slice(b"PK\x05\x06");
    docx.resize(docx.len() + 18, 0);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&docx).unwrap();
    file.flush().unwrap();

    let result = mitsuke_core::identify_path(file.path()).unwrap();
    assert_eq!(result.tag, FormatTag::Docx);
    assert_eq!(result.label, "Microsoft Word (.docx)");
}
