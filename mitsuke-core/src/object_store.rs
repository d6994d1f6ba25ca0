//! Git object-store files: packs, pack indexes and multi-pack-indexes.

use crate::format::{FormatResult, FormatTag};
use crate::header::git::{
    Index3Header, IndexHeader, MidxHeader, PackHeader, INDEX_MAGIC, MIDX_MAGIC, PACK_MAGIC,
};
use crate::view::{ByteView, Endian};

/// Classifies git pack (`.pack`), pack index (`.idx`) and `multi-pack-index`
/// files. Anything else, or a recognized magic with a truncated header, is `none`.
pub fn detect(view: ByteView<'_>) -> FormatResult {
    let detected = if view.starts_with(&PACK_MAGIC) {
        detect_pack(view)
    } else if view.starts_with(&INDEX_MAGIC) {
        detect_index(view)
    } else if view.starts_with(&MIDX_MAGIC) {
        detect_midx(view)
    } else {
        None
    };
    detected.unwrap_or_else(FormatResult::none)
}

fn detect_pack(view: ByteView<'_>) -> Option<FormatResult> {
    let hdr = view.read_header::<PackHeader>(0, Endian::Big)?;
    Some(FormatResult::new(
        FormatTag::GitPack,
        format!(
            "Git pack file, version {}, objects {}",
            hdr.version, hdr.objects
        ),
    ))
}

fn detect_index(view: ByteView<'_>) -> Option<FormatResult> {
    let hdr = view.read_header::<IndexHeader>(0, Endian::Big)?;
    let label = match hdr.version {
        2 => format!(
            "Git pack index file, version 2, total objects {}",
            hdr.total_objects()
        ),
        3 => {
            let v3 = view.read_header::<Index3Header>(0, Endian::Big)?;
            format!(
                "Git pack index file, version 3, total objects {}",
                v3.objects
            )
        }
        version => format!("Git pack index file, version {}", version),
    };
    Some(FormatResult::new(FormatTag::GitPackIndex, label))
}

fn detect_midx(view: ByteView<'_>) -> Option<FormatResult> {
    let hdr = view.read_header::<MidxHeader>(0, Endian::Big)?;
    Some(FormatResult::new(
        FormatTag::GitPack,
        format!(
            "Git multi-pack-index, version {}, oid version {}, chunks {}, pack files {}",
            hdr.version, hdr.oid_version, hdr.chunks, hdr.pack_files
        ),
    ))
}
