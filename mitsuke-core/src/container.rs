//! ZIP family: generic archives and the Office Open XML packages built on them.
//!
//! Detection happens in two stages. [`envelope`] confirms the ZIP signature at
//! the start of the view. [`office_subtype`] then looks at the names of the
//! first few local file entries, hopping between them with a bounded
//! signature search, to tell `.docx` / `.pptx` / `.xlsx` apart from other ZIPs.

use crate::format::{FormatResult, FormatTag};
use crate::header::zip::{
    LocalFileHeader, END_OF_CENTRAL_DIR_SIGNATURE, LOCAL_FILE_SIGNATURE, SPANNED_SIGNATURE,
};
use crate::view::{ByteView, Endian};

/// Local entries inspected after the first one.
pub const MAX_HOPS: usize = 3;

/// Leading path component of the main part of each OOXML document type.
const OFFICE_PARTS: [(&[u8], FormatTag); 3] = [
    (b"word/", FormatTag::Docx),
    (b"ppt/", FormatTag::Pptx),
    (b"xl/", FormatTag::Xlsx),
];

/// Names that mark a ZIP as an OPC package when they come first.
const PACKAGE_MARKERS: [&[u8]; 2] = [b"[Content_Types].xml", b"_rels/.rels"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// Starts with a local file header.
    LocalFile,
    /// Starts with the end of central directory record: an empty archive.
    Empty,
    /// Starts with the split/spanned archive marker.
    Spanned,
}

impl Envelope {
    pub fn result(self) -> FormatResult {
        match self {
            Envelope::LocalFile => FormatTag::Zip.into(),
            Envelope::Empty => FormatResult::new(FormatTag::Zip, "Zip archive data (empty)"),
            Envelope::Spanned => FormatResult::new(FormatTag::Zip, "Zip archive data (spanned)"),
        }
    }
}

pub fn envelope(view: ByteView<'_>) -> Option<Envelope> {
    if view.starts_with(&LOCAL_FILE_SIGNATURE) {
        Some(Envelope::LocalFile)
    } else if view.starts_with(&END_OF_CENTRAL_DIR_SIGNATURE) {
        Some(Envelope::Empty)
    } else if view.starts_with(&SPANNED_SIGNATURE) {
        Some(Envelope::Spanned)
    } else {
        None
    }
}

/// Full ZIP-family classification: an Office subtype, generic `zip`, or `none`
/// when there is no ZIP envelope at all.
pub fn detect(view: ByteView<'_>) -> FormatResult {
    match envelope(view) {
        None => FormatResult::none(),
        Some(found) => match office_subtype(view) {
            Some(tag) => tag.into(),
            None => found.result(),
        },
    }
}

/// Docx, pptx or xlsx if the package's first entries say so.
pub fn office_subtype(view: ByteView<'_>) -> Option<FormatTag> {
    if envelope(view)? != Envelope::LocalFile {
        return None;
    }

    let first_name = LocalFileHeader::NAME_OFFSET;
    if let Some(tag) = office_part(view, first_name) {
        return Some(tag);
    }
    if !PACKAGE_MARKERS
        .iter()
        .any(|marker| view.matches_at(first_name, marker))
    {
        return None;
    }

    LocalEntries::after_first(view)?
        .find_map(|entry| office_part(view, entry.saturating_add(LocalFileHeader::NAME_OFFSET)))
}

fn office_part(view: ByteView<'_>, name_offset: usize) -> Option<FormatTag> {
    OFFICE_PARTS
        .iter()
        .find(|(prefix, _)| view.matches_at(name_offset, prefix))
        .map(|&(_, tag)| tag)
}

/// Offsets of up to [`MAX_HOPS`] local file headers following the first one.
///
/// Each hop skips the previous entry using its own header and then searches
/// forward for the next local file signature. A header that cannot be
/// overlaid ends the walk after its entry has been yielded.
struct LocalEntries<'a> {
    view: ByteView<'a>,
    next: Option<usize>,
    hops: usize,
}

impl<'a> LocalEntries<'a> {
    fn after_first(view: ByteView<'a>) -> Option<Self> {
        let first = view.overlay::<LocalFileHeader>(0, Endian::Little)?;
        Some(Self {
            view,
            next: Some(first.entry_len()?),
            hops: 0,
        })
    }
}

impl Iterator for LocalEntries<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.hops >= MAX_HOPS {
            return None;
        }
        let from = self.next.take()?;
        let entry = self.view.find(from, &LOCAL_FILE_SIGNATURE)?;
        self.hops += 1;

        self.next = self
            .view
            .overlay::<LocalFileHeader>(entry, Endian::Little)
            .and_then(|hdr| hdr.entry_len())
            .and_then(|len| entry.checked_add(len));
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A stored (uncompressed) local entry.
    fn entry(name: &str, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&LOCAL_FILE_SIGNATURE);
        out.extend_from_slice(&20u16.to_le_bytes());
        out.extend_from_slice(&[0u8; 12]);
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(name.as_bytes());
        out.extend_from_slice(data);
        out
    }

    fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut out: Vec<u8> = entries
            .iter()
            .flat_map(|(name, data)| entry(name, data))
            .collect();
        // Central directory stand-in so the last header is never at the very end.
        out.extend_from_slice(&END_OF_CENTRAL_DIR_SIGNATURE);
        out.extend_from_slice(&[0u8; 18]);
        out
    }

    #[test]
    fn envelope_signatures() {
        assert_eq!(envelope(ByteView::new(b"PK\x03\x04")), Some(Envelope::LocalFile));
        assert_eq!(envelope(ByteView::new(b"PK\x05\x06")), Some(Envelope::Empty));
        assert_eq!(envelope(ByteView::new(b"PK\x07\x08")), Some(Envelope::Spanned));
        assert_eq!(envelope(ByteView::new(b"PK\x01\x02")), None);
        assert_eq!(envelope(ByteView::new(b"PK\x03")), None);
    }

    #[test]
    fn first_entry_names_the_document() {
        let docx = archive(&[("word/document.xml", b"<w/>")]);
        assert_eq!(detect(ByteView::new(&docx)).tag, FormatTag::Docx);

        let xlsx = archive(&[("xl/workbook.xml", b"<x/>")]);
        assert_eq!(detect(ByteView::new(&xlsx)).tag, FormatTag::Xlsx);
    }

    #[test]
    fn content_types_first_then_parts() {
        let pptx = archive(&[
            ("[Content_Types].xml", b"<Types/>"),
            ("_rels/.rels", b"<Relationships/>"),
            ("ppt/presentation.xml", b"<p/>"),
        ]);
        let result = detect(ByteView::new(&pptx));
        assert_eq!(result.tag, FormatTag::Pptx);
        assert_eq!(result.label, "Microsoft PowerPoint (.pptx)");
    }

    #[test]
    fn parts_beyond_the_hop_limit_are_not_seen() {
        let late = archive(&[
            ("[Content_Types].xml", b"<Types/>"),
            ("_rels/.rels", b"r"),
            ("docProps/app.xml", b"a"),
            ("docProps/core.xml", b"c"),
            ("word/document.xml", b"<w/>"),
        ]);
        assert_eq!(detect(ByteView::new(&late)).tag, FormatTag::Zip);

        let within = archive(&[
            ("[Content_Types].xml", b"<Types/>"),
            ("_rels/.rels", b"r"),
            ("docProps/app.xml", b"a"),
            ("word/document.xml", b"<w/>"),
        ]);
        assert_eq!(detect(ByteView::new(&within)).tag, FormatTag::Docx);
    }

    #[test]
    fn without_package_marker_stays_zip() {
        let plain = archive(&[("readme.txt", b"hi"), ("word/document.xml", b"<w/>")]);
        assert_eq!(detect(ByteView::new(&plain)).tag, FormatTag::Zip);
    }

    #[test]
    fn truncated_first_header_stays_zip() {
        let docs = archive(&[("[Content_Types].xml", b"<Types/>")]);
        assert_eq!(detect(ByteView::new(&docs[..40])).tag, FormatTag::Zip);
    }

    #[test]
    fn bogus_sizes_do_not_escape_the_view() {
        let mut docs = archive(&[
            ("[Content_Types].xml", b"<Types/>"),
            ("word/document.xml", b"<w/>"),
        ]);
        docs[18..22].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(detect(ByteView::new(&docs)).tag, FormatTag::Zip);
    }

    #[test]
    fn not_a_zip() {
        assert!(detect(ByteView::new(b"\x7FELF")).is_none());
        assert_eq!(office_subtype(ByteView::new(b"PK\x05\x06\0\0\0\0")), None);
    }
}
