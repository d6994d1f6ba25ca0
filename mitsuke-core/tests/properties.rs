//! Invariants that must hold for arbitrary, possibly hostile, input.

use mitsuke_core::header::git::{IndexHeader, PackHeader};
use mitsuke_core::header::zip::LocalFileHeader;
use mitsuke_core::header::Header;
use mitsuke_core::{container, identify, magic, object_store, ByteView, Endian, FormatTag};
use proptest::prelude::*;

const MAGICS: &[&[u8]] = &[
    b"\x7FELF",
    b"\xFE\xED\xFA\xCF",
    b"\xCF\xFA\xED\xFE",
    b"\xCA\xFE\xBA\xBE",
    b"\x00\x00\xFF\xFF",
    b"MZ",
    b"PK\x03\x04",
    b"PACK",
    b"\xFF\x74\x4F\x63",
    b"MIDX",
];

/// Inputs that start with one of the recognized magics, to get past the
/// first dispatch and into the header decoders.
fn seeded_bytes() -> impl Strategy<Value = Vec<u8>> {
    (
        proptest::sample::select(MAGICS),
        proptest::collection::vec(any::<u8>(), 0..2048),
    )
        .prop_map(|(prefix, tail)| {
            let mut bytes = prefix.to_vec();
            bytes.extend_from_slice(&tail);
            bytes
        })
}

proptest! {
    #[test]
    fn short_views_are_none(bytes in proptest::collection::vec(any::<u8>(), 0..4)) {
        prop_assert_eq!(magic::classify(ByteView::new(&bytes)).tag, FormatTag::None);
        prop_assert_eq!(identify(ByteView::new(&bytes)).tag, FormatTag::None);
    }

    #[test]
    fn overlay_refused_at_or_past_the_end(len in 0usize..64, offset in 0usize..64) {
        let bytes = vec![0u8; len];
        let view = ByteView::new(&bytes);
        let fits = offset + LocalFileHeader::SIZE < len;
        prop_assert_eq!(view.overlay::<LocalFileHeader>(offset, Endian::Little).is_some(), fits);
        let fits = offset + PackHeader::SIZE < len;
        prop_assert_eq!(view.overlay::<PackHeader>(offset, Endian::Big).is_some(), fits);
    }

    #[test]
    fn huge_offsets_are_refused(offset in (usize::MAX - 64)..=usize::MAX) {
        let bytes = vec![0u8; 64];
        let view = ByteView::new(&bytes);
        prop_assert!(view.overlay::<IndexHeader>(offset, Endian::Big).is_none());
        prop_assert!(view.read_u32(offset, Endian::Big).is_none());
        prop_assert!(!view.matches_at(offset, b"PK"));
        prop_assert!(view.find(offset, b"PK").is_none());
        prop_assert!(view.sub_view(offset).is_empty());
    }

    #[test]
    fn detectors_are_deterministic(bytes in seeded_bytes()) {
        let view = ByteView::new(&bytes);
        prop_assert_eq!(identify(view), identify(view));
        prop_assert_eq!(magic::classify(view), magic::classify(view));
        prop_assert_eq!(container::detect(view), container::detect(view));
        prop_assert_eq!(object_store::detect(view), object_store::detect(view));
    }

    #[test]
    fn truncation_never_panics(bytes in seeded_bytes(), cut in any::<prop::sample::Index>()) {
        let len = cut.index(bytes.len() + 1);
        let result = identify(ByteView::new(&bytes[..len]));
        prop_assert!(!result.label.is_empty());
    }
}
