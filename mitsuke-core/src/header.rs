pub mod coff;
pub mod elf;
pub mod git;
pub mod macho;
pub mod zip;

use crate::view::Endian;

/// A fixed binary layout decoded field by field.
///
/// Implementations never see fewer than `SIZE` bytes: the [`ByteView`]
/// accessors check bounds before calling [`Header::decode`].
///
/// [`ByteView`]: crate::view::ByteView
pub trait Header: Sized {
    /// Encoded size of the layout in bytes.
    const SIZE: usize;

    /// Decodes the layout from exactly `SIZE` bytes using `endian` for every
    /// multi-byte field.
    fn decode(bytes: &[u8], endian: Endian) -> Self;
}
