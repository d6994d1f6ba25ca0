//! Bounds-checked, non-owning window over a byte range.
//!
//! Every accessor reports absence (`None`, `false`, the `0xFF` sentinel or an
//! empty view) instead of panicking when the request reaches past the end of
//! the window. Offset arithmetic is checked, so hostile offsets decoded from
//! file headers cannot wrap around.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use memchr::memmem;

use crate::header::Header;

/// Value returned by [`ByteView::byte_at`] for out-of-range positions.
pub const OUT_OF_RANGE: u8 = 0xFF;

/// Byte order of multi-byte fields, fixed when a format's magic is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    pub fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Endian::Little => LittleEndian::read_u16(buf),
            Endian::Big => BigEndian::read_u16(buf),
        }
    }

    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(buf),
            Endian::Big => BigEndian::read_u32(buf),
        }
    }

    /// Short tag used in labels, e.g. "LSB".
    pub fn abbrev(self) -> &'static str {
        match self {
            Endian::Little => "LSB",
            Endian::Big => "MSB",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn empty() -> Self {
        Self { bytes: &[] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    /// Byte at `index`, or [`OUT_OF_RANGE`] past the end.
    #[inline]
    pub fn byte_at(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(OUT_OF_RANGE)
    }

    pub fn starts_with(&self, pattern: &[u8]) -> bool {
        self.bytes.starts_with(pattern)
    }

    /// Exact comparison of `pattern` against the bytes at `offset`.
    pub fn matches_at(&self, offset: usize, pattern: &[u8]) -> bool {
        match self.get(offset, pattern.len()) {
            Some(bytes) => bytes == pattern,
            None => false,
        }
    }

    /// Exactly `len` bytes starting at `offset`, if all of them are inside the view.
    pub fn get(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.bytes.get(offset..end)
    }

    /// Decodes `H` at `offset` only when `offset + H::SIZE < len()`.
    ///
    /// The comparison is strict: a header that ends exactly at the end of the
    /// view is refused. Use [`ByteView::read_header`] for an exact fit.
    pub fn overlay<H: Header>(&self, offset: usize, endian: Endian) -> Option<H> {
        let end = offset.checked_add(H::SIZE)?;
        if end >= self.len() {
            return None;
        }
        Some(H::decode(&self.bytes[offset..end], endian))
    }

    /// Decodes `H` at `offset` when the whole header fits, end inclusive.
    pub fn read_header<H: Header>(&self, offset: usize, endian: Endian) -> Option<H> {
        self.get(offset, H::SIZE)
            .map(|bytes| H::decode(bytes, endian))
    }

    pub fn read_u16(&self, offset: usize, endian: Endian) -> Option<u16> {
        self.get(offset, 2).map(|b| endian.read_u16(b))
    }

    pub fn read_u32(&self, offset: usize, endian: Endian) -> Option<u32> {
        self.get(offset, 4).map(|b| endian.read_u32(b))
    }

    /// Everything from `offset` to the end; empty if `offset >= len()`.
    pub fn sub_view(&self, offset: usize) -> ByteView<'a> {
        match self.bytes.get(offset..) {
            Some(rest) if offset < self.len() => ByteView::new(rest),
            _ => ByteView::empty(),
        }
    }

    /// At most `len` bytes from `offset`, clipped to the end of the view.
    pub fn sub_view_len(&self, offset: usize, len: usize) -> ByteView<'a> {
        let rest = self.sub_view(offset);
        ByteView::new(&rest.bytes[..len.min(rest.len())])
    }

    /// Absolute index of the first `needle` at or after `offset`.
    pub fn find(&self, offset: usize, needle: &[u8]) -> Option<usize> {
        let haystack = self.bytes.get(offset..)?;
        if haystack.len() < needle.len() {
            return None;
        }
        memmem::find(haystack, needle).map(|pos| offset + pos)
    }
}

impl<'a> From<&'a [u8]> for ByteView<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for ByteView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}
