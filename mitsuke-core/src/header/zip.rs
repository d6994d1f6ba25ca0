use crate::header::Header;
use crate::view::Endian;

pub const LOCAL_FILE_SIGNATURE: [u8; 4] = *b"PK\x03\x04";
pub const END_OF_CENTRAL_DIR_SIGNATURE: [u8; 4] = *b"PK\x05\x06";
pub const SPANNED_SIGNATURE: [u8; 4] = *b"PK\x07\x08";

/// ZIP local file header (APPNOTE 4.3.7), little-endian on disk.
///
/// The file name follows the fixed part immediately, at offset 30 (0x1E).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalFileHeader {
    pub signature: u32,
    pub version_needed: u16,
    pub flags: u16,
    pub compression: u16,
    pub mod_time: u16,
    pub mod_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub name_len: u16,
    pub extra_len: u16,
}

impl LocalFileHeader {
    /// Offset of the file name relative to the start of the header.
    pub const NAME_OFFSET: usize = 30;

    /// Bytes from the start of this header to the first byte after its data.
    pub fn entry_len(&self) -> Option<usize> {
        Self::NAME_OFFSET
            .checked_add(usize::from(self.name_len))?
            .checked_add(usize::from(self.extra_len))?
            .checked_add(usize::try_from(self.compressed_size).ok()?)
    }
}

impl Header for LocalFileHeader {
    const SIZE: usize = Self::NAME_OFFSET;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        LocalFileHeader {
            signature: endian.read_u32(&bytes[0..4]),
            version_needed: endian.read_u16(&bytes[4..6]),
            flags: endian.read_u16(&bytes[6..8]),
            compression: endian.read_u16(&bytes[8..10]),
            mod_time: endian.read_u16(&bytes[10..12]),
            mod_date: endian.read_u16(&bytes[12..14]),
            crc32: endian.read_u32(&bytes[14..18]),
            compressed_size: endian.read_u32(&bytes[18..22]),
            uncompressed_size: endian.read_u32(&bytes[22..26]),
            name_len: endian.read_u16(&bytes[26..28]),
            extra_len: endian.read_u16(&bytes[28..30]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ByteView;

    #[test]
    fn entry_len_spans_name_extra_and_data() {
        let mut bytes = vec![0u8; 40];
        bytes[..4].copy_from_slice(&LOCAL_FILE_SIGNATURE);
        bytes[18..22].copy_from_slice(&100u32.to_le_bytes());
        bytes[26..28].copy_from_slice(&8u16.to_le_bytes());
        bytes[28..30].copy_from_slice(&4u16.to_le_bytes());

        let hdr = ByteView::new(&bytes)
            .overlay::<LocalFileHeader>(0, Endian::Little)
            .unwrap();
        assert_eq!(hdr.signature, u32::from_le_bytes(LOCAL_FILE_SIGNATURE));
        assert_eq!(hdr.compressed_size, 100);
        assert_eq!(hdr.entry_len(), Some(30 + 8 + 4 + 100));
    }
}
