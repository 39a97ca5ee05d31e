//! Stream directory entries of the CIL metadata root.
//!
//! Each entry records where one heap or table stream lives inside the metadata
//! block. This module exposes [`StreamHeader`] for parsing a single directory
//! entry; the directory itself is walked by [`crate::metadata::root::Root`].
//!
//! # Reference
//! - [ECMA-335 II.24.2.2](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{file::io::read_le_at, Result};

/// Names a stream may legally carry inside the metadata root.
const KNOWN_STREAMS: [&str; 5] = ["#Strings", "#US", "#Blob", "#GUID", "#~"];

/// A single entry of the stream directory that follows the metadata root.
///
/// `offset` and `size` locate the stream relative to the start of the metadata
/// block; `name` identifies which heap or table stream the entry describes.
///
/// ## Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.2
///
pub struct StreamHeader {
    /// Offset of the stream, relative to the metadata root
    pub offset: u32,
    /// Size of the stream in bytes
    pub size: u32,
    /// Stream name, one of `#Strings`, `#US`, `#Blob`, `#GUID` or `#~`
    pub name: String,
}

impl StreamHeader {
    /// Parse one directory entry from the beginning of `data`.
    ///
    /// The caller advances past the entry itself; the name field is
    /// `NUL`-terminated and padded to a four byte boundary, so the total
    /// entry size is `8 + ((name.len() + 1 + 3) & !3)`.
    ///
    /// # Arguments
    /// * 'data' - The byte slice to read the entry from
    ///
    /// # Errors
    /// Returns an error if the entry is truncated, the name is not terminated
    /// within 32 bytes, or the name is not one of the known stream names.
    pub fn from(data: &[u8]) -> Result<StreamHeader> {
        // 4 bytes offset + 4 bytes size + at least "#" and a terminator
        if data.len() < 10 {
            return Err(malformed_error!("Stream header entry is too small"));
        }

        let mut cursor = 0;
        let offset = read_le_at::<u32>(data, &mut cursor)?;
        let size = read_le_at::<u32>(data, &mut cursor)?;

        let name_bytes = &data[cursor..];
        let Some(name_len) = name_bytes.iter().take(32).position(|&b| b == 0) else {
            return Err(malformed_error!("Stream name is not terminated"));
        };

        let Ok(name) = std::str::from_utf8(&name_bytes[..name_len]) else {
            return Err(malformed_error!("Stream name is not valid UTF-8"));
        };

        if !KNOWN_STREAMS.contains(&name) {
            return Err(malformed_error!("Stream name is invalid - {}", name));
        }

        Ok(StreamHeader {
            offset,
            size,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted_tables_stream() {
        #[rustfmt::skip]
        let data = [
            0x6C, 0x00, 0x00, 0x00,
            0xA4, 0x45, 0x00, 0x00,
            0x23, 0x7E, 0x00, 0x00,
        ];

        let header = StreamHeader::from(&data).unwrap();
        assert_eq!(header.offset, 0x6C);
        assert_eq!(header.size, 0x45A4);
        assert_eq!(header.name, "#~");
    }

    #[test]
    fn crafted_strings_stream() {
        let mut data = vec![0x10, 0x02, 0x00, 0x00, 0x40, 0x01, 0x00, 0x00];
        data.extend_from_slice(b"#Strings\0\0\0\0");

        let header = StreamHeader::from(&data).unwrap();
        assert_eq!(header.offset, 0x210);
        assert_eq!(header.size, 0x140);
        assert_eq!(header.name, "#Strings");
    }

    #[test]
    fn rejects_unknown_name() {
        let mut data = vec![0x6C, 0x00, 0x00, 0x00, 0xA4, 0x45, 0x00, 0x00];
        data.extend_from_slice(b"#Bogus\0\0");

        assert!(StreamHeader::from(&data).is_err());
    }

    #[test]
    fn rejects_unterminated_name() {
        let mut data = vec![0x6C, 0x00, 0x00, 0x00, 0xA4, 0x45, 0x00, 0x00];
        data.extend_from_slice(&[b'A'; 40]);

        assert!(StreamHeader::from(&data).is_err());
    }

    #[test]
    fn rejects_short_input() {
        assert!(StreamHeader::from(&[0x00; 8]).is_err());
    }
}
