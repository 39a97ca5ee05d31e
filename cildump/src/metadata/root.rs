//! CIL metadata root parsing.
//!
//! The metadata root sits at the location named by the COR20 header and
//! carries the runtime version string plus the stream directory. [`Root`]
//! parses the fixed part and every [`StreamHeader`] entry, validating that
//! each stream lies inside the metadata block.
//!
//! # Reference
//! - [ECMA-335 II.24.2.1](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{
    file::io::read_le_at,
    metadata::streams::StreamHeader,
    Result,
};

/// Signature of the metadata root, `BSJB` in little-endian byte order.
pub const CIL_HEADER_MAGIC: u32 = 0x424A_5342;

/// The parsed metadata root of a .NET image.
///
/// `version` holds the runtime version string with the `NUL` padding
/// stripped; `length` keeps the padded on-disk size of that field because
/// everything after it is located relative to the padded value.
///
/// ## Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.1
///
pub struct Root {
    /// Major version of the metadata format
    pub major_version: u16,
    /// Minor version of the metadata format
    pub minor_version: u16,
    /// On-disk byte length of the version field, padded to four bytes
    pub length: u32,
    /// Runtime version string, e.g. `v4.0.30319`
    pub version: String,
    /// Reserved flags field
    pub flags: u16,
    /// Number of streams in the directory
    pub stream_number: u16,
    /// The parsed stream directory
    pub stream_headers: Vec<StreamHeader>,
}

impl Root {
    /// Parse the metadata root from the full metadata block.
    ///
    /// `data` must span the whole block so that stream bounds can be
    /// checked against it.
    ///
    /// # Arguments
    /// * 'data' - The metadata block, starting at the `BSJB` signature
    ///
    /// # Errors
    /// Returns an error if the signature does not match, the version field
    /// or stream directory is truncated, or a stream lies outside `data`.
    pub fn read(data: &[u8]) -> Result<Root> {
        let mut cursor = 0;

        let signature = read_le_at::<u32>(data, &mut cursor)?;
        if signature != CIL_HEADER_MAGIC {
            return Err(malformed_error!(
                "Invalid metadata root signature - {:#010x}",
                signature
            ));
        }

        let major_version = read_le_at::<u16>(data, &mut cursor)?;
        let minor_version = read_le_at::<u16>(data, &mut cursor)?;
        let _reserved = read_le_at::<u32>(data, &mut cursor)?;
        let length = read_le_at::<u32>(data, &mut cursor)?;

        let Some(version_end) = cursor.checked_add(length as usize) else {
            return Err(malformed_error!("Version field length overflows"));
        };
        if version_end > data.len() {
            return Err(malformed_error!(
                "Version field of {} bytes exceeds metadata block",
                length
            ));
        }

        let version_bytes = &data[cursor..version_end];
        let version_len = version_bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(version_bytes.len());
        let version = String::from_utf8_lossy(&version_bytes[..version_len]).to_string();

        // Fields after the version string are located from the padded length
        cursor = version_end;
        let flags = read_le_at::<u16>(data, &mut cursor)?;
        let stream_number = read_le_at::<u16>(data, &mut cursor)?;

        if stream_number == 0 {
            return Err(malformed_error!("Stream directory is empty"));
        }
        if stream_number > 5 {
            return Err(malformed_error!(
                "Stream directory claims {} entries, only 5 stream names exist",
                stream_number
            ));
        }
        if (stream_number as usize) * 10 > data.len() - cursor {
            return Err(malformed_error!("Stream directory is truncated"));
        }

        let mut stream_headers = Vec::with_capacity(stream_number as usize);
        for _ in 0..stream_number {
            let header = StreamHeader::from(&data[cursor..])?;

            let stream_end = (header.offset as usize)
                .checked_add(header.size as usize)
                .filter(|&end| end <= data.len());
            if stream_end.is_none() {
                return Err(malformed_error!(
                    "Stream '{}' extends beyond the metadata block",
                    header.name
                ));
            }

            // Name is NUL terminated and padded to a four byte boundary
            cursor += 8 + ((header.name.len() + 1 + 3) & !3);
            stream_headers.push(header);
        }

        Ok(Root {
            major_version,
            minor_version,
            length,
            version,
            flags,
            stream_number,
            stream_headers,
        })
    }
}
