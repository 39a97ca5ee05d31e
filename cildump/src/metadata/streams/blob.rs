//! Blob heap (`#Blob`) access.
//!
//! The `#Blob` heap stores length-prefixed binary entries: signatures,
//! constant values, public keys. [`Blob`] resolves the indexes carried in
//! table columns into the raw bytes of one entry.
//!
//! # Reference
//! - [ECMA-335 II.24.2.4](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// View over the `#Blob` heap.
///
/// Each entry begins with a compressed byte count followed by that many
/// bytes of payload. Index `0` addresses the mandatory empty entry.
///
/// # Examples
///
/// ```rust,no_run
/// use cildump::Blob;
/// let data = &[0u8, 0x03, 0x41, 0x42, 0x43];
/// let blob = Blob::from(data).unwrap();
/// assert_eq!(blob.get(1).unwrap(), &[0x41, 0x42, 0x43]);
/// ```
///
/// ## Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.4
///
pub struct Blob<'a> {
    data: &'a [u8],
}

impl<'a> Blob<'a> {
    /// Create a `Blob` view over a heap slice.
    ///
    /// # Arguments
    /// * 'data' - The raw bytes of the `#Blob` stream
    ///
    /// # Errors
    /// Returns an error if the heap is empty or does not begin with the
    /// mandatory `NUL` byte.
    pub fn from(data: &'a [u8]) -> Result<Blob<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("#Blob heap is missing its leading NUL"));
        }

        Ok(Blob { data })
    }

    /// Resolve a heap index into the entry stored there.
    ///
    /// ## Arguments
    /// * 'index' - Byte offset into the heap, as stored in a table column
    ///
    /// # Errors
    /// Returns an error if the index lies outside the heap, the length
    /// prefix is malformed, or the entry is truncated.
    pub fn get(&self, index: usize) -> Result<&'a [u8]> {
        let Some(tail) = self.data.get(index..) else {
            return Err(OutOfBounds);
        };

        let mut parser = Parser::new(tail);
        let length = parser.read_compressed_uint()? as usize;

        let start = parser.pos();
        let end = start.checked_add(length).ok_or(OutOfBounds)?;

        tail.get(start..end).ok_or(OutOfBounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        let mut data = vec![0u8];
        // Single byte prefix
        data.push(0x03);
        data.extend_from_slice(&[0x0A; 3]);
        // Two byte prefix, 0x81 0x00 encodes 256
        let two_byte_at = data.len();
        data.extend_from_slice(&[0x81, 0x00]);
        data.extend_from_slice(&[0xAB; 256]);
        // Four byte prefix, 0xC0 0x00 0x40 0x00 encodes 16384
        let four_byte_at = data.len();
        data.extend_from_slice(&[0xC0, 0x00, 0x40, 0x00]);
        data.extend_from_slice(&[0xBA; 16384]);

        let blob = Blob::from(&data).unwrap();

        assert_eq!(blob.get(0).unwrap(), &[] as &[u8]);
        assert_eq!(blob.get(1).unwrap(), &[0x0A; 3]);
        assert_eq!(blob.get(two_byte_at).unwrap().len(), 256);
        assert_eq!(blob.get(four_byte_at).unwrap(), &[0xBA; 16384][..]);
    }

    #[test]
    fn invalid() {
        assert!(Blob::from(&[]).is_err());
        assert!(Blob::from(&[0x01, 0x00]).is_err());

        let data = [0x00, 0x05, 0x41, 0x42];
        let blob = Blob::from(&data).unwrap();
        // Entry claims five bytes but the heap ends after two
        assert!(blob.get(1).is_err());
        // 0b111xxxxx is not a valid length prefix
        let data = [0x00, 0xFF, 0x41];
        let blob = Blob::from(&data).unwrap();
        assert!(blob.get(1).is_err());
        assert!(blob.get(64).is_err());
    }
}
