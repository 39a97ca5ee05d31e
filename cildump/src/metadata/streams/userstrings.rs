//! User string heap (`#US`) access.
//!
//! The `#US` heap stores the UTF-16 string literals loaded by `ldstr`. Each
//! entry starts with a compressed byte count covering the UTF-16 code units
//! plus one trailing flag byte. [`UserStrings`] resolves the index carried in
//! an `ldstr` token into the decoded literal.
//!
//! # Reference
//! - [ECMA-335 II.24.2.4](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use widestring::U16String;

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// View over the `#US` heap.
///
/// Indexes come from the low 24 bits of `ldstr` operand tokens. Entries are
/// length-prefixed rather than terminated, so lookups decode the prefix
/// before reading the code units.
///
/// # Examples
///
/// ```rust,no_run
/// use cildump::UserStrings;
/// let data = &[0u8, 0x05, b'H', 0, b'i', 0, 0u8];
/// let us = UserStrings::from(data).unwrap();
/// assert_eq!(us.get(1).unwrap().to_string_lossy(), "Hi");
/// ```
///
/// ## Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.4
///
pub struct UserStrings<'a> {
    data: &'a [u8],
}

impl<'a> UserStrings<'a> {
    /// Create a `UserStrings` view over a heap slice.
    ///
    /// # Arguments
    /// * 'data' - The raw bytes of the `#US` stream
    ///
    /// # Errors
    /// Returns an error if the heap is empty or does not begin with the
    /// mandatory `NUL` byte.
    pub fn from(data: &'a [u8]) -> Result<UserStrings<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("#US heap is missing its leading NUL"));
        }

        Ok(UserStrings { data })
    }

    /// Resolve a heap index into the literal stored there.
    ///
    /// The compressed prefix counts bytes, not characters; when it is odd
    /// the final byte is the ECMA-335 flag byte and is not part of the
    /// string.
    ///
    /// ## Arguments
    /// * 'index' - Byte offset into the heap, from the low bits of an
    ///   `ldstr` token
    ///
    /// # Errors
    /// Returns an error if the index lies outside the heap or the entry is
    /// truncated.
    pub fn get(&self, index: usize) -> Result<U16String> {
        let Some(tail) = self.data.get(index..) else {
            return Err(OutOfBounds);
        };

        let mut parser = Parser::new(tail);
        let byte_count = parser.read_compressed_uint()? as usize;

        let start = parser.pos();
        let Some(end) = start.checked_add(byte_count) else {
            return Err(OutOfBounds);
        };
        if end > tail.len() {
            return Err(OutOfBounds);
        }

        // Drop the trailing flag byte, keep whole UTF-16 code units
        let units: Vec<u16> = tail[start..start + (byte_count & !1)]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(U16String::from_vec(units))
    }
}
