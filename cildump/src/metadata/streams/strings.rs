//! String heap (`#Strings`) access.
//!
//! The `#Strings` heap stores the UTF-8 identifiers referenced by the
//! metadata tables: type names, member names, namespaces, module names.
//! [`Strings`] wraps the raw heap bytes and resolves table indexes into
//! string slices.
//!
//! # Reference
//! - [ECMA-335 II.24.2.3](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use std::ffi::CStr;

use crate::{Error::OutOfBounds, Result};

/// View over the `#Strings` heap.
///
/// Indexes come from the name and namespace columns of the metadata tables
/// and address `NUL`-terminated UTF-8 sequences. Index `0` is the mandatory
/// empty string at the start of the heap.
///
/// # Examples
///
/// ```rust,no_run
/// use cildump::Strings;
/// let data = &[0u8, b'M', b'a', b'i', b'n', 0u8];
/// let strings = Strings::from(data).unwrap();
/// assert_eq!(strings.get(1).unwrap(), "Main");
/// ```
///
/// ## Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.3
///
pub struct Strings<'a> {
    data: &'a [u8],
}

impl<'a> Strings<'a> {
    /// Create a `Strings` view over a heap slice.
    ///
    /// # Arguments
    /// * 'data' - The raw bytes of the `#Strings` stream
    ///
    /// # Errors
    /// Returns an error if the heap is empty or does not begin with the
    /// mandatory `NUL` byte.
    pub fn from(data: &'a [u8]) -> Result<Strings<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("#Strings heap is missing its leading NUL"));
        }

        Ok(Strings { data })
    }

    /// Resolve a heap index into the string stored there.
    ///
    /// ## Arguments
    /// * 'index' - Byte offset into the heap, as stored in a table column
    ///
    /// # Errors
    /// Returns an error if the index lies outside the heap, the sequence is
    /// not terminated, or the bytes are not valid UTF-8.
    pub fn get(&self, index: usize) -> Result<&'a str> {
        if index >= self.data.len() {
            return Err(OutOfBounds);
        }

        match CStr::from_bytes_until_nul(&self.data[index..]) {
            Ok(raw) => raw
                .to_str()
                .map_err(|_| malformed_error!("Invalid UTF-8 string at heap index {}", index)),
            Err(_) => Err(malformed_error!(
                "Unterminated string at heap index {}",
                index
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        let mut data = vec![0u8];
        let offsets: Vec<usize> = ["<Module>", "Program", "Main", "System.Object", "mscorlib"]
            .iter()
            .map(|name| {
                let offset = data.len();
                data.extend_from_slice(name.as_bytes());
                data.push(0);
                offset
            })
            .collect();

        let strings = Strings::from(&data).unwrap();

        assert_eq!(strings.get(0).unwrap(), "");
        assert_eq!(strings.get(offsets[0]).unwrap(), "<Module>");
        assert_eq!(strings.get(offsets[1]).unwrap(), "Program");
        assert_eq!(strings.get(offsets[2]).unwrap(), "Main");
        assert_eq!(strings.get(offsets[3]).unwrap(), "System.Object");
        assert_eq!(strings.get(offsets[4]).unwrap(), "mscorlib");

        // An index into the middle of an entry yields its tail
        assert_eq!(strings.get(offsets[3] + 7).unwrap(), "Object");
    }

    #[test]
    fn invalid() {
        assert!(Strings::from(&[]).is_err());
        assert!(Strings::from(&[b'A', 0]).is_err());

        let data = [0u8, b'A', b'B'];
        let strings = Strings::from(&data).unwrap();
        assert!(matches!(strings.get(10), Err(OutOfBounds)));
        // "AB" runs to the end of the heap without a terminator
        assert!(strings.get(1).is_err());
    }
}
