//! GUID heap (`#GUID`) access.
//!
//! The `#GUID` heap is a flat array of 128-bit GUIDs; the module table's
//! `Mvid` column indexes into it. [`Guid`] resolves those one-based indexes.
//!
//! # Reference
//! - [ECMA-335 II.24.2.5](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{Error::OutOfBounds, Result};

/// View over the `#GUID` heap.
///
/// Unlike the other heaps, indexes here are one-based slot numbers rather
/// than byte offsets; slot `n` occupies bytes `(n - 1) * 16 .. n * 16`.
///
/// ## Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.5
///
pub struct Guid<'a> {
    data: &'a [u8],
}

impl<'a> Guid<'a> {
    /// Create a `Guid` view over a heap slice.
    ///
    /// # Arguments
    /// * 'data' - The raw bytes of the `#GUID` stream
    ///
    /// # Errors
    /// Returns an error if the heap cannot hold even a single GUID.
    pub fn from(data: &'a [u8]) -> Result<Guid<'a>> {
        if data.len() < 16 {
            return Err(malformed_error!("#GUID heap is smaller than one GUID"));
        }

        Ok(Guid { data })
    }

    /// Return the GUID in the given one-based slot.
    ///
    /// ## Arguments
    /// * 'index' - One-based slot number, as stored in a table column
    ///
    /// # Errors
    /// Returns an error if the index is zero or the slot lies outside the
    /// heap.
    pub fn get(&self, index: usize) -> Result<uguid::Guid> {
        if index == 0 {
            return Err(OutOfBounds);
        }

        let start = (index - 1).checked_mul(16).ok_or(OutOfBounds)?;
        let end = start.checked_add(16).ok_or(OutOfBounds)?;
        let slot = self.data.get(start..end).ok_or(OutOfBounds)?;

        let mut buffer = [0u8; 16];
        buffer.copy_from_slice(slot);

        Ok(uguid::Guid::from_bytes(buffer))
    }
}
