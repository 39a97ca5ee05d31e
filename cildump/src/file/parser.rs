//! Sequential byte cursor for metadata structures.
//!
//! [`crate::file::parser::Parser`] wraps a byte slice with a position and provides
//! the reads metadata parsing needs: little-endian primitives, raw byte runs,
//! alignment, and the ECMA-335 II.23.2 compressed integer and token encodings used
//! by signatures and the `#US` heap.

use crate::{
    file::io::{read_le_at, CilIO},
    metadata::token::Token,
    Error::OutOfBounds,
    Result,
};

/// A sequential reader over a byte slice.
///
/// Reads advance an internal position; every read is bounds-checked and malformed
/// encodings surface as [`crate::Error::Malformed`] rather than panics.
///
/// # Examples
///
/// ```rust
/// use cildump::Parser;
///
/// let mut parser = Parser::new(&[0x03, 0x80, 0x80]);
/// assert_eq!(parser.read_compressed_uint()?, 0x03);
/// assert_eq!(parser.read_compressed_uint()?, 0x80);
/// # Ok::<(), cildump::Error>(())
/// ```
pub struct Parser<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser over `data`, positioned at the start.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Parser<'a> {
        Parser { data, position: 0 }
    }

    /// Returns the total length of the underlying data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the underlying data is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the current position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Returns `true` if at least one more byte can be read.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Returns the number of bytes left from the current position.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Moves the cursor to an absolute position.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if `position` is past the end.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(OutOfBounds);
        }

        self.position = position;
        Ok(())
    }

    /// Advances the cursor by `count` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `count` bytes remain.
    pub fn advance_by(&mut self, count: usize) -> Result<()> {
        let Some(target) = self.position.checked_add(count) else {
            return Err(OutOfBounds);
        };

        self.seek(target)
    }

    /// Advances the cursor to the next multiple of `alignment`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the padding passes the end.
    pub fn align(&mut self, alignment: usize) -> Result<()> {
        let padding = (alignment - (self.position % alignment)) % alignment;
        self.advance_by(padding)
    }

    /// Returns the byte at the current position without advancing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] at the end of the data.
    pub fn peek_byte(&self) -> Result<u8> {
        match self.data.get(self.position) {
            Some(byte) => Ok(*byte),
            None => Err(OutOfBounds),
        }
    }

    /// Reads a little-endian primitive and advances.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the read would pass the end.
    pub fn read_le<T: CilIO>(&mut self) -> Result<T> {
        read_le_at(self.data, &mut self.position)
    }

    /// Reads `length` raw bytes and advances.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `length` bytes remain.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let Some(end) = self.position.checked_add(length) else {
            return Err(OutOfBounds);
        };

        if end > self.data.len() {
            return Err(OutOfBounds);
        }

        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Reads an ECMA-335 II.23.2 compressed unsigned integer.
    ///
    /// One, two or four bytes depending on the leading bits of the first byte;
    /// values up to `0x1FFF_FFFF`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] for the reserved `111x_xxxx` lead byte
    /// and [`crate::Error::OutOfBounds`] if the encoding is truncated.
    pub fn read_compressed_uint(&mut self) -> Result<u32> {
        let first = self.read_le::<u8>()?;

        if first & 0x80 == 0 {
            return Ok(u32::from(first));
        }

        if first & 0xC0 == 0x80 {
            let second = self.read_le::<u8>()?;
            return Ok((u32::from(first & 0x3F) << 8) | u32::from(second));
        }

        if first & 0xE0 == 0xC0 {
            let second = self.read_le::<u8>()?;
            let third = self.read_le::<u8>()?;
            let fourth = self.read_le::<u8>()?;
            return Ok((u32::from(first & 0x1F) << 24)
                | (u32::from(second) << 16)
                | (u32::from(third) << 8)
                | u32::from(fourth));
        }

        Err(malformed_error!(
            "Invalid compressed integer lead byte - 0x{:02X}",
            first
        ))
    }

    /// Reads an ECMA-335 II.23.2 compressed signed integer.
    ///
    /// The value is stored rotated left by one bit within its encoded width, so
    /// the sign bit ends up in the least significant position.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] for invalid encodings and
    /// [`crate::Error::OutOfBounds`] if the encoding is truncated.
    pub fn read_compressed_int(&mut self) -> Result<i32> {
        let first = self.peek_byte()?;
        let value_bits: u32 = if first & 0x80 == 0 {
            7
        } else if first & 0xC0 == 0x80 {
            14
        } else {
            29
        };

        let encoded = self.read_compressed_uint()?;
        let magnitude = (encoded >> 1) as i32;

        if encoded & 1 == 0 {
            Ok(magnitude)
        } else {
            Ok(magnitude - (1 << (value_bits - 1)))
        }
    }

    /// Reads a `TypeDefOrRefOrSpecEncoded` compressed token (ECMA-335 II.23.2.8).
    ///
    /// The two low bits select the table (`TypeDef`, `TypeRef`, `TypeSpec`); the
    /// remainder is the row index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] for the reserved table tag.
    pub fn read_compressed_token(&mut self) -> Result<Token> {
        let value = self.read_compressed_uint()?;

        let base: u32 = match value & 0x3 {
            0 => 0x0200_0000, // TypeDef
            1 => 0x0100_0000, // TypeRef
            2 => 0x1B00_0000, // TypeSpec
            _ => {
                return Err(malformed_error!(
                    "Invalid compressed token table tag - {}",
                    value & 0x3
                ))
            }
        };

        Ok(Token::new(base | (value >> 2)))
    }
}
