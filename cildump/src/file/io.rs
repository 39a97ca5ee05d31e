//! Little-endian primitive reads for metadata parsing.
//!
//! All multi-byte values in CLI metadata are little-endian (ECMA-335 II.24). This
//! module provides the [`crate::file::io::CilIO`] conversion trait and bounds-checked
//! free functions used throughout the parsing layers. Dynamic-width reads
//! ([`crate::file::io::read_le_at_dyn`]) cover the 2-vs-4-byte heap and table
//! indexes whose width depends on row counts.

use crate::{Error::OutOfBounds, Result};

/// Conversion from raw little-endian bytes for primitive types.
///
/// Implemented for the integer and float primitives that occur in metadata
/// structures; the associated `Bytes` type is the fixed-size array matching the
/// type's width.
pub trait CilIO: Sized {
    /// The byte-array type this primitive converts from (e.g. `[u8; 4]` for `u32`).
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Converts a little-endian byte array to the native value.
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_cilio {
    ($($ty:ty),*) => {
        $(
            impl CilIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_cilio!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Reads a value of type `T` from the start of `data`.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than `T`.
pub fn read_le<T: CilIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0;
    read_le_at(data, &mut offset)
}

/// Reads a value of type `T` from `data` at `offset`, advancing the offset.
///
/// # Arguments
///
/// * `data` - The buffer to read from.
/// * `offset` - In/out cursor; advanced by `size_of::<T>()` on success.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if the read would pass the end of `data`.
pub fn read_le_at<T: CilIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };

    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset += type_len;
    Ok(T::from_le_bytes(read))
}

/// Reads a 2- or 4-byte unsigned index from `data` at `offset`, advancing the offset.
///
/// Metadata heap and table indexes are 2 bytes wide unless the referenced heap or
/// table is large, in which case they widen to 4 bytes; `is_large` selects the width.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if the read would pass the end of `data`.
pub fn read_le_at_dyn(data: &[u8], offset: &mut usize, is_large: bool) -> Result<u32> {
    if is_large {
        read_le_at::<u32>(data, offset)
    } else {
        Ok(u32::from(read_le_at::<u16>(data, offset)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn read_le_u16() {
        let value: u16 = read_le(&TEST_BUFFER).unwrap();
        assert_eq!(value, 0x0201);
    }

    #[test]
    fn read_le_u32() {
        let value: u32 = read_le(&TEST_BUFFER).unwrap();
        assert_eq!(value, 0x0403_0201);
    }

    #[test]
    fn read_le_at_advances() {
        let mut offset = 2;
        let value: u16 = read_le_at(&TEST_BUFFER, &mut offset).unwrap();
        assert_eq!(value, 0x0403);
        assert_eq!(offset, 4);

        let value: u32 = read_le_at(&TEST_BUFFER, &mut offset).unwrap();
        assert_eq!(value, 0x0807_0605);
        assert_eq!(offset, 8);
    }

    #[test]
    fn read_le_at_dyn_widths() {
        let mut offset = 0;
        assert_eq!(
            read_le_at_dyn(&TEST_BUFFER, &mut offset, false).unwrap(),
            0x0201
        );
        assert_eq!(offset, 2);

        let mut offset = 0;
        assert_eq!(
            read_le_at_dyn(&TEST_BUFFER, &mut offset, true).unwrap(),
            0x0403_0201
        );
        assert_eq!(offset, 4);
    }

    #[test]
    fn errors() {
        let mut offset = 6;
        let result = read_le_at::<u32>(&TEST_BUFFER, &mut offset);
        assert!(matches!(result, Err(OutOfBounds)));
        assert_eq!(offset, 6);

        let result = read_le::<u64>(&TEST_BUFFER[1..]);
        assert!(matches!(result, Err(OutOfBounds)));

        let mut offset = usize::MAX;
        let result = read_le_at::<u8>(&TEST_BUFFER, &mut offset);
        assert!(matches!(result, Err(OutOfBounds)));
    }
}
