//! Parsing of CIL method bodies.
//!
//! A method body starts with a tiny or fat header describing the code size,
//! the operand stack depth and the local variable signature, optionally
//! followed by extra data sections holding exception handling clauses. Both
//! header formats of ECMA-335 are supported.
//!
//! # Examples
//!
//! ```rust
//! use cildump::metadata::method::MethodBody;
//!
//! // Tiny header byte 0x0A: format bits 0b10, code size 2.
//! let body = MethodBody::from(&[0x0A, 0x00, 0x2A])?;
//! assert!(!body.is_fat);
//! assert_eq!(body.size_code, 2);
//! assert_eq!(body.size(), 3);
//! # Ok::<(), cildump::Error>(())
//! ```
//!
//! # References
//! - ECMA-335 6th Edition, Partition II, Section 25.4 - Method Header Format

use crate::{
    file::io::{read_le, read_le_at},
    metadata::method::{ExceptionHandler, ExceptionHandlerFlags, MethodBodyFlags, SectionFlags},
    Error::OutOfBounds,
    Result,
};

/// Decoded header and exception regions of one method compiled to CIL.
///
/// The body bytes themselves are not copied; the IL code of the method is
/// the `size_code` bytes that follow the first `size_header` bytes of the
/// slice this was parsed from.
pub struct MethodBody {
    /// Length of the IL code in bytes, not counting the header
    pub size_code: usize,
    /// Size of the method header in bytes
    pub size_header: usize,
    /// Token of the `StandAloneSig` row describing the local variables. 0 == no local variables
    pub local_var_sig_token: u32,
    /// Maximum number of items on the operand stack
    pub max_stack: usize,
    /// Header format of this body
    pub is_fat: bool,
    /// Local variables are zero-initialized before the body runs
    pub is_init_local: bool,
    /// This body carries exception handling data
    pub is_exception_data: bool,
    /// The exception handling clauses of this body
    pub exception_handlers: Vec<ExceptionHandler>,
}

impl MethodBody {
    /// Parse a method body from the bytes at its RVA.
    ///
    /// # Arguments
    /// * `data` - The bytes of the body, starting at the header
    ///
    /// # Errors
    /// Returns an error if the data is empty, ends before the declared code
    /// size, or starts with neither header format.
    pub fn from(data: &[u8]) -> Result<MethodBody> {
        if data.is_empty() {
            return Err(malformed_error!("Provided data for body parsing is empty"));
        }

        let first_byte = read_le::<u8>(data)?;
        match MethodBodyFlags::from_bits_truncate(u16::from(first_byte & 0b_0000_0011_u8)) {
            MethodBodyFlags::TINY_FORMAT => {
                let size_code = (first_byte >> 2) as usize;
                if size_code + 1 > data.len() {
                    return Err(OutOfBounds);
                }

                Ok(MethodBody {
                    size_code,
                    size_header: 1,
                    local_var_sig_token: 0,
                    max_stack: 0,
                    is_fat: false,
                    is_init_local: false,
                    is_exception_data: false,
                    exception_handlers: Vec::new(),
                })
            }
            MethodBodyFlags::FAT_FORMAT => {
                if data.len() < 12 {
                    return Err(OutOfBounds);
                }

                let first_duo = read_le::<u16>(data)?;

                let size_header = (first_duo >> 12) * 4;
                let size_code = read_le::<u32>(&data[4..])?;
                if data.len() < (size_code as usize + size_header as usize) {
                    return Err(OutOfBounds);
                }

                let local_var_sig_token = read_le::<u32>(&data[8..])?;
                let flags_header =
                    MethodBodyFlags::from_bits_truncate(first_duo & 0b_0000_1111_1111_1111_u16);
                let max_stack = read_le::<u16>(&data[2..])? as usize;

                let is_init_local = flags_header.contains(MethodBodyFlags::INIT_LOCALS);

                // Extra data sections (II.25.4.5) only ever hold exception
                // handling clauses; they start at the next 4-byte boundary
                // after the code.
                let mut exception_handlers = Vec::new();
                if flags_header.contains(MethodBodyFlags::MORE_SECTS) {
                    let mut cursor = size_header as usize + size_code as usize;
                    cursor = (cursor + 3) & !3;

                    while data.len() > (cursor + 4) {
                        let section_flags =
                            SectionFlags::from_bits_truncate(read_le::<u8>(&data[cursor..])?);
                        if !section_flags.contains(SectionFlags::EHTABLE) {
                            break;
                        }

                        if section_flags.contains(SectionFlags::FAT_FORMAT) {
                            let section_size = read_le::<u32>(&data[cursor + 1..])? & 0x00FF_FFFF;
                            if section_size < 4 || data.len() < (cursor + section_size as usize) {
                                break;
                            }

                            cursor += 4;

                            for _ in 0..(section_size - 4) / 24 {
                                exception_handlers.push(ExceptionHandler {
                                    // The clause flags column is 4 bytes wide but only
                                    // the low 16 bits are defined
                                    #[allow(clippy::cast_possible_truncation)]
                                    flags: ExceptionHandlerFlags::from_bits_truncate(read_le_at::<
                                        u32,
                                    >(
                                        data,
                                        &mut cursor,
                                    )?
                                        as u16),
                                    try_offset: read_le_at::<u32>(data, &mut cursor)?,
                                    try_length: read_le_at::<u32>(data, &mut cursor)?,
                                    handler_offset: read_le_at::<u32>(data, &mut cursor)?,
                                    handler_length: read_le_at::<u32>(data, &mut cursor)?,
                                    class_token_or_filter: read_le_at::<u32>(data, &mut cursor)?,
                                });
                            }
                        } else {
                            let section_size = u32::from(read_le::<u8>(&data[cursor + 1..])?);
                            if section_size < 4 || data.len() < (cursor + section_size as usize) {
                                break;
                            }

                            cursor += 4;
                            for _ in 0..(section_size - 4) / 12 {
                                exception_handlers.push(ExceptionHandler {
                                    flags: ExceptionHandlerFlags::from_bits_truncate(read_le_at::<
                                        u16,
                                    >(
                                        data,
                                        &mut cursor,
                                    )?),
                                    try_offset: u32::from(read_le_at::<u16>(data, &mut cursor)?),
                                    try_length: u32::from(read_le_at::<u8>(data, &mut cursor)?),
                                    handler_offset: u32::from(read_le_at::<u16>(
                                        data,
                                        &mut cursor,
                                    )?),
                                    handler_length: u32::from(read_le_at::<u8>(data, &mut cursor)?),
                                    class_token_or_filter: read_le_at::<u32>(data, &mut cursor)?,
                                });
                            }
                        }

                        if !section_flags.contains(SectionFlags::MORE_SECTS) {
                            break;
                        }
                    }
                }

                Ok(MethodBody {
                    size_code: size_code as usize,
                    size_header: size_header as usize,
                    local_var_sig_token,
                    max_stack,
                    is_fat: true,
                    is_init_local,
                    is_exception_data: !exception_handlers.is_empty(),
                    exception_handlers,
                })
            }
            _ => Err(malformed_error!(
                "MethodHeader is neither FAT nor TINY - {}",
                first_byte
            )),
        }
    }

    /// Get the full size of this method, header included
    #[must_use]
    pub fn size(&self) -> usize {
        self.size_code + self.size_header
    }
}
