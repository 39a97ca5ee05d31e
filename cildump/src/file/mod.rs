//! PE file abstraction for .NET binaries.
//!
//! This module provides the container layer everything else builds on: loading a PE
//! file from disk or memory, verifying that it carries a CLR runtime header, and
//! translating between relative virtual addresses and file offsets.
//!
//! # Key Components
//!
//! - [`crate::file::File`] - Loaded PE file with .NET-specific accessors
//! - [`crate::file::Backend`] - Trait over the data source (memory-mapped file or buffer)
//! - [`crate::file::parser::Parser`] - Byte cursor for metadata structures
//! - [`crate::file::io`] - Little-endian primitive reads
//!
//! # Examples
//!
//! ```rust,no_run
//! use cildump::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("MyApp.dll"))?;
//!
//! // Locate the CLR runtime header and read its first bytes.
//! let (clr_rva, _clr_size) = file.clr();
//! let clr_offset = file.rva_to_offset(clr_rva)?;
//! let clr_data = file.data_slice(clr_offset, 72)?;
//! println!("cb = {}", u32::from_le_bytes([clr_data[0], clr_data[1], clr_data[2], clr_data[3]]));
//! # Ok::<(), cildump::Error>(())
//! ```
//!
//! # References
//!
//! * ECMA-335 II.25 (file format extensions to PE)
//! * The Microsoft PE/COFF documentation for the container itself

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    Error::{Empty, GoblinErr, NotSupported},
    Result,
};
use goblin::pe::{header::Header, optional_header::OptionalHeader, section_table::SectionTable, PE};
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;

/// Trait over the bytes backing a [`File`].
///
/// Implemented by the memory-mapped and the owned-buffer backend. Both are
/// immutable once constructed, which is what makes `File` shareable across
/// threads.
pub trait Backend: Send + Sync {
    /// Borrows `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the range leaves the buffer.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// The whole buffer.
    fn data(&self) -> &[u8];

    /// Buffer length in bytes.
    fn len(&self) -> usize;
}

#[self_referencing]
/// A loaded .NET PE image.
///
/// Wraps the parsed PE and provides access to headers, sections and raw data, plus
/// RVA-to-offset translation. Loading validates that the file is a PE with a CLR
/// runtime header directory; everything beyond that (metadata root, streams, tables)
/// is the business of [`crate::metadata`].
///
/// # Examples
///
/// ```rust,no_run
/// use cildump::File;
/// use std::path::Path;
///
/// let file = File::from_file(Path::new("MyApp.dll"))?;
/// println!("{} sections, {} bytes", file.sections().count(), file.len());
///
/// let (clr_rva, clr_size) = file.clr();
/// println!("CLR header at RVA {clr_rva:#x} ({clr_size} bytes)");
/// # Ok::<(), cildump::Error>(())
/// ```
pub struct File {
    /// Bytes, either mapped from disk or owned.
    data: Box<dyn Backend>,
    /// Parsed PE view borrowing from `data`.
    #[borrows(data)]
    #[not_covariant]
    pe: PE<'this>,
}

impl File {
    /// Loads an assembly from disk, memory-mapping it read-only.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be opened or mapped, is empty, is not a
    /// well-formed PE, or carries no CLR runtime header
    /// ([`crate::Error::NotSupported`]).
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Loads an assembly from a byte vector.
    ///
    /// # Errors
    ///
    /// Same conditions as [`File::from_file`], minus the filesystem.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    /// Backend-independent part of loading.
    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        let data = Box::new(data);

        File::try_new(data, |data| {
            let data = data.as_ref();
            match PE::parse(data.data()) {
                Ok(pe) => match pe.header.optional_header {
                    Some(optional_header) => {
                        if optional_header
                            .data_directories
                            .get_clr_runtime_header()
                            .is_none()
                        {
                            // A PE without a CLR directory is a fine native
                            // image, just not one this crate handles.
                            Err(NotSupported)
                        } else {
                            Ok(pe)
                        }
                    }
                    None => Err(malformed_error!("File does not have an OptionalHeader")),
                },
                Err(error) => Err(GoblinErr(error)),
            }
        })
    }

    /// Size of the underlying file in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Whether the file holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Preferred load address from the optional header.
    #[must_use]
    pub fn imagebase(&self) -> u64 {
        self.with_pe(|pe| pe.image_base)
    }

    /// The PE header.
    #[must_use]
    pub fn header(&self) -> &Header {
        self.with_pe(|pe| &pe.header)
    }

    /// Returns a reference to the optional header.
    ///
    /// This is always `Some` for files that survived loading, since the CLR
    /// runtime header lives in a data directory of the optional header.
    #[must_use]
    pub fn header_optional(&self) -> &Option<OptionalHeader> {
        self.with_pe(|pe| &pe.header.optional_header)
    }

    /// RVA and byte size of the CLR runtime header.
    ///
    /// # Panics
    ///
    /// Panics if the CLR runtime header is missing (cannot happen for files that
    /// survived [`File::from_file`] / [`File::from_mem`]).
    #[must_use]
    pub fn clr(&self) -> (usize, usize) {
        self.with_pe(|pe| {
            let optional_header = pe.header.optional_header.unwrap();
            let clr_dir = optional_header
                .data_directories
                .get_clr_runtime_header()
                .unwrap();

            (clr_dir.virtual_address as usize, clr_dir.size as usize)
        })
    }

    /// Iterates over the section table.
    pub fn sections(&self) -> impl Iterator<Item = &SectionTable> {
        self.with_pe(|pe| pe.sections.iter())
    }

    /// The raw bytes of the whole image.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.with_data(|data| data.data())
    }

    /// Borrows `len` bytes of the image starting at file offset `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the range leaves the file.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.with_data(|data| data.data_slice(offset, len))
    }

    /// Maps a relative virtual address to its file offset.
    ///
    /// Metadata structures and method bodies are all located by RVA; the
    /// mapping walks the section table and is linear inside a section.
    ///
    /// # Errors
    ///
    /// Returns an error if the RVA falls outside every section or a section
    /// header is malformed.
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        self.with_pe(|pe| {
            for section in &pe.sections {
                let Some(section_max) = section.virtual_address.checked_add(section.virtual_size)
                else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        section.virtual_size
                    ));
                };

                let rva_u32 = u32::try_from(rva)
                    .map_err(|_| malformed_error!("RVA too large to fit in u32: {}", rva))?;
                if section.virtual_address <= rva_u32 && rva_u32 < section_max {
                    return Ok((rva - section.virtual_address as usize)
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }

    /// Maps a file offset back to its relative virtual address.
    ///
    /// The inverse of [`File::rva_to_offset`].
    ///
    /// # Errors
    ///
    /// Returns an error if the offset falls outside every section's raw data.
    pub fn offset_to_rva(&self, offset: usize) -> Result<usize> {
        self.with_pe(|pe| {
            for section in &pe.sections {
                let Some(section_max) = section
                    .pointer_to_raw_data
                    .checked_add(section.size_of_raw_data)
                else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.pointer_to_raw_data,
                        section.size_of_raw_data
                    ));
                };

                let offset_u32 = u32::try_from(offset)
                    .map_err(|_| malformed_error!("Offset too large to fit in u32: {}", offset))?;
                if section.pointer_to_raw_data <= offset_u32 && offset_u32 < section_max {
                    return Ok((offset - section.pointer_to_raw_data as usize)
                        + section.virtual_address as usize);
                }
            }

            Err(malformed_error!(
                "Offset could not be converted to RVA - {}",
                offset
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::minimal_pe;

    #[test]
    fn load_minimal_image() {
        let file = File::from_mem(minimal_pe(0x1000, 72)).unwrap();

        assert_eq!(file.len(), 0x400);
        assert!(!file.is_empty());
        assert_eq!(file.imagebase(), 0x0040_0000);
        assert_eq!(file.clr(), (0x1000, 72));
        assert_eq!(file.sections().count(), 1);
        assert_eq!(&file.data()[0..2], b"MZ");
    }

    #[test]
    fn rva_translation() {
        let file = File::from_mem(minimal_pe(0x1000, 72)).unwrap();

        // Section start maps to the raw pointer, interior offsets are linear.
        assert_eq!(file.rva_to_offset(0x1000).unwrap(), 0x200);
        assert_eq!(file.rva_to_offset(0x1010).unwrap(), 0x210);

        assert!(file.rva_to_offset(0x0).is_err());
        assert!(file.rva_to_offset(0x2000).is_err());

        assert_eq!(file.offset_to_rva(0x200).unwrap(), 0x1000);
        assert_eq!(file.offset_to_rva(0x210).unwrap(), 0x1010);
        assert_eq!(
            file.offset_to_rva(file.rva_to_offset(0x1080).unwrap()).unwrap(),
            0x1080
        );

        // The header region sits outside every section.
        assert!(file.offset_to_rva(0x0).is_err());
        assert!(file.offset_to_rva(0x400).is_err());
    }

    #[test]
    fn load_rejects_empty_input() {
        assert!(matches!(File::from_mem(Vec::new()), Err(Empty)));
    }

    #[test]
    fn load_rejects_missing_clr_directory() {
        let mut image = minimal_pe(0x1000, 72);

        // Zero out the CLR data directory entry.
        let clr_dir = 0x58 + 96 + 14 * 8;
        for byte in &mut image[clr_dir..clr_dir + 8] {
            *byte = 0;
        }

        assert!(matches!(File::from_mem(image), Err(NotSupported)));
    }

    #[test]
    fn load_rejects_garbage() {
        assert!(File::from_mem(vec![0xFF; 128]).is_err());
    }
}
