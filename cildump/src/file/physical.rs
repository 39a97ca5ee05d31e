//! Backend over a file on disk, memory-mapped.
//!
//! [`crate::file::physical::Physical`] implements [`crate::file::Backend`] by mapping
//! a file on disk into the process's address space. Only the touched pages ever get
//! loaded, which suits the access pattern of metadata parsing: small reads scattered
//! across a potentially large image.

use super::Backend;
use crate::{
    Error::{Error, FileError, OutOfBounds},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// On-disk backend. The mapping is read-only and shared, and every access
/// goes through a bounds check.
#[derive(Debug)]
pub struct Physical {
    /// The live mapping, dropped together with the backend.
    data: Mmap,
}

impl Physical {
    /// Opens and maps `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened, or
    /// [`crate::Error::Error`] if mapping it fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(Error(error.to_string())),
        };

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
