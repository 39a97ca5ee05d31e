//! Assembly validation for candidate files.
//!
//! The pipeline must not trust file extensions: a `.dll` can be a native
//! library, a resource container, or garbage. [`is_assembly`] gives the
//! authoritative answer by parsing the PE container and checking that the
//! metadata declares an `Assembly` manifest row. Multi-module satellites
//! carry metadata but no manifest and are rejected here.

use std::{io::ErrorKind, path::Path};

use crate::{file::File, metadata::cilimage::CilImage, Error, Result};

/// Whether the file at `path` is a loadable .NET assembly.
///
/// `true` only when the file opens, parses as a PE image with a CLR
/// metadata directory, and its tables stream declares an assembly
/// manifest. Nothing is cached: callers re-probe immediately before any
/// destructive write, so a file swapped out mid-run is caught.
///
/// Failures never propagate; an unreadable or malformed candidate is
/// reported through [`log::warn!`] and yields `false`.
#[must_use]
pub fn is_assembly(path: &Path) -> bool {
    match inspect(path) {
        Ok(verdict) => verdict,
        Err(Error::FileError(error)) if error.kind() == ErrorKind::NotFound => {
            log::warn!("The {} file cannot be found.", path.display());
            false
        }
        Err(Error::FileError(error)) => {
            log::warn!("Cannot read {}: {}", path.display(), error);
            false
        }
        Err(_) => {
            log::warn!("The {} file is not an executable.", path.display());
            false
        }
    }
}

fn inspect(path: &Path) -> Result<bool> {
    let file = File::from_file(path)?;
    let image = CilImage::parse(&file)?;
    Ok(image.is_assembly())
}
