use std::path::PathBuf;

use thiserror::Error;

macro_rules! malformed_error {
    // Plain message
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // format! style
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// Everything that can go wrong while loading, parsing or dumping an
/// assembly.
///
/// Parsing problems ([`Error::Malformed`], [`Error::OutOfBounds`]) describe
/// the input; they carry enough context to point at the offending structure.
/// [`Error::InputNotFound`] and [`Error::ToolNotFound`] belong to the dump
/// pipeline and abort a run, while parse failures on discovered candidates
/// are normally caught and downgraded to skips by the caller.
///
/// # Examples
///
/// ```rust
/// use cildump::{Error, File};
/// use std::path::Path;
///
/// match File::from_file(Path::new("assembly.dll")) {
///     Ok(file) => println!("loaded {} bytes", file.len()),
///     Err(Error::NotSupported) => eprintln!("not a .NET image"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("bad metadata: {message} ({file}:{line})");
///     }
///     Err(other) => eprintln!("{other}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input violates the PE or ECMA-335 format.
    ///
    /// The variant records where in *this* crate the violation was detected;
    /// with hand-crafted malware samples the message alone rarely narrows
    /// down which of the many compressed structures was at fault.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// What was malformed.
        message: String,
        /// Source file that rejected the input.
        file: &'static str,
        /// Source line that rejected the input.
        line: u32,
    },

    /// A read past the end of the input was attempted and refused.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// The input is a valid file of a kind this crate does not handle,
    /// such as a native PE without a CLR runtime header.
    #[error("This file type is not supported")]
    NotSupported,

    /// The input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// An underlying filesystem operation failed.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Miscellaneous failure that fits no other variant.
    #[error("{0}")]
    Error(String),

    /// PE-level parsing failed inside goblin.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// Nesting depth cap hit while parsing recursive structures.
    ///
    /// Signature blobs nest types arbitrarily deep; the cap keeps crafted
    /// inputs from overflowing the stack. Carries the limit that was hit.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// An input specifier named neither an existing file nor an existing
    /// directory.
    ///
    /// Specifiers come straight from the command line and fail the whole
    /// run. Candidates found *under* a specifier are treated more leniently,
    /// unreadable ones are logged and skipped.
    #[error("The {} file or directory cannot be found.", .0.display())]
    InputNotFound(PathBuf),

    /// The external disassembler is not at the configured (or default)
    /// location.
    ///
    /// Raised once, when the pipeline is constructed, so a misconfigured
    /// tool path surfaces before any input is touched. Distinct from
    /// [`Error::FileError`] so a missing tool is never mistaken for a
    /// missing input file.
    #[error("The {} file cannot be found.", .0.display())]
    ToolNotFound(PathBuf),
}
