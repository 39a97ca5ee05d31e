//! # cildump Prelude
//!
//! One import for the types most call sites need, from loading a file to
//! rendering its IL listing.

// ================================================================================================
// Errors and Results
// ================================================================================================

/// The error type shared by the whole crate
pub use crate::Error;

/// Shorthand for `Result<T, Error>`
pub use crate::Result;

// ================================================================================================
// Entry Points
// ================================================================================================

/// Parsed view over a CIL binary
pub use crate::CilImage;

/// PE container access and the low-level byte cursor
pub use crate::{File, Parser};

// ================================================================================================
// Dump Pipeline
// ================================================================================================

/// The orchestrating pipeline and its configuration
pub use crate::dump::{DumpOptions, DumpRecord, DumpSummary, Pipeline};

/// Member ordering policies for rendered listings
pub use crate::dump::MemberOrder;

/// The in-process IL renderer
pub use crate::dump::render_il;

/// Assembly manifest detection
pub use crate::dump::probe::is_assembly;

// ================================================================================================
// Metadata Core
// ================================================================================================

/// Row references into the metadata tables
pub use crate::metadata::token::Token;

/// The `BSJB` magic of the metadata root
pub use crate::metadata::root::CIL_HEADER_MAGIC;

/// The CLI header and the metadata root
pub use crate::metadata::{cor20header::Cor20Header, root::Root};

/// Metadata heaps and stream headers
pub use crate::metadata::streams::{Blob, Guid, StreamHeader, Strings, TablesHeader, UserStrings};

// ================================================================================================
// Method Bodies and Signatures
// ================================================================================================

/// Method body headers and exception-handler clauses
pub use crate::metadata::method::{ExceptionHandler, ExceptionHandlerFlags, MethodBody};

/// Compressed signature parsing
pub use crate::metadata::signatures::{SignatureMethod, SignatureParser, TypeSignature};

// ================================================================================================
// Tables
// ================================================================================================

/// Field and type attribute flags
pub use crate::metadata::tables::{FieldAttributes, TypeAttributes};

/// Table ids as they appear in token high bytes
pub use crate::metadata::tables::TableId;

/// Coded indexes and the generic row view
pub use crate::metadata::tables::{CodedIndex, MetadataTable};

// ================================================================================================
// Disassembler
// ================================================================================================

/// CIL instruction decoding
pub use crate::disassembler::{decode_instruction, decode_stream};

/// Decoded instruction values and their operands
pub use crate::disassembler::{FlowType, Immediate, Instruction, Operand};
