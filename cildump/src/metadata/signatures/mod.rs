//! Compressed signature blob parsing (ECMA-335 II.23.2).
//!
//! Field types, method parameter lists, local-variable slots and type
//! specifications are all stored in the `#Blob` heap as compressed
//! signatures: a leading calling-convention or kind byte, compressed
//! integer counts, and element-type encodings. [`SignatureParser`] walks
//! one blob; the free functions below wrap it for the common one-shot
//! case.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cildump::metadata::signatures::parse_method_signature;
//!
//! // static void M(string)
//! let signature = parse_method_signature(&[0x00, 0x01, 0x01, 0x0E])?;
//! assert_eq!(signature.params.len(), 1);
//! # Ok::<(), cildump::Error>(())
//! ```

mod parser;
mod types;

pub use parser::*;
pub use types::*;

use crate::Result;

/// Parses a `MethodDefSig`/`MethodRefSig` blob.
///
/// # Errors
///
/// Returns an error if the blob is truncated or not a method signature.
pub fn parse_method_signature(data: &[u8]) -> Result<SignatureMethod> {
    let mut parser = SignatureParser::new(data);
    parser.parse_method_signature()
}

/// Parses a `FieldSig` blob.
///
/// # Errors
///
/// Returns an error if the blob is truncated or not a field signature.
pub fn parse_field_signature(data: &[u8]) -> Result<SignatureField> {
    let mut parser = SignatureParser::new(data);
    parser.parse_field_signature()
}

/// Parses a `LocalVarSig` blob.
///
/// # Errors
///
/// Returns an error if the blob is truncated or not a local-variable
/// signature.
pub fn parse_local_var_signature(data: &[u8]) -> Result<SignatureLocalVariables> {
    let mut parser = SignatureParser::new(data);
    parser.parse_local_var_signature()
}

/// Parses a `TypeSpec` blob.
///
/// # Errors
///
/// Returns an error if the blob is truncated or the encoded type is
/// malformed.
pub fn parse_type_spec_signature(data: &[u8]) -> Result<SignatureTypeSpec> {
    let mut parser = SignatureParser::new(data);
    parser.parse_type_spec_signature()
}
