//! Method bodies and method flags.
//!
//! This module decodes the runtime side of a `MethodDef` row: the body
//! header at the method's RVA, the exception handling clauses appended to
//! it, and the flag groups packed into the attribute and implementation
//! columns.

mod body;
mod exceptions;
mod types;

pub use body::*;
pub use exceptions::*;
pub use types::*;
