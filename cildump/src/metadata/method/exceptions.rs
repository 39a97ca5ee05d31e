//! Exception handler clauses of CIL method bodies.
//!
//! Method bodies carry their try/catch/finally/fault regions in extra data
//! sections appended after the IL code. The types here hold one decoded
//! clause; the section walking lives in [`MethodBody`](crate::metadata::method::MethodBody).

use bitflags::bitflags;

bitflags! {
    /// Clause type of an exception handler.
    ///
    /// The clause type decides how the last column of the clause is
    /// interpreted and which keyword the IL writer emits for the region.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExceptionHandlerFlags: u16 {
        /// A typed exception clause.
        ///
        /// [`ExceptionHandler::class_token_or_filter`] holds the metadata
        /// token of the exception type this handler catches.
        const EXCEPTION = 0x0000;

        /// An exception filter and handler clause.
        ///
        /// [`ExceptionHandler::class_token_or_filter`] holds the offset of
        /// the filter code that is run to decide whether the handler takes
        /// the exception.
        const FILTER = 0x0001;

        /// A finally clause.
        ///
        /// The handler runs on both normal and exceptional exit from the
        /// protected region.
        const FINALLY = 0x0002;

        /// A fault clause.
        ///
        /// Like finally, but the handler only runs when an exception is
        /// thrown, never on normal exit.
        const FAULT = 0x0004;
    }
}

/// One try/handler region of a method body.
///
/// All offsets and lengths are in bytes, relative to the first IL
/// instruction of the method the clause belongs to.
///
/// # Layout in IL
///
/// ```text
/// .try {
///     // try_offset -> try_offset + try_length
/// }
/// catch [mscorlib]System.Exception {
///     // handler_offset -> handler_offset + handler_length
/// }
/// ```
///
/// # References
/// - ECMA-335 6th Edition, Partition II, Section 25.4.6 - Exception Handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionHandler {
    /// Clause type (catch, filter, finally, fault).
    pub flags: ExceptionHandlerFlags,
    /// Offset of the protected region.
    pub try_offset: u32,
    /// Length of the protected region.
    pub try_length: u32,
    /// Offset of the handler code.
    pub handler_offset: u32,
    /// Length of the handler code.
    pub handler_length: u32,
    /// Class token of the caught exception type, or the filter offset,
    /// depending on `flags`.
    pub class_token_or_filter: u32,
}
