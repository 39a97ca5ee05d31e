//! The parsed signature model.
//!
//! Signatures reference types through [`TypeSignature`], a tree whose leaves
//! are the primitive element types and whose interior nodes wrap other types
//! (pointers, arrays, generic instantiations). The doc comment on each
//! primitive variant gives the IL keyword it renders as.

use crate::metadata::token::Token;

/// Element-type tags from ECMA-335 II.23.1.16.
///
/// These single bytes introduce every type encoding inside a signature blob.
#[allow(non_snake_case, dead_code, missing_docs)]
pub mod ELEMENT_TYPE {
    pub const END: u8 = 0x00;

    // Primitives carry no payload.
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0a;
    pub const U8: u8 = 0x0b;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;

    // A nested type encoding follows.
    pub const PTR: u8 = 0x0f;
    pub const BYREF: u8 = 0x10;

    // A TypeDefOrRef coded token follows.
    pub const VALUETYPE: u8 = 0x11;
    pub const CLASS: u8 = 0x12;

    /// Generic parameter of the enclosing type; a compressed index follows.
    pub const VAR: u8 = 0x13;
    /// Multi-dimensional array: type, rank, sizes and lower bounds follow.
    pub const ARRAY: u8 = 0x14;
    /// Instantiated generic: type, argument count, then each argument.
    pub const GENERICINST: u8 = 0x15;
    pub const TYPEDBYREF: u8 = 0x16;

    // Pointer-sized integers.
    pub const I: u8 = 0x18;
    pub const U: u8 = 0x19;

    /// A full method signature follows.
    pub const FNPTR: u8 = 0x1b;
    pub const OBJECT: u8 = 0x1c;
    /// Vector (single dimension, zero lower bound); the element type follows.
    pub const SZARRAY: u8 = 0x1d;
    /// Generic parameter of the enclosing method; a compressed index follows.
    pub const MVAR: u8 = 0x1e;

    // Custom modifiers, each followed by a TypeDefOrRef coded token.
    pub const CMOD_REQD: u8 = 0x1f;
    pub const CMOD_OPT: u8 = 0x20;

    pub const INTERNAL: u8 = 0x21;
    pub const MODIFIER: u8 = 0x40;
    /// Separates fixed from vararg parameters in a call-site signature.
    pub const SENTINEL: u8 = 0x41;
    /// Local-variable prefix: the object the local points at may not move.
    pub const PINNED: u8 = 0x45;
}

/// One dimension of a multi-dimensional array.
///
/// The blob may declare fewer sizes and bounds than the rank; missing
/// entries stay `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayDimensions {
    /// Declared element count, if any.
    pub size: Option<u32>,
    /// Declared lowest valid index, if any.
    pub lower_bound: Option<u32>,
}

/// A type as encoded in a signature blob.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TypeSignature {
    /// Tag not recognized by the parser.
    #[default]
    Unknown,
    /// `void`
    Void,
    /// `bool`
    Boolean,
    /// `char`
    Char,
    /// `int8`
    I1,
    /// `uint8`
    U1,
    /// `int16`
    I2,
    /// `uint16`
    U2,
    /// `int32`
    I4,
    /// `uint32`
    U4,
    /// `int64`
    I8,
    /// `uint64`
    U8,
    /// `float32`
    R4,
    /// `float64`
    R8,
    /// `string`
    String,
    /// Unmanaged pointer with its pointee.
    Ptr(SignaturePointer),
    /// Managed reference to the wrapped type.
    ByRef(Box<TypeSignature>),
    /// `valuetype` with the defining TypeDef/TypeRef/TypeSpec token.
    ValueType(Token),
    /// `class` with the defining TypeDef/TypeRef/TypeSpec token.
    Class(Token),
    /// `!n`, a generic parameter of the enclosing type.
    GenericParamType(u32),
    /// Multi-dimensional array with explicit rank and bounds.
    Array(SignatureArray),
    /// Instantiated generic type with its arguments.
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// `typedref`
    TypedByRef,
    /// `native int`
    I,
    /// `native uint`
    U,
    /// `method` pointer carrying the target signature.
    FnPtr(Box<SignatureMethod>),
    /// `object`
    Object,
    /// Vector, the common `T[]` shape.
    SzArray(SignatureSzArray),
    /// `!!n`, a generic parameter of the enclosing method.
    GenericParamMethod(u32),
    /// `modreq(...)` tokens attached to the following type.
    ModifiedRequired(Vec<Token>),
    /// `modopt(...)` tokens attached to the following type.
    ModifiedOptional(Vec<Token>),
    /// Runtime-internal type, never valid in user metadata.
    Internal,
    /// The `0x40` modifier tag, kept verbatim.
    Modifier,
    /// Vararg sentinel, kept verbatim.
    Sentinel,
    /// Pinned local; the garbage collector must not move the referent.
    Pinned(Box<TypeSignature>),
}

/// `ARRAY` payload: element type, rank, declared dimensions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureArray {
    /// Element type.
    pub base: Box<TypeSignature>,
    /// Number of dimensions.
    pub rank: u32,
    /// Per-dimension size/bound declarations, at most `rank` entries.
    pub dimensions: Vec<ArrayDimensions>,
}

/// `SZARRAY` payload: a vector with optional custom modifiers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureSzArray {
    /// Custom-modifier tokens preceding the element type.
    pub modifiers: Vec<Token>,
    /// Element type.
    pub base: Box<TypeSignature>,
}

/// `PTR` payload: the pointee with optional custom modifiers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignaturePointer {
    /// Custom-modifier tokens preceding the pointee.
    pub modifiers: Vec<Token>,
    /// The type pointed at.
    pub base: Box<TypeSignature>,
}

/// One parameter (or the return slot) of a method signature.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureParameter {
    /// Custom-modifier tokens preceding the type.
    pub modifiers: Vec<Token>,
    /// Whether the parameter is passed by managed reference.
    pub by_ref: bool,
    /// The parameter type.
    pub base: TypeSignature,
}

/// A method signature, II.23.2.1.
///
/// The leading calling-convention byte is exploded into the boolean flags
/// here; exactly one of the convention flags is set for a well-formed blob.
#[derive(Debug, Clone, PartialEq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct SignatureMethod {
    /// `HASTHIS`: an instance method with an implicit `this`.
    pub has_this: bool,
    /// `EXPLICITTHIS`: `this` appears as the first declared parameter.
    pub explicit_this: bool,
    /// Managed `default` calling convention.
    pub default: bool,
    /// Managed `vararg` calling convention.
    pub vararg: bool,
    /// Unmanaged `cdecl`.
    pub cdecl: bool,
    /// Unmanaged `stdcall`.
    pub stdcall: bool,
    /// Unmanaged `thiscall`.
    pub thiscall: bool,
    /// Unmanaged `fastcall`.
    pub fastcall: bool,
    /// Number of generic parameters the method declares.
    pub param_count_generic: u32,
    /// Number of fixed parameters.
    pub param_count: u32,
    /// The return slot.
    pub return_type: SignatureParameter,
    /// Fixed parameters, in order.
    pub params: Vec<SignatureParameter>,
    /// Parameters after the vararg sentinel, call-site signatures only.
    pub varargs: Vec<SignatureParameter>,
}

/// A field signature, II.23.2.4.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureField {
    /// Custom-modifier tokens preceding the type.
    pub modifiers: Vec<Token>,
    /// The field type.
    pub base: TypeSignature,
}

/// A local-variable signature, II.23.2.6.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureLocalVariables {
    /// The declared locals, in slot order.
    pub locals: Vec<SignatureLocalVariable>,
}

/// One slot of a local-variable signature.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureLocalVariable {
    /// Custom-modifier tokens preceding the type.
    pub modifiers: Vec<Token>,
    /// Slot holds a managed reference (`&`).
    pub is_byref: bool,
    /// Slot is pinned for the lifetime of the frame.
    pub is_pinned: bool,
    /// The variable type.
    pub base: TypeSignature,
}

/// A type-specification signature, II.23.2.14: a single encoded type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureTypeSpec {
    /// The encoded type.
    pub base: TypeSignature,
}
