//! Method flag groups for .NET CIL methods.
//!
//! This module defines the bitflags used to interpret `MethodDef` attribute
//! and implementation columns as well as the header and section flags of
//! method bodies. The IL writer turns these into the keyword soup of a
//! `.method` directive.
//!
//! # Key Types
//! - [`MethodImplCodeType`], [`MethodImplManagement`], [`MethodImplOptions`] for the `ImplFlags` column
//! - [`MethodAccessFlags`], [`MethodVtableFlags`], [`MethodModifiers`] for the `Flags` column
//! - [`MethodBodyFlags`], [`SectionFlags`] for body headers and their extra sections

use bitflags::bitflags;

/// Selects the `CODE_TYPE` bits of `ImplFlags`
pub const METHOD_IMPL_CODE_TYPE_MASK: u32 = 0x0003;
/// Selects the `MANAGED` bit of `ImplFlags`
pub const METHOD_IMPL_MANAGED_MASK: u32 = 0x0004;
/// Selects the accessibility bits of `Flags`
pub const METHOD_ACCESS_MASK: u32 = 0x0007;
/// Selects the `VTABLE_LAYOUT` bit of `Flags`
pub const METHOD_VTABLE_LAYOUT_MASK: u32 = 0x0100;

// Implementation flags split into their logical groups
bitflags! {
    #[derive(PartialEq)]
    /// Code type of a method implementation
    pub struct MethodImplCodeType: u32 {
        /// Method body is CIL
        const IL = 0x0000;
        /// Method body is native code
        const NATIVE = 0x0001;
        /// Method body is OPTIL
        const OPTIL = 0x0002;
        /// Method body is provided by the runtime
        const RUNTIME = 0x0003;
    }
}

impl MethodImplCodeType {
    /// Extract the code type from raw implementation flags
    #[must_use]
    pub fn from_impl_flags(flags: u32) -> Self {
        let code_type = flags & METHOD_IMPL_CODE_TYPE_MASK;
        Self::from_bits_truncate(code_type)
    }
}

bitflags! {
    #[derive(PartialEq)]
    /// Management state of a method implementation
    pub struct MethodImplManagement: u32 {
        /// Method is unmanaged, otherwise managed
        const UNMANAGED = 0x0004;
    }
}

impl MethodImplManagement {
    /// Extract the management state from raw implementation flags
    #[must_use]
    pub fn from_impl_flags(flags: u32) -> Self {
        let management = flags & METHOD_IMPL_MANAGED_MASK;
        Self::from_bits_truncate(management)
    }
}

bitflags! {
    #[derive(PartialEq)]
    /// Additional options of a method implementation
    pub struct MethodImplOptions: u32 {
        /// Method may not be inlined
        const NO_INLINING = 0x0008;
        /// Method is declared, but its body is provided elsewhere
        const FORWARD_REF = 0x0010;
        /// Method is single-threaded through its body
        const SYNCHRONIZED = 0x0020;
        /// Method signature is exported exactly as declared
        const PRESERVE_SIG = 0x0080;
        /// Implementation is provided internally by the runtime
        const INTERNAL_CALL = 0x1000;
        /// Range check value
        const MAX_METHOD_IMPL_VAL = 0xFFFF;
    }
}

impl MethodImplOptions {
    /// Extract the implementation options from raw implementation flags
    #[must_use]
    pub fn from_impl_flags(flags: u32) -> Self {
        let options = flags & !(METHOD_IMPL_CODE_TYPE_MASK | METHOD_IMPL_MANAGED_MASK);
        Self::from_bits_truncate(options)
    }
}

// Method attributes split into their logical groups
bitflags! {
    #[derive(PartialEq)]
    /// Member access of a method
    pub struct MethodAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessible by anyone in the assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessible by sub-types anywhere, plus anyone in the assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessible by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract the access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        let access = flags & METHOD_ACCESS_MASK;
        Self::from_bits_truncate(access)
    }
}

bitflags! {
    #[derive(PartialEq)]
    /// Vtable layout of a method
    pub struct MethodVtableFlags: u32 {
        /// Method reuses an existing slot in the vtable
        const REUSE_SLOT = 0x0000;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
    }
}

impl MethodVtableFlags {
    /// Extract the vtable layout from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        let vtable = flags & METHOD_VTABLE_LAYOUT_MASK;
        Self::from_bits_truncate(vtable)
    }
}

bitflags! {
    #[derive(PartialEq)]
    /// Modifiers and properties of a method
    pub struct MethodModifiers: u32 {
        /// Defined on the type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name and signature, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method can only be overridden when it is also accessible
        const STRICT = 0x0200;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides special behavior, depending on the name of the method
        const RTSPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
        /// Method has security associated with it
        const HAS_SECURITY = 0x4000;
        /// Method calls another method containing security code
        const REQUIRE_SEC_OBJECT = 0x8000;
        /// Reserved: shall be zero for conforming implementations
        const UNMANAGED_EXPORT = 0x0008;
    }
}

impl MethodModifiers {
    /// Extract the modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        let modifiers = flags & !METHOD_ACCESS_MASK & !METHOD_VTABLE_LAYOUT_MASK;
        Self::from_bits_truncate(modifiers)
    }
}

bitflags! {
    #[derive(PartialEq)]
    /// Flags that a method body header can carry
    pub struct MethodBodyFlags: u16 {
        /// Tiny method header format
        const TINY_FORMAT = 0x2;
        /// Fat method header format
        const FAT_FORMAT = 0x3;
        /// More data sections follow the header and the code
        const MORE_SECTS = 0x8;
        /// Local variables are zero-initialized before the body runs
        const INIT_LOCALS = 0x10;
    }
}

bitflags! {
    #[derive(PartialEq)]
    /// Flags that a method data section can carry
    pub struct SectionFlags: u8 {
        /// Section contains exception handling data
        const EHTABLE = 0x1;
        /// Reserved, shall be 0
        const OPT_ILTABLE = 0x2;
        /// Section uses the fat format
        const FAT_FORMAT = 0x40;
        /// Another section follows this one
        const MORE_SECTS = 0x80;
    }
}
