use strum::{EnumCount, EnumIter};

/// Identifiers of the metadata tables defined by ECMA-335.
///
/// The discriminants are the table numbers from the standard and double as
/// the high byte of metadata tokens. The `Ptr` and `Enc` tables only occur
/// in uncompressed or edit-and-continue images but still need identifiers so
/// that a tables stream declaring them can be walked.
///
/// ## Reference
/// * [ECMA-335 Partition II, Section 22](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)
#[derive(Clone, Copy, PartialEq, Debug, EnumIter, EnumCount, Eq, Hash)]
pub enum TableId {
    /// `Module` (0x00) - the single row describing this module.
    Module = 0x00,
    /// `TypeRef` (0x01) - references to types in other modules or assemblies.
    TypeRef = 0x01,
    /// `TypeDef` (0x02) - type definitions of this module.
    TypeDef = 0x02,
    /// `FieldPtr` (0x03) - field indirection for unoptimized images.
    FieldPtr = 0x03,
    /// `Field` (0x04) - field definitions, owned by `TypeDef` rows.
    Field = 0x04,
    /// `MethodPtr` (0x05) - method indirection for unoptimized images.
    MethodPtr = 0x05,
    /// `MethodDef` (0x06) - method definitions, owned by `TypeDef` rows.
    MethodDef = 0x06,
    /// `ParamPtr` (0x07) - parameter indirection for unoptimized images.
    ParamPtr = 0x07,
    /// `Param` (0x08) - parameter definitions, owned by `MethodDef` rows.
    Param = 0x08,
    /// `InterfaceImpl` (0x09) - interfaces implemented by types.
    InterfaceImpl = 0x09,
    /// `MemberRef` (0x0A) - references to members of other modules.
    MemberRef = 0x0A,
    /// `Constant` (0x0B) - compile time constants of fields, params and properties.
    Constant = 0x0B,
    /// `CustomAttribute` (0x0C) - custom attribute applications.
    CustomAttribute = 0x0C,
    /// `FieldMarshal` (0x0D) - marshalling descriptors for interop.
    FieldMarshal = 0x0D,
    /// `DeclSecurity` (0x0E) - declarative security permissions.
    DeclSecurity = 0x0E,
    /// `ClassLayout` (0x0F) - explicit packing and size of types.
    ClassLayout = 0x0F,
    /// `FieldLayout` (0x10) - explicit field offsets.
    FieldLayout = 0x10,
    /// `StandAloneSig` (0x11) - signatures not attached to another row,
    /// such as method local variable signatures.
    StandAloneSig = 0x11,
    /// `EventMap` (0x12) - type to event ranges.
    EventMap = 0x12,
    /// `EventPtr` (0x13) - event indirection for unoptimized images.
    EventPtr = 0x13,
    /// `Event` (0x14) - event definitions.
    Event = 0x14,
    /// `PropertyMap` (0x15) - type to property ranges.
    PropertyMap = 0x15,
    /// `PropertyPtr` (0x16) - property indirection for unoptimized images.
    PropertyPtr = 0x16,
    /// `Property` (0x17) - property definitions.
    Property = 0x17,
    /// `MethodSemantics` (0x18) - getter/setter/adder associations.
    MethodSemantics = 0x18,
    /// `MethodImpl` (0x19) - explicit interface method implementations.
    MethodImpl = 0x19,
    /// `ModuleRef` (0x1A) - references to external modules, mostly P/Invoke.
    ModuleRef = 0x1A,
    /// `TypeSpec` (0x1B) - type specifications given by signature.
    TypeSpec = 0x1B,
    /// `ImplMap` (0x1C) - P/Invoke forwarding information.
    ImplMap = 0x1C,
    /// `FieldRVA` (0x1D) - initial data locations of mapped fields.
    FieldRVA = 0x1D,
    /// `EncLog` (0x1E) - edit-and-continue log.
    EncLog = 0x1E,
    /// `EncMap` (0x1F) - edit-and-continue token map.
    EncMap = 0x1F,
    /// `Assembly` (0x20) - the single row describing this assembly, when present.
    Assembly = 0x20,
    /// `AssemblyProcessor` (0x21) - unused processor information.
    AssemblyProcessor = 0x21,
    /// `AssemblyOS` (0x22) - unused operating system information.
    AssemblyOS = 0x22,
    /// `AssemblyRef` (0x23) - references to other assemblies.
    AssemblyRef = 0x23,
    /// `AssemblyRefProcessor` (0x24) - unused processor information.
    AssemblyRefProcessor = 0x24,
    /// `AssemblyRefOS` (0x25) - unused operating system information.
    AssemblyRefOS = 0x25,
    /// `File` (0x26) - files of a multi file assembly.
    File = 0x26,
    /// `ExportedType` (0x27) - types forwarded or exported from other files.
    ExportedType = 0x27,
    /// `ManifestResource` (0x28) - embedded or linked resources.
    ManifestResource = 0x28,
    /// `NestedClass` (0x29) - nesting relations between types.
    NestedClass = 0x29,
    /// `GenericParam` (0x2A) - generic parameter definitions.
    GenericParam = 0x2A,
    /// `MethodSpec` (0x2B) - generic method instantiations.
    MethodSpec = 0x2B,
    /// `GenericParamConstraint` (0x2C) - constraints on generic parameters.
    GenericParamConstraint = 0x2C,
}

impl TableId {
    /// Map a bit position of the tables stream `Valid` vector back to its
    /// identifier. Returns `None` for bits no ECMA-335 table is assigned to.
    #[must_use]
    pub fn from_bit(bit: u8) -> Option<TableId> {
        use strum::IntoEnumIterator;

        TableId::iter().find(|&id| id as u8 == bit)
    }

    /// The token base of this table, i.e. the table number shifted into the
    /// high byte.
    #[must_use]
    pub fn token_base(self) -> u32 {
        (self as u32) << 24
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_round_trip() {
        use strum::IntoEnumIterator;

        for id in TableId::iter() {
            assert_eq!(TableId::from_bit(id as u8), Some(id));
        }

        assert_eq!(TableId::from_bit(0x2D), None);
        assert_eq!(TableId::from_bit(0x3F), None);
    }

    #[test]
    fn token_bases() {
        assert_eq!(TableId::Module.token_base(), 0x0000_0000);
        assert_eq!(TableId::TypeDef.token_base(), 0x0200_0000);
        assert_eq!(TableId::MethodDef.token_base(), 0x0600_0000);
        assert_eq!(TableId::Assembly.token_base(), 0x2000_0000);
    }
}
