use std::sync::Arc;

use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::read_le_at,
    metadata::tables::{CodedIndexType, TableId},
    Result,
};

/// Shared handle to the sizing information of one tables stream.
pub type TableInfoRef = Arc<TableInfo>;

/// Row count and derived index width of a single table.
#[derive(Clone, Copy, Debug)]
pub struct TableRowInfo {
    /// Number of rows the stream declares for this table
    pub rows: u32,
    /// Bits needed to represent any row number of this table
    pub bits: u32,
    /// Whether plain indexes into this table take 4 bytes instead of 2
    pub is_large: bool,
}

impl Default for TableRowInfo {
    fn default() -> Self {
        TableRowInfo {
            rows: 0,
            bits: 1,
            is_large: false,
        }
    }
}

/// Sizing oracle for the tables stream.
///
/// Row layouts in ECMA-335 are not fixed: heap indexes shrink to 2 bytes
/// when a heap is small, table and coded indexes shrink when the referenced
/// tables have few rows. `TableInfo` captures the row counts and heap flags
/// of one stream and answers every "how wide is this column" question the
/// row readers ask.
///
/// ## Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.6
///
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_bits: Vec<u8>,
    large_str: bool,
    large_guid: bool,
    large_blob: bool,
}

impl TableInfo {
    /// Build the sizing information from a tables stream header.
    ///
    /// `data` must start at the beginning of the `#~` stream; `valid` is the
    /// stream's table presence vector, whose set bits select which row
    /// counts follow the fixed header.
    ///
    /// # Arguments
    /// * 'data'  - The raw `#~` stream
    /// * 'valid' - The `Valid` bit vector from offset 8 of that stream
    ///
    /// # Errors
    /// Returns an error if the header is truncated or `valid` names a table
    /// this implementation does not know.
    pub fn new(data: &[u8], valid: u64) -> Result<TableInfo> {
        if data.len() < 24 {
            return Err(malformed_error!("Tables stream header is truncated"));
        }

        let heap_sizes = data[6];
        let mut info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::COUNT],
            coded_bits: vec![0; CodedIndexType::COUNT],
            large_str: heap_sizes & 0x01 != 0,
            large_guid: heap_sizes & 0x02 != 0,
            large_blob: heap_sizes & 0x04 != 0,
        };

        let mut offset = 24;
        for bit in 0..64u8 {
            if valid & (1u64 << bit) == 0 {
                continue;
            }

            let Some(id) = TableId::from_bit(bit) else {
                return Err(malformed_error!(
                    "Valid vector names unknown table {:#04x}",
                    bit
                ));
            };

            let count = read_le_at::<u32>(data, &mut offset)?;
            info.rows[id as usize] = TableRowInfo {
                rows: count,
                bits: (32 - count.leading_zeros()).max(1),
                is_large: count > u32::from(u16::MAX),
            };
        }

        for ci_type in CodedIndexType::iter() {
            info.coded_bits[ci_type as usize] = info.compute_coded_bits(ci_type);
        }

        Ok(info)
    }

    /// Build sizing information directly from row counts, for crafted table
    /// bytes in tests.
    #[cfg(test)]
    pub fn new_test(
        counts: &[(TableId, u32)],
        large_str: bool,
        large_guid: bool,
        large_blob: bool,
    ) -> TableInfo {
        let mut info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::COUNT],
            coded_bits: vec![0; CodedIndexType::COUNT],
            large_str,
            large_guid,
            large_blob,
        };

        for &(id, count) in counts {
            info.rows[id as usize] = TableRowInfo {
                rows: count,
                bits: (32 - count.leading_zeros()).max(1),
                is_large: count > u32::from(u16::MAX),
            };
        }

        for ci_type in CodedIndexType::iter() {
            info.coded_bits[ci_type as usize] = info.compute_coded_bits(ci_type);
        }

        info
    }

    fn compute_coded_bits(&self, ci_type: CodedIndexType) -> u8 {
        let tables = ci_type.tables();
        let tag_bits = usize::BITS - (tables.len() - 1).leading_zeros();
        let row_bits = tables
            .iter()
            .map(|&id| self.rows[id as usize].bits)
            .max()
            .unwrap_or(1);

        (tag_bits + row_bits) as u8
    }

    /// Number of rows the stream declares for `table`, zero when absent.
    #[must_use]
    pub fn row_count(&self, table: TableId) -> u32 {
        self.rows[table as usize].rows
    }

    /// Whether plain indexes into `table` take 4 bytes.
    #[must_use]
    pub fn is_large(&self, table: TableId) -> bool {
        self.rows[table as usize].is_large
    }

    /// Byte width of a plain index into `table`.
    #[must_use]
    pub fn table_index_bytes(&self, table: TableId) -> u32 {
        if self.is_large(table) {
            4
        } else {
            2
        }
    }

    /// Whether `#Strings` indexes take 4 bytes.
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.large_str
    }

    /// Whether `#GUID` indexes take 4 bytes.
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.large_guid
    }

    /// Whether `#Blob` indexes take 4 bytes.
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.large_blob
    }

    /// Byte width of a `#Strings` index.
    #[must_use]
    pub fn str_bytes(&self) -> u32 {
        if self.large_str {
            4
        } else {
            2
        }
    }

    /// Byte width of a `#GUID` index.
    #[must_use]
    pub fn guid_bytes(&self) -> u32 {
        if self.large_guid {
            4
        } else {
            2
        }
    }

    /// Byte width of a `#Blob` index.
    #[must_use]
    pub fn blob_bytes(&self) -> u32 {
        if self.large_blob {
            4
        } else {
            2
        }
    }

    /// Total bits a coded index of `ci_type` needs, tag plus row.
    #[must_use]
    pub fn coded_index_bits(&self, ci_type: CodedIndexType) -> u8 {
        self.coded_bits[ci_type as usize]
    }

    /// Byte width of a coded index column of `ci_type`.
    #[must_use]
    pub fn coded_index_bytes(&self, ci_type: CodedIndexType) -> u32 {
        if self.coded_index_bits(ci_type) > 16 {
            4
        } else {
            2
        }
    }

    /// Split a raw coded index value into the table it selects and the row
    /// inside that table.
    ///
    /// # Errors
    /// Returns an error if the tag bits do not name a member table of the
    /// family.
    pub fn decode_coded_index(
        &self,
        value: u32,
        ci_type: CodedIndexType,
    ) -> Result<(TableId, u32)> {
        let tables = ci_type.tables();
        let tag_bits = usize::BITS - (tables.len() - 1).leading_zeros();
        let tag = (value as usize) & ((1 << tag_bits) - 1);

        let Some(&table) = tables.get(tag) else {
            return Err(malformed_error!(
                "Coded index tag {} has no table in this family",
                tag
            ));
        };

        Ok((table, value >> tag_bits))
    }

    /// Byte size of one row of `table` under this stream's sizing.
    ///
    /// Covers every ECMA-335 table so a stream can be walked to locate
    /// tables that follow ones this crate never materializes.
    #[must_use]
    #[rustfmt::skip]
    pub fn row_size(&self, table: TableId) -> u32 {
        let s = self.str_bytes();
        let g = self.guid_bytes();
        let b = self.blob_bytes();
        let t = |id: TableId| self.table_index_bytes(id);
        let c = |ci: CodedIndexType| self.coded_index_bytes(ci);

        match table {
            TableId::Module                 => 2 + s + 3 * g,
            TableId::TypeRef                => c(CodedIndexType::ResolutionScope) + 2 * s,
            TableId::TypeDef                => 4 + 2 * s + c(CodedIndexType::TypeDefOrRef)
                                                + t(TableId::Field) + t(TableId::MethodDef),
            TableId::FieldPtr               => t(TableId::Field),
            TableId::Field                  => 2 + s + b,
            TableId::MethodPtr              => t(TableId::MethodDef),
            TableId::MethodDef              => 8 + s + b + t(TableId::Param),
            TableId::ParamPtr               => t(TableId::Param),
            TableId::Param                  => 4 + s,
            TableId::InterfaceImpl          => t(TableId::TypeDef) + c(CodedIndexType::TypeDefOrRef),
            TableId::MemberRef              => c(CodedIndexType::MemberRefParent) + s + b,
            TableId::Constant               => 2 + c(CodedIndexType::HasConstant) + b,
            TableId::CustomAttribute        => c(CodedIndexType::HasCustomAttribute)
                                                + c(CodedIndexType::CustomAttributeType) + b,
            TableId::FieldMarshal           => c(CodedIndexType::HasFieldMarshal) + b,
            TableId::DeclSecurity           => 2 + c(CodedIndexType::HasDeclSecurity) + b,
            TableId::ClassLayout            => 6 + t(TableId::TypeDef),
            TableId::FieldLayout            => 4 + t(TableId::Field),
            TableId::StandAloneSig          => b,
            TableId::EventMap               => t(TableId::TypeDef) + t(TableId::Event),
            TableId::EventPtr               => t(TableId::Event),
            TableId::Event                  => 2 + s + c(CodedIndexType::TypeDefOrRef),
            TableId::PropertyMap            => t(TableId::TypeDef) + t(TableId::Property),
            TableId::PropertyPtr            => t(TableId::Property),
            TableId::Property               => 2 + s + b,
            TableId::MethodSemantics        => 2 + t(TableId::MethodDef) + c(CodedIndexType::HasSemantics),
            TableId::MethodImpl             => t(TableId::TypeDef) + 2 * c(CodedIndexType::MethodDefOrRef),
            TableId::ModuleRef              => s,
            TableId::TypeSpec               => b,
            TableId::ImplMap                => 2 + c(CodedIndexType::MemberForwarded) + s + t(TableId::ModuleRef),
            TableId::FieldRVA               => 4 + t(TableId::Field),
            TableId::EncLog                 => 8,
            TableId::EncMap                 => 4,
            TableId::Assembly               => 16 + b + 2 * s,
            TableId::AssemblyProcessor      => 4,
            TableId::AssemblyOS             => 12,
            TableId::AssemblyRef            => 12 + 2 * b + 2 * s,
            TableId::AssemblyRefProcessor   => 4 + t(TableId::AssemblyRef),
            TableId::AssemblyRefOS          => 12 + t(TableId::AssemblyRef),
            TableId::File                   => 4 + s + b,
            TableId::ExportedType           => 8 + 2 * s + c(CodedIndexType::Implementation),
            TableId::ManifestResource       => 8 + s + c(CodedIndexType::Implementation),
            TableId::NestedClass            => 2 * t(TableId::TypeDef),
            TableId::GenericParam           => 4 + c(CodedIndexType::TypeOrMethodDef) + s,
            TableId::MethodSpec             => c(CodedIndexType::MethodDefOrRef) + b,
            TableId::GenericParamConstraint => t(TableId::GenericParam) + c(CodedIndexType::TypeDefOrRef),
        }
    }
}
