use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::read_le,
    metadata::tables::{MetadataTable, RowReadable, TableId, TableInfo, TableInfoRef},
    Error::OutOfBounds,
    Result,
};

/// The `TablesHeader` represents the '#~' stream, which carries the metadata tables
/// used for reflection and execution of a CIL binary.
///
/// Construction validates the stream layout once: the header, the row counts, and
/// that every declared table fits inside the stream. Afterwards, typed views of
/// individual tables are built on demand from the recorded table offsets, so no
/// row data is copied or parsed until it is actually requested.
///
/// # Examples
///
/// ```rust,no_run
/// use cildump::metadata::tables::{MethodDefRaw, TableId};
/// use cildump::TablesHeader;
///
/// # fn example(tables: &TablesHeader) -> cildump::Result<()> {
/// if let Some(methods) = tables.table::<MethodDefRaw>(TableId::MethodDef) {
///     for method in &methods {
///         println!("{} -> RVA {:#010x}", method.token, method.rva);
///     }
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.6 && II.22
pub struct TablesHeader<'a> {
    /// Major version of the table schema, shall be 2
    pub major_version: u8,
    /// Minor version of the table schema, shall be 0
    pub minor_version: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and index widths for all tables
    pub info: TableInfoRef,
    /// The raw '#~' stream
    data: &'a [u8],
    /// Start of each present table, relative to the stream; indexed by `TableId`
    offsets: Vec<Option<usize>>,
}

impl<'a> TablesHeader<'a> {
    /// Parses the stream header and lays out the start offset of every
    /// present table
    ///
    /// # Errors
    /// Returns an error if the data is too short, declares an unknown table, or
    /// the declared rows don't fit into the stream
    pub fn from(data: &'a [u8]) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let valid_bitvec = read_le::<u64>(&data[8..])?;
        if valid_bitvec == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        let info: TableInfoRef = Arc::new(TableInfo::new(data, valid_bitvec)?);

        let mut offsets = vec![None; TableId::COUNT];
        let mut cursor = (24 + valid_bitvec.count_ones() * 4) as usize;
        for table_id in TableId::iter() {
            let rows = info.row_count(table_id);
            if rows == 0 {
                continue;
            }

            let table_bytes = u64::from(rows) * u64::from(info.row_size(table_id));
            offsets[table_id as usize] = Some(cursor);
            cursor = usize::try_from(table_bytes)
                .ok()
                .and_then(|bytes| cursor.checked_add(bytes))
                .ok_or(OutOfBounds)?;
        }

        if cursor > data.len() {
            return Err(OutOfBounds);
        }

        Ok(TablesHeader {
            major_version: read_le::<u8>(&data[4..])?,
            minor_version: read_le::<u8>(&data[5..])?,
            valid: valid_bitvec,
            sorted: read_le::<u64>(&data[16..])?,
            info,
            data,
            offsets,
        })
    }

    /// Number of present tables
    #[must_use]
    pub fn table_count(&self) -> u32 {
        self.valid.count_ones()
    }

    /// Typed view of one table, `None` when it is absent from this binary
    ///
    /// The view borrows the stream data; rows are parsed lazily on access. The row
    /// type `T` must be the one matching `table_id` (`TableId::TypeDef` ->
    /// [`crate::metadata::tables::TypeDefRaw`] and so on), otherwise the rows
    /// come back scrambled.
    #[must_use]
    pub fn table<T: RowReadable>(&self, table_id: TableId) -> Option<MetadataTable<'a, T>> {
        let offset = (*self.offsets.get(table_id as usize)?)?;
        let rows = self.info.row_count(table_id);

        // The stream bounds were checked when the offsets were laid out
        MetadataTable::new(&self.data[offset..], rows, self.info.clone()).ok()
    }

    /// Whether `table_id` has its bit set in the valid vector
    #[must_use]
    pub fn has_table(&self, table_id: TableId) -> bool {
        (self.valid & (1u64 << (table_id as u8))) != 0
    }

    /// Iterates the present tables in table id order
    pub fn present_tables(&self) -> impl Iterator<Item = TableId> + '_ {
        TableId::iter().filter(|&table_id| self.has_table(table_id))
    }

    /// Row count of `table_id`, 0 when the table is absent
    #[must_use]
    pub fn table_row_count(&self, table_id: TableId) -> u32 {
        self.info.row_count(table_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tables::{MethodDefRaw, ModuleRaw, TypeDefRaw};

    /// '#~' stream with one Module row, two TypeDef rows and three MethodDef rows,
    /// all heap and table indexes 2 bytes wide.
    fn tables_stream() -> Vec<u8> {
        let mut data = Vec::new();

        data.extend_from_slice(&0u32.to_le_bytes()); // reserved
        data.push(2); // major_version
        data.push(0); // minor_version
        data.push(0); // heap_sizes - all heaps small
        data.push(1); // reserved
        data.extend_from_slice(&0x45u64.to_le_bytes()); // valid: Module | TypeDef | MethodDef
        data.extend_from_slice(&0u64.to_le_bytes()); // sorted

        data.extend_from_slice(&1u32.to_le_bytes()); // Module rows
        data.extend_from_slice(&2u32.to_le_bytes()); // TypeDef rows
        data.extend_from_slice(&3u32.to_le_bytes()); // MethodDef rows

        #[rustfmt::skip]
        data.extend_from_slice(&[
            // Module
            0x00, 0x00, /* generation */ 0x15, 0x00, /* name */
            0x01, 0x00, /* mvid */ 0x00, 0x00, /* encid */ 0x00, 0x00, /* encbaseid */
            // TypeDef <Module>
            0x00, 0x00, 0x00, 0x00, /* flags */ 0x20, 0x00, /* name */ 0x00, 0x00, /* namespace */
            0x00, 0x00, /* extends */ 0x01, 0x00, /* field_list */ 0x01, 0x00, /* method_list */
            // TypeDef Program : TypeRef[1]
            0x01, 0x00, 0x10, 0x00, /* flags */ 0x40, 0x00, /* name */ 0x30, 0x00, /* namespace */
            0x05, 0x00, /* extends */ 0x01, 0x00, /* field_list */ 0x01, 0x00, /* method_list */
            // MethodDef Main
            0x50, 0x20, 0x00, 0x00, /* rva */ 0x00, 0x00, /* impl_flags */ 0x96, 0x00, /* flags */
            0x50, 0x00, /* name */ 0x10, 0x00, /* signature */ 0x01, 0x00, /* param_list */
            // MethodDef Helper
            0x80, 0x20, 0x00, 0x00, /* rva */ 0x00, 0x00, /* impl_flags */ 0x91, 0x00, /* flags */
            0x5A, 0x00, /* name */ 0x18, 0x00, /* signature */ 0x01, 0x00, /* param_list */
            // MethodDef .ctor
            0xA0, 0x20, 0x00, 0x00, /* rva */ 0x00, 0x00, /* impl_flags */ 0x86, 0x18, /* flags */
            0x60, 0x00, /* name */ 0x20, 0x00, /* signature */ 0x01, 0x00, /* param_list */
        ]);

        data
    }

    #[test]
    fn crafted_stream() {
        let data = tables_stream();
        let header = TablesHeader::from(&data).unwrap();

        assert_eq!(header.major_version, 2);
        assert_eq!(header.minor_version, 0);
        assert_eq!(header.table_count(), 3);
        assert!(header.has_table(TableId::Module));
        assert!(header.has_table(TableId::TypeDef));
        assert!(header.has_table(TableId::MethodDef));
        assert!(!header.has_table(TableId::Field));
        assert!(!header.has_table(TableId::Assembly));

        let present: Vec<TableId> = header.present_tables().collect();
        assert_eq!(
            present,
            vec![TableId::Module, TableId::TypeDef, TableId::MethodDef]
        );

        assert_eq!(header.table_row_count(TableId::Module), 1);
        assert_eq!(header.table_row_count(TableId::TypeDef), 2);
        assert_eq!(header.table_row_count(TableId::MethodDef), 3);
        assert_eq!(header.table_row_count(TableId::Param), 0);
    }

    #[test]
    fn crafted_rows() {
        let data = tables_stream();
        let header = TablesHeader::from(&data).unwrap();

        let modules = header.table::<ModuleRaw>(TableId::Module).unwrap();
        let module = modules.get(1).unwrap();
        assert_eq!(module.name, 0x15);
        assert_eq!(module.mvid, 1);

        let types = header.table::<TypeDefRaw>(TableId::TypeDef).unwrap();
        assert_eq!(types.row_count(), 2);
        let program = types.get(2).unwrap();
        assert_eq!(program.token.value(), 0x0200_0002);
        assert_eq!(program.flags, 0x0010_0001);
        assert_eq!(program.extends.tag, TableId::TypeRef);
        assert_eq!(program.extends.row, 1);

        let methods = header.table::<MethodDefRaw>(TableId::MethodDef).unwrap();
        let tokens: Vec<u32> = methods.iter().map(|row| row.token.value()).collect();
        assert_eq!(tokens, vec![0x0600_0001, 0x0600_0002, 0x0600_0003]);
        assert_eq!(methods.get(3).unwrap().rva, 0x20A0);

        assert!(header.table::<ModuleRaw>(TableId::Field).is_none());
    }

    #[test]
    fn rejects_short_data() {
        assert!(TablesHeader::from(&[0_u8; 16]).is_err());
    }

    #[test]
    fn rejects_empty_valid_bitvec() {
        let mut data = tables_stream();
        data[8..16].copy_from_slice(&0u64.to_le_bytes());

        assert!(TablesHeader::from(&data).is_err());
    }

    #[test]
    fn rejects_truncated_rows() {
        let data = tables_stream();
        assert!(TablesHeader::from(&data[..data.len() - 10]).is_err());
    }
}
