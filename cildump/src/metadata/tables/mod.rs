//! Typed access to the metadata tables of the `#~` stream.
//!
//! The tables stream is a packed sequence of fixed-size rows whose column
//! widths depend on heap sizes and row counts. This module provides the
//! sizing oracle ([`TableInfo`]), the row trait ([`RowReadable`]), a generic
//! table wrapper ([`MetadataTable`]) and the raw row types for every table
//! the IL writer consumes. Raw rows keep their heap and table indexes
//! unresolved; callers look names and signatures up through the heaps when
//! they need them.
//!
//! ## References
//!
//! - [ECMA-335 Partition II, Section 22](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

mod assembly;
mod assemblyref;
mod codedindex;
mod field;
mod interfaceimpl;
mod memberref;
mod methoddef;
mod module;
mod param;
mod standalonesig;
mod tableid;
mod tableinfo;
mod typedef;
mod typeref;
mod typespec;

use std::marker::PhantomData;

use crate::Result;

pub use assembly::{
    AssemblyRaw, ASSEMBLY_HASH_ALG_MD5, ASSEMBLY_HASH_ALG_NONE, ASSEMBLY_HASH_ALG_SHA1,
};
pub use assemblyref::AssemblyRefRaw;
pub use codedindex::{CodedIndex, CodedIndexType};
pub use field::{FieldAttributes, FieldRaw};
pub use interfaceimpl::InterfaceImplRaw;
pub use memberref::MemberRefRaw;
pub use methoddef::MethodDefRaw;
pub use module::ModuleRaw;
pub use param::{ParamAttributes, ParamRaw};
pub use standalonesig::StandAloneSigRaw;
pub use tableid::TableId;
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};
pub use typedef::{TypeAttributes, TypeDefRaw};
pub use typeref::TypeRefRaw;
pub use typespec::TypeSpecRaw;

/// Interface of a raw metadata table row.
///
/// Implementors describe how wide one of their rows is under a given
/// sizing and how to parse one row from the packed table bytes. Row
/// identifiers are 1-based throughout, matching the CLI token scheme.
pub trait RowReadable: Sized + Send {
    /// Byte size of one row under the given sizing.
    fn row_size(sizes: &TableInfoRef) -> u32;

    /// Parse the row with id `rid` from `data`, advancing `offset` past it.
    ///
    /// # Errors
    /// Returns an error if the buffer ends before the row does or a column
    /// holds a value that cannot be decoded.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self>;
}

/// One metadata table, wrapping its packed bytes with typed row access.
///
/// Rows are parsed on demand; `get` uses 1-based indexes and `iter` walks
/// the table front to back.
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    row_count: u32,
    row_size: u32,
    sizes: TableInfoRef,
    _phantom: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// Wrap the packed bytes of one table.
    ///
    /// ## Arguments
    /// * `data`      - The packed rows, starting at row 1
    /// * `row_count` - Number of rows the stream declares
    /// * `sizes`     - Sizing for this stream
    ///
    /// # Errors
    /// Returns an error if `data` is too short to hold `row_count` rows.
    pub fn new(data: &'a [u8], row_count: u32, sizes: TableInfoRef) -> Result<Self> {
        let row_size = T::row_size(&sizes);
        if (data.len() as u64) < u64::from(row_count) * u64::from(row_size) {
            return Err(malformed_error!(
                "Table data of {} bytes cannot hold {} rows of {} bytes",
                data.len(),
                row_count,
                row_size
            ));
        }

        Ok(MetadataTable {
            data,
            row_count,
            row_size,
            sizes,
            _phantom: PhantomData,
        })
    }

    /// Total byte size of this table.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.row_size)
    }

    /// Byte size of a single row.
    #[must_use]
    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Number of rows in this table.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Parse the row with the given 1-based index.
    ///
    /// Returns `None` for index `0` (the null reference), for indexes past
    /// the end of the table, and for rows that fail to parse.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<T> {
        if index == 0 || self.row_count < index {
            return None;
        }

        let mut offset = (index as usize - 1) * self.row_size as usize;
        T::row_read(self.data, &mut offset, index, &self.sizes).ok()
    }

    /// Iterate the rows front to back.
    #[must_use]
    pub fn iter(&'a self) -> TableIterator<'a, T> {
        TableIterator {
            table: self,
            current_row: 0,
            current_offset: 0,
        }
    }
}

impl<'a, T: RowReadable> IntoIterator for &'a MetadataTable<'a, T> {
    type Item = T;
    type IntoIter = TableIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sequential iterator over the rows of a [`MetadataTable`].
///
/// Rows are parsed as the iterator advances; a row that fails to parse
/// ends the iteration.
pub struct TableIterator<'a, T> {
    table: &'a MetadataTable<'a, T>,
    current_row: u32,
    current_offset: usize,
}

impl<'a, T: RowReadable> Iterator for TableIterator<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.table.row_count {
            return None;
        }

        match T::row_read(
            self.table.data,
            &mut self.current_offset,
            self.current_row + 1,
            &self.table.sizes,
        ) {
            Ok(row) => {
                self.current_row += 1;
                Some(row)
            }
            Err(_) => None,
        }
    }
}
