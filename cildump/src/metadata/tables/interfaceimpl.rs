use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

#[derive(Clone, Debug)]
/// Row of the `InterfaceImpl` table, recording that a type implements an
/// interface. Table Id = 0x09
pub struct InterfaceImplRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// an index into the `TypeDef` table, the implementing type
    pub class: u32,
    /// a `TypeDefOrRef` coded index naming the implemented interface
    pub interface: CodedIndex,
}

impl RowReadable for InterfaceImplRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        /* class */     sizes.table_index_bytes(TableId::TypeDef) +
        /* interface */ sizes.coded_index_bytes(CodedIndexType::TypeDefOrRef)
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(InterfaceImplRaw {
            rid,
            token: Token::new(0x0900_0000 + rid),
            offset: *offset,
            class: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            interface: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeDefOrRef)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted_short() {
        let data = vec![
            0x02, 0x00, // class
            0x09, 0x00, // interface, tag 1 = TypeRef, row 2
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[
                (TableId::InterfaceImpl, 1),
                (TableId::TypeDef, 3),
                (TableId::TypeRef, 4),
            ],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<InterfaceImplRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.rid, 1);
        assert_eq!(row.token.value(), 0x0900_0001);
        assert_eq!(row.class, 2);
        assert_eq!(row.interface, CodedIndex::new(TableId::TypeRef, 2));
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x02, 0x02, 0x02, 0x00, // class
            0x04, 0x04, 0x04, 0x00, // interface, tag 0 = TypeDef
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[
                (TableId::InterfaceImpl, 1),
                (TableId::TypeDef, u32::from(u16::MAX) + 2),
            ],
            true,
            true,
            true,
        ));
        let table = MetadataTable::<InterfaceImplRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.class, 0x0002_0202);
        assert_eq!(
            row.interface,
            CodedIndex::new(TableId::TypeDef, 0x0004_0404 >> 2)
        );
    }
}
