use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableInfoRef},
        token::Token,
    },
    Result,
};

#[derive(Clone, Debug)]
/// Row of the `MemberRef` table, a reference to a method or field of
/// another module, or to a member of a generic instantiation.
/// Table Id = 0x0A
pub struct MemberRefRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// a `MemberRefParent` coded index naming the owner
    pub class: CodedIndex,
    /// an index into the String heap
    pub name: u32,
    /// an index into the Blob heap, a `MethodRefSig` or `FieldSig`
    pub signature: u32,
}

impl RowReadable for MemberRefRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        /* class */     sizes.coded_index_bytes(CodedIndexType::MemberRefParent) +
        /* name */      sizes.str_bytes() +
        /* signature */ sizes.blob_bytes()
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MemberRefRaw {
            rid,
            token: Token::new(0x0A00_0000 + rid),
            offset: *offset,
            class: CodedIndex::read(data, offset, sizes, CodedIndexType::MemberRefParent)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableId, TableInfo};

    use super::*;

    #[test]
    fn crafted_short() {
        let data = vec![
            0x09, 0x00, // class, tag 1 = TypeRef, row 1
            0x5A, 0x00, // name
            0x22, 0x00, // signature
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::MemberRef, 1), (TableId::TypeRef, 2)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MemberRefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.rid, 1);
        assert_eq!(row.token.value(), 0x0A00_0001);
        assert_eq!(row.class, CodedIndex::new(TableId::TypeRef, 1));
        assert_eq!(row.class.token, Token::new(0x0100_0001));
        assert_eq!(row.name, 0x5A);
        assert_eq!(row.signature, 0x22);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x0C, 0x02, 0x00, 0x00, // class, tag 4 = TypeSpec
            0x02, 0x02, 0x02, 0x02, // name
            0x03, 0x03, 0x03, 0x03, // signature
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[
                (TableId::MemberRef, 1),
                (TableId::TypeSpec, u32::from(u16::MAX) + 2),
            ],
            true,
            true,
            true,
        ));
        let table = MetadataTable::<MemberRefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.class, CodedIndex::new(TableId::TypeSpec, 0x41));
        assert_eq!(row.name, 0x0202_0202);
    }
}
