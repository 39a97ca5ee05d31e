use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

#[derive(Clone, Debug)]
/// Row of the `MethodDef` table, one method definition. `rva` locates the
/// method body inside the image and is zero for abstract, runtime and
/// P/Invoke methods. Table Id = 0x06
pub struct MethodDefRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// RVA of the method body, zero when the method has no IL
    pub rva: u32,
    /// a 2-byte bitmask of `MethodImplAttributes`
    pub impl_flags: u32,
    /// a 2-byte bitmask of `MethodAttributes`
    pub flags: u32,
    /// an index into the String heap
    pub name: u32,
    /// an index into the Blob heap, a `MethodDefSig`
    pub signature: u32,
    /// an index into the `Param` table, first parameter row of this method
    pub param_list: u32,
}

impl RowReadable for MethodDefRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        /* rva */           4 +
        /* impl_flags */    2 +
        /* flags */         2 +
        /* name */          sizes.str_bytes() +
        /* signature */     sizes.blob_bytes() +
        /* param_list */    sizes.table_index_bytes(TableId::Param)
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodDefRaw {
            rid,
            token: Token::new(0x0600_0000 + rid),
            offset: *offset,
            rva: read_le_at::<u32>(data, offset)?,
            impl_flags: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            param_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Param))?,
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
            0x50, 0x20, 0x00, 0x00, // rva
            0x00, 0x00, // impl_flags
            0x96, 0x00, // flags, public hidebysig static
            0x2F, 0x00, // name
            0x10, 0x00, // signature
            0x01, 0x00, // param_list
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::MethodDef, 1), (TableId::Param, 2)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MethodDefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.rid, 1);
        assert_eq!(row.token.value(), 0x0600_0001);
        assert_eq!(row.rva, 0x2050);
        assert_eq!(row.impl_flags, 0);
        assert_eq!(row.flags, 0x0096);
        assert_eq!(row.name, 0x2F);
        assert_eq!(row.signature, 0x10);
        assert_eq!(row.param_list, 1);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x00, 0x00, 0x00, 0x00, // rva, no body
            0x01, 0x00, // impl_flags
            0xC6, 0x01, // flags
            0x02, 0x02, 0x02, 0x02, // name
            0x03, 0x03, 0x03, 0x03, // signature
            0x04, 0x04, 0x04, 0x00, // param_list
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[
                (TableId::MethodDef, 1),
                (TableId::Param, u32::from(u16::MAX) + 2),
            ],
            true,
            true,
            true,
        ));
        let table = MetadataTable::<MethodDefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.rva, 0);
        assert_eq!(row.impl_flags, 1);
        assert_eq!(row.flags, 0x01C6);
        assert_eq!(row.name, 0x0202_0202);
        assert_eq!(row.param_list, 0x0004_0404);
    }
}
