use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableInfoRef},
        token::Token,
    },
    Result,
};

#[allow(non_snake_case)]
/// All possible flags for `ParamAttributes`
pub mod ParamAttributes {
    /// Param is [In]
    pub const IN: u32 = 0x0001;
    /// Param is [out]
    pub const OUT: u32 = 0x0002;
    /// Param is optional
    pub const OPTIONAL: u32 = 0x0010;
    /// Param has default value
    pub const HAS_DEFAULT: u32 = 0x1000;
    /// Param has `FieldMarshal`
    pub const HAS_FIELD_MARSHAL: u32 = 0x2000;
}

#[derive(Clone, Debug)]
/// Row of the `Param` table, one declared parameter name. `sequence` is the
/// 1-based parameter position, with zero naming the return value.
/// Table Id = 0x08
pub struct ParamRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// a 2-byte bitmask of `ParamAttributes`
    pub flags: u32,
    /// the parameter position, zero for the return value
    pub sequence: u32,
    /// an index into the String heap
    pub name: u32,
}

impl RowReadable for ParamRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        /* flags */    2 +
        /* sequence */ 2 +
        /* name */     sizes.str_bytes()
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(ParamRaw {
            rid,
            token: Token::new(0x0800_0000 + rid),
            offset: *offset,
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            sequence: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
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
            0x00, 0x00, // flags
            0x01, 0x00, // sequence
            0x62, 0x00, // name
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::Param, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<ParamRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.rid, 1);
        assert_eq!(row.token.value(), 0x0800_0001);
        assert_eq!(row.flags, 0);
        assert_eq!(row.sequence, 1);
        assert_eq!(row.name, 0x62);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x10, 0x00, // flags
            0x02, 0x00, // sequence
            0x02, 0x02, 0x02, 0x02, // name
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Param, 1)], true, true, true));
        let table = MetadataTable::<ParamRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.flags, 0x10);
        assert_eq!(row.sequence, 2);
        assert_eq!(row.name, 0x0202_0202);
    }
}
