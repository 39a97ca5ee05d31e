use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableInfoRef},
        token::Token,
    },
    Result,
};

#[derive(Clone, Debug)]
/// Row of the `AssemblyRef` table, one referenced assembly with its version
/// and public key token. Table Id = 0x23
pub struct AssemblyRefRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// major part of the referenced version
    pub major_version: u32,
    /// minor part of the referenced version
    pub minor_version: u32,
    /// build part of the referenced version
    pub build_number: u32,
    /// revision part of the referenced version
    pub revision_number: u32,
    /// a 4-byte bitmask of `AssemblyFlags`
    pub flags: u32,
    /// an index into the Blob heap, a full key or an 8-byte token
    pub public_key_or_token: u32,
    /// an index into the String heap
    pub name: u32,
    /// an index into the String heap, the culture or nil
    pub culture: u32,
    /// an index into the Blob heap, a hash of the referenced file or nil
    pub hash_value: u32,
}

impl RowReadable for AssemblyRefRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        /* version parts */        4 * 2 +
        /* flags */                4 +
        /* public_key_or_token */  sizes.blob_bytes() +
        /* name */                 sizes.str_bytes() +
        /* culture */              sizes.str_bytes() +
        /* hash_value */           sizes.blob_bytes()
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(AssemblyRefRaw {
            rid,
            token: Token::new(0x2300_0000 + rid),
            offset: *offset,
            major_version: u32::from(read_le_at::<u16>(data, offset)?),
            minor_version: u32::from(read_le_at::<u16>(data, offset)?),
            build_number: u32::from(read_le_at::<u16>(data, offset)?),
            revision_number: u32::from(read_le_at::<u16>(data, offset)?),
            flags: read_le_at::<u32>(data, offset)?,
            public_key_or_token: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            culture: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            hash_value: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
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
            0x04, 0x00, // major
            0x00, 0x00, // minor
            0x00, 0x00, // build
            0x00, 0x00, // revision
            0x00, 0x00, 0x00, 0x00, // flags
            0x10, 0x00, // public_key_or_token
            0x23, 0x00, // name
            0x00, 0x00, // culture
            0x00, 0x00, // hash_value
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::AssemblyRef, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<AssemblyRefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.rid, 1);
        assert_eq!(row.token.value(), 0x2300_0001);
        assert_eq!(row.major_version, 4);
        assert_eq!(row.minor_version, 0);
        assert_eq!(row.flags, 0);
        assert_eq!(row.public_key_or_token, 0x10);
        assert_eq!(row.name, 0x23);
        assert_eq!(row.culture, 0);
        assert_eq!(row.hash_value, 0);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x06, 0x00, // major
            0x02, 0x00, // minor
            0x07, 0x00, // build
            0x09, 0x00, // revision
            0x01, 0x00, 0x00, 0x00, // flags
            0x02, 0x02, 0x02, 0x02, // public_key_or_token
            0x03, 0x03, 0x03, 0x03, // name
            0x04, 0x04, 0x04, 0x04, // culture
            0x05, 0x05, 0x05, 0x05, // hash_value
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::AssemblyRef, 1)],
            true,
            true,
            true,
        ));
        let table = MetadataTable::<AssemblyRefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.major_version, 6);
        assert_eq!(row.build_number, 7);
        assert_eq!(row.public_key_or_token, 0x0202_0202);
        assert_eq!(row.hash_value, 0x0505_0505);
    }
}
