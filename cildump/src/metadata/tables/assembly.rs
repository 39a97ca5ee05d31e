use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableInfoRef},
        token::Token,
    },
    Result,
};

/// `AssemblyHashAlgorithm` value for no hashing
pub const ASSEMBLY_HASH_ALG_NONE: u32 = 0x0000;
/// `AssemblyHashAlgorithm` value for MD5
pub const ASSEMBLY_HASH_ALG_MD5: u32 = 0x8003;
/// `AssemblyHashAlgorithm` value for SHA-1
pub const ASSEMBLY_HASH_ALG_SHA1: u32 = 0x8004;

#[derive(Clone, Debug)]
/// Row of the `Assembly` table. At most one row exists; images without it
/// are plain modules rather than assemblies. Table Id = 0x20
pub struct AssemblyRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// an `AssemblyHashAlgorithm` constant
    pub hash_alg_id: u32,
    /// major part of the assembly version
    pub major_version: u32,
    /// minor part of the assembly version
    pub minor_version: u32,
    /// build part of the assembly version
    pub build_number: u32,
    /// revision part of the assembly version
    pub revision_number: u32,
    /// a 4-byte bitmask of `AssemblyFlags`
    pub flags: u32,
    /// an index into the Blob heap, the full public key or nil
    pub public_key: u32,
    /// an index into the String heap
    pub name: u32,
    /// an index into the String heap, the culture or nil
    pub culture: u32,
}

impl RowReadable for AssemblyRaw {
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        /* hash_alg_id */     4 +
        /* version parts */   4 * 2 +
        /* flags */           4 +
        /* public_key */      sizes.blob_bytes() +
        /* name */            sizes.str_bytes() +
        /* culture */         sizes.str_bytes()
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(AssemblyRaw {
            rid,
            token: Token::new(0x2000_0000 + rid),
            offset: *offset,
            hash_alg_id: read_le_at::<u32>(data, offset)?,
            major_version: u32::from(read_le_at::<u16>(data, offset)?),
            minor_version: u32::from(read_le_at::<u16>(data, offset)?),
            build_number: u32::from(read_le_at::<u16>(data, offset)?),
            revision_number: u32::from(read_le_at::<u16>(data, offset)?),
            flags: read_le_at::<u32>(data, offset)?,
            public_key: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            culture: read_le_at_dyn(data, offset, sizes.is_large_str())?,
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
            0x04, 0x80, 0x00, 0x00, // hash_alg_id, SHA1
            0x01, 0x00, // major
            0x02, 0x00, // minor
            0x03, 0x00, // build
            0x04, 0x00, // revision
            0x00, 0x00, 0x00, 0x00, // flags
            0x00, 0x00, // public_key
            0x0E, 0x00, // name
            0x00, 0x00, // culture
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::Assembly, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<AssemblyRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.rid, 1);
        assert_eq!(row.token.value(), 0x2000_0001);
        assert_eq!(row.hash_alg_id, ASSEMBLY_HASH_ALG_SHA1);
        assert_eq!(row.major_version, 1);
        assert_eq!(row.minor_version, 2);
        assert_eq!(row.build_number, 3);
        assert_eq!(row.revision_number, 4);
        assert_eq!(row.flags, 0);
        assert_eq!(row.public_key, 0);
        assert_eq!(row.name, 0x0E);
        assert_eq!(row.culture, 0);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x00, 0x00, 0x00, 0x00, // hash_alg_id
            0x01, 0x00, // major
            0x00, 0x00, // minor
            0x00, 0x00, // build
            0x00, 0x00, // revision
            0x01, 0x00, 0x00, 0x00, // flags
            0x02, 0x02, 0x02, 0x02, // public_key
            0x03, 0x03, 0x03, 0x03, // name
            0x04, 0x04, 0x04, 0x04, // culture
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::Assembly, 1)],
            true,
            true,
            true,
        ));
        let table = MetadataTable::<AssemblyRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.hash_alg_id, ASSEMBLY_HASH_ALG_NONE);
        assert_eq!(row.flags, 1);
        assert_eq!(row.public_key, 0x0202_0202);
        assert_eq!(row.name, 0x0303_0303);
        assert_eq!(row.culture, 0x0404_0404);
    }
}
