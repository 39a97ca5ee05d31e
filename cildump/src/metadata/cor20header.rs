//! The CLI (Cor20) header of a managed image.
//!
//! The [`Cor20Header`] sits at the start of the `IMAGE_DIRECTORY_ENTRY_COM_DESCRIPTOR`
//! data directory and locates the metadata, resources and strong-name signature of a
//! managed image. Parsing validates the fixed size and the reserved fields per
//! ECMA-335 II.25.3.3.
//!
//! # Reference
//! - [ECMA-335 II.25.3.3](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// `COMIMAGE_FLAGS_ILONLY` - the image contains only IL code.
pub const COMIMAGE_FLAGS_ILONLY: u32 = 0x0000_0001;
/// `COMIMAGE_FLAGS_32BITREQUIRED` - the image requires a 32-bit process.
pub const COMIMAGE_FLAGS_32BITREQUIRED: u32 = 0x0000_0002;
/// `COMIMAGE_FLAGS_STRONGNAMESIGNED` - the image is strong-name signed.
pub const COMIMAGE_FLAGS_STRONGNAMESIGNED: u32 = 0x0000_0008;
/// `COMIMAGE_FLAGS_NATIVE_ENTRYPOINT` - the entry point is an unmanaged RVA.
pub const COMIMAGE_FLAGS_NATIVE_ENTRYPOINT: u32 = 0x0000_0010;

/// The CLI header of a managed PE image.
///
/// All fields defined by ECMA-335 for the CLR 2.0 header; the renderer consumes
/// `flags` (for `.corflags`) and `entry_point_token`, the metadata layer consumes
/// the metadata RVA and size.
pub struct Cor20Header {
    /// Size of header in bytes, always 72
    pub cb: u32,
    /// The minimum major version of the runtime required to run this program
    pub major_runtime_version: u16,
    /// The minor portion of the version
    pub minor_runtime_version: u16,
    /// RVA of the physical metadata
    pub meta_data_rva: u32,
    /// Size of the physical metadata
    pub meta_data_size: u32,
    /// Runtime flags (`COMIMAGE_FLAGS_*`)
    pub flags: u32,
    /// Token for the `MethodDef` or `File` of the image entry point
    pub entry_point_token: u32,
    /// RVA of implementation-specific resources
    pub resource_rva: u32,
    /// Size of implementation-specific resources
    pub resource_size: u32,
    /// RVA of the hash data used by the CLI loader for binding and versioning
    pub strong_name_signature_rva: u32,
    /// Size of the hash data
    pub strong_name_signature_size: u32,
    /// Always 0
    pub code_manager_table_rva: u32,
    /// Always 0
    pub code_manager_table_size: u32,
    /// RVA of an array of vtable fixup locations
    pub vtable_fixups_rva: u32,
    /// Size of the vtable fixup array
    pub vtable_fixups_size: u32,
    /// Always 0
    pub export_address_table_jmp_rva: u32,
    /// Always 0
    pub export_address_table_jmp_size: u32,
    /// Always 0
    pub managed_native_header_rva: u32,
    /// Always 0
    pub managed_native_header_size: u32,
}

/// RVA/size directory pairs must be zero together or non-zero together.
fn check_pair(rva: u32, size: u32, what: &str) -> Result<()> {
    if (rva == 0) != (size == 0) {
        return Err(malformed_error!("{} RVA/size pair is inconsistent", what));
    }
    Ok(())
}

impl Cor20Header {
    /// Parses a Cor20 header from a slice beginning at the CLR runtime
    /// header.
    ///
    /// # Errors
    /// Returns an error if fewer than 72 bytes are available or a field fails
    /// the ECMA-335 II.25.3.3 checks.
    pub fn read(data: &[u8]) -> Result<Cor20Header> {
        const VALID_FLAGS: u32 = 0x0000_001F;

        if data.len() < 72 {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(data);

        let cb = parser.read_le::<u32>()?;
        if cb != 72 {
            return Err(malformed_error!(
                "Invalid CLR header size: expected 72, got {}",
                cb
            ));
        }

        let major_runtime_version = parser.read_le::<u16>()?;
        let minor_runtime_version = parser.read_le::<u16>()?;
        if major_runtime_version == 0 || major_runtime_version > 10 {
            return Err(malformed_error!(
                "Invalid major runtime version: {}",
                major_runtime_version
            ));
        }

        let meta_data_rva = parser.read_le::<u32>()?;
        let meta_data_size = parser.read_le::<u32>()?;
        if meta_data_rva == 0 || meta_data_size == 0 {
            return Err(malformed_error!("Metadata RVA and size cannot be zero"));
        }
        if meta_data_size > 0x1000_0000 {
            return Err(malformed_error!(
                "Metadata size {} exceeds reasonable limit (256MB)",
                meta_data_size
            ));
        }

        let flags = parser.read_le::<u32>()?;
        if flags & !VALID_FLAGS != 0 {
            return Err(malformed_error!(
                "Invalid CLR flags: 0x{:08X} contains undefined bits",
                flags
            ));
        }

        // Entry point can be a MethodDef token, a File token, or 0.
        let entry_point_token = parser.read_le::<u32>()?;

        let resource_rva = parser.read_le::<u32>()?;
        let resource_size = parser.read_le::<u32>()?;
        check_pair(resource_rva, resource_size, "Resources")?;

        let strong_name_signature_rva = parser.read_le::<u32>()?;
        let strong_name_signature_size = parser.read_le::<u32>()?;
        check_pair(
            strong_name_signature_rva,
            strong_name_signature_size,
            "Strong name signature",
        )?;

        let code_manager_table_rva = parser.read_le::<u32>()?;
        let code_manager_table_size = parser.read_le::<u32>()?;
        if code_manager_table_rva != 0 || code_manager_table_size != 0 {
            return Err(malformed_error!(
                "Code Manager Table fields must be zero (reserved)"
            ));
        }

        let vtable_fixups_rva = parser.read_le::<u32>()?;
        let vtable_fixups_size = parser.read_le::<u32>()?;
        check_pair(vtable_fixups_rva, vtable_fixups_size, "VTable fixups")?;

        let export_address_table_jmp_rva = parser.read_le::<u32>()?;
        let export_address_table_jmp_size = parser.read_le::<u32>()?;
        if export_address_table_jmp_rva != 0 || export_address_table_jmp_size != 0 {
            return Err(malformed_error!(
                "Export Address Table Jump fields must be zero (reserved)"
            ));
        }

        let managed_native_header_rva = parser.read_le::<u32>()?;
        let managed_native_header_size = parser.read_le::<u32>()?;

        Ok(Cor20Header {
            cb,
            major_runtime_version,
            minor_runtime_version,
            meta_data_rva,
            meta_data_size,
            flags,
            entry_point_token,
            resource_rva,
            resource_size,
            strong_name_signature_rva,
            strong_name_signature_size,
            code_manager_table_rva,
            code_manager_table_size,
            vtable_fixups_rva,
            vtable_fixups_size,
            export_address_table_jmp_rva,
            export_address_table_jmp_size,
            managed_native_header_rva,
            managed_native_header_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes() -> [u8; 72] {
        let mut bytes = [0u8; 72];
        bytes[0..4].copy_from_slice(&72_u32.to_le_bytes()); // cb
        bytes[4..6].copy_from_slice(&2_u16.to_le_bytes()); // major runtime version
        bytes[6..8].copy_from_slice(&5_u16.to_le_bytes()); // minor runtime version
        bytes[8..12].copy_from_slice(&0x2000_u32.to_le_bytes()); // metadata RVA
        bytes[12..16].copy_from_slice(&0x1000_u32.to_le_bytes()); // metadata size
        bytes[16..20].copy_from_slice(&COMIMAGE_FLAGS_ILONLY.to_le_bytes()); // flags
        bytes[20..24].copy_from_slice(&0x0600_0001_u32.to_le_bytes()); // entry point
        bytes
    }

    #[test]
    fn crafted() {
        let parsed = Cor20Header::read(&header_bytes()).unwrap();

        assert_eq!(parsed.cb, 72);
        assert_eq!(parsed.major_runtime_version, 2);
        assert_eq!(parsed.minor_runtime_version, 5);
        assert_eq!(parsed.meta_data_rva, 0x2000);
        assert_eq!(parsed.meta_data_size, 0x1000);
        assert_eq!(parsed.flags, COMIMAGE_FLAGS_ILONLY);
        assert_eq!(parsed.entry_point_token, 0x0600_0001);
        assert_eq!(parsed.resource_rva, 0);
        assert_eq!(parsed.strong_name_signature_size, 0);
        assert_eq!(parsed.managed_native_header_rva, 0);
    }

    #[test]
    fn rejects_wrong_cb() {
        let mut bytes = header_bytes();
        bytes[0] = 0x40;
        assert!(Cor20Header::read(&bytes).is_err());
    }

    #[test]
    fn rejects_zero_metadata() {
        let mut bytes = header_bytes();
        bytes[8..12].copy_from_slice(&0_u32.to_le_bytes());
        assert!(Cor20Header::read(&bytes).is_err());
    }

    #[test]
    fn rejects_inconsistent_pair() {
        let mut bytes = header_bytes();
        bytes[28..32].copy_from_slice(&0x100_u32.to_le_bytes()); // resource size without RVA
        assert!(Cor20Header::read(&bytes).is_err());
    }

    #[test]
    fn rejects_undefined_flags() {
        let mut bytes = header_bytes();
        bytes[16..20].copy_from_slice(&0x8000_0001_u32.to_le_bytes());
        assert!(Cor20Header::read(&bytes).is_err());
    }

    #[test]
    fn rejects_short_input() {
        assert!(matches!(
            Cor20Header::read(&[0u8; 40]),
            Err(crate::Error::OutOfBounds)
        ));
    }
}
