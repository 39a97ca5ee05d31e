//! Parsed view of the CIL metadata inside a loaded PE image.
//!
//! [`CilImage`] walks from the CLR data directory to the metadata root and
//! materializes every stream it finds: the tables stream and the four
//! heaps. It performs no cross-referencing or semantic resolution; rows
//! stay raw and heap lookups happen on demand, which is all the IL writer
//! needs.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cildump::{CilImage, File};
//!
//! let file = File::from_file("MyApp.dll".as_ref())?;
//! let image = CilImage::parse(&file)?;
//!
//! println!("runtime {}", image.root().version);
//! if let Some(tables) = image.tables() {
//!     println!("{} tables present", tables.table_count());
//! }
//! # Ok::<(), cildump::Error>(())
//! ```

use crate::{
    file::File,
    metadata::{
        cor20header::Cor20Header,
        method::MethodBody,
        root::Root,
        streams::{Blob, Guid, Strings, TablesHeader, UserStrings},
        tables::TableId,
    },
    Error::OutOfBounds,
    Result,
};

/// The metadata of one .NET image, borrowed from a loaded [`File`].
///
/// All streams reference the file data directly; the image is therefore
/// cheap to construct and tied to the lifetime of the file it was parsed
/// from. Streams that the image does not carry come back as `None`.
pub struct CilImage<'a> {
    file: &'a File,
    cor20: Cor20Header,
    root: Root,
    tables: Option<TablesHeader<'a>>,
    strings: Option<Strings<'a>>,
    userstrings: Option<UserStrings<'a>>,
    guid: Option<Guid<'a>>,
    blob: Option<Blob<'a>>,
}

impl<'a> CilImage<'a> {
    /// Parse the CLI header, metadata root and all streams of a loaded file.
    ///
    /// # Arguments
    /// * `file` - The PE image to parse, which must outlive the returned view
    ///
    /// # Errors
    /// Returns an error if the CLI header or metadata root is malformed, a
    /// stream lies outside the metadata block, or the tables stream cannot
    /// be laid out.
    pub fn parse(file: &'a File) -> Result<CilImage<'a>> {
        let data = file.data();

        let (clr_rva, clr_size) = file.clr();
        let clr_offset = file.rva_to_offset(clr_rva)?;
        let clr_end = clr_offset.checked_add(clr_size).ok_or(OutOfBounds)?;
        let cor20 = Cor20Header::read(data.get(clr_offset..clr_end).ok_or(OutOfBounds)?)?;

        let metadata_offset = file.rva_to_offset(cor20.meta_data_rva as usize)?;
        let metadata_end = metadata_offset
            .checked_add(cor20.meta_data_size as usize)
            .ok_or(OutOfBounds)?;
        let metadata = data.get(metadata_offset..metadata_end).ok_or(OutOfBounds)?;

        let root = Root::read(metadata)?;

        let mut tables = None;
        let mut strings = None;
        let mut userstrings = None;
        let mut guid = None;
        let mut blob = None;

        for stream in &root.stream_headers {
            // Root::read verified that every stream lies inside the block
            let stream_data =
                &metadata[stream.offset as usize..(stream.offset + stream.size) as usize];

            match stream.name.as_str() {
                "#~" | "#-" => tables = Some(TablesHeader::from(stream_data)?),
                "#Strings" => strings = Some(Strings::from(stream_data)?),
                "#US" => userstrings = Some(UserStrings::from(stream_data)?),
                "#GUID" => guid = Some(Guid::from(stream_data)?),
                "#Blob" => blob = Some(Blob::from(stream_data)?),
                _ => {}
            }
        }

        Ok(CilImage {
            file,
            cor20,
            root,
            tables,
            strings,
            userstrings,
            guid,
            blob,
        })
    }

    /// The CLI (COR20) header of this image.
    #[must_use]
    pub fn cor20(&self) -> &Cor20Header {
        &self.cor20
    }

    /// The metadata root with the runtime version and stream directory.
    #[must_use]
    pub fn root(&self) -> &Root {
        &self.root
    }

    /// The tables stream (`#~` or `#-`), if present.
    #[must_use]
    pub fn tables(&self) -> Option<&TablesHeader<'a>> {
        self.tables.as_ref()
    }

    /// The `#Strings` heap, if present.
    #[must_use]
    pub fn strings(&self) -> Option<&Strings<'a>> {
        self.strings.as_ref()
    }

    /// The `#US` heap, if present.
    #[must_use]
    pub fn userstrings(&self) -> Option<&UserStrings<'a>> {
        self.userstrings.as_ref()
    }

    /// The `#GUID` heap, if present.
    #[must_use]
    pub fn guid(&self) -> Option<&Guid<'a>> {
        self.guid.as_ref()
    }

    /// The `#Blob` heap, if present.
    #[must_use]
    pub fn blob(&self) -> Option<&Blob<'a>> {
        self.blob.as_ref()
    }

    /// The file this image was parsed from.
    #[must_use]
    pub fn file(&self) -> &'a File {
        self.file
    }

    /// Whether this image declares an assembly manifest.
    ///
    /// Images without an `Assembly` row are plain modules; the dump
    /// pipeline skips those.
    #[must_use]
    pub fn is_assembly(&self) -> bool {
        self.tables
            .as_ref()
            .is_some_and(|tables| tables.has_table(TableId::Assembly))
    }

    /// Parse the method body at the given RVA, returning the decoded header
    /// together with the IL code bytes it covers.
    ///
    /// # Errors
    /// Returns an error if the RVA falls outside every section or the body
    /// header is malformed.
    pub fn method_body(&self, rva: u32) -> Result<(MethodBody, &'a [u8])> {
        let offset = self.file.rva_to_offset(rva as usize)?;
        let data = self.file.data().get(offset..).ok_or(OutOfBounds)?;

        let body = MethodBody::from(data)?;
        let code = data
            .get(body.size_header..body.size_header + body.size_code)
            .ok_or(OutOfBounds)?;
        Ok((body, code))
    }
}
