//! The heaps and table stream of the metadata root.
//!
//! A metadata root carries a handful of named streams; each gets a thin typed
//! view here that validates on construction and hands out borrowed data
//! afterwards. Nothing is copied out of the underlying file.
//!
//! # Stream Types
//!
//! Five stream names matter in practice:
//!
//! - **`#Strings`** - null-terminated UTF-8 identifiers (type and member
//!   names). Index 0 is always the empty string.
//! - **`#US`** - length-prefixed UTF-16 string literals, the targets of
//!   `ldstr`.
//! - **`#Blob`** - length-prefixed binary blobs: signatures, custom
//!   attribute values, marshalling descriptors.
//! - **`#GUID`** - an array of 16-byte GUIDs, indexed 1-based.
//! - **`#~`** - the compressed table stream with all row data.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cildump::{CilImage, File};
//!
//! let file = File::from_file("App.dll".as_ref())?;
//! let image = CilImage::parse(&file)?;
//!
//! if let Some(strings) = image.strings() {
//!     let name = strings.get(0x123)?;
//!     println!("identifier: {name}");
//! }
//!
//! if let Some(tables) = image.tables() {
//!     println!("{} tables present", tables.table_count());
//! }
//! # Ok::<(), cildump::Error>(())
//! ```
//!
//! # References
//!
//! - ECMA-335 II.24.2.2 (stream headers), II.24.2.3 through II.24.2.6 (the
//!   individual heaps and the table stream)

/// Stream directory entry: offset, size, name
mod streamheader;
pub use streamheader::StreamHeader;

/// The `#Strings` heap
mod strings;
pub use strings::Strings;

/// The `#US` heap
mod userstrings;
pub use userstrings::UserStrings;

/// The `#~` table stream
mod tablesheader;
pub use tablesheader::TablesHeader;

/// The `#GUID` heap
mod guid;
pub use guid::Guid;

/// The `#Blob` heap
mod blob;
pub use blob::Blob;
