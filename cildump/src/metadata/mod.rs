//! Everything between the CLR data directory and a decoded method body.
//!
//! The layers stack in the order ECMA-335 defines them: the CLI header points
//! at the metadata root, the root's stream directory locates the heaps and
//! the table stream, rows of the tables index into the heaps, and signature
//! blobs plus method headers sit on top of all of it.
//!
//! # Key Components
//!
//! - [`cilimage`] - One parsed view over a loaded CIL binary
//! - [`cor20header`] - The CLI (Cor20) header from the PE data directory
//! - [`root`] - The metadata root and its stream directory
//! - [`streams`] - The heaps and the compressed table stream
//! - [`tables`] - Typed row readers for the metadata tables
//! - [`signatures`] - Compressed method and field signature parsing
//! - [`method`] - Method body headers and exception-handler clauses
//! - [`token`] - Row references used throughout the metadata
//!
//! # Examples
//!
//! ```rust,no_run
//! use cildump::{CilImage, File};
//!
//! let file = File::from_file("App.dll".as_ref())?;
//! let image = CilImage::parse(&file)?;
//!
//! println!("metadata version: {}", image.root().version);
//! if let Some(tables) = image.tables() {
//!     println!("tables present: {}", tables.table_count());
//! }
//! # Ok::<(), cildump::Error>(())
//! ```

/// One parsed view over a CIL binary
pub mod cilimage;
/// The CLI (Cor20) header
pub mod cor20header;
/// Method body headers and exception clauses
pub mod method;
/// The metadata root
pub mod root;
/// Method, field and local variable signatures
pub mod signatures;
/// The heaps and the table stream
pub mod streams;
/// The metadata tables
pub mod tables;
/// Metadata tokens
pub mod token;
