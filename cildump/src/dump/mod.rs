//! Turning assemblies into IL listings on disk.
//!
//! The layer is split along the run's phases:
//!
//! - [`probe`] - decides whether a candidate file is a .NET assembly
//! - [`layout`] - maps each candidate to its destination below the output root
//! - [`order`] - the member ordering policies listings can be rendered with
//! - [`render`] - the in-process IL renderer
//! - [`stage`] - the per-candidate work units (external tool, renderer)
//! - [`pipeline`] - discovery and orchestration across all inputs
//!
//! # Examples
//!
//! ```rust,no_run
//! use cildump::dump::{probe::is_assembly, render_il, MemberOrder};
//! use cildump::{CilImage, File};
//!
//! let path = std::path::Path::new("App.dll");
//! if is_assembly(path) {
//!     let file = File::from_file(path)?;
//!     let image = CilImage::parse(&file)?;
//!     print!("{}", render_il(&image, MemberOrder::ByName)?);
//! }
//! # Ok::<(), cildump::Error>(())
//! ```

/// Destination path computation for IL dumps
pub mod layout;
/// Member ordering policies for rendered listings
pub mod order;
/// Input discovery and run orchestration
pub mod pipeline;
/// Assembly manifest detection
pub mod probe;
/// The in-process IL renderer
pub mod render;
/// The per-candidate dump stages
pub mod stage;

pub use order::MemberOrder;
pub use pipeline::{DumpOptions, DumpRecord, DumpSummary, Pipeline};
pub use render::render_il;
