// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # cildump
//!
//! [![Crates.io](https://img.shields.io/crates/v/cildump.svg)](https://crates.io/crates/cildump)
//! [![Documentation](https://docs.rs/cildump/badge.svg)](https://docs.rs/cildump)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/cildump/blob/main/LICENSE-APACHE)
//!
//! Deterministic IL listings for .NET assemblies. `cildump` discovers managed binaries in
//! files or directory trees, verifies that each candidate really is an assembly by parsing
//! its PE container and ECMA-335 metadata, and writes one textual IL dump per assembly —
//! first through an external `ildasm`-style tool, then (by default) overwritten by an
//! in-process metadata renderer whose member ordering is stable across compiler runs.
//!
//! ## Features
//!
//! - **📦 Efficient input access** - Memory-mapped files with reference-based parsing
//! - **🔍 Manifest-aware validation** - A file counts only if its metadata declares an assembly manifest
//! - **⚡ In-process disassembly** - CIL instruction decoding straight from the method bodies
//! - **📑 Deterministic listings** - Lexicographic member ordering, byte-identical across re-runs
//! - **🗂️ Layout policies** - Mirror the input tree below the output root, or flatten it
//! - **🔧 Cross-platform** - The in-process renderer needs neither Windows nor a .NET runtime
//!
//! ## Quick Start
//!
//! Add `cildump` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cildump = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! The prelude bundles the types most call sites need:
//!
//! ```rust,no_run
//! use cildump::prelude::*;
//!
//! // Render a deterministic IL listing for one assembly.
//! let file = File::from_file("MyApp.dll".as_ref())?;
//! let image = CilImage::parse(&file)?;
//! let listing = render_il(&image, MemberOrder::ByName)?;
//! print!("{}", listing);
//! # Ok::<(), cildump::Error>(())
//! ```
//!
//! ### Running the Whole Pipeline
//!
//! ```rust,no_run
//! use cildump::dump::{DumpOptions, Pipeline};
//! use std::path::PathBuf;
//!
//! let options = DumpOptions {
//!     output_root: PathBuf::from("out"),
//!     tool_path: Some(PathBuf::from("/usr/local/bin/ildasm")),
//!     ..DumpOptions::default()
//! };
//!
//! let pipeline = Pipeline::new(options)?;
//! let summary = pipeline.run(&[PathBuf::from("bin/Release")], |source, dest| {
//!     println!("ildasm {} to {}", source.display(), dest.display());
//! })?;
//! println!("{} dumped, {} skipped", summary.dumped.len(), summary.skipped);
//! # Ok::<(), cildump::Error>(())
//! ```
//!
//! ## Architecture
//!
//! The crate is organized in layers, each usable on its own:
//!
//! - [`crate::metadata`] - ECMA-335 structures: CLI header, metadata root, heaps,
//!   tables, signatures, and method bodies
//! - [`crate::disassembler`] - CIL instruction decoding with branch-target resolution
//! - [`crate::dump`] - assembly validation, output layout, disassembly stages, the IL
//!   renderer, and the orchestrating pipeline
//! - [`crate::File`] / [`crate::Parser`] - PE container access and low-level byte parsing
//!
//! ## Error Handling
//!
//! All fallible operations return [`crate::Result`]. Malformed input never panics:
//!
//! ```rust,no_run
//! use cildump::{CilImage, Error, File};
//!
//! match File::from_file("suspicious.exe".as_ref()) {
//!     Ok(file) => match CilImage::parse(&file) {
//!         Ok(image) => println!("metadata version {}", image.root().version),
//!         Err(Error::Malformed { message, .. }) => eprintln!("rejected: {message}"),
//!         Err(error) => eprintln!("failed: {error}"),
//!     },
//!     Err(error) => eprintln!("not a loadable PE: {error}"),
//! }
//! ```
//!
//! ## Standards Compliance
//!
//! Metadata parsing follows ECMA-335 6th Edition, Partition II (metadata layout,
//! compressed integers, signatures) and Partition III (CIL instruction set). The
//! external stage matches the classic `ildasm <file> /all /out=<dest>` invocation.

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared fixtures used by unit tests across the crate.
#[cfg(test)]
pub(crate) mod test;

/// CIL instruction decoding.
///
/// Opcode tables for the one-byte and two-byte (`0xFE`-prefixed) instruction pages,
/// plus a linear decoder that turns method-body bytes into [`crate::disassembler::Instruction`]
/// values with method-relative offsets and resolved branch targets.
pub mod disassembler;

/// The dump pipeline: validation, layout, stages, rendering, orchestration.
///
/// This is the top layer of the crate. [`crate::dump::probe::is_assembly`] decides
/// whether a file carries an assembly manifest, [`crate::dump::layout`] computes
/// destination paths, [`crate::dump::stage`] runs the external tool and the in-process
/// renderer in a fixed order, and [`crate::dump::Pipeline`] ties it all together.
pub mod dump;

/// ECMA-335 metadata parsing.
///
/// Everything between the raw PE bytes and the IL renderer: the CLI (Cor20) header,
/// the metadata root with its stream directory, the five heaps (`#Strings`, `#US`,
/// `#GUID`, `#Blob`, `#~`), typed row readers for the metadata tables, compressed
/// signature parsing, and method-body headers with exception-handler clauses.
pub mod metadata;

/// Common imports for working with this crate.
///
/// `use cildump::prelude::*;` pulls in the handful of types almost every consumer
/// needs, without the noise of the full module paths.
pub mod prelude;

/// Unified result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
pub use file::{parser::Parser, File};
pub use metadata::{
    cilimage::CilImage,
    streams::{Blob, Guid, StreamHeader, Strings, TablesHeader, UserStrings},
    token::Token,
};
