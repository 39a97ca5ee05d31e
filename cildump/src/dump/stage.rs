//! Disassembly backends.
//!
//! A dump dispatches each candidate through an ordered list of stages, the
//! [`StagePlan`]. Two backends exist: [`ExternalTool`] shells out to an
//! ildasm-compatible disassembler, and [`MetadataRenderer`] produces the
//! listing in-process. When both are enabled the external tool runs first
//! and the renderer overwrites its output, so the in-process listing is
//! what survives.
//!
//! The two differ in how seriously their failures are taken:
//! the external tool's exit status is recorded but never enforced, while a
//! renderer failure aborts the run. [`DumpStage::fatal`] carries that
//! distinction to the pipeline.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    dump::{order::MemberOrder, render::render_il},
    file::File,
    metadata::cilimage::CilImage,
    Error, Result,
};

/// Tool name looked up relative to the working directory when no explicit
/// path is given.
pub const DEFAULT_TOOL: &str = "ildasm";

/// What a stage did with one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// The stage wrote the destination file itself.
    Written,
    /// An external process ran and exited with the given code (`None` when
    /// it was killed by a signal).
    ToolExited(Option<i32>),
}

/// One disassembly backend.
pub trait DumpStage {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Whether a failure of this stage aborts the whole run. Non-fatal
    /// stage errors are logged and the candidate moves on.
    fn fatal(&self) -> bool;

    /// Dump `source` to `dest`.
    fn run(&self, source: &Path, dest: &Path) -> Result<StageOutcome>;
}

/// Where the external disassembler lives.
///
/// The location is resolved once, before any file is processed; a dump run
/// never gets halfway through a directory before noticing the tool is
/// missing.
#[derive(Debug, Clone, Default)]
pub struct ToolConfig {
    /// Explicit tool location; [`DEFAULT_TOOL`] in the working directory
    /// when absent.
    pub path: Option<PathBuf>,
}

impl ToolConfig {
    /// Resolve the configured location to an existing file.
    ///
    /// # Errors
    /// Returns [`Error::ToolNotFound`] when nothing exists at the resolved
    /// location.
    pub fn resolve(&self) -> Result<PathBuf> {
        let candidate = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL));
        if candidate.is_file() {
            Ok(candidate)
        } else {
            Err(Error::ToolNotFound(candidate))
        }
    }
}

/// Shells out to an ildasm-compatible disassembler.
///
/// Invoked as `<tool> <source> /all /out=<dest>`. The exit status is
/// reported back as a [`StageOutcome::ToolExited`] and otherwise ignored;
/// whether the tool actually produced a usable listing is its own business.
pub struct ExternalTool {
    tool: PathBuf,
}

impl ExternalTool {
    /// Wrap an already resolved tool path.
    pub fn new(tool: PathBuf) -> Self {
        ExternalTool { tool }
    }
}

impl DumpStage for ExternalTool {
    fn name(&self) -> &'static str {
        "external"
    }

    fn fatal(&self) -> bool {
        false
    }

    fn run(&self, source: &Path, dest: &Path) -> Result<StageOutcome> {
        let status = Command::new(&self.tool)
            .arg(source)
            .arg("/all")
            .arg(format!("/out={}", dest.display()))
            .status()?;
        Ok(StageOutcome::ToolExited(status.code()))
    }
}

/// Produces the IL listing in-process.
///
/// Parses the source image and writes the rendered listing over whatever is
/// at the destination, truncating it.
pub struct MetadataRenderer {
    order: MemberOrder,
}

impl MetadataRenderer {
    /// Create a renderer stage with the given member ordering.
    pub fn new(order: MemberOrder) -> Self {
        MetadataRenderer { order }
    }
}

impl DumpStage for MetadataRenderer {
    fn name(&self) -> &'static str {
        "renderer"
    }

    fn fatal(&self) -> bool {
        true
    }

    fn run(&self, source: &Path, dest: &Path) -> Result<StageOutcome> {
        let file = File::from_file(source)?;
        let image = CilImage::parse(&file)?;
        let listing = render_il(&image, self.order)?;
        fs::write(dest, listing)?;
        Ok(StageOutcome::Written)
    }
}

/// The ordered list of stages a dump runs per candidate.
pub struct StagePlan {
    stages: Vec<Box<dyn DumpStage>>,
}

impl StagePlan {
    /// Build the plan from options. The external tool always comes first so
    /// the renderer, when enabled, has the last word on the destination.
    pub fn build(tool: PathBuf, use_renderer: bool, order: MemberOrder) -> StagePlan {
        let mut stages: Vec<Box<dyn DumpStage>> = vec![Box::new(ExternalTool::new(tool))];
        if use_renderer {
            stages.push(Box::new(MetadataRenderer::new(order)));
        }
        StagePlan { stages }
    }

    /// The stages in execution order.
    pub fn stages(&self) -> &[Box<dyn DumpStage>] {
        &self.stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::hello_image;
    use std::fs;

    #[test]
    fn renderer_writes_the_listing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("app.dll");
        let dest = dir.path().join("app.dll.il");
        fs::write(&source, hello_image()).unwrap();

        let stage = MetadataRenderer::new(MemberOrder::ByName);
        let outcome = stage.run(&source, &dest).unwrap();

        assert_eq!(outcome, StageOutcome::Written);
        let listing = fs::read_to_string(&dest).unwrap();
        assert!(listing.contains(".module MyApp.dll"));
    }

    #[test]
    fn renderer_truncates_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("app.dll");
        let dest = dir.path().join("app.dll.il");
        fs::write(&source, hello_image()).unwrap();
        // Something longer than any listing the fixture can produce.
        fs::write(&dest, "x".repeat(1 << 20)).unwrap();

        MetadataRenderer::new(MemberOrder::ByName)
            .run(&source, &dest)
            .unwrap();

        let listing = fs::read_to_string(&dest).unwrap();
        assert!(listing.starts_with(".assembly extern"));
        assert!(!listing.contains("xxx"));
    }

    #[test]
    fn renderer_failure_is_fatal_and_tool_failure_is_not() {
        assert!(MetadataRenderer::new(MemberOrder::ByName).fatal());
        assert!(!ExternalTool::new(PathBuf::from("ildasm")).fatal());
    }

    #[test]
    fn tool_config_accepts_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("ildasm");
        fs::write(&tool, b"#!/bin/sh\n").unwrap();

        let resolved = ToolConfig { path: Some(tool.clone()) }.resolve().unwrap();
        assert_eq!(resolved, tool);
    }

    #[test]
    fn tool_config_rejects_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("no-such-tool");

        let error = ToolConfig { path: Some(tool) }.resolve().unwrap_err();
        assert!(error.to_string().ends_with("file cannot be found."));
    }

    #[cfg(unix)]
    #[test]
    fn external_tool_reports_the_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.il");

        let outcome = ExternalTool::new(PathBuf::from("/bin/false"))
            .run(Path::new("whatever.dll"), &dest)
            .unwrap();

        assert_eq!(outcome, StageOutcome::ToolExited(Some(1)));
    }

    #[test]
    fn plan_orders_external_before_renderer() {
        let plan = StagePlan::build(PathBuf::from("ildasm"), true, MemberOrder::ByName);
        let names: Vec<&str> = plan.stages().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["external", "renderer"]);

        let bare = StagePlan::build(PathBuf::from("ildasm"), false, MemberOrder::ByName);
        assert_eq!(bare.stages().len(), 1);
    }
}
