//! The dump orchestrator.
//!
//! [`Pipeline::run`] takes input specifiers and drives each one through
//! discovery, validation, output resolution and the stage plan. Error
//! severity is graded: a specifier that matches nothing on disk fails the
//! run, a candidate file that turns out not to be an assembly is logged and
//! skipped, and the external tool's exit status is recorded without being
//! enforced. Only renderer failures on a validated assembly propagate.
//!
//! Candidates are visited in lexicographic order per directory, so two runs
//! over the same tree dump the same files in the same sequence.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    dump::{
        layout::{ensure_parents, resolve_output, InputKind, InputSpec},
        order::MemberOrder,
        probe::is_assembly,
        stage::{StageOutcome, StagePlan, ToolConfig},
    },
    Result,
};

/// Everything a dump run is parameterized on.
#[derive(Debug, Clone)]
pub struct DumpOptions {
    /// Directory the per-input output trees are created under.
    pub output_root: PathBuf,
    /// Mirror the input tree below the output root instead of flattening it.
    pub keep_dir_struct: bool,
    /// Run the in-process renderer after the external tool.
    pub use_renderer: bool,
    /// Wildcard pattern (`*`, `?`) candidate file names must match.
    pub search_pattern: String,
    /// External tool location; `ildasm` in the working directory when unset.
    pub tool_path: Option<PathBuf>,
    /// Member ordering for the rendered listings.
    pub order: MemberOrder,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            output_root: PathBuf::from("."),
            keep_dir_struct: true,
            use_renderer: true,
            search_pattern: String::from("*"),
            tool_path: None,
            order: MemberOrder::default(),
        }
    }
}

/// One successfully dispatched candidate.
#[derive(Debug, Clone)]
pub struct DumpRecord {
    /// The assembly that was dumped.
    pub source: PathBuf,
    /// The listing it was written to.
    pub destination: PathBuf,
}

/// What a run did.
#[derive(Debug, Default)]
pub struct DumpSummary {
    /// Candidates dispatched through the stage plan, in dispatch order.
    pub dumped: Vec<DumpRecord>,
    /// Candidates that failed validation and were passed over.
    pub skipped: usize,
}

/// The assembled dump pipeline.
///
/// Construction resolves the external tool, so a misconfigured tool path
/// surfaces before any input is touched.
pub struct Pipeline {
    options: DumpOptions,
    plan: StagePlan,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Build a pipeline from options.
    ///
    /// # Errors
    /// Returns [`crate::Error::ToolNotFound`] when the external tool does
    /// not exist at the configured location.
    pub fn new(options: DumpOptions) -> Result<Pipeline> {
        let tool = ToolConfig {
            path: options.tool_path.clone(),
        }
        .resolve()?;
        let plan = StagePlan::build(tool, options.use_renderer, options.order);
        Ok(Pipeline { options, plan })
    }

    /// Dump every assembly reachable from `inputs`.
    ///
    /// `progress` is called once per dispatched candidate, before its stages
    /// run, with the source and destination paths.
    ///
    /// # Errors
    /// Fails when a specifier matches nothing on disk, when an output
    /// directory cannot be created, or when a fatal stage fails.
    pub fn run(
        &self,
        inputs: &[PathBuf],
        mut progress: impl FnMut(&Path, &Path),
    ) -> Result<DumpSummary> {
        let mut summary = DumpSummary::default();
        for input in inputs {
            self.run_input(input, &mut summary, &mut progress)?;
        }
        Ok(summary)
    }

    fn run_input(
        &self,
        input: &Path,
        summary: &mut DumpSummary,
        progress: &mut impl FnMut(&Path, &Path),
    ) -> Result<()> {
        let spec = InputSpec::from_path(input)?;

        let candidates = match spec.kind {
            InputKind::File => {
                if is_assembly(&spec.path) {
                    vec![spec.path.clone()]
                } else {
                    log::info!("skipping {}: not a .NET assembly", spec.path.display());
                    summary.skipped += 1;
                    Vec::new()
                }
            }
            InputKind::Directory => {
                let mut found = Vec::new();
                self.discover(&spec.path, summary, &mut found)?;
                found
            }
        };

        for candidate in candidates {
            // The filesystem may have moved on since discovery; check the
            // candidate again right before dispatching it.
            if !is_assembly(&candidate) {
                log::info!("skipping {}: no longer a .NET assembly", candidate.display());
                summary.skipped += 1;
                continue;
            }

            let destination = resolve_output(
                &candidate,
                &spec,
                &self.options.output_root,
                self.options.keep_dir_struct,
            )?;
            ensure_parents(&destination)?;

            progress(&candidate, &destination);
            self.dispatch(&candidate, &destination)?;

            summary.dumped.push(DumpRecord {
                source: candidate,
                destination,
            });
        }
        Ok(())
    }

    /// Recursive candidate discovery below one directory, pattern before
    /// validation.
    fn discover(
        &self,
        directory: &Path,
        summary: &mut DumpSummary,
        found: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let mut entries: Vec<_> = fs::read_dir(directory)?.collect::<std::io::Result<_>>()?;
        entries.sort_by_key(std::fs::DirEntry::file_name);

        for entry in entries {
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                self.discover(&path, summary, found)?;
            } else if file_type.is_file() {
                let name = entry.file_name();
                if !matches_pattern(&name.to_string_lossy(), &self.options.search_pattern) {
                    continue;
                }
                if is_assembly(&path) {
                    found.push(path);
                } else {
                    log::info!("skipping {}: not a .NET assembly", path.display());
                    summary.skipped += 1;
                }
            }
        }
        Ok(())
    }

    fn dispatch(&self, source: &Path, destination: &Path) -> Result<()> {
        for stage in self.plan.stages() {
            match stage.run(source, destination) {
                Ok(StageOutcome::ToolExited(code)) if code != Some(0) => {
                    log::debug!(
                        "{} stage exited with {:?} for {}",
                        stage.name(),
                        code,
                        source.display()
                    );
                }
                Ok(_) => {}
                Err(error) if !stage.fatal() => {
                    log::warn!(
                        "{} stage failed for {}: {}",
                        stage.name(),
                        source.display(),
                        error
                    );
                }
                Err(error) => return Err(error),
            }
        }
        Ok(())
    }
}

/// Case-sensitive `*`/`?` wildcard match over whole file names.
fn matches_pattern(name: &str, pattern: &str) -> bool {
    let name: Vec<char> = name.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let mut n = 0;
    let mut p = 0;
    let mut retry: Option<(usize, usize)> = None;

    while n < name.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == name[n]) {
            n += 1;
            p += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            // Tentatively match zero characters; remember where to widen.
            retry = Some((p, n));
            p += 1;
        } else if let Some((star_p, star_n)) = retry {
            p = star_p + 1;
            n = star_n + 1;
            retry = Some((star_p, star_n + 1));
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}
