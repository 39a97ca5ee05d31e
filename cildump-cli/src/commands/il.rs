use std::path::{Path, PathBuf};

use anyhow::Context;
use cildump::dump::{DumpOptions, DumpSummary, MemberOrder, Pipeline};
use serde::Serialize;

use crate::{app::GlobalOptions, output::print_output};

/// Settings for one `il` invocation, resolved from the command line.
pub struct IlOptions<'a> {
    pub output_directory: &'a Path,
    pub keep_directory_struct: bool,
    pub use_ilspy_cover: bool,
    pub search_pattern: &'a str,
    pub tool_path: Option<&'a Path>,
}

#[derive(Debug, Serialize)]
struct FileInfo {
    source: String,
    destination: String,
}

#[derive(Debug, Serialize)]
struct RunInfo {
    processed: usize,
    succeeded: usize,
    skipped: usize,
    files: Vec<FileInfo>,
}

pub fn run(paths: &[PathBuf], options: &IlOptions<'_>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(DumpOptions {
        output_root: options.output_directory.to_path_buf(),
        keep_dir_struct: options.keep_directory_struct,
        use_renderer: options.use_ilspy_cover,
        search_pattern: options.search_pattern.to_string(),
        tool_path: options.tool_path.map(Path::to_path_buf),
        order: MemberOrder::ByName,
    })
    .context("failed to assemble the dump pipeline")?;

    // JSON mode owns stdout; progress goes to humans only.
    let quiet = opts.json;
    let summary = pipeline
        .run(paths, |source, dest| {
            if !quiet {
                println!("ildasm {} to {}", source.display(), dest.display());
            }
        })
        .context("dump run failed")?;

    let info = summarize(&summary);
    print_output(&info, opts, |info| {
        println!("{} dumped, {} skipped", info.succeeded, info.skipped);
    })
}

fn summarize(summary: &DumpSummary) -> RunInfo {
    let files = summary
        .dumped
        .iter()
        .map(|record| FileInfo {
            source: record.source.display().to_string(),
            destination: record.destination.display().to_string(),
        })
        .collect();

    RunInfo {
        processed: summary.dumped.len() + summary.skipped,
        succeeded: summary.dumped.len(),
        skipped: summary.skipped,
        files,
    }
}
