use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// cildump - IL dumps for .NET assemblies
#[derive(Debug, Parser)]
#[command(name = "cildump", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags every subcommand accepts.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Print the run summary as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dump IL listings for every assembly found in files or directory trees.
    Il {
        /// File or directory specifiers to search for assemblies.
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Directory the output trees are created under.
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output_directory: PathBuf,

        /// Mirror each input's directory structure below the output root (default).
        #[arg(short = 'k', long, overrides_with = "no_keep_directory_struct")]
        keep_directory_struct: bool,

        /// Place every dump directly below the per-input directory.
        #[arg(long, overrides_with = "keep_directory_struct")]
        no_keep_directory_struct: bool,

        /// Overwrite the external tool's output with the in-process renderer (default).
        #[arg(short = 'c', long, overrides_with = "no_ilspy_cover")]
        use_ilspy_cover: bool,

        /// Keep the external tool's output untouched.
        #[arg(long, overrides_with = "use_ilspy_cover")]
        no_ilspy_cover: bool,

        /// Wildcard pattern (`*`, `?`) candidate file names must match.
        #[arg(short = 'p', long, value_name = "GLOB", default_value = "*")]
        search_pattern: String,

        /// External disassembler location (default: ildasm in the working directory).
        #[arg(short = 't', long, value_name = "PATH")]
        tool_path: Option<PathBuf>,
    },
}
