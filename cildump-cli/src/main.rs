mod app;
mod commands;
mod output;

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .expect("failed to set Ctrl+C handler");

    let cli = Cli::parse();

    // Show cildump info+ on stderr unless --json; -v raises the level; RUST_LOG overrides
    if !cli.global.json {
        let level = match cli.global.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        env_logger::Builder::new()
            .filter_module("cildump", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Il {
            paths,
            output_directory,
            keep_directory_struct: _,
            no_keep_directory_struct,
            use_ilspy_cover: _,
            no_ilspy_cover,
            search_pattern,
            tool_path,
        } => commands::il::run(
            paths,
            &commands::il::IlOptions {
                output_directory,
                keep_directory_struct: !*no_keep_directory_struct,
                use_ilspy_cover: !*no_ilspy_cover,
                search_pattern,
                tool_path: tool_path.as_deref(),
            },
            &cli.global,
        ),
    }
}
