use anyhow::Context;
use serde::Serialize;

use crate::app::GlobalOptions;

/// Routes a command result to the terminal.
///
/// With `--json` the value is pretty-printed as JSON on stdout; otherwise
/// `display_fn` renders the human form. Diagnostics go through `log` to
/// stderr either way, so stdout stays machine-parseable.
pub fn print_output<T: Serialize>(
    data: &T,
    opts: &GlobalOptions,
    display_fn: impl FnOnce(&T),
) -> anyhow::Result<()> {
    if !opts.json {
        display_fn(data);
        return Ok(());
    }

    let rendered = serde_json::to_string_pretty(data).context("failed to serialize run summary")?;
    println!("{rendered}");
    Ok(())
}
