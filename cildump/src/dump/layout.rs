//! Destination path computation for IL dumps.
//!
//! Every input specifier owns one directory below the output root, named
//! after the specifier with `.il` appended. Where a candidate's dump lands
//! inside that directory depends on the specifier kind and the
//! structure-preservation flag:
//!
//! ```text
//! input is a file F:                  <root>/F.il/F.il
//! input is a directory D, preserve:   <root>/D.il/<relative>/A.dll/A.dll.il
//! input is a directory D, flatten:    <root>/D.il/A.dll/A.dll.il
//! ```
//!
//! The candidate's original file name keeps its extension; `.il` is always
//! appended, never substituted, so `A.dll` and `A.exe` can never collide.

use std::{
    ffi::{OsStr, OsString},
    fs,
    path::{Path, PathBuf},
};

use crate::{Error, Result};

/// What kind of filesystem object an input specifier named.
///
/// Captured exactly once, when the specifier is first probed. Destination
/// resolution branches on this carried value instead of re-asking the
/// filesystem, so a path that changes kind mid-run cannot flip the layout
/// between candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The specifier names a single candidate file.
    File,
    /// The specifier names a directory root to search recursively.
    Directory,
}

/// One input specifier with its probed kind.
#[derive(Debug, Clone)]
pub struct InputSpec {
    /// The path as supplied by the caller.
    pub path: PathBuf,
    /// Whether the path named a file or a directory at probe time.
    pub kind: InputKind,
}

impl InputSpec {
    /// Probe `path` and capture its kind.
    ///
    /// # Errors
    /// Returns [`Error::InputNotFound`] when the path names neither an
    /// existing file nor an existing directory.
    pub fn from_path(path: &Path) -> Result<InputSpec> {
        let kind = if path.is_file() {
            InputKind::File
        } else if path.is_dir() {
            InputKind::Directory
        } else {
            return Err(Error::InputNotFound(path.to_path_buf()));
        };

        Ok(InputSpec {
            path: path.to_path_buf(),
            kind,
        })
    }
}

/// Compute the destination for one candidate's IL dump.
///
/// ## Arguments
/// * `candidate`   - The validated source file
/// * `input`       - The specifier the candidate was discovered under
/// * `output_root` - Directory all dumps land below
/// * `preserve`    - Mirror the candidate's relative directory structure
///
/// # Errors
/// Returns an error if `preserve` is requested and the candidate does not
/// lie under the input directory; discovery never produces such a pair.
pub fn resolve_output(
    candidate: &Path,
    input: &InputSpec,
    output_root: &Path,
    preserve: bool,
) -> Result<PathBuf> {
    let mut destination = output_root.join(with_il_suffix(leaf_name(&input.path)));

    if input.kind == InputKind::Directory {
        if preserve {
            let parent = candidate.parent().unwrap_or_else(|| Path::new(""));
            let relative = parent.strip_prefix(&input.path).map_err(|_| {
                Error::Error(format!(
                    "{} does not lie under {}",
                    candidate.display(),
                    input.path.display()
                ))
            })?;
            if !relative.as_os_str().is_empty() {
                destination.push(relative);
            }
        }
        destination.push(leaf_name(candidate));
    }

    destination.push(with_il_suffix(leaf_name(candidate)));
    Ok(destination)
}

/// Create every ancestor directory of `destination`.
///
/// Already existing directories are not an error, so re-runs against an
/// unchanged output root pass through silently.
///
/// # Errors
/// Returns an error if a directory cannot be created.
pub fn ensure_parents(destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// The last component of `path`, or the path itself when it has none
/// (`.` and friends).
fn leaf_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or_else(|| path.as_os_str())
}

fn with_il_suffix(name: &OsStr) -> OsString {
    let mut suffixed = name.to_os_string();
    suffixed.push(".il");
    suffixed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_spec(path: &str) -> InputSpec {
        InputSpec {
            path: PathBuf::from(path),
            kind: InputKind::File,
        }
    }

    fn dir_spec(path: &str) -> InputSpec {
        InputSpec {
            path: PathBuf::from(path),
            kind: InputKind::Directory,
        }
    }

    #[test]
    fn single_file_input() {
        let input = file_spec("work/MyApp.dll");
        let destination =
            resolve_output(Path::new("work/MyApp.dll"), &input, Path::new("out"), true).unwrap();

        assert_eq!(destination, PathBuf::from("out/MyApp.dll.il/MyApp.dll.il"));
    }

    #[test]
    fn directory_input_preserving_structure() {
        let input = dir_spec("work/bin");
        let destination = resolve_output(
            Path::new("work/bin/sub/A.dll"),
            &input,
            Path::new("out"),
            true,
        )
        .unwrap();

        assert_eq!(destination, PathBuf::from("out/bin.il/sub/A.dll/A.dll.il"));
    }

    #[test]
    fn directory_input_preserves_deep_nesting() {
        let input = dir_spec("work/bin");
        let destination = resolve_output(
            Path::new("work/bin/net8.0/plugins/B.exe"),
            &input,
            Path::new("out"),
            true,
        )
        .unwrap();

        assert_eq!(
            destination,
            PathBuf::from("out/bin.il/net8.0/plugins/B.exe/B.exe.il")
        );
    }

    #[test]
    fn direct_child_has_no_relative_segment() {
        let input = dir_spec("work/bin");
        let destination =
            resolve_output(Path::new("work/bin/A.dll"), &input, Path::new("out"), true).unwrap();

        assert_eq!(destination, PathBuf::from("out/bin.il/A.dll/A.dll.il"));
    }

    #[test]
    fn directory_input_flattened() {
        let input = dir_spec("work/bin");
        let destination = resolve_output(
            Path::new("work/bin/sub/deep/A.dll"),
            &input,
            Path::new("out"),
            false,
        )
        .unwrap();

        assert_eq!(destination, PathBuf::from("out/bin.il/A.dll/A.dll.il"));
    }

    #[test]
    fn extension_is_appended_not_substituted() {
        let input = dir_spec("bin");
        let dll =
            resolve_output(Path::new("bin/Tool.dll"), &input, Path::new("out"), false).unwrap();
        let exe =
            resolve_output(Path::new("bin/Tool.exe"), &input, Path::new("out"), false).unwrap();

        assert_eq!(dll, PathBuf::from("out/bin.il/Tool.dll/Tool.dll.il"));
        assert_eq!(exe, PathBuf::from("out/bin.il/Tool.exe/Tool.exe.il"));
        assert_ne!(dll, exe);
    }

    #[test]
    fn candidate_outside_the_input_root_is_an_error() {
        let input = dir_spec("work/bin");
        let result = resolve_output(
            Path::new("elsewhere/A.dll"),
            &input,
            Path::new("out"),
            true,
        );

        assert!(result.is_err());
    }

    #[test]
    fn kind_is_carried_not_reprobed() {
        // The specifier path does not exist on disk; resolution must still
        // work because the kind was captured as data.
        let input = dir_spec("no/such/dir");
        let destination = resolve_output(
            Path::new("no/such/dir/A.dll"),
            &input,
            Path::new("out"),
            true,
        )
        .unwrap();

        assert_eq!(destination, PathBuf::from("out/dir.il/A.dll/A.dll.il"));
    }

    #[test]
    fn from_path_probes_once() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.dll");
        std::fs::write(&file, b"x").unwrap();

        assert_eq!(InputSpec::from_path(&file).unwrap().kind, InputKind::File);
        assert_eq!(
            InputSpec::from_path(dir.path()).unwrap().kind,
            InputKind::Directory
        );

        let missing = dir.path().join("gone");
        let error = InputSpec::from_path(&missing).unwrap_err();
        assert!(matches!(error, Error::InputNotFound(_)));
        assert!(error
            .to_string()
            .ends_with("file or directory cannot be found."));
    }

    #[test]
    fn ensure_parents_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("a/b/c/App.dll.il");

        ensure_parents(&destination).unwrap();
        ensure_parents(&destination).unwrap();

        assert!(destination.parent().unwrap().is_dir());
    }
}
