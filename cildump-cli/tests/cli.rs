use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

/// A tool path that satisfies the startup existence check. Spawning it
/// fails, which the run logs and shrugs off.
fn stub_tool(dir: &tempfile::TempDir) -> PathBuf {
    let tool = dir.path().join("ildasm");
    fs::write(&tool, b"").unwrap();
    tool
}

/// A directory holding two files, neither of which is a .NET assembly.
fn non_assembly_tree(dir: &tempfile::TempDir) -> PathBuf {
    let bin = dir.path().join("bin");
    fs::create_dir(&bin).unwrap();
    fs::write(bin.join("notes.txt"), b"plain text").unwrap();
    fs::write(bin.join("native.dll"), b"MZ but not a managed image").unwrap();
    bin
}

/// A specifier that names nothing on disk fails the whole run.
#[test]
fn missing_specifier_aborts_the_run() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("cildump")
        .arg("il")
        .arg(dir.path().join("no-such-input"))
        .arg("-t")
        .arg(stub_tool(&dir))
        .arg("-o")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("file or directory cannot be found"));
}

/// The external tool is resolved at startup, before any input is touched.
#[test]
fn missing_tool_aborts_before_inputs() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("bin")).unwrap();

    cargo_bin_cmd!("cildump")
        .arg("il")
        .arg(dir.path().join("bin"))
        .arg("-t")
        .arg(dir.path().join("gone"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("file cannot be found"));
}

/// Files that fail assembly validation are counted, not fatal.
#[test]
fn non_assemblies_are_skipped() {
    let dir = tempdir().unwrap();
    let bin = non_assembly_tree(&dir);

    cargo_bin_cmd!("cildump")
        .arg("il")
        .arg(&bin)
        .arg("-t")
        .arg(stub_tool(&dir))
        .arg("-o")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("0 dumped, 2 skipped"));
}

/// The search pattern keeps non-matching names away from validation.
#[test]
fn search_pattern_narrows_discovery() {
    let dir = tempdir().unwrap();
    let bin = non_assembly_tree(&dir);

    cargo_bin_cmd!("cildump")
        .arg("il")
        .arg(&bin)
        .arg("-p")
        .arg("*.dll")
        .arg("-t")
        .arg(stub_tool(&dir))
        .arg("-o")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("0 dumped, 1 skipped"));
}

/// With --json, stdout is exactly one machine-readable summary document.
#[test]
fn json_summary_is_machine_readable() {
    let dir = tempdir().unwrap();
    let bin = non_assembly_tree(&dir);

    let output = cargo_bin_cmd!("cildump")
        .arg("il")
        .arg(&bin)
        .arg("--json")
        .arg("-t")
        .arg(stub_tool(&dir))
        .arg("-o")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body: serde_json::Value = serde_json::from_slice(&output).expect("summary json");
    assert_eq!(body["processed"], 2);
    assert_eq!(body["succeeded"], 0);
    assert_eq!(body["skipped"], 2);
    assert!(body["files"].as_array().expect("files array").is_empty());
}

/// At least one path specifier is required.
#[test]
fn il_requires_at_least_one_path() {
    cargo_bin_cmd!("cildump").arg("il").assert().failure();
}

#[test]
fn help_lists_the_dump_options() {
    cargo_bin_cmd!("cildump")
        .arg("il")
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--output-directory")
                .and(predicate::str::contains("--search-pattern"))
                .and(predicate::str::contains("--use-ilspy-cover"))
                .and(predicate::str::contains("--tool-path")),
        );
}
