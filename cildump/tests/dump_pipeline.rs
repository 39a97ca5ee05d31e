//! End-to-end dump runs through the crate's public surface.
//!
//! Unit tests cover the layers in isolation; these tests drive the same
//! fixtures through `is_assembly`, `render_il` and [`Pipeline`] the way a
//! consumer of the crate would, including a fake external tool so both
//! stages really execute.

#[allow(dead_code)]
#[path = "../src/test/mod.rs"]
mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};

use cildump::{
    dump::{probe::is_assembly, render_il, DumpOptions, MemberOrder, Pipeline},
    CilImage, File,
};

fn write_file(dir: &Path, name: &str, bytes: Vec<u8>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn validator_truth_table_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    let assembly = write_file(dir.path(), "app.dll", fixtures::hello_image());
    let module = write_file(dir.path(), "satellite.netmodule", fixtures::module_only_image());
    let hollow = write_file(dir.path(), "hollow.dll", fixtures::minimal_pe(0x1000, 72));
    let native = write_file(dir.path(), "native.dll", fixtures::minimal_pe(0, 0));
    let noise = write_file(dir.path(), "noise.bin", vec![0x13; 512]);

    assert!(is_assembly(&assembly));
    // Idempotent: the verdict does not change on re-probe.
    assert!(is_assembly(&assembly));

    assert!(!is_assembly(&module));
    assert!(!is_assembly(&hollow));
    assert!(!is_assembly(&native));
    assert!(!is_assembly(&noise));
    assert!(!is_assembly(&dir.path().join("absent.dll")));
}

#[test]
fn listing_through_the_public_surface() {
    let file = File::from_mem(fixtures::hello_image()).unwrap();
    let image = CilImage::parse(&file).unwrap();

    let listing = render_il(&image, MemberOrder::ByName).unwrap();

    assert!(listing.contains(".module MyApp.dll"));
    assert!(listing.contains(".entrypoint"));
}

/// A tool that honors the `<tool> <source> /all /out=<dest>` convention
/// and writes a recognizable marker to the destination.
#[cfg(unix)]
fn fake_tool(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let tool = dir.join("ildasm");
    fs::write(
        &tool,
        "#!/bin/sh\nout=\"${3#/out=}\"\nprintf 'external tool output\\n' > \"$out\"\n",
    )
    .unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
    tool
}

#[cfg(unix)]
fn tree_with_one_assembly(dir: &Path) -> PathBuf {
    let root = dir.join("bin");
    fs::create_dir(&root).unwrap();
    write_file(&root, "app.dll", fixtures::hello_image());
    root
}

#[cfg(unix)]
#[test]
fn renderer_overwrites_the_external_tool() {
    let dir = tempfile::tempdir().unwrap();
    let root = tree_with_one_assembly(dir.path());
    let output = dir.path().join("out");

    let pipeline = Pipeline::new(DumpOptions {
        output_root: output.clone(),
        tool_path: Some(fake_tool(dir.path())),
        ..DumpOptions::default()
    })
    .unwrap();
    let summary = pipeline.run(&[root], |_, _| {}).unwrap();

    assert_eq!(summary.dumped.len(), 1);
    let destination = &summary.dumped[0].destination;
    assert_eq!(destination, &output.join("bin.il/app.dll/app.dll.il"));

    let listing = fs::read_to_string(destination).unwrap();
    assert!(listing.starts_with(".assembly extern"));
    assert!(!listing.contains("external tool output"));
}

#[cfg(unix)]
#[test]
fn external_tool_output_survives_without_renderer() {
    let dir = tempfile::tempdir().unwrap();
    let root = tree_with_one_assembly(dir.path());
    let output = dir.path().join("out");

    let pipeline = Pipeline::new(DumpOptions {
        output_root: output,
        tool_path: Some(fake_tool(dir.path())),
        use_renderer: false,
        ..DumpOptions::default()
    })
    .unwrap();
    let summary = pipeline.run(&[root], |_, _| {}).unwrap();

    let content = fs::read_to_string(&summary.dumped[0].destination).unwrap();
    assert_eq!(content, "external tool output\n");
}

#[cfg(unix)]
#[test]
fn reruns_are_byte_identical_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = tree_with_one_assembly(dir.path());
    let output = dir.path().join("out");

    let pipeline = Pipeline::new(DumpOptions {
        output_root: output,
        tool_path: Some(fake_tool(dir.path())),
        ..DumpOptions::default()
    })
    .unwrap();

    let first = pipeline.run(std::slice::from_ref(&root), |_, _| {}).unwrap();
    let bytes_first = fs::read(&first.dumped[0].destination).unwrap();

    let second = pipeline.run(&[root], |_, _| {}).unwrap();
    let bytes_second = fs::read(&second.dumped[0].destination).unwrap();

    assert_eq!(bytes_first, bytes_second);
}
