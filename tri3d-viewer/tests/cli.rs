//! End-to-end runs of the `tri3d` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tri3d_viewer::config::OUTPUT_ENV;

fn tri3d(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tri3d"))
        .args(args)
        .current_dir(dir)
        .env_remove(OUTPUT_ENV)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch tri3d")
}

fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn single_shot_writes_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = tri3d(dir.path(), &["-r", "0"]);
    assert!(output.status.success());

    let image = image::open(dir.path().join("output.png")).unwrap();
    assert_eq!((image.width(), image.height()), (700, 700));
}

#[test]
fn single_shot_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    assert!(tri3d(dir.path(), &["-r", "0", "first.png"]).status.success());
    assert!(tri3d(dir.path(), &["-r", "0", "second.png"]).status.success());

    let first = fs::read(dir.path().join("first.png")).unwrap();
    let second = fs::read(dir.path().join("second.png")).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn rotated_frame_differs() {
    let dir = tempfile::tempdir().unwrap();
    assert!(tri3d(dir.path(), &["-r", "0", "a.png"]).status.success());
    assert!(tri3d(dir.path(), &["-r", "45", "b.png"]).status.success());

    let a = fs::read(dir.path().join("a.png")).unwrap();
    let b = fs::read(dir.path().join("b.png")).unwrap();
    assert_ne!(a, b);
}

#[test]
fn extra_arguments_exit_zero_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = tri3d(dir.path(), &["-r", "0", "out.png", "extra", "more"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
    assert_eq!(entries(dir.path()), 0);
}

#[test]
fn invalid_angle_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = tri3d(dir.path(), &["-r", "sideways"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid angle"));
    assert_eq!(entries(dir.path()), 0);
}

#[test]
fn output_env_overrides_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_tri3d"))
        .args(["-r", "30"])
        .current_dir(dir.path())
        .env(OUTPUT_ENV, "custom.png")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(dir.path().join("custom.png").exists());
    assert!(!dir.path().join("output.png").exists());
}

#[test]
fn single_shot_encodes_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["out.jpg", "out.bmp", "out.tiff"] {
        let output = tri3d(dir.path(), &["-r", "0", name]);
        assert!(output.status.success(), "{name}: {:?}", output.status);

        let image = image::open(dir.path().join(name)).unwrap();
        assert_eq!((image.width(), image.height()), (700, 700));
    }
    assert!(!dir.path().join("output.png").exists());
}
