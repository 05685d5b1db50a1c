extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn writes_a_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.jpg");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "64x48", "-i", "50"])
        .assert()
        .success();
    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn writes_a_pnm_with_the_raw_raster() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.pnm");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "20x10", "-c", "-0.75,0.1", "-z", "0.5"])
        .args(&["-e", "reference", "-b", "exclusive", "-p", "smooth", "-t", "1"])
        .assert()
        .success();
    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"P6"));
    assert!(bytes.len() > 20 * 10 * 3);
}

#[test]
fn profile_reports_the_evaluator() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.pnm");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "32x32", "--reference-view", "--profile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("optimized: "));
}

#[test]
fn zero_width_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.jpg");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "0x10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dimensions"));
    assert!(!out.exists());
}

#[test]
fn unknown_extension_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.gif");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "8x8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not write"));
}

#[test]
fn negative_zoom_is_refused() {
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", "never.jpg", "--zoom=-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Zoom must be a positive number"));
}
