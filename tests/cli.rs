//! Command-line behaviour.

mod common;

use assert_cmd::Command;
use common::GridFixture;
use predicates::prelude::*;
use std::io::Cursor;
use tempfile::tempdir;

fn gridsheet() -> Command {
    Command::cargo_bin("gridsheet").unwrap()
}

#[test]
fn reports_failures_and_summary() {
    let dir = tempdir().unwrap();
    let good = GridFixture::new(2, 1, 1)
        .with_ramp("u10", 0.0)
        .with_ramp("v10", 0.0)
        .write(dir.path(), "good.nc");
    let bad = GridFixture::new(1, 1, 1)
        .with_ramp("t2m", 0.0)
        .write(dir.path(), "bad.nc");
    let out = dir.path().join("out");

    gridsheet()
        .arg(&good)
        .arg(&bad)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully processed 1 files!"))
        .stderr(predicate::str::contains("bad.nc: No compatible variables found."));

    let archive = std::fs::read(out.join("ocean_data_package.zip")).unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
    assert_eq!(archive.len(), 1);
    assert!(out.join("good_wind.xlsx").is_file());
}

#[test]
fn candidate_override_changes_selection() {
    let dir = tempdir().unwrap();
    let input = GridFixture::new(1, 1, 1)
        .with_ramp("sst", 0.0)
        .with_ramp("swh", 0.0)
        .write(dir.path(), "both.nc");

    gridsheet()
        .arg(&input)
        .args(["--candidates", "swh,sst", "--archive-only", "--archive-name", "pack.zip"])
        .arg("-o")
        .arg(dir.path())
        .assert()
        .success();

    let archive = std::fs::read(dir.path().join("pack.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
    assert_eq!(archive.by_index(0).unwrap().name(), "both_swh.xlsx");
    assert!(!dir.path().join("both_swh.xlsx").exists());
}

#[test]
fn requires_at_least_one_input() {
    gridsheet()
        .assert()
        .failure()
        .stderr(predicate::str::contains("INPUTS"));
}

#[test]
fn missing_file_does_not_abort_the_batch() {
    let dir = tempdir().unwrap();
    let good = GridFixture::new(1, 1, 1)
        .with_ramp("mwd", 0.0)
        .write(dir.path(), "dir.nc");

    gridsheet()
        .arg(dir.path().join("absent.nc"))
        .arg(&good)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to process absent.nc:"))
        .stdout(predicate::str::contains("Successfully processed 1 files!"));
}
