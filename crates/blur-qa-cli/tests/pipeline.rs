//! End-to-end tests running the binary over generated images.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::fs;

use assert_cmd::Command;
use blur_qa_test_support::SyntheticImageBuilder;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn blur_qa(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("blur-qa").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path()).current_dir(dir.path());
    cmd
}

fn records(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_sharp_image_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sharp.png");
    SyntheticImageBuilder::sharp_image().image.save(&path).unwrap();

    blur_qa(&dir)
        .arg(&path)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("need review").not());
}

#[test]
fn test_blurry_image_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.png");
    SyntheticImageBuilder::blurry_image().image.save(&path).unwrap();

    blur_qa(&dir)
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("flat.png: blurry (score 25 < 100)"))
        .stderr(predicate::str::contains(
            "1 image(s) need review: 1 blurry, 0 failed",
        ));
}

#[test]
fn test_blurred_photo_scores_below_sharp_original() {
    let dir = tempfile::tempdir().unwrap();
    let sharp = dir.path().join("a.png");
    let soft = dir.path().join("b.png");
    SyntheticImageBuilder::checkerboard_with_cell_size(128, 128, 16)
        .image
        .save(&sharp)
        .unwrap();
    SyntheticImageBuilder::blurred_checkerboard(128, 128, 4.0)
        .image
        .save(&soft)
        .unwrap();

    let output = blur_qa(&dir).arg("-q").arg(&sharp).arg(&soft).output().unwrap();
    let records = records(&output.stdout);

    let sharp_score = records[0]["analysis"]["blurScore"].as_u64().unwrap();
    let soft_score = records[1]["analysis"]["blurScore"].as_u64().unwrap();
    assert!(soft_score < sharp_score);
}

#[test]
fn test_mixed_directory_keeps_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    SyntheticImageBuilder::sharp_image()
        .image
        .save(images.join("1_sharp.png"))
        .unwrap();
    fs::write(images.join("2_corrupt.png"), b"garbage").unwrap();
    SyntheticImageBuilder::blurry_image()
        .image
        .save(images.join("3_flat.png"))
        .unwrap();

    let output = blur_qa(&dir).arg("-q").arg(&images).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let records = records(&output.stdout);
    let qualities: Vec<&str> = records
        .iter()
        .map(|r| r["analysis"]["quality"].as_str().unwrap())
        .collect();
    assert_eq!(qualities, ["sharp", "error", "blurry"]);

    let ids: Vec<&str> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["0", "1", "2"]);
}

#[test]
fn test_recursive_flag() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("root/nested");
    fs::create_dir_all(&nested).unwrap();
    SyntheticImageBuilder::sharp_image()
        .image
        .save(nested.join("deep.png"))
        .unwrap();
    let root = dir.path().join("root");

    let flat = blur_qa(&dir).arg("-q").arg(&root).output().unwrap();
    assert!(records(&flat.stdout).is_empty());

    let deep = blur_qa(&dir).args(["-q", "-r"]).arg(&root).output().unwrap();
    assert_eq!(records(&deep.stdout).len(), 1);
}

#[test]
fn test_too_small_image_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.png");
    SyntheticImageBuilder::tiny([[0, 255], [255, 0]])
        .image
        .save(&path)
        .unwrap();

    let output = blur_qa(&dir).arg("-q").arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let records = records(&output.stdout);
    assert_eq!(records[0]["analysis"]["quality"], "error");
    assert!(records[0]["analysis"]["error"]
        .as_str()
        .unwrap()
        .contains("2x2"));
}

#[test]
fn test_threshold_flag_changes_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.png");
    SyntheticImageBuilder::blurry_image().image.save(&path).unwrap();

    // score 25 equals the threshold: not blurry
    blur_qa(&dir)
        .args(["-q", "--threshold", "25"])
        .arg(&path)
        .assert()
        .code(0);
}

#[test]
fn test_explicit_check_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sharp.png");
    SyntheticImageBuilder::sharp_image().image.save(&path).unwrap();

    blur_qa(&dir)
        .arg("check")
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(r#""quality":"sharp""#));
}

#[test]
fn test_unreachable_url_is_error_entry() {
    let dir = tempfile::tempdir().unwrap();
    blur_qa(&dir)
        .args(["-q", "--timeout", "2", "http://127.0.0.1:9/photo.jpg"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""quality":"error""#));
}
