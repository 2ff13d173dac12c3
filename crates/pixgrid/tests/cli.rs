#![cfg(feature = "cli")]

use std::path::Path;

use assert_cmd::Command;
use pixgrid::{PixgridConfig, PixgridReport, SampleMode};
use predicates::prelude::*;
use tempfile::tempdir;

/// 64×64 red/blue checkerboard of 8 px blocks with 1 px black separators.
fn write_outlined_checker(path: &Path) {
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        if (x % 8 == 0 && x > 0) || (y % 8 == 0 && y > 0) {
            image::Rgb([0, 0, 0])
        } else if (x / 8 + y / 8) % 2 == 0 {
            image::Rgb([230, 40, 40])
        } else {
            image::Rgb([20, 20, 200])
        }
    });
    img.save(path).unwrap();
}

fn pixgrid() -> Command {
    Command::cargo_bin("pixgrid").unwrap()
}

#[test]
fn samples_image_and_writes_report() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("checker.png");
    let output = dir.path().join("checker_out.png");
    let report = dir.path().join("report.json");
    write_outlined_checker(&input);

    pixgrid()
        .arg("--in")
        .arg(&input)
        .arg("--out")
        .arg(&output)
        .arg("--report")
        .arg(&report)
        .args(["--mode", "weighted", "--pixel-size", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("detected 7 x lines, 7 y lines"))
        .stderr(predicate::str::contains("saved"));

    let out = image::open(&output).unwrap().to_rgb8();
    assert_eq!(out.dimensions(), (12, 12));
    assert_eq!(out.get_pixel(0, 0).0, [230, 40, 40]);
    assert_eq!(out.get_pixel(2, 0).0, [20, 20, 200]);

    let rep = PixgridReport::load_json(&report).unwrap();
    assert_eq!((rep.cells_x, rep.cells_y), (6, 6));
    assert_eq!(rep.mode, SampleMode::Weighted);
    assert_eq!(rep.pixel_size, 2);
    assert_eq!(rep.x_lines.as_slice(), &[8, 16, 24, 32, 40, 48, 56]);
    assert_eq!(
        rep.output_path.as_deref(),
        Some(output.to_string_lossy().as_ref())
    );
}

#[test]
fn show_grid_draws_separators() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("checker.png");
    let output = dir.path().join("grid.png");
    write_outlined_checker(&input);

    pixgrid()
        .arg("--in")
        .arg(&input)
        .arg("--out")
        .arg(&output)
        .args(["--pixel-size", "4", "--show-grid", "--grid-color", "Yellow"])
        .assert()
        .success();

    let out = image::open(&output).unwrap().to_rgb8();
    assert_eq!(out.dimensions(), (24, 24));
    assert_eq!(out.get_pixel(3, 10).0, [255, 255, 0]);
    assert_eq!(out.get_pixel(0, 0).0, [230, 40, 40]);
}

#[test]
fn config_file_supplies_defaults_and_flags_override() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("checker.png");
    let output = dir.path().join("from_config.png");
    let heatmap = dir.path().join("heat.png");
    write_outlined_checker(&input);

    let mut cfg = PixgridConfig::new(input.to_string_lossy());
    cfg.output_path = Some(output.to_string_lossy().into_owned());
    cfg.heatmap_path = Some(heatmap.to_string_lossy().into_owned());
    cfg.params.sample.pixel_size = 3;
    let cfg_path = dir.path().join("cfg.json");
    cfg.write_json(&cfg_path).unwrap();

    pixgrid()
        .arg("--config")
        .arg(&cfg_path)
        .args(["--pixel-size", "5"])
        .assert()
        .success();

    let out = image::open(&output).unwrap().to_rgb8();
    assert_eq!(out.dimensions(), (30, 30));
    let heat = image::open(&heatmap).unwrap().to_luma8();
    assert_eq!(heat.dimensions(), (64, 64));
}

#[test]
fn missing_input_fails_before_processing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("never.png");

    pixgrid()
        .arg("--in")
        .arg(dir.path().join("nope.png"))
        .arg("--out")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("input image not found"));
    assert!(!output.exists());
}

#[test]
fn blank_image_warns_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("black.png");
    let output = dir.path().join("black_out.png");
    image::RgbImage::new(32, 32).save(&input).unwrap();

    pixgrid()
        .arg("--in")
        .arg(&input)
        .arg("--out")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("no grid cells found"));
    assert!(!output.exists());
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("checker.png");
    write_outlined_checker(&input);

    pixgrid()
        .arg("--in")
        .arg(&input)
        .args(["--mode", "median"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sampling mode"));

    pixgrid()
        .arg("--in")
        .arg(&input)
        .args(["--grid-color", "grey"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown grid colour"));

    pixgrid()
        .arg("--in")
        .arg(&input)
        .args(["--pixel-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pixel_size"));
}

#[test]
fn requires_an_input() {
    pixgrid().assert().failure().stderr(predicate::str::contains("--in"));
}
