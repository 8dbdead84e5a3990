//! End-to-end integration test for the vertical slice
//!
//! This test exercises the complete flow: config file -> discovery ->
//! per-file rewrite -> JSON report.

use std::fs;

use symfield_core::{BatchDriver, FileOutcome, StripConfig};
use symfield_fs::NormalizedPath;
use symfield_test_utils::fixtures::{LED_PLAIN, RESISTOR_STRIPPED, RESISTOR_WITH_FITPART};
use tempfile::TempDir;

/// Set up a library directory with a config file and three libraries
fn setup_library() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("symfield.toml"),
        r#"
field_name = "fitpart"
recursive = true
backup_suffix = ".orig"
"#,
    )
    .unwrap();

    fs::write(temp.path().join("Device.kicad_sym"), RESISTOR_WITH_FITPART).unwrap();
    fs::write(temp.path().join("LED.kicad_sym"), LED_PLAIN).unwrap();
    fs::create_dir(temp.path().join("vendor")).unwrap();
    fs::write(
        temp.path().join("vendor").join("Vendor.kicad_sym"),
        RESISTOR_WITH_FITPART,
    )
    .unwrap();
    fs::write(temp.path().join("notes.txt"), "(property \"FitPart\" \"x\")\n").unwrap();

    temp
}

#[test]
fn test_vertical_slice() {
    let temp = setup_library();
    let root = NormalizedPath::new(temp.path());

    // 1. Load config
    let config = StripConfig::load(&root.join("symfield.toml")).unwrap();
    assert_eq!(config.field_name, "fitpart");
    assert!(config.recursive);

    // 2. Discover
    let driver = BatchDriver::new(config).unwrap();
    let discovery = driver.discover(&root).unwrap();
    assert!(discovery.unreadable.is_empty());
    let files = discovery.files;
    assert_eq!(files.len(), 3, "only .kicad_sym files, nested included");

    // 3. Run
    let report = driver.process_files(&files);
    assert!(report.success());
    assert_eq!(report.modified(), 2);
    assert_eq!(report.unchanged(), 1);

    // 4. Files on disk
    let read = |rel: &str| fs::read_to_string(temp.path().join(rel)).unwrap();
    assert_eq!(read("Device.kicad_sym"), RESISTOR_STRIPPED);
    assert_eq!(read("vendor/Vendor.kicad_sym"), RESISTOR_STRIPPED);
    assert_eq!(read("LED.kicad_sym"), LED_PLAIN);
    assert_eq!(read("Device.kicad_sym.orig"), RESISTOR_WITH_FITPART);
    assert_eq!(read("LED.kicad_sym.orig"), LED_PLAIN);
    assert_eq!(read("notes.txt"), "(property \"FitPart\" \"x\")\n");
    assert!(!temp.path().join("notes.txt.orig").exists());

    // 5. Report
    let device = root.join("Device.kicad_sym");
    assert!(matches!(
        report.outcome_for(&device),
        Some(FileOutcome::Modified { blocks_removed: 1, lines_removed: 9, .. })
    ));

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["field"], "fitpart");
    assert_eq!(json["summary"]["modified"], 2);
    assert_eq!(json["files"].as_array().unwrap().len(), 3);
}

#[test]
fn test_second_run_is_noop() {
    let temp = setup_library();
    let root = NormalizedPath::new(temp.path());
    let config = StripConfig::load(&root.join("symfield.toml")).unwrap();
    let driver = BatchDriver::new(config).unwrap();

    driver.run(&root).unwrap();
    let second = driver.run(&root).unwrap();

    assert_eq!(second.files.len(), 3, "backups are not picked up as candidates");
    assert_eq!(second.modified(), 0);
    assert_eq!(second.unchanged(), 3);
    assert_eq!(
        fs::read_to_string(temp.path().join("Device.kicad_sym.orig")).unwrap(),
        RESISTOR_STRIPPED,
        "the second run backs up the already stripped file"
    );
}
