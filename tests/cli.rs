use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

use repo_save::crypto::{decode_string, encode_string, DEFAULT_PASSWORD};

const ALICE: &str = "76561198000000001";
const BOB: &str = "76561198000000002";

fn sample_save() -> Value {
    json!({
        "dictionaryOfDictionaries": {
            "value": {
                "runStats": {
                    "level": 3,
                    "currency": 120,
                    "lives": 2,
                    "chargingStationCharge": 1,
                    "totalHaul": 4500
                },
                "playerHealth": { ALICE: 100, BOB: 80 },
                "playerUpgradeSpeed": { ALICE: 1, BOB: 0 }
            }
        },
        "teamName": { "value": "Semibots" },
        "playerNames": { "value": { ALICE: "Alice", BOB: "Bob" } },
        "timePlayed": { "value": 1234.5 }
    })
}

struct Fixture {
    dir: TempDir,
    save: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let save = dir.path().join("REPO_SAVE_2026_10_15.es3");
        let text = serde_json::to_string(&sample_save()).unwrap();
        std::fs::write(&save, encode_string(&text, DEFAULT_PASSWORD)).unwrap();
        Self { dir, save }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("reposave").unwrap();
        cmd.env("REPO_SAVE_CONFIG_DIR", self.dir.path().join("config"))
            .env_remove("RUST_LOG");
        cmd
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn read_save(path: &Path) -> Value {
    let bytes = std::fs::read(path).unwrap();
    serde_json::from_str(&decode_string(&bytes, DEFAULT_PASSWORD).unwrap()).unwrap()
}

#[test]
fn test_show_lists_world_and_players() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("show")
        .arg(&fx.save)
        .assert()
        .success()
        .stdout(predicate::str::contains("Semibots"))
        .stdout(predicate::str::contains("4500"))
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("Bob"));
}

#[test]
fn test_show_summary() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["show", "--summary"])
        .arg(&fx.save)
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 3 | Team: Semibots | Players: Alice, Bob"));
}

#[test]
fn test_decrypt_to_stdout() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("decrypt")
        .arg(&fx.save)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"teamName\""))
        .stdout(predicate::str::contains("    \"teamName\": {"));
}

#[test]
fn test_encrypt_then_show() {
    let fx = Fixture::new();
    let json_path = fx.path("plain.json");
    let out = fx.path("out.es3");
    std::fs::write(&json_path, r#"{"teamName":{"value":"Fresh"}}"#).unwrap();

    fx.cmd()
        .arg("encrypt")
        .arg(&json_path)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(read_save(&out)["teamName"]["value"], "Fresh");
}

#[test]
fn test_encrypt_rejects_invalid_json() {
    let fx = Fixture::new();
    let json_path = fx.path("broken.json");
    let out = fx.path("out.es3");
    std::fs::write(&json_path, "{not json").unwrap();

    fx.cmd()
        .arg("encrypt")
        .arg(&json_path)
        .arg("-o")
        .arg(&out)
        .assert()
        .failure();

    assert!(!out.exists());
}

#[test]
fn test_edit_sets_fields_and_preserves_unknown_keys() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("edit")
        .arg(&fx.save)
        .args(["--set", "runStats.level=10"])
        .args(["--set", "teamName=Night Shift"])
        .args(["--set", &format!("playerHealth.{}=150", BOB)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    let saved = read_save(&fx.save);
    let value = &saved["dictionaryOfDictionaries"]["value"];
    assert_eq!(value["runStats"]["level"], 10);
    assert_eq!(value["runStats"]["currency"], 120);
    assert_eq!(value["playerHealth"][BOB], 150);
    assert_eq!(value["playerHealth"][ALICE], 100);
    assert_eq!(saved["teamName"]["value"], "Night Shift");
    assert_eq!(saved["timePlayed"]["value"], 1234.5);
}

#[test]
fn test_edit_all_players() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("edit")
        .arg(&fx.save)
        .args(["--all-players", "playerUpgradeStrength=5"])
        .assert()
        .success();

    let saved = read_save(&fx.save);
    let strength = &saved["dictionaryOfDictionaries"]["value"]["playerUpgradeStrength"];
    assert_eq!(strength[ALICE], 5);
    assert_eq!(strength[BOB], 5);
}

#[test]
fn test_edit_skips_non_numeric_value_with_warning() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("edit")
        .arg(&fx.save)
        .args(["--set", "runStats.level=lots"])
        .args(["--set", "teamName=Kept"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: Skipped"));

    let saved = read_save(&fx.save);
    assert_eq!(saved["dictionaryOfDictionaries"]["value"]["runStats"]["level"], 3);
    assert_eq!(saved["teamName"]["value"], "Kept");
}

#[test]
fn test_edit_raw_overrides_field_edits() {
    let fx = Fixture::new();
    let raw = fx.path("raw.json");
    std::fs::write(&raw, r#"{"teamName":{"value":"Raw Wins"}}"#).unwrap();

    fx.cmd()
        .arg("edit")
        .arg(&fx.save)
        .args(["--set", "teamName=Ignored"])
        .arg("--raw")
        .arg(&raw)
        .assert()
        .success();

    assert_eq!(read_save(&fx.save), json!({"teamName": {"value": "Raw Wins"}}));
}

#[test]
fn test_edit_raw_reports_discarded_edits_without_skip_warnings() {
    let fx = Fixture::new();
    let raw = fx.path("raw.json");
    std::fs::write(&raw, r#"{"teamName":{"value":"Raw Wins"}}"#).unwrap();

    fx.cmd()
        .arg("edit")
        .arg(&fx.save)
        .args(["--set", "runStats.level=lots"])
        .args(["--set", "teamName=Ignored"])
        .arg("--raw")
        .arg(&raw)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 structured edit(s) were discarded"))
        .stderr(predicate::str::contains("Skipped").not());
}

#[test]
fn test_edit_invalid_raw_leaves_file_unchanged() {
    let fx = Fixture::new();
    let before = std::fs::read(&fx.save).unwrap();
    let raw = fx.path("raw.json");
    std::fs::write(&raw, "{\"teamName\": ").unwrap();

    fx.cmd()
        .arg("edit")
        .arg(&fx.save)
        .arg("--raw")
        .arg(&raw)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON"));

    assert_eq!(std::fs::read(&fx.save).unwrap(), before);
}

#[test]
fn test_edit_to_output_keeps_original() {
    let fx = Fixture::new();
    let before = std::fs::read(&fx.save).unwrap();
    let out = fx.path("edited.es3");

    fx.cmd()
        .arg("edit")
        .arg(&fx.save)
        .args(["--set", "lives=9"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(std::fs::read(&fx.save).unwrap(), before);
    assert_eq!(read_save(&out)["dictionaryOfDictionaries"]["value"]["runStats"]["lives"], 9);
}

#[test]
fn test_edit_unknown_field_fails_before_writing() {
    let fx = Fixture::new();
    let before = std::fs::read(&fx.save).unwrap();

    fx.cmd()
        .arg("edit")
        .arg(&fx.save)
        .args(["--set", "runStats.luck=3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field"));

    assert_eq!(std::fs::read(&fx.save).unwrap(), before);
}

#[test]
fn test_malformed_container_fails() {
    let fx = Fixture::new();
    let bad = fx.path("bad.es3");
    std::fs::write(&bad, b"short").unwrap();

    fx.cmd().arg("show").arg(&bad).assert().failure();
}

#[test]
fn test_missing_file_fails() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("show")
        .arg(fx.path("nope.es3"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_config_reports_paths() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indent width: 4"));
}

#[test]
fn test_corrupt_settings_fall_back_to_defaults() {
    let fx = Fixture::new();
    let config_dir = fx.path("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.json"), "{ not json").unwrap();

    fx.cmd()
        .args(["show", "--summary"])
        .arg(&fx.save)
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 3"))
        .stderr(predicate::str::contains("using defaults"));

    fx.cmd().arg("init").assert().success();

    let repaired = std::fs::read_to_string(config_dir.join("config.json")).unwrap();
    let settings: Value = serde_json::from_str(&repaired).unwrap();
    assert_eq!(settings["indent_width"], 4);
}
