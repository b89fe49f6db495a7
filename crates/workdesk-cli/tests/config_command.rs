#![allow(clippy::unwrap_used)]

mod common;

use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

use common::workdesk_cmd;

#[test]
fn init_then_show_reports_the_written_file() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("config.toml");

    workdesk_cmd(tmp.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(path.exists());

    let output = workdesk_cmd(tmp.path())
        .args(["config", "show", "-f", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output)?;
    assert_eq!(value["exists"], true);
    assert_eq!(value["config"]["notes"]["max_blocks"], 50);
    assert!(value["config"]["paths"]["cache_dir"].as_str().unwrap().ends_with("cache"));
    Ok(())
}

#[test]
fn init_keeps_existing_file_without_force() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "not = [valid")?;

    workdesk_cmd(tmp.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(std::fs::read_to_string(&path)?, "not = [valid");

    workdesk_cmd(tmp.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
    workdesk_cmd(tmp.path())
        .args(["config", "show", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_blocks = 50"));
    Ok(())
}
