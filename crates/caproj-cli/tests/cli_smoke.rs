//! CLI binary smoke tests using assert_cmd.
//!
//! These run the compiled `caproj` binary end-to-end on small inputs
//! written to a temporary directory.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("caproj").unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("counts"))
        .stdout(predicate::str::contains("true-pred"))
        .stdout(predicate::str::contains("coefficients"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("caproj"));
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

#[test]
fn counts_writes_report_and_prints_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write(dir.path(), "projects.csv", "PID,Borough\n1,Queens\n2,Bronx\n3,Queens\n");
    let out = dir.path().join("counts.html");

    cmd()
        .args(["counts", "--column", "Borough", "-o"])
        .arg(&out)
        .arg(&csv)
        .assert()
        .success()
        .stderr(predicate::str::contains("No config provided"))
        .stderr(predicate::str::contains("\"hist_bins\""));

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("Projects by Borough"));
    assert!(html.contains("Configuration"));
}

#[test]
fn counts_rejects_wrong_extension() {
    let dir = tempfile::tempdir().unwrap();
    let txt = write(dir.path(), "projects.txt", "PID,Borough\n1,Queens\n");
    cmd()
        .args(["counts", "--column", "Borough"])
        .arg(&txt)
        .assert()
        .failure();
}

#[test]
fn trend_unknown_pid_fails() {
    let dir = tempfile::tempdir().unwrap();
    let changes = write(
        dir.path(),
        "changes.csv",
        "PID,Date_Reported_As_Of,Change_Year,Budget_Forecast,Latest_Budget_Changes,Latest_Schedule_Changes\n\
         7,2015-01-01,2015,110,10,5\n",
    );
    let projects = write(
        dir.path(),
        "projects.csv",
        "PID,Project_Name,Category,Borough,Budget_Start,Duration_Start\n7,Bridge,Bridges,Queens,100,50\n",
    );
    let out = dir.path().join("trend.html");

    cmd()
        .args(["trend", "--pid", "7", "-o"])
        .arg(&out)
        .arg(&changes)
        .arg(&projects)
        .assert()
        .success();
    assert!(out.exists());

    cmd()
        .args(["trend", "--pid", "99"])
        .arg(&changes)
        .arg(&projects)
        .assert()
        .failure();
}

#[test]
fn coefficients_from_json_with_config() {
    let dir = tempfile::tempdir().unwrap();
    let coefs = write(
        dir.path(),
        "coefs.json",
        r#"[
            {"y_variable": "Budget_Change", "params": [
                {"name": "Intercept", "estimate": 0.1, "ci_lower": -0.1, "ci_upper": 0.3},
                {"name": "Budget_Start", "estimate": 0.5, "ci_lower": 0.2, "ci_upper": 0.8}
            ]},
            {"y_variable": "Schedule_Change", "params": [
                {"name": "Intercept", "estimate": -0.2, "ci_lower": -0.4, "ci_upper": 0.0},
                {"name": "Budget_Start", "estimate": 0.05, "ci_lower": -0.1, "ci_upper": 0.2}
            ]}
        ]"#,
    );
    let out_dir = dir.path().join("reports");
    std::fs::create_dir(&out_dir).unwrap();
    let config = write(
        dir.path(),
        "config.json",
        &format!(r#"{{ "output_dir": {:?} }}"#, out_dir.to_str().unwrap()),
    );

    cmd()
        .args(["coefficients", "--descr", "OLS", "--config"])
        .arg(&config)
        .arg(&coefs)
        .assert()
        .success();

    let html = std::fs::read_to_string(out_dir.join("caproj_coefficients.html")).unwrap();
    assert!(html.contains("Budget Change Model"));
}

#[test]
fn image_missing_file_fails() {
    cmd()
        .args(["image", "--title", "Site", "/nonexistent/site.jpg"])
        .assert()
        .failure();
}
