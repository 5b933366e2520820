#![cfg(not(feature = "mysql"))]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A config pointing at a SQLite file inside `dir`.
fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("argdb.toml");
    let contents = format!(
        "[database]\nurl = \"sqlite://{}\"\n\n[cache]\ndir = \"{}\"\n",
        dir.join("argdb.db").display(),
        dir.join("cache").display(),
    );
    fs::write(&path, contents).expect("write temp config");
    path
}

fn argdb(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("argdb").expect("argdb binary");
    cmd.env_remove("DATABASE_URL")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

fn migrated() -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    argdb(&config).args(["migrate", "run"]).assert().success();
    (dir, config)
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("argdb.toml");
    fs::write(&config, "[logging]\nformat = \"xml\"\n").unwrap();

    argdb(&config)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("logging.format"));
}

#[test]
fn check_without_credentials_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("absent.toml");

    argdb(&config)
        .env_remove("ARGDB_DB_USER")
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("database.user"));
}

#[test]
fn migrate_then_check() {
    let (_dir, config) = migrated();
    argdb(&config)
        .args(["--json", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"connected\":true"));
}

#[test]
fn migrate_status_reports_up_to_date() {
    let (_dir, config) = migrated();
    argdb(&config)
        .args(["--json", "migrate", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pending\":[]"));
}

#[test]
fn import_then_stats() {
    let (dir, config) = migrated();
    let csv = dir.path().join("claims.csv");
    fs::write(
        &csv,
        "topicId,topicText,claims.stance,claims.claimCorrectedText\n\
         1,Ban boxing,PRO,Boxing harms the brain\n\
         1,Ban boxing,CON,Adults choose their risks\n",
    )
    .unwrap();

    argdb(&config)
        .args(["import", "ibm"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Import complete"));

    argdb(&config)
        .args(["--json", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"premises\":2"))
        .stdout(predicate::str::contains("\"relationships\":2"));
}

#[test]
fn claims_limit_and_json() {
    let (dir, config) = migrated();
    let json = dir.path().join("args.json");
    let arguments: Vec<String> = (0..10)
        .map(|i| {
            format!(
                r#"{{"conclusion": "topic {i}", "context": {{"discussionTitle": "topic {i}"}},
                    "premises": [{{"text": "reason {i}", "stance": "PRO"}}]}}"#
            )
        })
        .collect();
    let body = format!(r#"{{"arguments": [{}]}}"#, arguments.join(","));
    fs::write(&json, body).unwrap();

    argdb(&config)
        .args(["--quiet", "import", "args-me"])
        .arg(&json)
        .assert()
        .success();

    argdb(&config)
        .args(["--json", "claims", "training", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\":7"));

    argdb(&config)
        .args(["--json", "examples", "benchmark", "--no-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reason 9"));
}

#[test]
fn unknown_split_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    argdb(&config)
        .args(["claims", "validation"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid split"));
}

#[test]
fn cache_clear_removes_written_files() {
    let (dir, config) = migrated();
    argdb(&config)
        .args(["--json", "claims", "test"])
        .assert()
        .success();
    assert!(dir.path().join("cache").join("claims_cache.json").exists());

    argdb(&config)
        .args(["--json", "cache", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("claims_cache.json"));

    argdb(&config)
        .args(["--json", "cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"removed\":1"));
    assert!(!dir.path().join("cache").join("claims_cache.json").exists());
}
