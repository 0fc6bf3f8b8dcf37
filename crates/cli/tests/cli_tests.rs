use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("rotadb").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Login-hardening schema deployment"));
}

#[test]
fn test_cli_apply_help() {
    let mut cmd = Command::cargo_bin("rotadb").unwrap();
    cmd.arg("apply")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Apply pending schema steps"));
}

#[test]
fn test_cli_status_help() {
    let mut cmd = Command::cargo_bin("rotadb").unwrap();
    cmd.arg("status").arg("--help").assert().success().stdout(predicate::str::contains("json"));
}

#[test]
fn test_missing_database_url_fails() {
    let mut cmd = Command::cargo_bin("rotadb").unwrap();
    cmd.arg("status")
        .env_remove("ROTADB_DATABASE_URL")
        .env_remove("DATABASE_URL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ROTADB_DATABASE_URL"));
}
