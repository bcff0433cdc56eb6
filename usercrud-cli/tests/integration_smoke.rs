//! Smoke tests for the usercrud binary

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_database_settings() {
    let mut cmd = Command::cargo_bin("usercrud").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("DB_HOST"))
        .stdout(predicate::str::contains("DB_PASSWORD"))
        .stdout(predicate::str::contains("--cors-origin"));
}

#[test]
fn help_hides_password_value() {
    let mut cmd = Command::cargo_bin("usercrud").unwrap();
    cmd.arg("--help").env("DB_PASSWORD", "s3cret-value");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("s3cret-value").not());
}

#[test]
fn invalid_port_exits_with_usage_error() {
    let mut cmd = Command::cargo_bin("usercrud").unwrap();
    cmd.env("PORT", "not-a-port");

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--port"));
}
