//! Binary-level checks for the `ballot` CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ballot(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ballot").expect("binary");
    cmd.env("HOME", home.path());
    cmd
}

#[test]
fn help_lists_every_subcommand() {
    let home = TempDir::new().expect("home");
    ballot(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("deploy")
                .and(predicate::str::contains("daemon"))
                .and(predicate::str::contains("add-candidate"))
                .and(predicate::str::contains("register-voter"))
                .and(predicate::str::contains("start-voting"))
                .and(predicate::str::contains("end-voting"))
                .and(predicate::str::contains("vote"))
                .and(predicate::str::contains("results"))
                .and(predicate::str::contains("refresh")),
        );
}

#[test]
fn init_writes_the_client_config() {
    let home = TempDir::new().expect("home");
    ballot(&home)
        .args([
            "init",
            "--endpoint",
            "http://127.0.0.1:8545",
            "--contract",
            "0x1234567890abcdef1234567890abcdef12345678",
            "--account",
            "0xabcdef1234567890abcdef1234567890abcdef12",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Client configured"));

    let config = home.path().join(".ballot").join("config.yaml");
    assert!(config.exists(), "config.yaml must be written");
    let contents = std::fs::read_to_string(config).expect("read config");
    assert!(contents.contains("http://127.0.0.1:8545"));
}

#[test]
fn init_refuses_the_zero_address() {
    let home = TempDir::new().expect("home");
    ballot(&home)
        .args([
            "init",
            "--endpoint",
            "http://127.0.0.1:8545",
            "--contract",
            "0x0000000000000000000000000000000000000000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("placeholder"));
}

#[test]
fn daemon_status_reports_not_running() {
    let home = TempDir::new().expect("home");
    ballot(&home)
        .args(["daemon", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"running\": false"));
}

#[test]
fn view_without_a_session_fails_with_guidance() {
    let home = TempDir::new().expect("home");
    ballot(&home)
        .arg("view")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ballot daemon start"));
}

#[test]
fn deploy_without_config_points_at_init() {
    let home = TempDir::new().expect("home");
    ballot(&home)
        .args(["deploy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ballot init"));
}

#[test]
fn daemon_start_with_zero_address_renders_configuration_prompt() {
    let home = TempDir::new().expect("home");
    let config_dir = home.path().join(".ballot");
    std::fs::create_dir_all(&config_dir).expect("mkdir");
    std::fs::write(
        config_dir.join("config.yaml"),
        "endpoint: http://127.0.0.1:8545\n\
         contract_address: \"0x0000000000000000000000000000000000000000\"\n",
    )
    .expect("write config");

    ballot(&home)
        .args(["daemon", "start"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration required"));
}
