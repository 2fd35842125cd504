use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn inkpad_cmd() -> Command {
    Command::cargo_bin("inkpad").expect("binary exists")
}

#[test]
fn help_prints_description() {
    inkpad_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Freehand sketch-capture widget")
            .and(predicate::str::contains("--interactive")),
    );
}

#[test]
fn no_flags_prints_usage() {
    inkpad_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("inkpad --interactive"));
}

#[test]
fn config_path_points_at_inkpad_config() {
    let temp = TempDir::new().unwrap();

    inkpad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--config-path")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("inkpad").and(predicate::str::contains("config.toml")),
        );
}

#[test]
fn write_config_materializes_defaults_on_disk() {
    let temp = TempDir::new().unwrap();

    inkpad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--write-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote config to"));

    let written = temp.path().join("inkpad").join("config.toml");
    let contents = std::fs::read_to_string(&written).unwrap();
    assert!(contents.contains("[surface]"));
    assert!(contents.contains("background_color"));
    assert!(contents.contains("[brush]"));
}

#[test]
fn invalid_endpoint_override_is_rejected() {
    inkpad_cmd()
        .args(["--interactive", "--endpoint", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid endpoint URL"));
}
