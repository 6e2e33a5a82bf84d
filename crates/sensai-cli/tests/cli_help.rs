use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("sensai")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("wizard"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("assessment"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_generate_help_lists_forms() {
    cargo_bin_cmd!("sensai")
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chapter"))
        .stdout(predicate::str::contains("topic"))
        .stdout(predicate::str::contains("assessment"));
}

#[test]
fn test_generate_chapter_help_shows_field_flags() {
    cargo_bin_cmd!("sensai")
        .args(["generate", "chapter", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--board"))
        .stdout(predicate::str::contains("--class-strength"))
        .stdout(predicate::str::contains("--structured-output"));
}

#[test]
fn test_login_requires_email() {
    cargo_bin_cmd!("sensai")
        .arg("login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--email"));
}

#[test]
fn test_wizard_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("sensai")
        .env("SENSAI_HOME", dir.path())
        .arg("wizard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
