use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run_login(backend: &str, args: &[&str]) -> Value {
    let dir = tempdir().unwrap();
    let output = cargo_bin_cmd!("sensai")
        .env("SENSAI_HOME", dir.path())
        .env("BACKEND_URL", backend)
        .env_remove("SENSAI_ID_TOKEN")
        .arg("login")
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_prints_backend_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "grace@example.com",
            "given_name": "Grace",
            "family_name": "Brewster Hopper",
            "id_token": "tok",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-42",
            "email": "grace@example.com",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = run_login(
        &server.uri(),
        &[
            "--email",
            "grace@example.com",
            "--name",
            "Grace Brewster Hopper",
            "--id-token",
            "tok",
            "--provider",
            "google",
        ],
    );

    assert_eq!(record["id"], json!("u-42"));
    assert_eq!(record["email"], json!("grace@example.com"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_prints_null_id_when_backend_rejects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "nope"})))
        .mount(&server)
        .await;

    let record = run_login(&server.uri(), &["--email", "x@example.com"]);
    assert_eq!(record, json!({"id": null}));
}

#[test]
fn test_login_succeeds_when_backend_unreachable() {
    let dir = tempdir().unwrap();
    cargo_bin_cmd!("sensai")
        .env("SENSAI_HOME", dir.path())
        .env("BACKEND_URL", "http://127.0.0.1:9")
        .args(["login", "--email", "x@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": null"));
}
