#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the CLI with an isolated data directory against `api_url`.
pub fn run_cli_with_env(args: &[&str], data_dir: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_yatra"));
    cmd.args(args);
    cmd.env("HOME", data_dir);
    cmd.env("YATRA_DATA_DIR", data_dir.join("session"));
    cmd.env("YATRA_API", api_url);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("YATRA_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_with_env_success(args: &[&str], data_dir: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, data_dir, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_with_env_failure(args: &[&str], data_dir: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, data_dir, api_url);
    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!("CLI command unexpectedly succeeded: {:?}\nstdout: {}", args, stdout);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn test_user() -> Value {
    json!({
        "_id": "65f1c0a2e4b0d1a2b3c4d5e6",
        "username": "sita",
        "email": "sita@example.com",
        "city": "Kathmandu"
    })
}

/// Mount a login endpoint that accepts any credentials.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": test_user(),
            "token": "jwt-abc"
        })))
        .mount(server)
        .await;
}

/// Log in through the CLI.
pub fn login(data_dir: &Path, api_url: &str) {
    run_cli_with_env_success(
        &["login", "--email", "sita@example.com", "--password", "pw"],
        data_dir,
        api_url,
    );
}
