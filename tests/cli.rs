//! End-to-end tests for the `versync` binary.
//!
//! The binary runs against a local wiremock server via `--api-base`; the
//! environment is scrubbed so the host's token and config never leak in.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn versync() -> Command {
    let mut cmd = Command::cargo_bin("versync").unwrap();
    cmd.env_remove("GH_TOKEN")
        .env_remove("VERSYNC_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    versync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("latest"));
}

#[test]
fn get_without_token_fails_before_any_request() {
    // No server is running on this address; the command must fail on the
    // missing token, not on the connection.
    versync()
        .args(["get", "falco", "--api-base", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GH_TOKEN"));
}

#[test]
fn invalid_repository_flag_is_rejected() {
    versync()
        .env("GH_TOKEN", "ghp_test")
        .args(["get", "falco", "--repo", "not-a-repo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid repository"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    versync()
        .env("GH_TOKEN", "ghp_test")
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["get", "falco"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[tokio::test(flavor = "multi_thread")]
async fn latest_prints_tag_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/falcosecurity/falco/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tag_name": "0.39.0"})))
        .mount(&server)
        .await;

    versync()
        .args(["latest", "falcosecurity", "falco", "--api-base", &server.uri()])
        .assert()
        .success()
        .stdout("0.39.0\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn set_patches_variable() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/repos/owner/repo/actions/variables/falco_version"))
        .and(body_json(json!({"name": "FALCO_VERSION", "value": "0.39.0"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    versync()
        .env("GH_TOKEN", "ghp_test")
        .args([
            "set",
            "falco",
            "0.39.0",
            "--repo",
            "owner/repo",
            "--api-base",
            &server.uri(),
        ])
        .assert()
        .success()
        .stdout("FALCO_VERSION = 0.39.0\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_prints_variable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/actions/variables/falco_version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": "0.38.1"})))
        .expect(1)
        .mount(&server)
        .await;

    versync()
        .env("GH_TOKEN", "ghp_test")
        .args(["get", "falco", "--repo", "owner/repo", "--api-base", &server.uri()])
        .assert()
        .success()
        .stdout("0.38.1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn dispatch_posts_inputs_with_config_ref() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/owner/repo/actions/workflows/bench.yaml/dispatches"))
        .and(body_json(json!({"ref": "release", "inputs": {"project": "falco"}})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("versync.toml");
    fs::write(
        &config,
        format!(
            "repository = \"owner/repo\"\napi_base = \"{}\"\nworkflow_ref = \"release\"\n",
            server.uri()
        ),
    )
    .unwrap();

    versync()
        .env("GH_TOKEN", "ghp_test")
        .arg("--config")
        .arg(&config)
        .args(["dispatch", "bench.yaml", "--input", "project=falco"])
        .assert()
        .success()
        .stdout("Dispatched bench.yaml on owner/repo (release)\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_dispatches_after_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/falcosecurity/falco/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tag_name": "0.39.0"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/actions/variables/falco_version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": "0.38.1"})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/repos/owner/repo/actions/variables/falco_version"))
        .and(body_json(json!({"name": "FALCO_VERSION", "value": "0.39.0"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/owner/repo/actions/workflows/bench.yaml/dispatches"))
        .and(body_json(json!({
            "ref": "main",
            "inputs": {"project": "falco", "version": "0.39.0"}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let projects = dir.path().join("project.json");
    fs::write(
        &projects,
        r#"{"projects":[{"name":"falco","organization":"falcosecurity"}]}"#,
    )
    .unwrap();

    versync()
        .env("GH_TOKEN", "ghp_test")
        .args(["sync", "--dispatch", "bench.yaml", "--repo", "owner/repo", "--api-base", &server.uri()])
        .arg("--projects")
        .arg(&projects)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "falco: updated 0.38.1 -> 0.39.0 (workflow dispatched)",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_only_deduplicates_projects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/falcosecurity/falco/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tag_name": "0.39.0"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/actions/variables/falco_version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": "0.39.0"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let projects = dir.path().join("project.json");
    fs::write(
        &projects,
        r#"{"projects":[{"name":"falco","organization":"falcosecurity"}]}"#,
    )
    .unwrap();

    versync()
        .env("GH_TOKEN", "ghp_test")
        .args(["sync", "--dry-run", "--only", "falco", "--only", "FALCO"])
        .args(["--repo", "owner/repo", "--api-base", &server.uri()])
        .arg("--projects")
        .arg(&projects)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 project(s) checked, 0 would change"));
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_dry_run_reports_without_writing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/falcosecurity/falco/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tag_name": "0.39.0"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/actions/variables/falco_version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": "0.38.1"})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let projects = dir.path().join("project.json");
    fs::write(
        &projects,
        r#"{"projects":[{"name":"falco","organization":"falcosecurity"}]}"#,
    )
    .unwrap();

    versync()
        .env("GH_TOKEN", "ghp_test")
        .args(["sync", "--dry-run", "--repo", "owner/repo", "--api-base", &server.uri()])
        .arg("--projects")
        .arg(&projects)
        .assert()
        .success()
        .stdout(predicate::str::contains("falco: would update 0.38.1 -> 0.39.0"))
        .stdout(predicate::str::contains("1 project(s) checked, 1 would change"));
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_fails_when_a_project_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let projects = dir.path().join("project.json");
    fs::write(
        &projects,
        r#"{"projects":[{"name":"falco","organization":"falcosecurity"}]}"#,
    )
    .unwrap();

    versync()
        .env("GH_TOKEN", "ghp_test")
        .args(["sync", "--repo", "owner/repo", "--api-base", &server.uri()])
        .arg("--projects")
        .arg(&projects)
        .assert()
        .failure()
        .stdout(predicate::str::contains("falco: error:"))
        .stderr(predicate::str::contains("1 of 1 projects failed to sync"));
}
