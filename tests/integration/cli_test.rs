// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn command(args: &[&str], temp_root: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_search"));
    command
        .args(args)
        .env("IMGCRAWL__OUTPUT__TEMP_ROOT", temp_root)
        .env_remove("IMGCRAWL_CONFIG_DIR")
        .env_remove("RUST_LOG")
        .env_remove("APP_ENVIRONMENT");
    command
}

fn run(args: &[&str], temp_root: &Path) -> Output {
    command(args, temp_root).output().unwrap()
}

fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 1, "stdout: {}", stdout);
    serde_json::from_str(stdout.trim()).unwrap()
}

#[test]
fn test_no_arguments_prints_usage() {
    let root = tempfile::tempdir().unwrap();
    let output = run(&[], root.path());

    assert_eq!(output.status.code(), Some(1));
    let value = stdout_json(&output);
    assert_eq!(value["success"], Value::Bool(false));
    assert_eq!(value["error"], "Usage: search <engine> <keyword> [max_num]");
    assert_eq!(value["engines"], serde_json::json!(["bing", "baidu"]));
}

#[test]
fn test_missing_keyword_prints_usage() {
    let root = tempfile::tempdir().unwrap();
    let output = run(&["bing"], root.path());

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["engines"], serde_json::json!(["bing", "baidu"]));
}

#[test]
fn test_unknown_engine_fails() {
    let root = tempfile::tempdir().unwrap();
    let output = run(&["Google", "cat"], root.path());

    assert_eq!(output.status.code(), Some(1));
    let value = stdout_json(&output);
    assert_eq!(value["success"], Value::Bool(false));
    assert_eq!(value["error"], "Unknown engine: google. Supported: bing, baidu");
    assert_eq!(value["engine"], "google");
    assert_eq!(value["keyword"], "cat");
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn test_zero_max_num_succeeds_without_network() {
    let root = tempfile::tempdir().unwrap();
    let first = run(&["bing", "test", "0"], root.path());
    let second = run(&["bing", "test", "0"], root.path());

    assert_eq!(first.status.code(), Some(0));
    assert_eq!(second.status.code(), Some(0));

    let first = stdout_json(&first);
    let second = stdout_json(&second);
    assert_eq!(first["success"], Value::Bool(true));
    assert_eq!(first["engine"], "bing");
    assert_eq!(first["keyword"], "test");
    assert_eq!(first["requested"], 0);
    assert_eq!(first["downloaded"], 0);
    assert_eq!(first["files"], serde_json::json!([]));

    let first_dir = PathBuf::from(first["temp_dir"].as_str().unwrap());
    let second_dir = PathBuf::from(second["temp_dir"].as_str().unwrap());
    assert_ne!(first_dir, second_dir);
    assert!(first_dir.is_dir());
    assert!(first_dir
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("imgcrawl_bing_"));
}

#[test]
fn test_non_ascii_keyword_is_printed_literally() {
    let root = tempfile::tempdir().unwrap();
    let output = run(&["baidu", "熊猫", "0"], root.path());

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(r#""keyword":"熊猫""#));
}

#[test]
fn test_config_in_working_directory_is_ignored() {
    let root = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    std::fs::create_dir(workdir.path().join("config")).unwrap();
    std::fs::write(
        workdir.path().join("config").join("default.json"),
        r#"{"logging":"verbose","output":"dist"}"#,
    )
    .unwrap();

    let output = command(&["bing", "test", "0"], root.path())
        .current_dir(workdir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let value = stdout_json(&output);
    assert_eq!(value["success"], Value::Bool(true));
    assert_eq!(value["downloaded"], 0);
}

#[test]
fn test_explicit_config_dir_is_loaded() {
    let root = tempfile::tempdir().unwrap();
    let config = tempfile::tempdir().unwrap();
    std::fs::write(
        config.path().join("default.toml"),
        "[output]\ntemp_prefix = \"shots\"\n",
    )
    .unwrap();

    let output = command(&["baidu", "test", "0"], root.path())
        .env("IMGCRAWL_CONFIG_DIR", config.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let temp_dir = PathBuf::from(stdout_json(&output)["temp_dir"].as_str().unwrap().to_string());
    assert!(temp_dir
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("shots_baidu_"));
}
