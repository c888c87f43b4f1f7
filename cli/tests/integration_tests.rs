//! Integration tests for the `latest-stats` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const GITHUB_VARS: &[&str] = &[
    "GITHUB_REF_NAME",
    "GITHUB_SHA",
    "GITHUB_WORKFLOW",
    "GITHUB_RUN_NUMBER",
    "GITHUB_ACTOR",
];

fn latest_stats_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_latest-stats"))
}

/// Builds a command running in `dir` with a clean CI environment.
fn command_in(dir: &Path) -> Command {
    let mut cmd = Command::new(latest_stats_bin());
    cmd.current_dir(dir);
    for var in GITHUB_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    let output = cmd.output().expect("failed to run latest-stats");
    assert!(
        output.status.success(),
        "latest-stats failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn write_fixtures(dir: &Path) {
    fs::write(dir.join("build_latest.txt"), "ok\n\n  done  \n").unwrap();
    fs::write(dir.join("deps_latest.yaml"), "serde: 1.0\nclap: 4.5\n").unwrap();
    fs::write(dir.join("broken_latest.yml"), "a: [1, 2\nb: }\n").unwrap();
    fs::write(dir.join("README.md"), "# not scanned").unwrap();
}

#[test]
fn test_generate_writes_report_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let output = run(command_in(dir.path())
        .env("GITHUB_SHA", "0123456789abcdef")
        .env("GITHUB_ACTOR", "octocat"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found 3 matching file(s)."), "{stdout}");
    assert!(stdout.contains("Total files: 3"));
    assert!(stdout.contains("Files with errors: 1"));

    let html = fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(html.contains("Commit: 01234567"));
    assert!(html.contains("Actor: octocat"));
    assert!(html.contains("build_latest.txt"));
    assert!(html.contains("(Error: "));

    let snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("stats.json")).unwrap()).unwrap();
    assert_eq!(snapshot["stats"]["total_count"], 3);
    assert_eq!(snapshot["stats"]["plain_text_count"], 1);
    assert_eq!(snapshot["stats"]["structured_data_count"], 2);
    assert_eq!(snapshot["plain_text_files"][0]["line_count"], 2);
    assert_eq!(
        snapshot["plain_text_files"][0]["lines"],
        serde_json::json!(["ok", "done"])
    );

    let yaml_files = snapshot["structured_data_files"].as_array().unwrap();
    assert_eq!(yaml_files[0]["name"], "broken_latest.yml");
    assert_eq!(yaml_files[0]["type"], "error");
    assert!(yaml_files[0]["data"].is_null());
    assert_eq!(yaml_files[1]["name"], "deps_latest.yaml");
    assert_eq!(yaml_files[1]["type"], "mapping");
    assert_eq!(yaml_files[1]["keys_count"], 2);
}

#[test]
fn test_generate_subcommand_matches_bare_invocation() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    run(command_in(dir.path()).arg("generate"));
    assert!(dir.path().join("index.html").is_file());
    assert!(dir.path().join("stats.json").is_file());
}

#[test]
fn test_other_branch_skips_without_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let output = run(command_in(dir.path()).env("GITHUB_REF_NAME", "feature/x"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("skipping"), "{stdout}");
    assert!(!dir.path().join("index.html").exists());
    assert!(!dir.path().join("stats.json").exists());
}

#[test]
fn test_ignore_branch_overrides_gate() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    run(command_in(dir.path())
        .env("GITHUB_REF_NAME", "feature/x")
        .arg("--ignore-branch"));
    assert!(dir.path().join("index.html").is_file());
}

#[test]
fn test_required_branch_flag() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    run(command_in(dir.path())
        .env("GITHUB_REF_NAME", "release")
        .args(["generate", "--required-branch", "release"]));
    assert!(dir.path().join("stats.json").is_file());
}

#[test]
fn test_no_matching_files_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let output = run(&mut command_in(dir.path()));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No matching files found"), "{stdout}");
    assert!(!dir.path().join("index.html").exists());
    assert!(!dir.path().join("stats.json").exists());
}

#[test]
fn test_root_and_output_dir_flags() {
    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let cwd = tempfile::tempdir().unwrap();
    write_fixtures(root.path());

    run(command_in(cwd.path())
        .arg("--root")
        .arg(root.path())
        .arg("--output-dir")
        .arg(out.path()));

    assert!(out.path().join("index.html").is_file());
    assert!(!cwd.path().join("index.html").exists());
    assert!(!root.path().join("index.html").exists());
}

#[test]
fn test_config_file_renames_outputs() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    fs::write(
        dir.path().join("stats-config.yaml"),
        "output:\n  report: dashboard.html\n  snapshot: data.json\n",
    )
    .unwrap();

    run(command_in(dir.path()).args(["--config", "stats-config.yaml"]));

    assert!(dir.path().join("dashboard.html").is_file());
    assert!(dir.path().join("data.json").is_file());
    assert!(!dir.path().join("index.html").exists());
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.yaml"), "preview:\n  text_chars: 0\n").unwrap();

    let output = command_in(dir.path())
        .args(["--config", "bad.yaml"])
        .output()
        .expect("failed to run latest-stats");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "{stderr}");
}

#[test]
fn test_summary_prints_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let output = run(command_in(dir.path())
        .env("GITHUB_REF_NAME", "feature/x")
        .args(["summary", "--format", "json"]));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["stats"]["total_count"], 3);
    assert!(!dir.path().join("index.html").exists());
}

#[test]
fn test_init_config_writes_defaults_and_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();

    run(command_in(dir.path()).args(["init-config", "--output", "cfg.yaml"]));
    let raw = fs::read_to_string(dir.path().join("cfg.yaml")).unwrap();
    assert!(raw.contains("required_branch: main"));
    assert!(raw.contains("_latest.yml"));

    let second = command_in(dir.path())
        .args(["init-config", "--output", "cfg.yaml"])
        .output()
        .expect("failed to run latest-stats");
    assert!(!second.status.success());

    run(command_in(dir.path()).args(["init-config", "--output", "cfg.yaml", "--force"]));
}
