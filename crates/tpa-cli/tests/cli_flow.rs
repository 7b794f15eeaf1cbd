//! CLI actions against a temporary data directory

use clap::Parser;
use pretty_assertions::assert_eq;
use std::path::Path;
use tpa_cli::{run, Cli, RunStatus};

fn tpa(dir: &Path, args: &[&str]) -> (RunStatus, String) {
    let mut argv = vec!["tpa", "--data-dir", dir.to_str().unwrap()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let config = cli.store_config().unwrap();
    let mut out = Vec::new();
    let status = run(cli, &config, &mut out).unwrap();
    (status, String::from_utf8(out).unwrap())
}

fn add_ai_basics(dir: &Path) -> String {
    let (status, out) = tpa(
        dir,
        &[
            "add",
            "--name",
            "AI Basics",
            "--type",
            "technical",
            "--department",
            "IT",
            "--start-date",
            "2025-01-10",
            "--duration",
            "4",
            "--max-participants",
            "20",
            "--cost",
            "500000",
        ],
    );
    assert_eq!(status, RunStatus::Success);
    out.trim().to_string()
}

#[test]
fn add_list_show() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_ai_basics(dir.path());
    assert!(!id.is_empty());
    assert!(dir.path().join("trainingPrograms.json").exists());

    let (status, out) = tpa(dir.path(), &["list", "--search", "ai"]);
    assert_eq!(status, RunStatus::Success);
    assert!(out.contains("AI Basics"));
    assert!(out.contains("₹5,00,000"));

    let (status, out) = tpa(dir.path(), &["show", &id]);
    assert_eq!(status, RunStatus::Success);
    assert!(out.contains("10 Jan 2025"));
}

#[test]
fn invalid_add_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let (status, out) = tpa(dir.path(), &["add", "--name", "AI"]);
    assert_eq!(status, RunStatus::Failed);
    assert!(out.is_empty());
    assert!(!dir.path().join("trainingPrograms.json").exists());
}

#[test]
fn edit_overrides_only_given_fields() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_ai_basics(dir.path());

    let (status, out) = tpa(dir.path(), &["edit", &id, "--duration", "6"]);
    assert_eq!(status, RunStatus::Success);
    assert!(out.contains("6 weeks"));
    assert!(out.contains("AI Basics"));
}

#[test]
fn delete_with_yes() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_ai_basics(dir.path());

    let (status, _) = tpa(dir.path(), &["delete", &id, "--yes"]);
    assert_eq!(status, RunStatus::Success);

    let (_, out) = tpa(dir.path(), &["list"]);
    assert!(out.starts_with("No programs found."));

    let (status, _) = tpa(dir.path(), &["delete", &id, "--yes"]);
    assert_eq!(status, RunStatus::Failed);
}

#[test]
fn status_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_ai_basics(dir.path());

    let (status, _) = tpa(dir.path(), &["status", &id, "active"]);
    assert_eq!(status, RunStatus::Success);

    let (status, out) = tpa(dir.path(), &["summary", "--json"]);
    assert_eq!(status, RunStatus::Success);
    let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(summary["totalPrograms"], 1);
    assert_eq!(summary["active"], 1);
    assert_eq!(summary["totalBudget"], 500_000);
}

#[test]
fn export_csv_to_file() {
    let dir = tempfile::tempdir().unwrap();
    add_ai_basics(dir.path());
    let target = dir.path().join("programs.csv");

    let (status, out) = tpa(
        dir.path(),
        &["export", "--format", "csv", "-o", target.to_str().unwrap()],
    );
    assert_eq!(status, RunStatus::Success);
    assert!(out.is_empty());

    let csv = std::fs::read_to_string(target).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("id,name,type"));
    assert!(lines.next().unwrap().contains(",AI Basics,technical,IT,2025-01-10,4,20,500000,scheduled,"));
}

#[test]
fn unknown_filter_fails_the_command() {
    let dir = tempfile::tempdir().unwrap();
    add_ai_basics(dir.path());

    let (status, out) = tpa(dir.path(), &["list", "--status", "paused"]);
    assert_eq!(status, RunStatus::Failed);
    assert!(out.is_empty());

    let (status, out) = tpa(dir.path(), &["export", "--type", "yoga"]);
    assert_eq!(status, RunStatus::Failed);
    assert!(out.is_empty());
}
