use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use uuid::Uuid;

fn unique_workspace(prefix: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{prefix}-{}", Uuid::now_v7()));
    std::fs::create_dir_all(&path).expect("workspace should be creatable");
    path
}

fn run_agenda(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_agenda"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("AGENDA_DATA_DIR")
        .env("NO_COLOR", "1")
        .output()
        .expect("agenda command should run")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success but failed.\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "expected failure but command succeeded.\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn item_id(output: &Output) -> String {
    stdout_json(output)["id"]
        .as_str()
        .expect("item JSON should carry an id")
        .to_string()
}

#[test]
fn add_then_ls_groups_items_by_deadline_day() {
    let data_dir = unique_workspace("agenda-dispatch-ls");

    assert_success(&run_agenda(
        &data_dir,
        &["add", "later", "--deadline", "2024-07-12"],
    ));
    assert_success(&run_agenda(
        &data_dir,
        &["add", "sooner", "--deadline", "2024-07-01"],
    ));
    assert_success(&run_agenda(&data_dir, &["add", "someday"]));

    let output = run_agenda(&data_dir, &["ls"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let sooner_at = stdout.find("1 July").expect("1 July section should print");
    let later_at = stdout.find("12 July").expect("12 July section should print");
    let undated_at = stdout
        .find("uncategorized")
        .expect("uncategorized section should print");
    assert!(sooner_at < later_at);
    assert!(later_at < undated_at);

    let json_output = run_agenda(&data_dir, &["ls", "--json"]);
    assert_success(&json_output);
    let view = stdout_json(&json_output);
    let labels: Vec<&str> = view["labels"]
        .as_array()
        .expect("labels should be an array")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(labels, ["1\nJuly", "12\nJuly", "uncategorized"]);

    let _ = std::fs::remove_dir_all(data_dir);
}

#[test]
fn done_hides_items_from_default_listing() {
    let data_dir = unique_workspace("agenda-dispatch-done");

    let added = run_agenda(&data_dir, &["add", "finish report"]);
    assert_success(&added);
    let id = item_id(&added);

    assert_success(&run_agenda(&data_dir, &["done", &id]));

    let default_ls = run_agenda(&data_dir, &["ls"]);
    assert_success(&default_ls);
    let stdout = String::from_utf8_lossy(&default_ls.stdout);
    assert!(!stdout.contains("finish report"));
    assert!(stdout.contains("done hidden"));

    let all_ls = run_agenda(&data_dir, &["ls", "--all"]);
    assert_success(&all_ls);
    let stdout = String::from_utf8_lossy(&all_ls.stdout);
    assert!(stdout.contains("[x] (basic) finish report"));

    let _ = std::fs::remove_dir_all(data_dir);
}

#[test]
fn update_show_and_rm_round_trip() {
    let data_dir = unique_workspace("agenda-dispatch-update");

    let added = run_agenda(&data_dir, &["add", "draft", "--deadline", "2024-07-12"]);
    assert_success(&added);
    let id = item_id(&added);

    let updated = run_agenda(
        &data_dir,
        &["update", &id, "--text", "final draft", "--clear-deadline"],
    );
    assert_success(&updated);
    let item = stdout_json(&updated);
    assert_eq!(item["text"], "final draft");
    assert!(item.get("deadline").is_none());

    let shown = run_agenda(&data_dir, &["show", &id]);
    assert_success(&shown);
    assert_eq!(stdout_json(&shown)["text"], "final draft");

    assert_success(&run_agenda(&data_dir, &["rm", &id]));
    assert_failure(&run_agenda(&data_dir, &["show", &id]));

    let _ = std::fs::remove_dir_all(data_dir);
}

#[test]
fn export_csv_then_import_merges_by_id() {
    let data_dir = unique_workspace("agenda-dispatch-export");
    let backup = data_dir.join("backup.csv");
    let backup_arg = backup.to_str().expect("utf8 path");

    assert_success(&run_agenda(&data_dir, &["add", "commas, included"]));
    assert_success(&run_agenda(
        &data_dir,
        &["export", backup_arg, "--format", "csv"],
    ));

    let imported = run_agenda(&data_dir, &["import", backup_arg, "--format", "csv"]);
    assert_success(&imported);
    let outcome = stdout_json(&imported);
    assert_eq!(outcome["added"], 0);
    assert_eq!(outcome["updated"], 1);

    let output = run_agenda(&data_dir, &["ls"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("commas, included"));
    assert!(stdout.contains("1 item(s)"));

    let _ = std::fs::remove_dir_all(data_dir);
}

#[test]
fn corrupt_store_warns_but_still_lists() {
    let data_dir = unique_workspace("agenda-dispatch-corrupt");
    std::fs::write(data_dir.join("todos.json"), "[ broken").expect("payload should write");

    let output = run_agenda(&data_dir, &["ls"]);
    assert_success(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nothing to do"));

    let _ = std::fs::remove_dir_all(data_dir);
}

#[test]
fn unknown_item_and_bad_format_fail_cleanly() {
    let data_dir = unique_workspace("agenda-dispatch-errors");

    let output = run_agenda(&data_dir, &["done", "missing-id"]);
    assert_failure(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"));

    let output = run_agenda(&data_dir, &["export", "backup.xml", "--format", "xml"]);
    assert_failure(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid store format"));

    let _ = std::fs::remove_dir_all(data_dir);
}
