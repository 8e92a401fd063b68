#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

const SNAPSHOT: &str = r#"{"history": [
    {"numbers": [2, 3], "result": 5, "operation": "suma", "date": "01/01/2025 10:00"},
    {"numbers": [8, 4], "result": 2, "operation": "divide", "date": "02/01/2025 09:00"},
    {"a": 6, "b": 7, "result": {"operation": "mul", "result": 42}, "operation": "mul", "date": "03/01/2025 12:30"},
    {"numeros": [10, 4], "resultado": 6, "operacion": "resta", "date": "15/12/2024 18:45"}
]}"#;

/// Binary under test, isolated from the user's config files and environment.
fn calc_history(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_calc-history"));
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("CALC_HISTORY_SERVER_URL")
        .env_remove("CALC_HISTORY_TIMEOUT_SECS")
        .env_remove("CALC_HISTORY_LOG");
    cmd
}

fn snapshot_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("history.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    path
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(ToString::to_string)
        .collect()
}

// --- calc-history history ---

#[test]
fn history_defaults_to_newest_first() {
    let dir = TempDir::new().unwrap();
    let file = snapshot_file(&dir);
    let output = calc_history(dir.path())
        .args(["history", "--file"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("03/01/2025 12:30"), "{lines:?}");
    assert!(lines[0].contains("6 \u{d7} 7 = 42"), "{lines:?}");
    assert!(lines[0].ends_with("[multiply]"), "{lines:?}");
    assert!(lines[3].starts_with("15/12/2024 18:45"), "{lines:?}");
    assert!(lines[3].contains("10 - 4 = 6"), "{lines:?}");
}

#[test]
fn history_filters_by_alias() {
    let dir = TempDir::new().unwrap();
    let file = snapshot_file(&dir);
    let output = calc_history(dir.path())
        .args(["history", "--op", "sum", "--file"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("2 + 3 = 5"));
    assert!(lines[0].ends_with("[sum]"));
}

#[test]
fn history_filters_by_date_substring() {
    let dir = TempDir::new().unwrap();
    let file = snapshot_file(&dir);
    let output = calc_history(dir.path())
        .args(["history", "--date", "02/01", "--file"])
        .arg(&file)
        .output()
        .unwrap();
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("8 \u{f7} 4 = 2"));
}

#[test]
fn history_sorts_by_result_ascending() {
    let dir = TempDir::new().unwrap();
    let file = snapshot_file(&dir);
    let output = calc_history(dir.path())
        .args(["history", "--sort", "result", "--direction", "asc", "--file"])
        .arg(&file)
        .output()
        .unwrap();
    let lines = stdout_lines(&output);
    let results: Vec<&str> = lines
        .iter()
        .map(|l| l.split(" = ").nth(1).unwrap().split_whitespace().next().unwrap())
        .collect();
    assert_eq!(results, ["2", "5", "6", "42"]);
}

#[test]
fn history_json_output() {
    let dir = TempDir::new().unwrap();
    let file = snapshot_file(&dir);
    let output = calc_history(dir.path())
        .args(["history", "--json", "--op", "resta", "--file"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = view.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["operation"], "resta");
    assert_eq!(items[0]["numbers"], serde_json::json!([10.0, 4.0]));
    assert_eq!(items[0]["result"], 6.0);
}

#[test]
fn history_empty_view_reports_on_stderr() {
    let dir = TempDir::new().unwrap();
    let file = snapshot_file(&dir);
    let output = calc_history(dir.path())
        .args(["history", "--date", "1999", "--file"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no operations in history"), "{stderr}");
}

#[test]
fn history_uses_project_config_sort() {
    let dir = TempDir::new().unwrap();
    let file = snapshot_file(&dir);
    std::fs::create_dir_all(dir.path().join(".calc-history")).unwrap();
    std::fs::write(
        dir.path().join(".calc-history/config.toml"),
        "[history]\nsort = \"result\"\ndirection = \"desc\"\n",
    )
    .unwrap();
    let output = calc_history(dir.path())
        .args(["history", "--file"])
        .arg(&file)
        .output()
        .unwrap();
    let lines = stdout_lines(&output);
    assert!(lines[0].contains("= 42"), "{lines:?}");
    assert!(lines[3].contains("= 2"), "{lines:?}");
}

#[test]
fn history_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let output = calc_history(dir.path())
        .args(["history", "--file", "does-not-exist.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[calc-history] error"), "{stderr}");
    assert!(stderr.contains("does-not-exist.json"), "{stderr}");
}

#[test]
fn history_malformed_payload_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{\"items\": []}").unwrap();
    let output = calc_history(dir.path())
        .args(["history", "--file"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn history_rejects_unknown_sort_key() {
    let dir = TempDir::new().unwrap();
    let output = calc_history(dir.path())
        .args(["history", "--sort", "name"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn history_fetches_from_server() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/calculator/history")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SNAPSHOT)
        .create();

    let url = server.url();
    let output = calc_history(dir.path())
        .args(["history", "--op", "divide", "--server", url.as_str()])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 1);
    mock.assert();
}

// --- calc-history compute ---

#[test]
fn compute_prints_result() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/calculator/substract")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"numbers": [10, 4], "result": 6}"#)
        .create();

    let output = calc_history(dir.path())
        .args(["compute", "resta", "10", "4"])
        .env("CALC_HISTORY_SERVER_URL", server.url())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["10 - 4 = 6"]);
    mock.assert();
}

#[test]
fn compute_reports_service_error() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/calculator/divide")
        .match_query(mockito::Matcher::Any)
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Division by zero", "operation": "division", "operands": [1, 0]}"#)
        .create();

    let url = server.url();
    let output = calc_history(dir.path())
        .args(["compute", "divide", "1", "0", "--server", url.as_str()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Division by zero"), "{stderr}");
}

#[test]
fn compute_accepts_negative_operands_and_trailing_flags() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/calculator/sum")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("numbers".into(), "-3".into()),
            mockito::Matcher::UrlEncoded("numbers".into(), "4".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"numbers": [-3, 4], "result": 1}"#)
        .create();

    let url = server.url();
    let output = calc_history(dir.path())
        .args(["compute", "sum", "-3", "4", "-v", "--server", url.as_str()])
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "{stderr}");
    assert_eq!(stdout_lines(&output), ["-3 + 4 = 1"]);
    assert!(!stderr.contains("localhost:8089"), "{stderr}");
    mock.assert();
}

#[test]
fn compute_needs_two_operands() {
    let dir = TempDir::new().unwrap();
    let output = calc_history(dir.path())
        .args(["compute", "sum", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("At least 2 numbers are required"), "{stderr}");
}

#[test]
fn compute_rejects_unknown_operation() {
    let dir = TempDir::new().unwrap();
    let output = calc_history(dir.path())
        .args(["compute", "power", "2", "3"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("power"), "{stderr}");
}

// --- calc-history ops ---

#[test]
fn ops_lists_symbols_and_aliases() {
    let dir = TempDir::new().unwrap();
    let output = calc_history(dir.path()).arg("ops").output().unwrap();
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("sum"));
    assert!(lines[0].contains("suma"));
    assert!(lines[3].contains('\u{f7}'));
    assert!(lines[3].contains("division"));
}
