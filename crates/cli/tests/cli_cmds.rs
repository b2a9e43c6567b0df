//! CLI tests for the `commu` subcommands.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

fn commu_cmd() -> Command {
    Command::new(cargo::cargo_bin!("commu"))
}

fn write_temp_commu(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("test.txt");
    fs::write(&path, content).expect("write temp commu");
    (dir, path.to_string_lossy().to_string())
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

// ── parse ───────────────────────────────────────────────────────────────

#[test]
fn parse_json_lists_trees() {
    let (_dir, path) = write_temp_commu("[say text=Hi]\n\n[seq a=[say text=Yo] b=ok]\n");
    let output = commu_cmd()
        .args(["parse", &path, "--output", "json"])
        .output()
        .expect("run parse");
    assert!(output.status.success());

    let v = stdout_json(&output);
    assert_eq!(v["lines"].as_array().map(Vec::len), Some(2));
    assert_eq!(v["lines"][0]["line"], 1);
    assert_eq!(v["lines"][0]["group"]["group_type"], "say");
    assert_eq!(v["lines"][1]["line"], 3);
    assert_eq!(
        v["lines"][1]["group"]["properties"][0]["property"]["kind"],
        "group"
    );
    assert_eq!(v["errors"].as_array().map(Vec::len), Some(0));
}

#[test]
fn parse_reports_errors_and_fails() {
    let (_dir, path) = write_temp_commu("[say text=Hi]\n[say text=Hello\n");
    let output = commu_cmd()
        .args(["parse", &path, "--output", "json"])
        .output()
        .expect("run parse");
    assert_eq!(output.status.code(), Some(1));

    let v = stdout_json(&output);
    assert_eq!(v["errors"][0]["line"], 2);
    assert_eq!(v["errors"][0]["code"], "COMMU1001");
}

// ── check ───────────────────────────────────────────────────────────────

#[test]
fn check_ok() {
    let (_dir, path) = write_temp_commu("[say text=Hi]\n[fx curve=\\{1,2\\}]\n");
    let output = commu_cmd()
        .args(["check", &path, "--output", "json"])
        .output()
        .expect("run check");
    assert!(output.status.success());
    let v = stdout_json(&output);
    assert_eq!(v["ok"], true);
    assert_eq!(v["lines"], 2);
}

#[test]
fn check_trailing_content() {
    let (_dir, path) = write_temp_commu("[say text=Hi] extra\n");
    let output = commu_cmd()
        .args(["check", &path, "--output", "json"])
        .output()
        .expect("run check");
    assert_eq!(output.status.code(), Some(1));
    let v = stdout_json(&output);
    assert_eq!(v["ok"], false);
    assert_eq!(v["errors"][0]["code"], "COMMU1002");
    assert_eq!(v["errors"][0]["column"], 14);
}

#[test]
fn check_pretty_renders_to_stderr() {
    let (_dir, path) = write_temp_commu("[say text=Hello\n");
    let output = commu_cmd()
        .args(["check", &path, "--output", "pretty"])
        .output()
        .expect("run check");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("COMMU1001"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn check_reads_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = commu_cmd()
        .args(["check", "-", "--output", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn check");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"[say text=Hi]\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait check");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["ok"], true);
}

// ── format ──────────────────────────────────────────────────────────────

#[test]
fn format_trims_and_preserves_blank_lines() {
    let (_dir, path) = write_temp_commu("  [say text=Hi]  \n\n[end]\n");
    let output = commu_cmd()
        .args(["format", &path])
        .output()
        .expect("run format");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "[say text=Hi]\n\n[end]\n"
    );
}

#[test]
fn format_check_detects_unformatted() {
    let (_dir, path) = write_temp_commu(" [say text=Hi]\n");
    let output = commu_cmd()
        .args(["format", &path, "--check", "--output", "json"])
        .output()
        .expect("run format --check");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["status"], "not formatted");
}

#[test]
fn format_check_accepts_canonical() {
    let (_dir, path) = write_temp_commu("[say text=a\\=b\\nc]\n");
    let output = commu_cmd()
        .args(["format", &path, "--check", "--output", "json"])
        .output()
        .expect("run format --check");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["status"], "already formatted");
}

#[test]
fn format_write_rewrites_file() {
    let (_dir, path) = write_temp_commu("\t[say text=Hi]\r\n");
    let output = commu_cmd()
        .args(["format", &path, "--write", "--output", "json"])
        .output()
        .expect("run format --write");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["status"], "formatted");
    assert_eq!(fs::read_to_string(&path).unwrap(), "[say text=Hi]\r\n");
}

#[test]
fn format_keeps_broken_lines_and_fails() {
    let (_dir, path) = write_temp_commu("[say text=Hi]\n[broken\n");
    let output = commu_cmd()
        .args(["format", &path, "--output", "json"])
        .output()
        .expect("run format");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "[say text=Hi]\n[broken\n"
    );
}

#[test]
fn format_summary_counts_non_blank_lines() {
    let content = "[say text=Hi]\n\n\n[broken\n";
    let (_dir, path) = write_temp_commu(content);
    let format = commu_cmd()
        .args(["format", &path, "--output", "pretty"])
        .output()
        .expect("run format");
    let check = commu_cmd()
        .args(["check", &path, "--output", "pretty"])
        .output()
        .expect("run check");
    assert_eq!(format.status.code(), Some(1));
    assert_eq!(check.status.code(), Some(1));

    let format_err = String::from_utf8_lossy(&format.stderr);
    let check_err = String::from_utf8_lossy(&check.stderr);
    assert!(format_err.contains(" in 2 lines"), "stderr: {format_err}");
    assert!(check_err.contains(" in 2 lines"), "stderr: {check_err}");
}

#[test]
fn format_legacy_equals() {
    let (_dir, path) = write_temp_commu("[say text=a\\=b]\n");
    let output = commu_cmd()
        .args(["format", &path, "--legacy-equals"])
        .output()
        .expect("run format");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "[say text=a=b]\n");
}

// ── explain ─────────────────────────────────────────────────────────────

#[test]
fn explain_known_code() {
    let output = commu_cmd()
        .args(["explain", "COMMU1002", "--output", "json"])
        .output()
        .expect("run explain");
    assert!(output.status.success());
    let v = stdout_json(&output);
    assert_eq!(v["id"], "COMMU1002");
    assert!(v["explanation"].is_string());
}

#[test]
fn explain_unknown_code() {
    let output = commu_cmd()
        .args(["explain", "NOPE", "--output", "json"])
        .output()
        .expect("run explain");
    assert!(output.status.success());
    assert!(stdout_json(&output)["explanation"].is_null());
}
