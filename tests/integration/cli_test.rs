use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn tabconv() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tabconv"))
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = tabconv()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn tabconv");

    {
        let stdin = child.stdin.as_mut().expect("Failed to open stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("Failed to write to stdin");
    }

    child.wait_with_output().expect("Failed to read output")
}

#[test]
fn test_stdin_json_to_stdout_csv() {
    let output = run_with_stdin(
        &["--stdin", "--input-format", "json"],
        r#"[{"name": "Alice", "age": 30}]"#,
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "name,age\nAlice,30\n");
}

#[test]
fn test_stdin_csv_to_compact_json() {
    let output = run_with_stdin(
        &["--input-format", "csv", "--plain", "-d", "semicolon"],
        "a;b\n1;x\n",
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"[{"a":1,"b":"x"}]"#
    );
}

#[test]
fn test_file_conversion_infers_formats() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("people.json");
    let output = tmp.path().join("people.csv");
    fs::write(&input, r#"[{"user": {"name": "Ann"}, "id": 1}]"#).unwrap();

    let status = tabconv()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--flatten", "--quiet"])
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "user.name,id\nAnn,1");
}

#[test]
fn test_fields_flag() {
    let output = run_with_stdin(
        &["--input-format", "json", "--fields", "c", "a"],
        r#"[{"a": 1, "b": 2, "c": 3}]"#,
    );
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "c,a\n3,1\n");
}

#[test]
fn test_field_names_may_contain_commas() {
    let output = run_with_stdin(
        &["--input-format", "json", "-f", "a,b"],
        r#"[{"a,b": 1, "a": 2}]"#,
    );
    assert!(output.status.success());
    // Header names are written as given; the single column holds the "a,b" value
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a,b\n1\n");
}

#[test]
fn test_stats_summary_on_stderr() {
    let output = run_with_stdin(
        &["--input-format", "json", "--stats"],
        r#"[{"a": 1}, 2, {"a": 3}]"#,
    );
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Converted 1 file(s), 2 row(s)"));
    assert!(stderr.contains("1 scalar element(s) skipped"));
}

#[test]
fn test_unsupported_pair_fails_without_output() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("data.json");
    let output = tmp.path().join("copy.json");
    fs::write(&input, "[]").unwrap();

    let result = tabconv()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("Unsupported conversion: json to json"));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_file_fails() {
    let tmp = tempdir().unwrap();
    let result = tabconv()
        .arg("-i")
        .arg(tmp.path().join("missing.csv"))
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("Failed to read input file"));
}

#[test]
fn test_directory_conversion() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::write(input.path().join("one.csv"), "k\nv\n").unwrap();
    fs::create_dir_all(input.path().join("nested")).unwrap();
    fs::write(input.path().join("nested/two.csv"), "n\n2\n").unwrap();

    let status = tabconv()
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .args(["--input-format", "csv", "--recursive", "--plain", "--quiet"])
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(
        fs::read_to_string(output.path().join("one.json")).unwrap(),
        r#"[{"k":"v"}]"#
    );
    assert_eq!(
        fs::read_to_string(output.path().join("nested/two.json")).unwrap(),
        r#"[{"n":2}]"#
    );
}
