//! Integration tests for the jsontab binary

#[cfg(test)]
mod cli_tests {
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use std::process::{Command, Output, Stdio};
    use tempfile::tempdir;

    fn jsontab() -> Command {
        Command::new(env!("CARGO_BIN_EXE_jsontab"))
    }

    fn run_jsontab(args: &[&str]) -> Output {
        jsontab()
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run jsontab")
    }

    fn run_with_stdin(args: &[&str], input: &str) -> Output {
        let mut child = jsontab()
            .args(args)
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn jsontab");

        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn write_input(dir: &Path, name: &str, json: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, json).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_file_conversion_writes_both_outputs() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "people.json", r#"[{"x":1,"y":"a"},{"x":2}]"#);
        let out = dir.path().join("out");

        let output = run_jsontab(&[&input, "-o", out.to_str().unwrap()]);
        assert!(output.status.success(), "stderr: {}", text(&output.stderr));

        let stdout = text(&output.stdout);
        assert!(stdout.contains("Loaded JSON -> table shape (2, 2)"));

        assert_eq!(
            fs::read_to_string(out.join("converted.csv")).unwrap(),
            "x,y\n1,a\n2,\n"
        );
        let parquet = fs::read(out.join("converted.parquet")).unwrap();
        assert_eq!(&parquet[..4], b"PAR1");
        assert!(text(&output.stderr).contains("converted.parquet"));
    }

    #[test]
    fn test_stdout_mode_prints_only_csv() {
        let output = run_jsontab(&[r#"{"a":{"b":1,"c":2}}"#, "--stdout"]);
        assert!(output.status.success());
        assert_eq!(text(&output.stdout), "a.b,a.c\n1,2\n");
    }

    #[test]
    fn test_stdin_input() {
        let output = run_with_stdin(&["--stdin", "--stdout"], "[1, 2, 3]");
        assert!(output.status.success(), "stderr: {}", text(&output.stderr));
        assert_eq!(text(&output.stdout), "0\n1\n2\n3\n");
    }

    #[test]
    fn test_parse_error_exits_with_failure() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "broken.json", "[{\"a\": 1,]");

        let output = run_jsontab(&[&input, "-o", dir.path().to_str().unwrap()]);
        assert!(!output.status.success());

        let stderr = text(&output.stderr);
        assert!(stderr.contains("JSON parse error at line 1"), "stderr: {}", stderr);
        assert!(!dir.path().join("converted.csv").exists());
    }

    #[test]
    fn test_unsupported_shape_exits_with_failure() {
        let output = run_jsontab(&["[1, {\"a\": 2}]", "--stdout"]);
        assert!(!output.status.success());
        assert!(text(&output.stdout).is_empty());
        assert!(text(&output.stderr).contains("Unsupported JSON shape"));
    }

    #[test]
    fn test_parquet_failure_keeps_csv() {
        let dir = tempdir().unwrap();
        let out = dir.path().to_str().unwrap();

        let output = run_jsontab(&[r#"[{"a":1},{"a":"one"}]"#, "-o", out, "--no-preview"]);
        assert!(!output.status.success());

        assert_eq!(
            fs::read_to_string(dir.path().join("converted.csv")).unwrap(),
            "a\n1\none\n"
        );
        assert!(!dir.path().join("converted.parquet").exists());

        let stderr = text(&output.stderr);
        assert!(stderr.contains("Parquet encoding failed"), "stderr: {}", stderr);
    }

    #[test]
    fn test_format_selection() {
        let dir = tempdir().unwrap();
        let out = dir.path().to_str().unwrap();

        let output = run_jsontab(&[r#"[{"a":1}]"#, "-o", out, "--format", "parquet", "--quiet"]);
        assert!(output.status.success());
        assert!(dir.path().join("converted.parquet").exists());
        assert!(!dir.path().join("converted.csv").exists());
        assert!(text(&output.stdout).is_empty());
    }

    #[test]
    fn test_validate_only_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "data.json", r#"{"id":1,"meta":{"k":"v"}}"#);

        let output = run_jsontab(&[&input, "--validate-only", "-o", dir.path().to_str().unwrap()]);
        assert!(output.status.success());

        let stdout = text(&output.stdout);
        assert!(stdout.contains("table shape (1, 2)"));
        assert!(stdout.contains("meta.k: string"));
        assert!(!dir.path().join("converted.csv").exists());
    }

    #[test]
    fn test_preview_lists_rows() {
        let output = run_jsontab(&[
            r#"[{"name":"alice"},{"name":"bob"},{"name":"carol"}]"#,
            "-o",
            tempdir().unwrap().path().to_str().unwrap(),
            "--preview-rows",
            "2",
        ]);
        assert!(output.status.success());

        let stdout = text(&output.stdout);
        assert!(stdout.contains("alice"));
        assert!(stdout.contains("bob"));
        assert!(!stdout.contains("carol"));
        assert!(stdout.contains("1 more row"));
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let output = run_jsontab(&["/definitely/not/here.json", "--stdout"]);
        assert!(!output.status.success());
        assert!(text(&output.stderr).contains("here.json"));
    }

    #[test]
    fn test_memory_limit_rejects_large_input() {
        let dir = tempdir().unwrap();
        let big = format!("[{}]", vec!["1"; 2000].join(","));
        let input = write_input(dir.path(), "big.json", &big);

        let output = run_jsontab(&[&input, "--memory-limit", "1KB", "--stdout"]);
        assert!(!output.status.success());
        assert!(text(&output.stderr).contains("too large"));
    }

    #[test]
    fn test_stats_json_on_stderr() {
        let output = run_jsontab(&[r#"[{"a":1}]"#, "--stdout", "--stats-json"]);
        assert!(output.status.success());
        assert_eq!(text(&output.stdout), "a\n1\n");

        let stderr = text(&output.stderr);
        assert!(stderr.contains("\"row_count\": 1"), "stderr: {}", stderr);
    }

    #[test]
    fn test_tab_delimiter() {
        let output = run_jsontab(&[r#"[{"a":1,"b":2}]"#, "--stdout", "--delimiter", "tab"]);
        assert!(output.status.success());
        assert_eq!(text(&output.stdout), "a\tb\n1\t2\n");
    }
}
