// End-to-end tests for the exprtree binary

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_exprtree"))
        .args(args)
        .output()
        .expect("Failed to run exprtree")
}

fn token_file(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("tokens.txt");
    fs::write(&path, contents).expect("Failed to write token file");
    path.to_string_lossy().into_owned()
}

#[test]
fn test_prints_tree_on_success() {
    let dir = TempDir::new().unwrap();
    let path = token_file(&dir, "1,integer\n+,operator\n2,integer\n");

    let output = run(&[&path]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Abstract Syntax Tree:\n+\n    1\n    2\n"
    );
}

#[test]
fn test_missing_argument() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unreadable_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.txt").to_string_lossy().into_owned();

    let output = run(&[&path]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not open token file"));
}

#[test]
fn test_syntax_error() {
    let dir = TempDir::new().unwrap();
    let path = token_file(&dir, "(,paren\n2,integer\n");

    let output = run(&[&path]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Syntax Error: Expected ')'"), "stderr was {stderr}");
}

#[test]
fn test_syntax_error_names_token_file_line() {
    let dir = TempDir::new().unwrap();
    let path = token_file(&dir, "1,integer\n\n+,operator\n*,operator\n");

    let output = run(&[&path]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "Syntax Error: Expected integer or '(', found '*' at position 2 (line 4)\n"
    );
}

#[test]
fn test_long_chain_reports_error_instead_of_crashing() {
    let dir = TempDir::new().unwrap();
    let mut contents = String::from("1,integer\n");
    for _ in 0..200_000 {
        contents.push_str("+,operator\n1,integer\n");
    }
    contents.push_str("+,operator\n");
    let path = token_file(&dir, &contents);

    let output = run(&[&path]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr)
        .starts_with("Syntax Error: Unexpected end of input at position 400002"));
}

#[test]
fn test_strict_flag_rejects_trailing_tokens() {
    let dir = TempDir::new().unwrap();
    let path = token_file(&dir, "1,integer\n2,integer\n");

    assert_eq!(run(&[&path]).status.code(), Some(0));
    assert_eq!(run(&["--strict", &path]).status.code(), Some(1));
}

#[test]
fn test_skipped_lines_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = token_file(&dir, "7,integer\ngarbage\n");

    let output = run(&[&path]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Warning: Invalid token format on line 2"));

    let output = run(&["--reject-malformed", &path]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_trace_goes_to_stderr() {
    let dir = TempDir::new().unwrap();
    let path = token_file(&dir, "3,integer\n");

    let output = run(&["--trace", "--indent", "2", &path]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Abstract Syntax Tree:\n3\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Read token: type=integer, value=3"));
    assert!(stderr.contains("Parsing token: type=integer, value=3"));
}
