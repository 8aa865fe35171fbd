use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

const UNINDENTED: &str = "\
module Demo;

f x =
case x of
Just v -> v;
Nothing -> 0;
;
";

const INDENTED: &str = "\
module Demo;

f x =
    case x of
    Just v -> v;
    Nothing -> 0;
    ;
";

fn calindent(args: &[&str], file: &Path) -> Output {
	Command::new(env!("CARGO_BIN_EXE_calindent"))
		.args(args)
		.arg(file)
		.output()
		.expect("failed to run calindent")
}

fn source_file(text: &str) -> tempfile::NamedTempFile {
	let file = tempfile::Builder::new().suffix(".cal").tempfile().unwrap();
	std::fs::write(file.path(), text).unwrap();
	file
}

#[test]
fn prints_corrected_source() {
	let file = source_file(UNINDENTED);
	let out = calindent(&[], file.path());
	assert!(out.status.success());
	assert_eq!(String::from_utf8_lossy(&out.stdout), INDENTED);
	assert_eq!(std::fs::read_to_string(file.path()).unwrap(), UNINDENTED);
}

#[test]
fn check_reports_pending_changes() {
	let file = source_file(UNINDENTED);
	let out = calindent(&["--check"], file.path());
	assert_eq!(out.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&out.stderr).contains("4 line(s) would be re-indented"));

	let file = source_file(INDENTED);
	let out = calindent(&["--check"], file.path());
	assert_eq!(out.status.code(), Some(0));
}

#[test]
fn write_rewrites_in_place() {
	let file = source_file(UNINDENTED);
	let out = calindent(&["--write"], file.path());
	assert!(out.status.success());
	assert!(out.stdout.is_empty());
	assert_eq!(std::fs::read_to_string(file.path()).unwrap(), INDENTED);
}

#[test]
fn line_range_limits_changes() {
	let file = source_file(UNINDENTED);
	let out = calindent(&["--lines", "4..4"], file.path());
	assert!(out.status.success());
	let stdout = String::from_utf8_lossy(&out.stdout);
	assert!(stdout.contains("\n    case x of\nJust v -> v;\n"));
}

#[test]
fn at_prints_quoted_indentation() {
	let file = source_file(UNINDENTED);
	let out = calindent(&["--at", "4"], file.path());
	assert!(out.status.success());
	assert_eq!(String::from_utf8_lossy(&out.stdout), "\"    \"\n");

	let out = calindent(&["--at", "1"], file.path());
	assert_eq!(String::from_utf8_lossy(&out.stdout), "none\n");

	let out = calindent(&["--at", "99"], file.path());
	assert!(!out.status.success());
}

#[test]
fn config_changes_indent_width() {
	let file = source_file(UNINDENTED);
	let config = tempfile::NamedTempFile::new().unwrap();
	std::fs::write(config.path(), "[indent]\nindent-width = 2\n").unwrap();
	let config_path = config.path().to_string_lossy().into_owned();

	let out = calindent(&["--config", &config_path, "--at", "4"], file.path());
	assert!(out.status.success());
	assert_eq!(String::from_utf8_lossy(&out.stdout), "\"  \"\n");
}

#[test]
fn bad_config_fails_with_context() {
	let file = source_file(UNINDENTED);
	let config = tempfile::NamedTempFile::new().unwrap();
	std::fs::write(config.path(), "[indent]\ntab-width = 0\n").unwrap();
	let config_path = config.path().to_string_lossy().into_owned();

	let out = calindent(&["--config", &config_path], file.path());
	assert!(!out.status.success());
	assert!(String::from_utf8_lossy(&out.stderr).contains("loading config"));
}
