use clap::Parser;

use crate::cli::{Cli, parse_line_range};
use crate::setup_tracing;

#[test]
fn test_parse_line_range() {
	assert_eq!(parse_line_range("1..1"), Ok(0..1));
	assert_eq!(parse_line_range("3..10"), Ok(2..10));
	assert_eq!(parse_line_range(" 2 .. 4 "), Ok(1..4));
	assert!(parse_line_range("0..3").is_err());
	assert!(parse_line_range("5..4").is_err());
	assert!(parse_line_range("7").is_err());
	assert!(parse_line_range("a..b").is_err());
}

#[test]
fn test_cli_flags() {
	let cli = Cli::try_parse_from(["calindent", "--lines", "2..3", "--check", "f.cal"]).unwrap();
	assert_eq!(cli.lines, Some(1..3));
	assert!(cli.check);
	assert!(!cli.write);

	assert!(Cli::try_parse_from(["calindent", "--check", "--write", "f.cal"]).is_err());
	assert!(Cli::try_parse_from(["calindent", "--at", "2", "--write", "f.cal"]).is_err());
	assert!(Cli::try_parse_from(["calindent"]).is_err());
}

#[test]
fn test_setup_tracing_reports_second_install() {
	let _ = setup_tracing(false);
	let err = setup_tracing(true).unwrap_err();
	assert!(err.to_string().contains("installing tracing subscriber"));
}
