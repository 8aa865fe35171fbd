use std::ops::Range;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "calindent")]
#[command(about = "Correct the indentation of CAL source files")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// CAL source file
	pub file: PathBuf,

	/// TOML file with an [indent] table
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Lines to re-indent, 1-based and inclusive (e.g. 3..10)
	#[arg(long, value_name = "START..END", value_parser = parse_line_range)]
	pub lines: Option<Range<usize>>,

	/// Exit with status 1 if any line would change
	#[arg(long, conflicts_with = "write")]
	pub check: bool,

	/// Rewrite the file in place instead of printing it
	#[arg(long, short = 'w')]
	pub write: bool,

	/// Print the computed indentation of one line and exit
	#[arg(long, value_name = "LINE", conflicts_with_all = ["lines", "check", "write"])]
	pub at: Option<usize>,

	/// Verbose logging
	#[arg(long, short = 'v')]
	pub verbose: bool,
}

/// Parses `START..END` (1-based, inclusive) into a zero-based line range.
pub fn parse_line_range(input: &str) -> Result<Range<usize>, String> {
	let (start, end) = input
		.split_once("..")
		.ok_or_else(|| format!("expected START..END, got {input:?}"))?;
	let start: usize = start.trim().parse().map_err(|e| format!("invalid start line: {e}"))?;
	let end: usize = end.trim().parse().map_err(|e| format!("invalid end line: {e}"))?;
	if start == 0 {
		return Err("lines are numbered from 1".into());
	}
	if end < start {
		return Err(format!("range {start}..{end} is empty"));
	}
	Ok(start - 1..end)
}
