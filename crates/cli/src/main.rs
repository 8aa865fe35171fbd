//! `calindent`: corrects the indentation of a CAL source file.

mod cli;
#[cfg(test)]
mod tests;

use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use cli::Cli;
use quill_indent::{IndentConfig, Indenter, correct_indentation};
use quill_text::{Document, TextBuffer};
use tracing::{debug, info};

fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose)?;

	let config = match &cli.config {
		Some(path) => IndentConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
		None => IndentConfig::default(),
	};
	debug!(?config, "indent config");

	let source = std::fs::read_to_string(&cli.file).with_context(|| format!("reading {}", cli.file.display()))?;
	let mut doc = Document::from(source.as_str());

	if let Some(line) = cli.at {
		print_line_indentation(&doc, line, &config)?;
		return Ok(ExitCode::SUCCESS);
	}

	let lines = cli.lines.clone().unwrap_or(0..doc.line_count());
	let changed = correct_indentation(&mut doc, lines, &config).context("re-indenting")?;
	debug!(file = %cli.file.display(), changed, "corrected indentation");

	if cli.check {
		if changed > 0 {
			eprintln!("{}: {changed} line(s) would be re-indented", cli.file.display());
			return Ok(ExitCode::FAILURE);
		}
		return Ok(ExitCode::SUCCESS);
	}

	let output = doc.to_string();
	if cli.write {
		if changed > 0 {
			std::fs::write(&cli.file, output).with_context(|| format!("writing {}", cli.file.display()))?;
			info!(file = %cli.file.display(), changed, "rewrote file");
		}
	} else {
		print!("{output}");
	}
	Ok(ExitCode::SUCCESS)
}

/// Prints the indentation computed for 1-based `line`, or `none`.
fn print_line_indentation(doc: &Document, line: usize, config: &IndentConfig) -> anyhow::Result<()> {
	if line == 0 || line > doc.line_count() {
		bail!("line {line} out of range (1..={})", doc.line_count());
	}
	let offset = doc.line_info(line - 1)?.offset;
	match Indenter::new(doc, config).compute_indentation(offset) {
		Some(indent) => println!("{indent:?}"),
		None => println!("none"),
	}
	Ok(())
}

fn setup_tracing(verbose: bool) -> anyhow::Result<()> {
	let level = if verbose {
		tracing::Level::DEBUG
	} else {
		tracing::Level::INFO
	};
	let subscriber = tracing_subscriber::fmt()
		.with_max_level(level)
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber).context("installing tracing subscriber")?;
	Ok(())
}
