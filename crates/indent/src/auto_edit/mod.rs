//! Turning computed indentation into text edits.
//!
//! These are the editor-facing actions: indenting a fresh line after
//! Enter, re-indenting a line when a closing delimiter is typed as its
//! first char, and correcting the indentation of a range of lines.

use std::ops::Range;

use quill_text::{BufferError, CharIdx, Document, Region, TextBuffer};

use crate::config::IndentConfig;
use crate::indenter::Indenter;


/// Replacement of `region` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
	/// Chars to replace.
	pub region: Region,
	/// Replacement text.
	pub text: String,
}

impl TextEdit {
	/// Creates an edit replacing `region` with `text`.
	pub fn new(region: Region, text: impl Into<String>) -> Self {
		Self {
			region,
			text: text.into(),
		}
	}

	/// Applies the edit to `doc`.
	pub fn apply(&self, doc: &mut Document) -> Result<(), BufferError> {
		doc.replace(self.region, &self.text)
	}
}

/// Edit for a line break typed at `offset`.
///
/// Whitespace after the cursor is swallowed. Without a suggestion the new
/// line copies the current line's leading whitespace.
pub fn newline_edit(doc: &Document, offset: CharIdx, config: &IndentConfig) -> Result<TextEdit, BufferError> {
	let line = doc.line_info_of_offset(offset)?;
	let mut trailing = offset;
	while trailing < line.end() && matches!(doc.char_at(trailing)?, ' ' | '\t') {
		trailing += 1;
	}

	let mut preview = doc.clone();
	preview.replace(Region::from_bounds(offset, trailing), "\n")?;
	let indent = Indenter::new(&preview, config)
		.compute_indentation(offset + 1)
		.map_or_else(|| leading_whitespace(doc, line), Ok)?;

	tracing::debug!(offset, indent = ?indent, "newline");
	Ok(TextEdit::new(
		Region::from_bounds(offset, trailing),
		format!("\n{indent}"),
	))
}

/// Edit for a closing delimiter typed at `offset`.
///
/// Returns `None` unless `ch` is `}`, `)` or `]` and only whitespace
/// precedes `offset` on its line; the edit then replaces that whitespace
/// with the line's new indentation followed by `ch`.
pub fn closing_delimiter_edit(
	doc: &Document,
	offset: CharIdx,
	ch: char,
	config: &IndentConfig,
) -> Result<Option<TextEdit>, BufferError> {
	if !matches!(ch, '}' | ')' | ']') {
		return Ok(None);
	}
	let line = doc.line_info_of_offset(offset)?;
	let prefix = Region::from_bounds(line.offset, offset);
	if !doc.text_of(prefix)?.chars().all(char::is_whitespace) {
		return Ok(None);
	}

	let mut preview = doc.clone();
	preview.insert(offset, &ch.to_string())?;
	let Some(indent) = Indenter::new(&preview, config).compute_indentation(line.offset) else {
		return Ok(None);
	};
	Ok(Some(TextEdit::new(prefix, format!("{indent}{ch}"))))
}

/// Edit re-indenting `line`.
///
/// Returns `None` when the indentation is already right, the heuristic has
/// no suggestion, the line is blank, or the line starts inside a comment
/// that began on an earlier line.
pub fn reindent_line(doc: &Document, line: usize, config: &IndentConfig) -> Result<Option<TextEdit>, BufferError> {
	let info = doc.line_info(line)?;
	let partition = doc.partition_at(info.offset)?;
	if partition.kind.is_multiline() && partition.region.offset < info.offset {
		tracing::trace!(line, "inside multi-line comment");
		return Ok(None);
	}

	let current = leading_whitespace(doc, info)?;
	let current_len = current.chars().count();
	if current_len == info.len {
		return Ok(None);
	}

	let Some(indent) = Indenter::new(doc, config).compute_indentation(info.offset) else {
		return Ok(None);
	};
	if indent == current {
		return Ok(None);
	}
	Ok(Some(TextEdit::new(Region::new(info.offset, current_len), indent)))
}

/// Re-indents `lines` in order, each line seeing the corrected lines above it.
///
/// Lines past the end of the document are ignored. Returns the number of
/// lines changed.
pub fn correct_indentation(doc: &mut Document, lines: Range<usize>, config: &IndentConfig) -> Result<usize, BufferError> {
	let end = lines.end.min(doc.line_count());
	let mut changed = 0;
	for line in lines.start..end {
		if let Some(edit) = reindent_line(doc, line, config)? {
			edit.apply(doc)?;
			changed += 1;
		}
	}
	tracing::debug!(changed, "corrected indentation");
	Ok(changed)
}

fn leading_whitespace(doc: &Document, line: Region) -> Result<String, BufferError> {
	let text = doc.text_of(line)?;
	Ok(text.chars().take_while(|c| matches!(c, ' ' | '\t')).collect())
}
