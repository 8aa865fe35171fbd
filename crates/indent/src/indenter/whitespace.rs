//! Rendering of indentation strings.

use crate::config::{IndentConfig, TabPolicy};

/// Visual width of `text`, expanding tabs to the next tab stop.
pub fn visual_length(text: &str, tab_width: usize) -> usize {
	text.chars().fold(0, |len, c| advance(len, c, tab_width))
}

/// Longest prefix of `text` whose visual width does not exceed `max`.
pub fn strip_exceeding(text: &str, max: usize, tab_width: usize) -> &str {
	let mut len = 0;
	for (i, c) in text.char_indices() {
		len = advance(len, c, tab_width);
		if len > max {
			return &text[..i];
		}
	}
	text
}

/// Extends or shrinks `reference` by `delta` indent units.
///
/// The part of `reference` that fits below the new width, rounded down to
/// a tab stop, is kept verbatim; the remainder is filled per the tab policy.
pub fn reusing_indent(reference: &str, delta: i32, config: &IndentConfig) -> String {
	let tab_width = config.tab_width.max(1);
	let unit = config.indent_unit_width() as i64;
	let ref_len = visual_length(reference, tab_width);

	let total = (ref_len as i64 + unit * i64::from(delta)).max(0) as usize;
	let min = total.min(ref_len);
	let max_copy = min - min % tab_width;

	let mut out = strip_exceeding(reference, max_copy, tab_width).to_string();
	let missing = total.saturating_sub(visual_length(&out, tab_width));
	fill(&mut out, missing, config);
	out
}

/// Whitespace as wide as `prefix`, keeping its tabs.
pub fn create_indent(prefix: &str) -> String {
	prefix
		.chars()
		.map(|c| if c == '\t' { '\t' } else { ' ' })
		.collect()
}

fn fill(out: &mut String, missing: usize, config: &IndentConfig) {
	let tab_width = config.tab_width.max(1);
	match config.effective_tab_policy() {
		TabPolicy::Spaces => out.extend(std::iter::repeat_n(' ', missing)),
		TabPolicy::Tabs | TabPolicy::Mixed => {
			out.extend(std::iter::repeat_n('\t', missing / tab_width));
			out.extend(std::iter::repeat_n(' ', missing % tab_width));
		}
	}
}

fn advance(len: usize, c: char, tab_width: usize) -> usize {
	if c == '\t' {
		len + tab_width - len % tab_width
	} else {
		len + 1
	}
}
