//! Rope utilities and extensions.

use ropey::RopeSlice;

use crate::range::Region;

/// Returns whether `c` terminates a line in ropey's line model.
#[inline]
pub fn is_line_break(c: char) -> bool {
	matches!(
		c,
		'\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
	)
}

/// Returns the span of `line` without its line delimiter.
///
/// `\r\n` counts as a single delimiter. Returns `None` past the last line.
pub fn line_region(text: RopeSlice, line: usize) -> Option<Region> {
	if line >= text.len_lines() {
		return None;
	}

	let start = text.line_to_char(line);
	let slice = text.line(line);
	let mut len = slice.len_chars();
	if len > 0 && slice.char(len - 1) == '\n' {
		len -= 1;
		if len > 0 && slice.char(len - 1) == '\r' {
			len -= 1;
		}
	} else if len > 0 && is_line_break(slice.char(len - 1)) {
		len -= 1;
	}

	Some(Region::new(start, len))
}

#[cfg(test)]
mod tests {
	use ropey::Rope;

	use super::*;

	#[test]
	fn test_line_region_excludes_delimiter() {
		let text = Rope::from("ab\r\ncd\nef");
		let slice = text.slice(..);
		assert_eq!(line_region(slice, 0), Some(Region::new(0, 2)));
		assert_eq!(line_region(slice, 1), Some(Region::new(4, 2)));
		assert_eq!(line_region(slice, 2), Some(Region::new(7, 2)));
		assert_eq!(line_region(slice, 3), None);
	}

	#[test]
	fn test_line_region_lone_carriage_return() {
		let text = Rope::from("ab\rcd");
		assert_eq!(line_region(text.slice(..), 0), Some(Region::new(0, 2)));
		assert!(is_line_break('\u{2028}'));
		assert!(!is_line_break('\t'));
	}

	#[test]
	fn test_line_region_empty_last_line() {
		let text = Rope::from("x\n");
		assert_eq!(line_region(text.slice(..), 1), Some(Region::new(2, 0)));
	}
}
