//! Heuristic indentation for CAL.
//!
//! The [`Indenter`] looks backward from the start of a line, reading one
//! token at a time, and decides which earlier offset the line should be
//! indented relative to. It never parses: incomplete and ill-formed text
//! is the normal case, and every question it cannot answer becomes "no
//! suggestion" rather than an error.
//!
//! A result is either relative (the reference line's leading whitespace
//! plus `delta` indent units) or absolute (align with a column on an
//! earlier line).

use quill_text::{CharIdx, Region, TextBuffer};

use crate::config::IndentConfig;
use crate::scanner::HeuristicScanner;
use crate::token::TokenKind;

mod walk;
pub mod whitespace;


use walk::Walk;

/// Where an indentation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentResult {
	/// Offset whose line provides the base indentation.
	pub reference: CharIdx,
	/// Indent units to add to the reference line's indentation.
	pub delta: i32,
	/// Absolute alignment target. Overrides `delta` when set.
	pub align: Option<CharIdx>,
}

/// What the first tokens of the line being indented imply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndentHints {
	/// A keyword that continues an earlier construct (`in`, `then`,
	/// `else`, `deriving`, `of`, `default`).
	pub dangling: Option<TokenKind>,
	/// The line starts with `}`.
	pub match_brace: bool,
	/// The line starts with `)`.
	pub match_paren: bool,
	/// The line starts with `]`.
	pub match_bracket: bool,
	/// Number of `;` the line starts with.
	pub semicolons: usize,
	/// The line starts with `{` and braces get their own indent level.
	pub indent_opening_brace: bool,
}

impl IndentHints {
	/// Delimiter pair the line has to line up with, if it starts with a closer.
	fn matched_peers(&self) -> Option<(char, char)> {
		if self.match_brace {
			Some(('{', '}'))
		} else if self.match_paren {
			Some(('(', ')'))
		} else if self.match_bracket {
			Some(('[', ']'))
		} else {
			None
		}
	}
}

/// Computes indentation against a buffer and a configuration.
///
/// The indenter only borrows; every call builds its own scan state.
pub struct Indenter<'a> {
	buffer: &'a dyn TextBuffer,
	config: &'a IndentConfig,
}

impl<'a> Indenter<'a> {
	/// Creates an indenter over `buffer`.
	pub fn new(buffer: &'a dyn TextBuffer, config: &'a IndentConfig) -> Self {
		Self { buffer, config }
	}

	/// Inspects the line of `offset` for tokens that steer the heuristic.
	///
	/// Hints only apply when `offset` is preceded by nothing but
	/// whitespace on its line.
	pub fn hints_at(&self, offset: CharIdx) -> IndentHints {
		let mut hints = IndentHints::default();
		if offset >= self.buffer.len_chars() {
			return hints;
		}
		let Ok(line) = self.buffer.line_info_of_offset(offset) else {
			return hints;
		};
		let Ok(prefix) = self.buffer.text_of(Region::from_bounds(line.offset, offset)) else {
			return hints;
		};
		if !prefix.chars().all(char::is_whitespace) {
			return hints;
		}

		let mut scanner = HeuristicScanner::new(self.buffer);
		let bound = Some(line.end());
		match scanner.next_token(offset, bound) {
			TokenKind::RBrace => hints.match_brace = true,
			TokenKind::RParen => hints.match_paren = true,
			TokenKind::RBracket => hints.match_bracket = true,
			TokenKind::LBrace => hints.indent_opening_brace = self.config.indent_braces_for_blocks,
			keyword @ (TokenKind::In
			| TokenKind::Then
			| TokenKind::Else
			| TokenKind::Deriving
			| TokenKind::Of
			| TokenKind::Default) => hints.dangling = Some(keyword),
			TokenKind::Semicolon => {
				hints.semicolons = 1;
				while scanner.next_token(scanner.position(), bound) == TokenKind::Semicolon {
					hints.semicolons += 1;
				}
			}
			_ => {}
		}
		hints
	}

	/// Finds the reference for the line text starting at `offset`, using
	/// the hints found on that line.
	pub fn find_reference_position(&self, offset: CharIdx) -> Option<IndentResult> {
		self.find_reference_position_with(offset, &self.hints_at(offset))
	}

	/// Finds the reference for `offset` under explicit hints.
	pub fn find_reference_position_with(&self, offset: CharIdx, hints: &IndentHints) -> Option<IndentResult> {
		if offset > self.buffer.len_chars() {
			return None;
		}
		let mut walk = Walk::new(self.buffer, self.config);
		let reference = walk.reference(offset, hints)?;
		let mut delta = walk.indent;
		if hints.indent_opening_brace {
			delta += 1;
		}
		let result = IndentResult {
			reference,
			delta,
			align: walk.align,
		};
		tracing::debug!(offset, ?hints, ?result, "reference position");
		Some(result)
	}

	/// Computes the leading whitespace for the line text starting at `offset`.
	///
	/// Returns `None` when the heuristic has no suggestion; the caller should
	/// then leave the line alone.
	pub fn compute_indentation(&self, offset: CharIdx) -> Option<String> {
		let result = self.find_reference_position(offset)?;
		let indent = match result.align {
			Some(align) => {
				let line = self.buffer.line_info_of_offset(align).ok()?;
				let prefix = self.buffer.text_of(Region::from_bounds(line.offset, align)).ok()?;
				whitespace::create_indent(&prefix)
			}
			None => {
				let reference = self.leading_whitespace(result.reference)?;
				whitespace::reusing_indent(&reference, result.delta, self.config)
			}
		};
		tracing::debug!(offset, indent = ?indent, "computed indentation");
		Some(indent)
	}

	/// Returns the leading whitespace of the reference line for `offset`.
	pub fn reference_indentation(&self, offset: CharIdx) -> Option<String> {
		let result = self.find_reference_position(offset)?;
		self.leading_whitespace(result.reference)
	}

	/// Leading whitespace of the line containing `offset`.
	///
	/// Comments count as content; a blank line is all whitespace.
	fn leading_whitespace(&self, offset: CharIdx) -> Option<String> {
		let line = self.buffer.line_info_of_offset(offset).ok()?;
		let mut scanner = HeuristicScanner::new(self.buffer);
		let end = scanner
			.find_non_whitespace_forward_in_any_partition(line.offset, Some(line.end()))
			.unwrap_or(line.end());
		self.buffer.text_of(Region::from_bounds(line.offset, end)).ok()
	}
}
