//! The backward token walk behind every indentation query.

use quill_text::{CharIdx, TextBuffer};

use super::IndentHints;
use crate::config::IndentConfig;
use crate::scanner::HeuristicScanner;
use crate::token::TokenKind;

/// Where the walk stands: the current token and the token read before it.
#[derive(Debug, Clone, Copy)]
struct ScanCursor {
	/// Offset of the current token's first char.
	position: CharIdx,
	/// Offset the current token was read back from, i.e. the start of the
	/// token that follows it.
	previous: CharIdx,
	token: TokenKind,
	line: Option<usize>,
}

/// Meaning of a `->` found at the end of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrowKind {
	/// Type signature arrow; carries the offset of the `::`.
	Type(CharIdx),
	/// Lambda body arrow.
	Lambda,
	/// Case alternative arrow.
	Alternative,
	Unknown,
}

/// Meaning of a single `|` found at the end of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarKind {
	/// Record update or extension; carries the offset of the `{`.
	Record(CharIdx),
	/// Data constructor separator; carries the offset of the `=`.
	DataAlternative(CharIdx),
	Unknown,
}

/// Per-query walk state.
///
/// `indent` and `align` describe the result relative to the returned
/// reference offset; both are reset at the start of every query.
pub(super) struct Walk<'a> {
	scanner: HeuristicScanner<'a>,
	buffer: &'a dyn TextBuffer,
	config: &'a IndentConfig,
	cursor: ScanCursor,
	pub(super) indent: i32,
	pub(super) align: Option<CharIdx>,
}

impl<'a> Walk<'a> {
	pub(super) fn new(buffer: &'a dyn TextBuffer, config: &'a IndentConfig) -> Self {
		Self {
			scanner: HeuristicScanner::new(buffer),
			buffer,
			config,
			cursor: ScanCursor {
				position: 0,
				previous: 0,
				token: TokenKind::Eof,
				line: None,
			},
			indent: 0,
			align: None,
		}
	}

	/// Finds the reference offset for a line whose text starts at `offset`.
	pub(super) fn reference(&mut self, offset: CharIdx, hints: &IndentHints) -> Option<CharIdx> {
		self.indent = 0;
		self.align = None;
		self.reset(offset);

		if let Some((open, close)) = hints.matched_peers() {
			return match self.scanner.find_opening_peer(offset, open, close) {
				Some(opener) => {
					tracing::trace!(opener, "closing delimiter matches opener");
					Some(self.align_after_opener_on_line(opener))
				}
				None => {
					tracing::trace!(offset, "unmatched closing delimiter");
					let fallback = IndentHints {
						match_brace: false,
						match_paren: false,
						match_bracket: false,
						..*hints
					};
					let reference = self.reference(offset, &fallback)?;
					// An alignment has no unit to drop; step back from its line instead.
					match self.align.take() {
						Some(align) => {
							self.indent = -1;
							Some(align)
						}
						None => {
							self.indent -= 1;
							Some(reference)
						}
					}
				}
			};
		}

		if hints.semicolons > 0 {
			return Some(self.semicolon_reference(offset, hints.semicolons));
		}

		if let Some(keyword) = hints.dangling {
			if let Some(reference) = self.dangling(keyword) {
				return Some(reference);
			}
			tracing::trace!(?keyword, "no partner for dangling keyword");
			self.indent = 0;
			self.align = None;
			self.reset(offset);
		}

		self.next_token();
		self.dispatch(offset)
	}

	fn reset(&mut self, offset: CharIdx) {
		self.cursor = ScanCursor {
			position: offset,
			previous: offset,
			token: TokenKind::Other,
			line: self.buffer.line_of_offset(offset).ok(),
		};
	}

	fn next_token(&mut self) {
		let start = self.cursor.position;
		self.next_token_from(start);
	}

	fn next_token_from(&mut self, start: CharIdx) {
		let token = self.scanner.previous_token(start, None);
		let position = self.scanner.position();
		self.cursor = ScanCursor {
			position,
			previous: start,
			token,
			line: self.buffer.line_of_offset(position).ok(),
		};
	}

	/// Runs `probe` and restores the cursor afterwards.
	fn probe<T>(&mut self, probe: impl FnOnce(&mut Self) -> T) -> T {
		let saved = self.cursor;
		let out = probe(self);
		self.cursor = saved;
		out
	}

	fn char_at(&self, offset: Option<CharIdx>) -> Option<char> {
		offset.and_then(|o| self.buffer.char_at(o).ok())
	}

	fn char_before(&self, offset: CharIdx) -> Option<char> {
		self.char_at(offset.checked_sub(1))
	}

	fn continuation(&self) -> i32 {
		i32::try_from(self.config.continuation_indent).unwrap_or(1)
	}

	/// Aligns with the first text after `opener` on its line, else references it.
	fn align_after_opener_on_line(&mut self, opener: CharIdx) -> CharIdx {
		let line_end = self.buffer.line_info_of_offset(opener).map(|l| l.end()).ok();
		match self
			.scanner
			.find_non_whitespace_forward_in_any_partition(opener + 1, line_end)
		{
			Some(first) => {
				self.align = Some(first);
				first
			}
			None => opener,
		}
	}

	/// Reference for a line starting with `count` semicolons: the first
	/// token of the item `count - 1` levels out from the current one.
	fn semicolon_reference(&mut self, offset: CharIdx, count: usize) -> CharIdx {
		self.next_token();
		let terminated = self.cursor.token == TokenKind::Semicolon;
		if !terminated {
			self.reset(offset);
		}
		let mut start = self.skip_to_item_start(terminated);
		for _ in 1..count {
			self.reset(start);
			if !self.skip_block(false) {
				break;
			}
			start = self.skip_to_item_start(false);
		}
		tracing::trace!(count, start, "semicolon line");
		self.align_with_item(start, offset)
	}

	/// Aligns with the first token of an item that starts before `bound`.
	fn align_with_item(&mut self, start: CharIdx, bound: CharIdx) -> CharIdx {
		if start < bound {
			self.align = Some(start);
		}
		start
	}

	/// Reference for a line starting with a keyword that continues an
	/// earlier construct.
	fn dangling(&mut self, keyword: TokenKind) -> Option<CharIdx> {
		use TokenKind::*;

		let reference = match keyword {
			In => {
				let partner = self.find_partner(Let, Some(In), false)?;
				self.align = Some(partner);
				partner
			}
			Then | Else => {
				let partner = self.find_partner(If, Some(Else), false)?;
				let line = self.cursor.line;
				let partner = self.probe(|walk| {
					walk.next_token();
					(walk.cursor.token == Else && walk.cursor.line == line).then_some(walk.cursor.position)
				})
				.unwrap_or(partner);
				self.align = Some(partner);
				partner
			}
			Deriving => {
				let partner = self.find_partner(Data, None, true)?;
				self.indent = 1;
				partner
			}
			Of => {
				let partner = self.find_partner(Case, Some(Of), false)?;
				self.align = Some(partner);
				partner
			}
			Default => {
				let start = self.skip_to_item_start(false);
				self.indent = 1;
				start
			}
			_ => return None,
		};
		tracing::trace!(?keyword, reference, "dangling keyword partner");
		Some(reference)
	}

	/// Decides the reference from the token under the cursor.
	fn dispatch(&mut self, bound: CharIdx) -> Option<CharIdx> {
		use TokenKind::*;

		let token = self.cursor.token;
		let position = self.cursor.position;
		tracing::trace!(?token, position, "dispatch");

		match token {
			Eof => None,

			Semicolon => {
				let start = self.skip_to_item_start(true);
				Some(self.align_with_item(start, bound))
			}

			RBrace | RParen | RBracket => {
				let saved = self.cursor;
				if self.skip_scope() {
					self.next_token();
					return self.dispatch(bound);
				}
				self.cursor = saved;
				self.list_item_or_scope_opener(bound, false)
			}

			LBrace | LParen | LBracket => Some(self.scope_introduction(bound)),

			Equal if self.is_plain_equal(position) => {
				self.indent = 1;
				Some(position)
			}

			GreaterThan => match self.char_before(position) {
				Some('-') => {
					self.next_token();
					match self.probe(Self::classify_arrow) {
						ArrowKind::Type(colon) => {
							self.indent = self.continuation();
							Some(colon)
						}
						ArrowKind::Lambda | ArrowKind::Alternative => {
							self.indent = 1;
							Some(self.cursor.position)
						}
						ArrowKind::Unknown => self.list_item_or_scope_opener(bound, false),
					}
				}
				Some('=') => {
					self.next_token();
					let start = self.skip_to_item_start(false);
					self.indent = self.continuation();
					Some(start)
				}
				_ => self.list_item_or_scope_opener(bound, false),
			},

			Colon if self.char_before(position) == Some(':') => {
				self.next_token();
				let literal = self.probe(|walk| {
					walk.next_token();
					walk.cursor.token == Other
				});
				if literal {
					return self.list_item_or_scope_opener(bound, false);
				}
				self.indent = self.continuation();
				Some(self.cursor.position)
			}

			Bar if self.is_single_bar(position) => match self.probe(Self::classify_bar) {
				BarKind::Record(brace) => Some(self.first_element_after(brace, bound)),
				BarKind::DataAlternative(equal) => Some(self.first_element_after(equal, bound)),
				BarKind::Unknown => self.list_item_or_scope_opener(bound, false),
			},

			ConsIdent => {
				if self.probe(Self::begins_data_constructor) {
					self.indent = 1;
					Some(position)
				} else {
					self.list_item_or_scope_opener(bound, false)
				}
			}

			Data | Class | Instance | Public | Protected | Private | Foreign | Unsafe | Jvm
			| Primitive | Module | Import | Friend | Deriving | Default | Let | In | If | Then
			| Else | Case | Where | Using => {
				self.indent = 1;
				Some(position)
			}

			Of => match self.probe(|walk| walk.find_partner(Case, Some(Of), false)) {
				Some(case) => {
					self.align = Some(case);
					Some(case)
				}
				None => Some(position),
			},

			_ => self.list_item_or_scope_opener(bound, token == Comma),
		}
	}

	/// Walks back over list items until a line break or a scope opener.
	///
	/// Crossing onto an earlier line aligns with the start of the line the
	/// walk began on. Openers and item-introducing tokens align with the
	/// first element after them.
	fn list_item_or_scope_opener(&mut self, bound: CharIdx, from_comma: bool) -> Option<CharIdx> {
		use TokenKind::*;

		let start_line = self.cursor.line;
		let start = self.cursor.position;

		loop {
			self.next_token();

			if let (Some(line), Some(start_line)) = (self.cursor.line, start_line)
				&& line < start_line
			{
				let line_start = self.buffer.line_info(start_line).ok()?.offset;
				let limit = (start + 1).min(self.buffer.len_chars());
				self.align = self
					.scanner
					.find_non_whitespace_forward_in_any_partition(line_start, Some(limit));
				tracing::trace!(start_line, align = ?self.align, "list item on previous line");
				return Some(start);
			}

			let position = self.cursor.position;
			match self.cursor.token {
				RBrace | RParen | RBracket => {
					self.skip_scope();
				}
				LBrace | LParen | LBracket => return Some(self.scope_introduction(bound)),
				Equal if self.is_plain_equal(position) => {
					if from_comma && self.probe(Self::is_record_field) {
						continue;
					}
					return Some(self.first_element_alignment(bound));
				}
				GreaterThan if self.char_before(position) == Some('=') => {
					return Some(self.first_element_alignment(bound));
				}
				Deriving | Using | Semicolon | Of | Where | Let | In | If | Then | Else | Case => {
					return Some(self.first_element_alignment(bound));
				}
				Eof => return Some(0),
				_ => {}
			}
		}
	}

	/// Aligns with the first element after the opener under the cursor, or
	/// indents from the opener when the scope is still empty.
	fn scope_introduction(&mut self, bound: CharIdx) -> CharIdx {
		let opener = self.cursor.position;
		match self
			.scanner
			.find_non_whitespace_forward_in_any_partition(opener + 1, Some(bound))
		{
			Some(first) => {
				self.align = Some(first);
				first
			}
			None => {
				self.indent = if self.cursor.token == TokenKind::LBrace {
					1
				} else {
					self.continuation()
				};
				opener
			}
		}
	}

	/// Aligns with the first element after the token under the cursor.
	fn first_element_alignment(&mut self, bound: CharIdx) -> CharIdx {
		let end = self.token_end();
		let first = self
			.scanner
			.find_non_whitespace_forward_in_any_partition(end, Some(bound))
			.unwrap_or(self.cursor.previous);
		self.align = Some(first);
		first
	}

	/// Aligns with the first element after the single char at `anchor`.
	fn first_element_after(&mut self, anchor: CharIdx, bound: CharIdx) -> CharIdx {
		let first = self
			.scanner
			.find_non_whitespace_forward_in_any_partition(anchor + 1, Some(bound))
			.unwrap_or(anchor + 1);
		self.align = Some(first);
		first
	}

	fn token_end(&mut self) -> CharIdx {
		self.scanner.next_token(self.cursor.position, None);
		self.scanner.position()
	}

	/// Skips the scope closed by the token under the cursor.
	///
	/// On success the cursor is on the matching opener.
	fn skip_scope(&mut self) -> bool {
		let Some((open, close)) = self.cursor.token.peers() else {
			return false;
		};
		match self.scanner.find_opening_peer(self.cursor.position, open, close) {
			Some(opener) => {
				self.next_token_from(opener + 1);
				true
			}
			None => false,
		}
	}

	/// Walks back to `partner`, skipping closed scopes and nested pairs
	/// opened by `nested`.
	///
	/// Stops at unmatched openers, the document start, and optionally `;`.
	fn find_partner(&mut self, partner: TokenKind, nested: Option<TokenKind>, stop_on_semicolon: bool) -> Option<CharIdx> {
		let mut depth = 0usize;
		loop {
			self.next_token();
			let token = self.cursor.token;
			if token == partner {
				if depth == 0 {
					return Some(self.cursor.position);
				}
				depth -= 1;
			} else if Some(token) == nested {
				depth += 1;
			} else if token.is_closer() {
				if !self.skip_scope() {
					return None;
				}
			} else if token.is_opener() || token == TokenKind::Eof || (stop_on_semicolon && token == TokenKind::Semicolon) {
				return None;
			}
		}
	}

	/// Walks back to the first token of the current item.
	///
	/// `terminated` means the `;` ending the item was already consumed, so
	/// a `;` read straight away closes a nested block.
	fn skip_to_item_start(&mut self, terminated: bool) -> CharIdx {
		use TokenKind::*;

		let mut empty = terminated;
		loop {
			self.next_token();
			let previous = self.cursor.previous;
			match self.cursor.token {
				Semicolon if empty => {
					if !self.skip_block(true) {
						return self.cursor.previous;
					}
				}
				Semicolon | LBrace | LParen | LBracket | Eof | Of | Where | Using | Let => return previous,
				In => {
					if self.find_partner(Let, Some(In), false).is_none() {
						return previous;
					}
				}
				RBrace | RParen | RBracket => {
					if !self.skip_scope() {
						return previous;
					}
				}
				_ => {}
			}
			empty = false;
		}
	}

	/// Walks back over the items of a block to its opening keyword.
	///
	/// Returns false when the walk reaches something that cannot enclose a
	/// `;`-separated block.
	fn skip_block(&mut self, after_semicolon: bool) -> bool {
		use TokenKind::*;

		let mut empty = after_semicolon;
		loop {
			self.next_token();
			match self.cursor.token {
				Of | Where | Using => return true,
				Semicolon if empty => {
					if !self.skip_block(true) {
						return false;
					}
				}
				Semicolon => {
					empty = true;
					continue;
				}
				Let | Eof | LBrace | LParen | LBracket => return false,
				In => {
					if self.find_partner(Let, Some(In), false).is_none() {
						return false;
					}
				}
				RBrace | RParen | RBracket => {
					if !self.skip_scope() {
						return false;
					}
				}
				_ => {}
			}
			empty = false;
		}
	}

	/// Whether the `=` at `position` is assignment rather than part of an operator.
	fn is_plain_equal(&self, position: CharIdx) -> bool {
		let before = self.char_before(position);
		let after = self.char_at(Some(position + 1));
		!matches!(before, Some('=' | '<' | '>' | '!' | ':')) && !matches!(after, Some('=' | '>'))
	}

	fn is_single_bar(&self, position: CharIdx) -> bool {
		self.char_before(position) != Some('|') && self.char_at(Some(position + 1)) != Some('|')
	}

	/// Classifies the `->` whose dash is under the cursor.
	fn classify_arrow(&mut self) -> ArrowKind {
		use TokenKind::*;

		loop {
			self.next_token();
			let position = self.cursor.position;
			match self.cursor.token {
				Colon if self.char_before(position) == Some(':') => return ArrowKind::Type(position - 1),
				Backslash => return ArrowKind::Lambda,
				Of | Semicolon => return ArrowKind::Alternative,
				LBrace | LParen | LBracket | Eof => return ArrowKind::Unknown,
				RBrace | RParen | RBracket => {
					if !self.skip_scope() {
						return ArrowKind::Unknown;
					}
				}
				Equal if self.char_at(Some(position + 1)) != Some('>') => return ArrowKind::Unknown,
				_ => {}
			}
		}
	}

	/// Classifies the single `|` under the cursor.
	fn classify_bar(&mut self) -> BarKind {
		use TokenKind::*;

		loop {
			self.next_token();
			let position = self.cursor.position;
			match self.cursor.token {
				LBrace => return BarKind::Record(position),
				LParen | LBracket | Semicolon | Eof => return BarKind::Unknown,
				RBrace | RParen | RBracket => {
					if !self.skip_scope() {
						return BarKind::Unknown;
					}
				}
				Equal if self.is_plain_equal(position) => {
					return if self.walk_back_to_data() {
						BarKind::DataAlternative(position)
					} else {
						BarKind::Unknown
					};
				}
				_ => {}
			}
		}
	}

	/// Whether the constructor under the cursor belongs to a data
	/// declaration: a single `|` or the `data` keyword comes first walking
	/// back, before any `::`, bracket or `;`.
	fn begins_data_constructor(&mut self) -> bool {
		use TokenKind::*;

		loop {
			self.next_token();
			let position = self.cursor.position;
			match self.cursor.token {
				Data => return true,
				Bar => return self.is_single_bar(position),
				Semicolon | Eof | LBrace | RBrace | LParen | RParen | LBracket | RBracket => return false,
				Colon if self.char_before(position) == Some(':') => return false,
				_ => {}
			}
		}
	}

	/// Whether a `data` keyword precedes the cursor within the current declaration.
	fn walk_back_to_data(&mut self) -> bool {
		use TokenKind::*;

		loop {
			self.next_token();
			let position = self.cursor.position;
			match self.cursor.token {
				Data => return true,
				Semicolon | Eof | LBrace | RBrace | LParen | RParen | LBracket | RBracket => return false,
				Colon if self.char_before(position) == Some(':') => return false,
				_ => {}
			}
		}
	}

	/// Whether the `=` under the cursor belongs to a `field = value` record entry.
	fn is_record_field(&mut self) -> bool {
		self.next_token();
		if self.cursor.token != TokenKind::OtherIdent {
			return false;
		}
		self.next_token();
		matches!(self.cursor.token, TokenKind::Comma | TokenKind::LBrace | TokenKind::Bar)
	}
}
