//! Partition-aware lexical scanning over a [`TextBuffer`].
//!
//! The scanner reads one token at a time in either direction. It only
//! interprets text in the code partition: when a scan lands inside a
//! comment or literal it jumps to the partition boundary, so brackets and
//! keywords inside them never take part in matching.
//!
//! Forward scans take an inclusive `start` and an exclusive upper `bound`.
//! Backward scans take an exclusive `end` and an inclusive lower `bound`.
//! A `bound` of `None` means the document boundary.

use quill_text::{CharIdx, Region, TextBuffer};

use crate::token::{TokenKind, is_ident_part, is_ident_start, is_whitespace};


/// When a scan stops, and where it continues when it does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
	/// Any non-whitespace char, in any partition.
	NonWhitespace,
	/// A non-whitespace char in the code partition.
	NonWhitespaceCode,
	/// A char that cannot continue an identifier, or leaves the code partition.
	NonIdentPartCode,
	/// One of the given chars in the code partition.
	Chars([char; 2]),
}

impl Stop {
	/// Whether non-code partitions are skipped as a whole.
	const fn jumps_partitions(self) -> bool {
		matches!(self, Self::NonWhitespaceCode | Self::Chars(_))
	}
}

/// Token-level scanner over a borrowed buffer.
///
/// The only state is the position reached by the last scan. A scanner is
/// cheap to create and is meant to live for a single indentation query.
pub struct HeuristicScanner<'a> {
	buffer: &'a dyn TextBuffer,
	pos: CharIdx,
}

impl<'a> HeuristicScanner<'a> {
	/// Creates a scanner over `buffer`.
	pub fn new(buffer: &'a dyn TextBuffer) -> Self {
		Self { buffer, pos: 0 }
	}

	/// Returns the buffer this scanner reads.
	pub fn buffer(&self) -> &'a dyn TextBuffer {
		self.buffer
	}

	/// Position reached by the last scan.
	///
	/// After [`next_token`](Self::next_token) this is the offset just past
	/// the token; after [`previous_token`](Self::previous_token) it is the
	/// offset of the token's first char. A failed scan leaves it at the
	/// bound.
	pub fn position(&self) -> CharIdx {
		self.pos
	}

	/// Reads the next token at or after `start`.
	pub fn next_token(&mut self, start: CharIdx, bound: Option<CharIdx>) -> TokenKind {
		debug_assert!(bound.is_none_or(|b| b >= start), "bound {bound:?} before start {start}");
		let Some(at) = self.scan_forward(start, bound, Stop::NonWhitespaceCode) else {
			return TokenKind::Eof;
		};
		let Ok(ch) = self.buffer.char_at(at) else {
			return TokenKind::Eof;
		};
		self.pos = at + 1;

		if let Some(kind) = TokenKind::from_punctuation(ch) {
			return kind;
		}
		if !is_ident_part(ch) {
			return TokenKind::Other;
		}

		let end = self
			.scan_forward(at + 1, bound, Stop::NonIdentPartCode)
			.unwrap_or(self.pos);
		self.pos = end;
		self.classify(Region::from_bounds(at, end))
	}

	/// Reads the token that ends before `end`.
	pub fn previous_token(&mut self, end: CharIdx, bound: Option<CharIdx>) -> TokenKind {
		debug_assert!(bound.is_none_or(|b| b <= end), "bound {bound:?} after end {end}");
		let Some(at) = self.scan_backward(end, bound, Stop::NonWhitespaceCode) else {
			return TokenKind::Eof;
		};
		let Ok(ch) = self.buffer.char_at(at) else {
			return TokenKind::Eof;
		};
		self.pos = at;

		if let Some(kind) = TokenKind::from_punctuation(ch) {
			return kind;
		}
		if !is_ident_part(ch) {
			return TokenKind::Other;
		}

		let start = match self.scan_backward(at, bound, Stop::NonIdentPartCode) {
			Some(stop) => stop + 1,
			None => self.pos,
		};
		self.pos = start;
		self.classify(Region::from_bounds(start, at + 1))
	}

	/// Finds the closer matching an opener that precedes `start`.
	///
	/// The scan begins at `start` itself with a depth of one.
	pub fn find_closing_peer(&mut self, start: CharIdx, open: char, close: char) -> Option<CharIdx> {
		let mut depth = 1usize;
		let mut from = start;
		loop {
			let at = self.scan_forward(from, None, Stop::Chars([open, close]))?;
			if self.buffer.char_at(at).ok()? == open {
				depth += 1;
			} else {
				depth -= 1;
			}
			if depth == 0 {
				tracing::trace!(start, at, "closing peer");
				return Some(at);
			}
			from = at + 1;
		}
	}

	/// Finds the opener matching a closer at or after `end`.
	///
	/// The scan begins at `end - 1` with a depth of one.
	pub fn find_opening_peer(&mut self, end: CharIdx, open: char, close: char) -> Option<CharIdx> {
		let mut depth = 1usize;
		let mut to = end;
		loop {
			let at = self.scan_backward(to, None, Stop::Chars([open, close]))?;
			if self.buffer.char_at(at).ok()? == close {
				depth += 1;
			} else {
				depth -= 1;
			}
			if depth == 0 {
				tracing::trace!(end, at, "opening peer");
				return Some(at);
			}
			to = at;
		}
	}

	/// Returns the smallest `{ ... }` block enclosing `offset`, braces included.
	pub fn find_surrounding_block(&mut self, offset: CharIdx) -> Option<Region> {
		if offset < 1 || offset >= self.buffer.len_chars() {
			return None;
		}
		let begin = self.find_opening_peer(offset, '{', '}')?;
		let end = self.find_closing_peer(offset, '{', '}')?;
		Some(Region::from_bounds(begin, end + 1))
	}

	/// First non-whitespace code char in `[position, bound)`.
	pub fn find_non_whitespace_forward(&mut self, position: CharIdx, bound: Option<CharIdx>) -> Option<CharIdx> {
		self.scan_forward(position, bound, Stop::NonWhitespaceCode)
	}

	/// First non-whitespace char in `[position, bound)`, comments and literals included.
	pub fn find_non_whitespace_forward_in_any_partition(
		&mut self,
		position: CharIdx,
		bound: Option<CharIdx>,
	) -> Option<CharIdx> {
		self.scan_forward(position, bound, Stop::NonWhitespace)
	}

	/// Last non-whitespace code char in `[bound, end)`.
	pub fn find_non_whitespace_backward(&mut self, end: CharIdx, bound: Option<CharIdx>) -> Option<CharIdx> {
		self.scan_backward(end, bound, Stop::NonWhitespaceCode)
	}

	/// Last non-whitespace char in `[bound, end)`, comments and literals included.
	pub fn find_non_whitespace_backward_in_any_partition(
		&mut self,
		end: CharIdx,
		bound: Option<CharIdx>,
	) -> Option<CharIdx> {
		self.scan_backward(end, bound, Stop::NonWhitespace)
	}

	/// Returns true if `offset` lies in the code partition.
	///
	/// Offsets the buffer cannot resolve are not code.
	pub fn is_default_partition(&self, offset: CharIdx) -> bool {
		self.buffer
			.partition_at(offset)
			.is_ok_and(|p| p.kind.is_code())
	}

	fn classify(&self, word: Region) -> TokenKind {
		match self.buffer.text_of(word) {
			Ok(text) if text.starts_with(is_ident_start) => TokenKind::from_word(&text),
			Ok(_) => TokenKind::Other,
			Err(_) => TokenKind::Eof,
		}
	}

	fn stops_at(&self, stop: Stop, ch: char, at: CharIdx) -> bool {
		match stop {
			Stop::NonWhitespace => !is_whitespace(ch),
			Stop::NonWhitespaceCode => !is_whitespace(ch) && self.is_default_partition(at),
			Stop::NonIdentPartCode => !is_ident_part(ch) || !self.is_default_partition(at),
			Stop::Chars(chars) => chars.contains(&ch) && self.is_default_partition(at),
		}
	}

	/// Next char to examine after `at` in a forward scan.
	fn next_forward(&self, stop: Stop, at: CharIdx) -> CharIdx {
		if stop.jumps_partitions()
			&& let Ok(partition) = self.buffer.partition_at(at)
			&& !partition.kind.is_code()
			&& at < partition.region.end()
		{
			return partition.region.end();
		}
		at + 1
	}

	/// New exclusive end after examining `at` in a backward scan.
	fn next_backward(&self, stop: Stop, at: CharIdx) -> CharIdx {
		if stop.jumps_partitions()
			&& let Ok(partition) = self.buffer.partition_at(at)
			&& !partition.kind.is_code()
			&& at > partition.region.offset
		{
			return partition.region.offset;
		}
		at
	}

	/// Scans `[start, bound)` for the first char matching `stop`.
	fn scan_forward(&mut self, start: CharIdx, bound: Option<CharIdx>, stop: Stop) -> Option<CharIdx> {
		let len = self.buffer.len_chars();
		let limit = bound.map_or(len, |b| b.min(len));
		let mut at = start;
		while at < limit {
			let Ok(ch) = self.buffer.char_at(at) else {
				break;
			};
			if self.stops_at(stop, ch, at) {
				self.pos = at;
				return Some(at);
			}
			at = self.next_forward(stop, at);
		}
		self.pos = limit;
		None
	}

	/// Scans `[bound, end)` from the back for the last char matching `stop`.
	fn scan_backward(&mut self, end: CharIdx, bound: Option<CharIdx>, stop: Stop) -> Option<CharIdx> {
		let limit = bound.unwrap_or(0);
		let mut end = end.min(self.buffer.len_chars());
		while end > limit {
			let at = end - 1;
			let Ok(ch) = self.buffer.char_at(at) else {
				break;
			};
			if self.stops_at(stop, ch, at) {
				self.pos = at;
				return Some(at);
			}
			end = self.next_backward(stop, at);
		}
		self.pos = limit;
		None
	}
}
