//! CAL document partitioning.
//!
//! A partition is a maximal run of text of one lexical class. Scanners only
//! interpret [`PartitionKind::Code`]; comments and literals are opaque and
//! are skipped as whole regions.

use ropey::RopeSlice;

use crate::range::{CharIdx, Region};

#[cfg(test)]
mod tests;

/// Lexical class of a partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PartitionKind {
	/// Ordinary source code (the default partition).
	#[default]
	Code,
	/// `//` comment, up to but excluding the line break.
	LineComment,
	/// `/* ... */` comment.
	BlockComment,
	/// `/** ... */` CALDoc comment.
	DocComment,
	/// `"..."` string literal.
	String,
	/// `'x'` character literal.
	Character,
}

impl PartitionKind {
	/// Returns true for the default (code) partition.
	#[inline]
	pub const fn is_code(self) -> bool {
		matches!(self, Self::Code)
	}

	/// Returns true for partitions that may span several lines.
	#[inline]
	pub const fn is_multiline(self) -> bool {
		matches!(self, Self::BlockComment | Self::DocComment)
	}
}

/// A typed region of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition {
	/// Lexical class of the region.
	pub kind: PartitionKind,
	/// Chars covered by the partition.
	pub region: Region,
}

impl Partition {
	/// Creates a partition of `kind` over `region`.
	pub const fn new(kind: PartitionKind, region: Region) -> Self {
		Self { kind, region }
	}
}

/// Splits `text` into contiguous partitions covering every char.
///
/// Unterminated comments run to the end of the text; unterminated string
/// and character literals stop at the end of their line. An empty text
/// yields a single empty code partition.
pub fn partition(text: RopeSlice) -> Vec<Partition> {
	let chars: Vec<char> = text.chars().collect();
	let mut out = Vec::new();
	let mut code_start = 0;
	let mut i = 0;

	while i < chars.len() {
		let (kind, end) = match (chars[i], chars.get(i + 1)) {
			('/', Some('/')) => (PartitionKind::LineComment, line_end(&chars, i + 2)),
			('/', Some('*')) => {
				let doc = chars.get(i + 2) == Some(&'*') && chars.get(i + 3) != Some(&'/');
				let kind = if doc {
					PartitionKind::DocComment
				} else {
					PartitionKind::BlockComment
				};
				(kind, block_comment_end(&chars, i + 2))
			}
			('"', _) => (PartitionKind::String, literal_end(&chars, i + 1, '"')),
			('\'', _) => (PartitionKind::Character, literal_end(&chars, i + 1, '\'')),
			_ => {
				i += 1;
				continue;
			}
		};

		if code_start < i {
			out.push(Partition::new(
				PartitionKind::Code,
				Region::from_bounds(code_start, i),
			));
		}
		out.push(Partition::new(kind, Region::from_bounds(i, end)));
		i = end;
		code_start = end;
	}

	if code_start < chars.len() || out.is_empty() {
		out.push(Partition::new(
			PartitionKind::Code,
			Region::from_bounds(code_start, chars.len()),
		));
	}
	out
}

/// Finds the partition containing `offset` in a sorted, contiguous list.
///
/// An offset equal to the covered length resolves to the last partition.
pub fn find(partitions: &[Partition], offset: CharIdx) -> Option<Partition> {
	let idx = partitions.partition_point(|p| p.region.end() <= offset);
	match partitions.get(idx) {
		Some(p) => Some(*p),
		None => partitions.last().filter(|p| p.region.end() == offset).copied(),
	}
}

fn line_end(chars: &[char], from: usize) -> usize {
	chars[from.min(chars.len())..]
		.iter()
		.position(|c| *c == '\n' || *c == '\r')
		.map_or(chars.len(), |n| from + n)
}

fn block_comment_end(chars: &[char], from: usize) -> usize {
	let mut j = from;
	while j + 1 < chars.len() {
		if chars[j] == '*' && chars[j + 1] == '/' {
			return j + 2;
		}
		j += 1;
	}
	chars.len()
}

fn literal_end(chars: &[char], from: usize, quote: char) -> usize {
	let mut j = from;
	while j < chars.len() {
		match chars[j] {
			'\\' => j += 2,
			'\n' | '\r' => return j,
			c if c == quote => return j + 1,
			_ => j += 1,
		}
	}
	chars.len()
}
