//! The read-only view of a document that scanners work against.

use thiserror::Error;

use crate::partition::Partition;
use crate::range::{CharIdx, CharLen, Region};

/// Errors raised by out-of-range buffer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
	/// A char offset past the end of the document.
	#[error("offset {offset} out of bounds (length {len})")]
	OffsetOutOfBounds {
		/// The requested offset.
		offset: CharIdx,
		/// Document length at the time of the read.
		len: CharLen,
	},

	/// A line index past the last line.
	#[error("line {line} out of bounds ({count} lines)")]
	LineOutOfBounds {
		/// The requested line.
		line: usize,
		/// Number of lines in the document.
		count: usize,
	},
}

/// Result type for buffer reads.
pub type Result<T> = std::result::Result<T, BufferError>;

/// Read access to a partitioned text document.
///
/// Implementations are queried afresh on every call; callers never cache
/// answers across edits.
pub trait TextBuffer {
	/// Returns the document length in chars.
	fn len_chars(&self) -> CharLen;

	/// Returns the char at `offset`.
	fn char_at(&self, offset: CharIdx) -> Result<char>;

	/// Returns the zero-based line containing `offset`.
	///
	/// `offset == len_chars()` is valid and maps to the last line.
	fn line_of_offset(&self, offset: CharIdx) -> Result<usize>;

	/// Returns the span of `line`, excluding its line delimiter.
	fn line_info(&self, line: usize) -> Result<Region>;

	/// Returns the number of lines, counting the empty line after a trailing newline.
	fn line_count(&self) -> usize;

	/// Returns the partition containing `offset`.
	///
	/// At `offset == len_chars()` this is the final partition.
	fn partition_at(&self, offset: CharIdx) -> Result<Partition>;

	/// Returns the span of the line containing `offset`.
	fn line_info_of_offset(&self, offset: CharIdx) -> Result<Region> {
		self.line_info(self.line_of_offset(offset)?)
	}

	/// Copies the chars of `region` into a string.
	fn text_of(&self, region: Region) -> Result<String> {
		region.as_range().map(|i| self.char_at(i)).collect()
	}
}
