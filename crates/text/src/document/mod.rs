//! A rope-backed [`TextBuffer`] with cached CAL partitions.

use std::fmt;

use ropey::{Rope, RopeSlice};

use crate::buffer::{BufferError, Result, TextBuffer};
use crate::partition::{self, Partition};
use crate::range::{CharIdx, CharLen, Region};
use crate::rope::line_region;


/// Document text plus its partitioning.
///
/// Partitions are recomputed after every edit, so reads through
/// [`TextBuffer`] always reflect the current text.
#[derive(Debug, Clone)]
pub struct Document {
	text: Rope,
	partitions: Vec<Partition>,
}

impl Document {
	/// Creates a document from a rope.
	pub fn from_rope(text: Rope) -> Self {
		let partitions = partition::partition(text.slice(..));
		Self { text, partitions }
	}

	/// Returns the full text.
	pub fn text(&self) -> RopeSlice<'_> {
		self.text.slice(..)
	}

	/// Returns the cached partitions, in document order.
	pub fn partitions(&self) -> &[Partition] {
		&self.partitions
	}

	/// Returns the text of `line` without its delimiter.
	pub fn line_text(&self, line: usize) -> Result<String> {
		let region = self.line_info(line)?;
		Ok(self.text.slice(region.as_range()).to_string())
	}

	/// Replaces the chars of `region` with `with`.
	///
	/// Blank edits inside code only move the partitions after them; any
	/// other edit repartitions the whole text.
	pub fn replace(&mut self, region: Region, with: &str) -> Result<()> {
		self.check_offset(region.end())?;
		let blank = with.chars().all(is_blank) && self.text.slice(region.as_range()).chars().all(is_blank);
		self.text.remove(region.as_range());
		self.text.insert(region.offset, with);

		let inserted = with.chars().count();
		if !(blank && !self.joins_comment_opener(region.offset, inserted) && self.shift_partitions(region, inserted)) {
			self.repartition();
		}
		Ok(())
	}

	/// Inserts `text` at `at`.
	pub fn insert(&mut self, at: CharIdx, text: &str) -> Result<()> {
		self.replace(Region::new(at, 0), text)
	}

	/// Removes the chars of `region`.
	pub fn remove(&mut self, region: Region) -> Result<()> {
		self.replace(region, "")
	}

	fn check_offset(&self, offset: CharIdx) -> Result<()> {
		let len = self.text.len_chars();
		if offset > len {
			return Err(BufferError::OffsetOutOfBounds { offset, len });
		}
		Ok(())
	}

	/// Whether the edit left a `/` directly before `/` or `*`.
	fn joins_comment_opener(&self, at: CharIdx, inserted: CharLen) -> bool {
		let before = at.checked_sub(1).and_then(|i| self.text.get_char(i));
		let after = self.text.get_char(at + inserted);
		before == Some('/') && matches!(after, Some('/' | '*'))
	}

	/// Resizes the code partition holding `region` and moves the ones after it.
	///
	/// Returns false when no single code partition holds the edit or the
	/// partition would become empty.
	fn shift_partitions(&mut self, region: Region, inserted: CharLen) -> bool {
		let first = self.partitions.partition_point(|p| p.region.end() < region.offset);
		let holder = (first..self.partitions.len()).take(2).find(|&i| {
			let p = self.partitions[i];
			// A partition to the left may run up to a line break and absorb the edit.
			let starts_before = p.region.offset < region.offset || i == 0;
			p.kind.is_code() && starts_before && region.end() <= p.region.end()
		});
		let Some(holder) = holder else {
			return false;
		};

		let len = self.partitions[holder].region.len - region.len + inserted;
		if len == 0 && self.partitions.len() > 1 {
			return false;
		}
		self.partitions[holder].region.len = len;
		for p in &mut self.partitions[holder + 1..] {
			p.region.offset = p.region.offset - region.len + inserted;
		}
		tracing::trace!(offset = region.offset, removed = region.len, inserted, "shifted partitions");
		true
	}

	fn repartition(&mut self) {
		self.partitions = partition::partition(self.text.slice(..));
		tracing::trace!(
			chars = self.text.len_chars(),
			partitions = self.partitions.len(),
			"repartitioned document"
		);
	}
}

fn is_blank(c: char) -> bool {
	matches!(c, ' ' | '\t')
}

impl Default for Document {
	fn default() -> Self {
		Self::from_rope(Rope::new())
	}
}

impl From<&str> for Document {
	fn from(text: &str) -> Self {
		Self::from_rope(Rope::from_str(text))
	}
}

impl From<Rope> for Document {
	fn from(text: Rope) -> Self {
		Self::from_rope(text)
	}
}

impl fmt::Display for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for chunk in self.text.chunks() {
			f.write_str(chunk)?;
		}
		Ok(())
	}
}

impl TextBuffer for Document {
	fn len_chars(&self) -> CharLen {
		self.text.len_chars()
	}

	fn char_at(&self, offset: CharIdx) -> Result<char> {
		self.text
			.get_char(offset)
			.ok_or(BufferError::OffsetOutOfBounds {
				offset,
				len: self.text.len_chars(),
			})
	}

	fn line_of_offset(&self, offset: CharIdx) -> Result<usize> {
		self.check_offset(offset)?;
		Ok(self.text.char_to_line(offset))
	}

	fn line_info(&self, line: usize) -> Result<Region> {
		line_region(self.text.slice(..), line).ok_or(BufferError::LineOutOfBounds {
			line,
			count: self.text.len_lines(),
		})
	}

	fn line_count(&self) -> usize {
		self.text.len_lines()
	}

	fn partition_at(&self, offset: CharIdx) -> Result<Partition> {
		self.check_offset(offset)?;
		partition::find(&self.partitions, offset).ok_or(BufferError::OffsetOutOfBounds {
			offset,
			len: self.text.len_chars(),
		})
	}
}
