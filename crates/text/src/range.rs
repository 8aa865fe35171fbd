/// A position in the text, measured in characters (not bytes).
///
/// This is the canonical coordinate space for quill.
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;

/// A half-open span of text: `len` characters starting at `offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Region {
	/// First character of the span.
	pub offset: CharIdx,
	/// Number of characters in the span.
	pub len: CharLen,
}

impl Region {
	/// Creates a region of `len` characters starting at `offset`.
	pub const fn new(offset: CharIdx, len: CharLen) -> Self {
		Self { offset, len }
	}

	/// Creates a region from a start and an exclusive end.
	///
	/// An `end` before `start` yields an empty region at `start`.
	pub fn from_bounds(start: CharIdx, end: CharIdx) -> Self {
		Self::new(start, end.saturating_sub(start))
	}

	/// Returns the exclusive end of the region.
	#[inline]
	pub const fn end(&self) -> CharIdx {
		self.offset + self.len
	}

	/// Returns true if the region spans no characters.
	#[inline]
	pub const fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns true if the position is within the region (exclusive of end).
	#[inline]
	pub fn contains(&self, pos: CharIdx) -> bool {
		pos >= self.offset && pos < self.end()
	}

	/// Returns the region as a `std::ops::Range`.
	#[inline]
	pub fn as_range(&self) -> std::ops::Range<CharIdx> {
		self.offset..self.end()
	}
}

impl From<std::ops::Range<CharIdx>> for Region {
	fn from(range: std::ops::Range<CharIdx>) -> Self {
		Self::from_bounds(range.start, range.end)
	}
}
