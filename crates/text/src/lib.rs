//! Core text types for indentation: char coordinates, the read-only buffer
//! interface, CAL partitions, and a rope-backed document.

/// Read-only buffer interface consumed by scanners and indenters.
pub mod buffer;
/// Rope-backed document with cached partitions.
pub mod document;
/// CAL partition scanner: code, comments, and literals.
pub mod partition;
/// Char offsets, lengths, and regions.
pub mod range;
/// Rope utilities and extensions.
pub mod rope;

pub use buffer::{BufferError, TextBuffer};
pub use document::Document;
pub use partition::{Partition, PartitionKind, partition};
pub use range::{CharIdx, CharLen, Region};
pub use ropey::{Rope, RopeSlice};
