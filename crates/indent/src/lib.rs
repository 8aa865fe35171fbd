//! Heuristic indentation engine for CAL source text.
//!
//! The engine works on incomplete text without parsing it: a
//! [`HeuristicScanner`] reads tokens backward and forward over a
//! [`TextBuffer`](quill_text::TextBuffer), and the [`Indenter`] decides
//! from the tokens before a line which earlier line it continues and by how
//! much. [`auto_edit`] turns the result into text edits.

/// Editor actions built on the indenter.
pub mod auto_edit;
/// Indentation preferences and their TOML form.
pub mod config;
/// Reference-position heuristics and whitespace rendering.
pub mod indenter;
/// Partition-aware token scanner.
pub mod scanner;
/// Token kinds and the keyword table.
pub mod token;

pub use auto_edit::{TextEdit, closing_delimiter_edit, correct_indentation, newline_edit, reindent_line};
pub use config::{ConfigError, IndentConfig, TabPolicy};
pub use indenter::{IndentHints, IndentResult, Indenter};
pub use scanner::HeuristicScanner;
pub use token::TokenKind;
