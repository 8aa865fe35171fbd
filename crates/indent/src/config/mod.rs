//! Indentation preferences.
//!
//! An [`IndentConfig`] is passed explicitly to every computation. It can be
//! built in code or loaded from the `[indent]` table of a TOML file:
//!
//! ```toml
//! [indent]
//! tab-width = 4
//! indent-width = 2
//! use-spaces-for-indent = false
//! tab-policy = "mixed"
//! indent-braces-for-blocks = false
//! continuation-indent = 1
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Errors that can occur when loading indentation preferences.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or field types.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// A field holds a value the indenter cannot use.
	#[error("invalid value for {field}: {reason}")]
	Invalid {
		/// Kebab-case name of the offending field.
		field: &'static str,
		/// What is wrong with it.
		reason: &'static str,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// How indentation wider than the reference line is filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabPolicy {
	/// Spaces only.
	#[default]
	Spaces,
	/// Tabs only; one indent unit is one tab.
	Tabs,
	/// Tabs for every full tab width, spaces for the rest.
	Mixed,
}

/// Indentation preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IndentConfig {
	/// Visual width of a tab char.
	pub tab_width: usize,
	/// Visual width of one indent unit (ignored under [`TabPolicy::Tabs`]).
	pub indent_width: usize,
	/// Forces [`TabPolicy::Spaces`] regardless of `tab_policy`.
	pub use_spaces_for_indent: bool,
	/// Fill policy for new indentation.
	pub tab_policy: TabPolicy,
	/// Gives a `{` that opens a line one extra unit.
	pub indent_braces_for_blocks: bool,
	/// Units added to continuation lines after `(`, `[`, `::` and `=>`.
	pub continuation_indent: usize,
}

impl Default for IndentConfig {
	fn default() -> Self {
		Self {
			tab_width: 4,
			indent_width: 4,
			use_spaces_for_indent: true,
			tab_policy: TabPolicy::Spaces,
			indent_braces_for_blocks: false,
			continuation_indent: 1,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
	#[serde(default)]
	indent: IndentConfig,
}

impl IndentConfig {
	/// Parses the `[indent]` table of a TOML document.
	///
	/// A document without the table yields the defaults.
	pub fn from_toml(input: &str) -> Result<Self> {
		let file: ConfigFile = toml::from_str(input)?;
		file.indent.validate()?;
		Ok(file.indent)
	}

	/// Loads configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		let config = Self::from_toml(&content)?;
		tracing::debug!(path = %path.display(), ?config, "loaded indent config");
		Ok(config)
	}

	/// Rejects values that would make indentation meaningless.
	pub fn validate(&self) -> Result<()> {
		if self.tab_width == 0 {
			return Err(ConfigError::Invalid {
				field: "tab-width",
				reason: "must be at least 1",
			});
		}
		if self.indent_width == 0 {
			return Err(ConfigError::Invalid {
				field: "indent-width",
				reason: "must be at least 1",
			});
		}
		Ok(())
	}

	/// The policy actually applied, after `use_spaces_for_indent`.
	pub fn effective_tab_policy(&self) -> TabPolicy {
		if self.use_spaces_for_indent {
			TabPolicy::Spaces
		} else {
			self.tab_policy
		}
	}

	/// Visual width of one indent unit.
	pub fn indent_unit_width(&self) -> usize {
		match self.effective_tab_policy() {
			TabPolicy::Tabs => self.tab_width,
			TabPolicy::Spaces | TabPolicy::Mixed => self.indent_width,
		}
	}
}
