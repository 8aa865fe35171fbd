use std::io::Write;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_defaults() {
	let config = IndentConfig::default();
	assert_eq!(config.tab_width, 4);
	assert_eq!(config.indent_width, 4);
	assert!(config.use_spaces_for_indent);
	assert_eq!(config.tab_policy, TabPolicy::Spaces);
	assert!(!config.indent_braces_for_blocks);
	assert_eq!(config.continuation_indent, 1);
}

#[test]
fn test_from_toml_partial_table() {
	let config = IndentConfig::from_toml(
		r#"
		[indent]
		indent-width = 2
		tab-policy = "mixed"
		use-spaces-for-indent = false
		"#,
	)
	.unwrap();
	assert_eq!(
		config,
		IndentConfig {
			indent_width: 2,
			tab_policy: TabPolicy::Mixed,
			use_spaces_for_indent: false,
			..IndentConfig::default()
		}
	);
}

#[test]
fn test_missing_table_is_default() {
	let config = IndentConfig::from_toml("[other]\nkey = 1\n").unwrap();
	assert_eq!(config, IndentConfig::default());
}

#[test]
fn test_parse_errors() {
	let err = IndentConfig::from_toml("[indent]\ntab-width = \"wide\"\n").unwrap_err();
	assert!(matches!(err, ConfigError::Parse(_)));

	let err = IndentConfig::from_toml("[indent]\ntab-policy = \"sometimes\"\n").unwrap_err();
	assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_zero_width_rejected() {
	let err = IndentConfig::from_toml("[indent]\ntab-width = 0\n").unwrap_err();
	assert!(matches!(err, ConfigError::Invalid { field: "tab-width", .. }));

	let err = IndentConfig::from_toml("[indent]\nindent-width = 0\n").unwrap_err();
	assert!(matches!(err, ConfigError::Invalid { field: "indent-width", .. }));
}

#[test]
fn test_effective_policy_and_unit() {
	let mut config = IndentConfig {
		tab_policy: TabPolicy::Tabs,
		tab_width: 8,
		indent_width: 2,
		..IndentConfig::default()
	};
	assert_eq!(config.effective_tab_policy(), TabPolicy::Spaces);
	assert_eq!(config.indent_unit_width(), 2);

	config.use_spaces_for_indent = false;
	assert_eq!(config.effective_tab_policy(), TabPolicy::Tabs);
	assert_eq!(config.indent_unit_width(), 8);

	config.tab_policy = TabPolicy::Mixed;
	assert_eq!(config.indent_unit_width(), 2);
}

#[test]
fn test_load_from_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "[indent]\ncontinuation-indent = 2").unwrap();
	let config = IndentConfig::load(file.path()).unwrap();
	assert_eq!(config.continuation_indent, 2);
}

#[test]
fn test_load_missing_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.toml");
	let err = IndentConfig::load(&path).unwrap_err();
	assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
}
