use pretty_assertions::assert_eq;
use proptest::prelude::*;
use ropey::Rope;

use super::*;

fn kinds(text: &str) -> Vec<(PartitionKind, String)> {
	let rope = Rope::from(text);
	partition(rope.slice(..))
		.into_iter()
		.map(|p| (p.kind, rope.slice(p.region.as_range()).to_string()))
		.collect()
}

#[test]
fn test_code_only() {
	assert_eq!(kinds("foo = 1;"), vec![(PartitionKind::Code, "foo = 1;".into())]);
}

#[test]
fn test_empty_text_has_one_code_partition() {
	let rope = Rope::new();
	assert_eq!(
		partition(rope.slice(..)),
		vec![Partition::new(PartitionKind::Code, Region::new(0, 0))]
	);
}

#[test]
fn test_line_comment_excludes_newline() {
	assert_eq!(
		kinds("x // {\ny"),
		vec![
			(PartitionKind::Code, "x ".into()),
			(PartitionKind::LineComment, "// {".into()),
			(PartitionKind::Code, "\ny".into()),
		]
	);
}

#[test]
fn test_block_and_doc_comments() {
	assert_eq!(
		kinds("/* a */b/** c */"),
		vec![
			(PartitionKind::BlockComment, "/* a */".into()),
			(PartitionKind::Code, "b".into()),
			(PartitionKind::DocComment, "/** c */".into()),
		]
	);
}

#[test]
fn test_empty_block_comment_is_not_doc() {
	assert_eq!(kinds("/**/"), vec![(PartitionKind::BlockComment, "/**/".into())]);
}

#[test]
fn test_unterminated_block_comment_runs_to_end() {
	assert_eq!(
		kinds("a /* b\nc"),
		vec![
			(PartitionKind::Code, "a ".into()),
			(PartitionKind::BlockComment, "/* b\nc".into()),
		]
	);
}

#[test]
fn test_string_with_escaped_quote() {
	assert_eq!(
		kinds(r#"s = "a\"(";"#),
		vec![
			(PartitionKind::Code, "s = ".into()),
			(PartitionKind::String, r#""a\"(""#.into()),
			(PartitionKind::Code, ";".into()),
		]
	);
}

#[test]
fn test_unterminated_string_stops_at_line_end() {
	assert_eq!(
		kinds("\"abc\nx"),
		vec![
			(PartitionKind::String, "\"abc".into()),
			(PartitionKind::Code, "\nx".into()),
		]
	);
}

#[test]
fn test_character_literal() {
	assert_eq!(
		kinds("c = '{';"),
		vec![
			(PartitionKind::Code, "c = ".into()),
			(PartitionKind::Character, "'{'".into()),
			(PartitionKind::Code, ";".into()),
		]
	);
}

#[test]
fn test_find_at_end_resolves_to_last() {
	let rope = Rope::from("a // b");
	let parts = partition(rope.slice(..));
	assert_eq!(find(&parts, 0).map(|p| p.kind), Some(PartitionKind::Code));
	assert_eq!(find(&parts, 3).map(|p| p.kind), Some(PartitionKind::LineComment));
	assert_eq!(find(&parts, 6).map(|p| p.kind), Some(PartitionKind::LineComment));
	assert_eq!(find(&parts, 7), None);
}

proptest! {
	/// Partitions are contiguous and cover the whole text.
	#[test]
	fn prop_partitions_cover_text(text in "[a-z/*\"'\\\\ \n{}();]{0,64}") {
		let rope = Rope::from(text.as_str());
		let parts = partition(rope.slice(..));
		let mut expected = 0;
		for p in &parts {
			prop_assert_eq!(p.region.offset, expected);
			expected = p.region.end();
		}
		prop_assert_eq!(expected, rope.len_chars());
	}
}
