//! Token kinds produced by the heuristic scanner.

/// The lexical class of one scan step.
///
/// Punctuation is always a single char; multi-char operators such as `->`
/// or `::` are seen as a sequence of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	LBrace,
	RBrace,
	LBracket,
	RBracket,
	LParen,
	RParen,
	Semicolon,
	Colon,
	Comma,
	Period,
	Equal,
	LessThan,
	GreaterThan,
	Dash,
	Bar,
	Backslash,
	QuestionMark,

	Let,
	In,
	If,
	Then,
	Else,
	Case,
	Of,
	Where,
	Using,
	Data,
	Deriving,
	Class,
	Instance,
	Module,
	Friend,
	Import,
	Foreign,
	Unsafe,
	Jvm,
	Public,
	Protected,
	Private,
	Default,
	Primitive,
	TypeClass,
	Function,
	DataConstructor,
	TypeConstructor,

	/// Identifier starting with an uppercase letter.
	ConsIdent,
	/// Any other identifier.
	OtherIdent,
	/// Operators, literals, and anything else.
	Other,
	/// Nothing left to scan within the bound.
	Eof,
}

impl TokenKind {
	/// Maps a punctuation char to its token.
	pub const fn from_punctuation(c: char) -> Option<Self> {
		Some(match c {
			'{' => Self::LBrace,
			'}' => Self::RBrace,
			'[' => Self::LBracket,
			']' => Self::RBracket,
			'(' => Self::LParen,
			')' => Self::RParen,
			';' => Self::Semicolon,
			':' => Self::Colon,
			',' => Self::Comma,
			'.' => Self::Period,
			'=' => Self::Equal,
			'<' => Self::LessThan,
			'>' => Self::GreaterThan,
			'-' => Self::Dash,
			'|' => Self::Bar,
			'\\' => Self::Backslash,
			'?' => Self::QuestionMark,
			_ => return None,
		})
	}

	/// Looks up a reserved word; the match is exact and case-sensitive.
	pub fn keyword(word: &str) -> Option<Self> {
		let kind = match word.len() {
			2 => match word {
				"if" => Self::If,
				"in" => Self::In,
				"of" => Self::Of,
				_ => return None,
			},
			3 => match word {
				"let" => Self::Let,
				"jvm" => Self::Jvm,
				_ => return None,
			},
			4 => match word {
				"then" => Self::Then,
				"else" => Self::Else,
				"case" => Self::Case,
				"data" => Self::Data,
				_ => return None,
			},
			5 => match word {
				"where" => Self::Where,
				"using" => Self::Using,
				"class" => Self::Class,
				_ => return None,
			},
			6 => match word {
				"module" => Self::Module,
				"friend" => Self::Friend,
				"import" => Self::Import,
				"unsafe" => Self::Unsafe,
				"public" => Self::Public,
				_ => return None,
			},
			7 => match word {
				"foreign" => Self::Foreign,
				"private" => Self::Private,
				"default" => Self::Default,
				_ => return None,
			},
			8 => match word {
				"deriving" => Self::Deriving,
				"instance" => Self::Instance,
				"function" => Self::Function,
				_ => return None,
			},
			9 => match word {
				"protected" => Self::Protected,
				"primitive" => Self::Primitive,
				"typeClass" => Self::TypeClass,
				_ => return None,
			},
			15 => match word {
				"dataConstructor" => Self::DataConstructor,
				"typeConstructor" => Self::TypeConstructor,
				_ => return None,
			},
			_ => return None,
		};
		Some(kind)
	}

	/// Classifies a scanned word: keyword, constructor name, or identifier.
	///
	/// Words that do not begin with an identifier-start char (number
	/// literals) are [`TokenKind::Other`].
	pub fn from_word(word: &str) -> Self {
		if let Some(kind) = Self::keyword(word) {
			return kind;
		}
		match word.chars().next() {
			Some(c) if c.is_uppercase() => Self::ConsIdent,
			Some(c) if is_ident_start(c) => Self::OtherIdent,
			_ => Self::Other,
		}
	}

	/// Returns the opening and closing chars of a bracket token.
	pub const fn peers(self) -> Option<(char, char)> {
		match self {
			Self::LBrace | Self::RBrace => Some(('{', '}')),
			Self::LBracket | Self::RBracket => Some(('[', ']')),
			Self::LParen | Self::RParen => Some(('(', ')')),
			_ => None,
		}
	}

	/// Returns true for `(`, `[`, and `{`.
	#[inline]
	pub const fn is_opener(self) -> bool {
		matches!(self, Self::LBrace | Self::LBracket | Self::LParen)
	}

	/// Returns true for `)`, `]`, and `}`.
	#[inline]
	pub const fn is_closer(self) -> bool {
		matches!(self, Self::RBrace | Self::RBracket | Self::RParen)
	}
}

/// Whitespace as the scanner sees it.
#[inline]
pub fn is_whitespace(c: char) -> bool {
	c.is_whitespace()
}

/// Returns whether `c` can begin an identifier.
#[inline]
pub fn is_ident_start(c: char) -> bool {
	c.is_alphabetic() || c == '_'
}

/// Returns whether `c` can continue an identifier.
#[inline]
pub fn is_ident_part(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("let", TokenKind::Let)]
	#[case("in", TokenKind::In)]
	#[case("of", TokenKind::Of)]
	#[case("jvm", TokenKind::Jvm)]
	#[case("where", TokenKind::Where)]
	#[case("deriving", TokenKind::Deriving)]
	#[case("typeClass", TokenKind::TypeClass)]
	#[case("dataConstructor", TokenKind::DataConstructor)]
	#[case("typeConstructor", TokenKind::TypeConstructor)]
	#[case("lettuce", TokenKind::OtherIdent)]
	#[case("le", TokenKind::OtherIdent)]
	#[case("Let", TokenKind::ConsIdent)]
	#[case("typeclass", TokenKind::OtherIdent)]
	#[case("Maybe", TokenKind::ConsIdent)]
	#[case("_x", TokenKind::OtherIdent)]
	#[case("42", TokenKind::Other)]
	fn test_from_word(#[case] word: &str, #[case] expected: TokenKind) {
		assert_eq!(TokenKind::from_word(word), expected);
	}

	#[test]
	fn test_every_punctuation_char_maps() {
		for c in "{}[]();:,.=<>-|\\?".chars() {
			assert!(TokenKind::from_punctuation(c).is_some(), "{c:?}");
		}
		assert_eq!(TokenKind::from_punctuation('+'), None);
		assert_eq!(TokenKind::from_punctuation('a'), None);
	}

	#[test]
	fn test_peers() {
		assert_eq!(TokenKind::RParen.peers(), Some(('(', ')')));
		assert_eq!(TokenKind::LBrace.peers(), Some(('{', '}')));
		assert_eq!(TokenKind::Comma.peers(), None);
		assert!(TokenKind::LBracket.is_opener());
		assert!(TokenKind::RBracket.is_closer());
	}
}
