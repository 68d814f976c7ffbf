//! Tokens and text ranges of the generic tree.

use std::fmt;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    StringLiteral,
    Other,
    /// A `//` or `/*` comment. Never enters the token list.
    Comment,
    /// Zero-width end-of-file marker. Never enters the token list.
    Eof,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::Other => "OTHER",
            TokenKind::Comment => "COMMENT",
            TokenKind::Eof => "EOF",
        }
    }

    /// Whether tokens of this kind are listed in the file's token stream
    /// and kept in `children` fields.
    pub fn is_listed(self) -> bool {
        matches!(
            self,
            TokenKind::Keyword | TokenKind::StringLiteral | TokenKind::Other
        )
    }
}

/// Span of source text: 1-based lines, 0-based columns counted in code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextRange {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl TextRange {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Range from the start of `first` to the end of `last`.
    pub fn span(first: &TextRange, last: &TextRange) -> Self {
        Self::new(
            first.start_line,
            first.start_column,
            last.end_line,
            last.end_column,
        )
    }
}

/// `line:startCol::endCol` on one line, `startLine:startCol:endLine:endCol`
/// otherwise.
impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_line == self.end_line {
            write!(
                f,
                "{}:{}::{}",
                self.start_line, self.start_column, self.end_column
            )
        } else {
            write!(
                f,
                "{}:{}:{}:{}",
                self.start_line, self.start_column, self.end_line, self.end_column
            )
        }
    }
}

/// One lexical token, owned by the node that wraps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub range: TextRange,
    pub kind: TokenKind,
}
