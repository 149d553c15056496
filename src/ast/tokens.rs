use std::fmt;

use crate::lexer::Position;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    /// End of input. Every token stream ends with exactly one.
    End,

    /// `#`, introducing a CSS id
    Hash,

    /// `.`, separating class names and path components
    Dot,

    /// `/`, introducing and separating path segments
    Slash,

    /// `(`
    OpenParen,

    /// `)`
    CloseParen,

    /// Logical AND (word, not symbol)
    ///
    /// # Examples
    /// ```text
    /// #nav and .menu
    /// ```
    And,

    /// Logical OR (word, not symbol)
    Or,

    /// Logical NOT (word, not symbol)
    ///
    /// # Examples
    /// ```text
    /// not /img/logo.png
    /// ```
    Not,

    /// Name made of letters, digits and underscores, not starting with a
    /// digit, that is not a keyword
    ///
    /// # Examples
    /// ```text
    /// header
    /// nav_bar
    /// _hidden2
    /// ```
    Name,

    /// String literal in single quotes, matched ignoring case
    SingleQuotedString,

    /// String literal in double quotes, matched exactly
    DoubleQuotedString,
}

impl TokenKind {
    /// Human-readable description used in syntax errors.
    pub fn description(self) -> &'static str {
        match self {
            TokenKind::End => "end of input",
            TokenKind::Hash => "'#'",
            TokenKind::Dot => "'.'",
            TokenKind::Slash => "'/'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'not'",
            TokenKind::Name => "name",
            TokenKind::SingleQuotedString => "single-quoted string",
            TokenKind::DoubleQuotedString => "double-quoted string",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A token with the position of its first character. Only names and string
/// literals carry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
    pub text: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Token {
            kind,
            position,
            text: None,
        }
    }

    pub fn with_text(kind: TokenKind, position: Position, text: impl Into<String>) -> Self {
        Token {
            kind,
            position,
            text: Some(text.into()),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
