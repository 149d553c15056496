use crate::{lexer::LexError, lexer::Position, parser::ParseError};

/// Anything that can go wrong turning query text into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn position(&self) -> Position {
        match self {
            Error::Lex(e) => e.position(),
            Error::Parse(e) => e.position(),
        }
    }

    /// True for violated implementation invariants. These are defects, not
    /// bad input, and must not be retried.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Parse(e) if e.is_internal())
    }
}
