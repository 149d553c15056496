use crate::{
    ast::{BinOp, Expr, Leaf, Token, TokenKind},
    lexer::Position,
};

/// Kinds that may begin an atom, in the order they are reported.
const ATOM_START: &[TokenKind] = &[
    TokenKind::Hash,
    TokenKind::Dot,
    TokenKind::Slash,
    TokenKind::OpenParen,
    TokenKind::SingleQuotedString,
    TokenKind::DoubleQuotedString,
];

/// Errors raised while building a syntax tree from tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The current token is not one the grammar accepts here.
    #[error("{} at {position}", describe_unexpected(.expected, .found))]
    Unexpected {
        position: Position,
        expected: Vec<TokenKind>,
        found: TokenKind,
    },

    /// An implementation invariant was violated. Never a user error.
    #[error("internal error at {position}: {detail}")]
    Internal {
        position: Position,
        detail: &'static str,
    },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Unexpected { position, .. } | ParseError::Internal { position, .. } => {
                *position
            }
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ParseError::Internal { .. })
    }
}

fn describe_unexpected(expected: &[TokenKind], found: &TokenKind) -> String {
    let expected: Vec<&str> = expected.iter().map(|kind| kind.description()).collect();
    format!(
        "expected {}, found {}",
        expected.join(" or "),
        found.description()
    )
}

/// Join names with `.` onto `out`.
fn write_dotted_names(out: &mut String, names: &[String]) {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(name);
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, cursor: 0 }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Consume the current token if it has the given kind.
    fn try_match(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            let token = self.current().clone();
            self.cursor += 1;
            Some(token)
        } else {
            None
        }
    }

    /// Consume the current token, which must be one of `kinds`.
    fn expect(&mut self, kinds: &[TokenKind]) -> Result<Token, ParseError> {
        let token = self.current();
        if kinds.contains(&token.kind) {
            let token = token.clone();
            self.cursor += 1;
            Ok(token)
        } else {
            Err(ParseError::Unexpected {
                position: token.position,
                expected: kinds.to_vec(),
                found: token.kind,
            })
        }
    }

    fn expect_text(&mut self, kind: TokenKind) -> Result<String, ParseError> {
        let token = self.expect(&[kind])?;
        token.text.ok_or(ParseError::Internal {
            position: token.position,
            detail: "token carries no text",
        })
    }

    /// Parse a whole program, which must be followed by the end token.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        match self.tokens.last() {
            Some(token) if token.kind == TokenKind::End => {}
            Some(token) => {
                return Err(ParseError::Internal {
                    position: token.position,
                    detail: "token stream does not end with an end token",
                });
            }
            None => {
                return Err(ParseError::Internal {
                    position: Position::default(),
                    detail: "empty token stream",
                });
            }
        }

        let expr = self.parse_or()?;
        let end = self.expect(&[TokenKind::End])?;
        if self.cursor != self.tokens.len() {
            return Err(ParseError::Internal {
                position: end.position,
                detail: "tokens after end token",
            });
        }
        log::debug!("parsed query: {}", expr);
        Ok(expr)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.try_match(TokenKind::Or).is_some() {
            let right = self.parse_and()?;
            left = Expr::binary(BinOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;

        while self.try_match(TokenKind::And).is_some() {
            let right = self.parse_not()?;
            left = Expr::binary(BinOp::And, left, right);
        }
        Ok(left)
    }

    /// Any number of `not`s followed by an atom. Pairs cancel out.
    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        let mut negated = false;
        while self.try_match(TokenKind::Not).is_some() {
            negated = !negated;
        }

        let atom = self.parse_atom()?;
        Ok(if negated { Expr::not(atom) } else { atom })
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let token = self.expect(ATOM_START)?;

        let expr: Expr = match token.kind {
            TokenKind::SingleQuotedString | TokenKind::DoubleQuotedString => {
                let position = token.position;
                let text = token.text.ok_or(ParseError::Internal {
                    position,
                    detail: "string token carries no text",
                })?;
                if token.kind == TokenKind::SingleQuotedString {
                    Leaf::CaseInsensitiveString(text).into()
                } else {
                    Leaf::CaseSensitiveString(text).into()
                }
            }
            TokenKind::Hash => Leaf::CssId(self.expect_text(TokenKind::Name)?).into(),
            TokenKind::Dot => Leaf::ClassNames(self.parse_dotted_names()?).into(),
            TokenKind::Slash => self.parse_slash_path()?.into(),
            TokenKind::OpenParen => {
                let inner = self.parse_or()?;
                self.expect(&[TokenKind::CloseParen])?;
                Expr::group(inner)
            }
            _ => {
                return Err(ParseError::Internal {
                    position: token.position,
                    detail: "atom dispatch reached an unexpected token kind",
                });
            }
        };
        Ok(expr)
    }

    /// `a.b.c` as its individual names.
    fn parse_dotted_names(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = vec![self.expect_text(TokenKind::Name)?];
        while self.try_match(TokenKind::Dot).is_some() {
            names.push(self.expect_text(TokenKind::Name)?);
        }
        Ok(names)
    }

    /// The rest of a path after its leading `/`, classified by the trailing
    /// name of its final segment.
    fn parse_slash_path(&mut self) -> Result<Leaf, ParseError> {
        let mut path = String::new();
        loop {
            path.push('/');
            let mut names = self.parse_dotted_names()?;

            if self.try_match(TokenKind::Slash).is_some() {
                write_dotted_names(&mut path, &names);
                continue;
            }

            let last = names.last().cloned().unwrap_or_default();
            let leaf = match last.as_str() {
                "css" if names.len() > 1 => {
                    names.pop();
                    write_dotted_names(&mut path, &names);
                    Leaf::Css(path)
                }
                "js" if names.len() > 1 => {
                    names.pop();
                    write_dotted_names(&mut path, &names);
                    Leaf::Js(path)
                }
                "png" | "jpg" | "svg" | "gif" => {
                    write_dotted_names(&mut path, &names);
                    Leaf::Image(path)
                }
                _ => {
                    write_dotted_names(&mut path, &names);
                    Leaf::Anchor(path)
                }
            };
            return Ok(leaf);
        }
    }
}

/// Convert a token stream ending with `End` into a syntax tree.
pub fn parse(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}
