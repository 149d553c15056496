use std::fmt;

use crate::ast::{Token, TokenKind};

/// A line/column location in query source text. Both are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    /// Step past a character on the current line.
    pub fn next_column(&mut self) {
        self.column += 1;
    }

    /// Step past a newline.
    pub fn next_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("bad character {found:?} at {position}")]
    UnexpectedChar { position: Position, found: char },

    #[error("end of input inside quoted string at {position}")]
    UnterminatedString { position: Position },

    #[error("bad character {found:?} in quoted string at {position}")]
    BadStringChar { position: Position, found: char },

    #[error("bad escape sequence '\\{found}' in quoted string at {position}")]
    BadEscape { position: Position, found: char },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedChar { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::BadStringChar { position, .. }
            | LexError::BadEscape { position, .. } => *position,
        }
    }
}

/// Keyword lookup for a completed name.
fn keyword(text: &str) -> Option<TokenKind> {
    match text {
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "not" => Some(TokenKind::Not),
        _ => None,
    }
}

pub struct Lexer {
    input: Vec<char>,
    offset: usize,
    position: Position,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer::starting_at(input, Position::default())
    }

    /// Lex `input` as if it began at `position`, so that a caller feeding
    /// successive lines keeps one logical position counter across them.
    pub fn starting_at(input: &str, position: Position) -> Self {
        Lexer {
            input: input.chars().collect(),
            offset: 0,
            position,
        }
    }

    /// Position of the next unconsumed character.
    pub fn position(&self) -> Position {
        self.position
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.offset += 1;
            if ch == '\n' {
                self.position.next_line();
            } else {
                self.position.next_column();
            }
        }
    }

    /// Skip whitespace and `-` line comments.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_whitespace() || ch == '\x0B' {
                self.advance();
            } else if ch == '-' {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    fn read_name(&mut self) -> Token {
        let anchor = self.position;
        let mut text = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match keyword(&text) {
            Some(kind) => Token::new(kind, anchor),
            None => Token::with_text(TokenKind::Name, anchor, text),
        }
    }

    /// Scan a quoted string. The current character is the opening quote; the
    /// returned text has the quotes removed and escapes translated.
    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let mut result = String::new();
        self.advance(); // opening quote

        loop {
            let ch = self.current_char().ok_or(LexError::UnterminatedString {
                position: self.position,
            })?;

            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    let escaped = self.current_char().ok_or(LexError::UnterminatedString {
                        position: self.position,
                    })?;
                    let translated = match escaped {
                        '\\' | '\'' | '"' => escaped,
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        found => {
                            return Err(LexError::BadEscape {
                                position: self.position,
                                found,
                            });
                        }
                    };
                    result.push(translated);
                    self.advance();
                }
                ' '..='~' => {
                    result.push(ch);
                    self.advance();
                }
                found => {
                    return Err(LexError::BadStringChar {
                        position: self.position,
                        found,
                    });
                }
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let token = Token::new(kind, self.position);
        self.advance();
        token
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();

        let token = match self.current_char() {
            None => Token::new(TokenKind::End, self.position),
            Some('#') => self.single(TokenKind::Hash),
            Some('.') => self.single(TokenKind::Dot),
            Some('/') => self.single(TokenKind::Slash),
            Some('(') => self.single(TokenKind::OpenParen),
            Some(')') => self.single(TokenKind::CloseParen),
            Some('\'') => {
                let position = self.position;
                let text = self.read_string('\'')?;
                Token::with_text(TokenKind::SingleQuotedString, position, text)
            }
            Some('"') => {
                let position = self.position;
                let text = self.read_string('"')?;
                Token::with_text(TokenKind::DoubleQuotedString, position, text)
            }
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.read_name(),
            Some(found) => {
                return Err(LexError::UnexpectedChar {
                    position: self.position,
                    found,
                });
            }
        };

        log::trace!("lexed {} at {}", token.kind, token.position);
        Ok(token)
    }

    /// Lex the remaining input into tokens. The result always ends with
    /// exactly one `End` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::End;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Convert source text into tokens, starting at line 1, column 1.
pub fn lex(text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(text).tokenize()
}

/// Convert source text into tokens, starting at `position`.
pub fn lex_from(text: &str, position: Position) -> Result<Vec<Token>, LexError> {
    Lexer::starting_at(text, position).tokenize()
}
