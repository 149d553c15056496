//! Interactive read-evaluate-print loop
//!
//! A query may span several lines: a line ending in `\` asks for another
//! one, and so does any line that leaves parentheses open. All lines of one
//! query share a single position counter, so errors point at the right line.

use std::{
    io::{BufRead, Write},
    mem,
};

use super::CliError;
use crate::{
    ast::{Token, TokenKind},
    lexer::{lex_from, LexError, Position},
    output, parse, Document, Error, Evaluator,
};

const PROMPT: &str = "qmellow: ";
const CONTINUATION_PROMPT: &str = "...    : ";

/// What feeding one line to a [`Continuation`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// The query is complete; the tokens end with `End`
    Complete(Vec<Token>),
    /// Another line is needed
    NeedMore,
    /// An empty line abandoned the pending query
    Aborted,
}

/// Accumulates tokens across the lines of one query.
#[derive(Debug, Default)]
pub struct Continuation {
    tokens: Vec<Token>,
    position: Position,
    paren_depth: usize,
    pending: bool,
}

impl Continuation {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a query has been started but not completed.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn prompt(&self) -> &'static str {
        if self.pending {
            CONTINUATION_PROMPT
        } else {
            PROMPT
        }
    }

    fn reset(&mut self) {
        *self = Continuation::default();
    }

    /// Feed one line of input, without its newline.
    ///
    /// A lexical error abandons the pending query.
    pub fn feed(&mut self, line: &str) -> Result<Feed, LexError> {
        let mut line = line.trim_end();
        if line.is_empty() {
            self.reset();
            return Ok(Feed::Aborted);
        }

        let mut extend = false;
        if let Some(stripped) = line.strip_suffix('\\') {
            line = stripped;
            extend = true;
        }

        let mut more = match lex_from(line, self.position) {
            Ok(tokens) => tokens,
            Err(e) => {
                self.reset();
                return Err(e);
            }
        };

        for token in &more {
            match token.kind {
                TokenKind::OpenParen => self.paren_depth += 1,
                TokenKind::CloseParen => self.paren_depth = self.paren_depth.saturating_sub(1),
                _ => {}
            }
        }
        if self.paren_depth > 0 {
            extend = true;
        }

        if extend {
            // Continue from just past this line's end token.
            if let Some(end) = more.pop() {
                self.position = end.position;
                self.position.next_line();
            }
            self.tokens.append(&mut more);
            self.pending = true;
            return Ok(Feed::NeedMore);
        }

        self.tokens.append(&mut more);
        let tokens = mem::take(&mut self.tokens);
        self.reset();
        Ok(Feed::Complete(tokens))
    }
}

/// Prompt for queries on `input` and evaluate each against every subject,
/// writing reports to `out`.
///
/// Lexical and syntax errors are reported and the user is prompted again.
/// Internal errors end the session. Prompts are only written when
/// `interactive` is set. Returns at end of input.
pub fn run_repl<R, W>(
    input: R,
    out: &mut W,
    subjects: &[Document],
    interactive: bool,
) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
{
    let evaluator = Evaluator::new();
    let mut continuation = Continuation::new();
    let mut lines = input.lines();

    loop {
        if interactive {
            write!(out, "{}", continuation.prompt())?;
            out.flush()?;
        }

        let Some(line) = lines.next().transpose()? else {
            log::debug!("end of input, leaving repl");
            return Ok(());
        };

        let tokens = match continuation.feed(&line) {
            Ok(Feed::Complete(tokens)) => tokens,
            Ok(Feed::NeedMore | Feed::Aborted) => continue,
            Err(e) => {
                writeln!(out, "{}", Error::from(e))?;
                continue;
            }
        };

        let expr = match parse(tokens) {
            Ok(expr) => expr,
            Err(e) if e.is_internal() => return Err(e.into()),
            Err(e) => {
                writeln!(out, "{}", Error::from(e))?;
                continue;
            }
        };

        for subject in subjects {
            let outcome = evaluator.eval_expression(&expr, subject);
            write!(out, "{}", output::to_text(&[(subject.path(), outcome)]))?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_single_line_completes() {
        let mut c = Continuation::new();
        match c.feed("#a and #b   ").unwrap() {
            Feed::Complete(tokens) => assert_eq!(
                kinds(&tokens),
                vec![
                    TokenKind::Hash,
                    TokenKind::Name,
                    TokenKind::And,
                    TokenKind::Hash,
                    TokenKind::Name,
                    TokenKind::End
                ]
            ),
            other => panic!("Expected Complete, got {:?}", other),
        }
        assert!(!c.is_pending());
    }

    #[test]
    fn test_open_paren_continues_on_next_line() {
        let mut c = Continuation::new();
        assert_eq!(c.feed("(#a or").unwrap(), Feed::NeedMore);
        assert!(c.is_pending());
        assert_eq!(c.prompt(), CONTINUATION_PROMPT);

        let Feed::Complete(tokens) = c.feed("  #b)").unwrap() else {
            panic!("Expected Complete");
        };
        // `#` of the second line sits at line 2, column 3.
        assert_eq!(tokens[4].kind, TokenKind::Hash);
        assert_eq!(tokens[4].position, Position::new(2, 3));
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::End).count(), 1);
    }

    #[test]
    fn test_backslash_continues() {
        let mut c = Continuation::new();
        assert_eq!(c.feed("#a and \\").unwrap(), Feed::NeedMore);
        assert!(matches!(c.feed("#b").unwrap(), Feed::Complete(_)));
    }

    #[test]
    fn test_empty_line_aborts() {
        let mut c = Continuation::new();
        assert_eq!(c.feed("(#a").unwrap(), Feed::NeedMore);
        assert_eq!(c.feed("   ").unwrap(), Feed::Aborted);
        assert!(!c.is_pending());
        assert_eq!(c.prompt(), PROMPT);
    }

    #[test]
    fn test_lex_error_discards_pending_query() {
        let mut c = Continuation::new();
        assert_eq!(c.feed("(#a").unwrap(), Feed::NeedMore);
        let err = c.feed("and $").unwrap_err();
        assert_eq!(err.position(), Position::new(2, 5));
        assert!(!c.is_pending());
    }

    #[test]
    fn test_repl_reports_errors_and_outcomes() {
        let subjects = vec![Document::from_text("page.html", "<p id=\"x\">hi</p>\n")];
        let input = "and or\n(#x\n)\n".as_bytes();
        let mut out = Vec::new();

        run_repl(input, &mut out, &subjects, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("syntax error: expected"));
        assert_eq!(lines.next(), Some("page.html:"));
        assert_eq!(lines.next(), Some("match"));
        assert_eq!(lines.next(), Some("1, [#x]"));
    }
}
