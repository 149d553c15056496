pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod document;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod outcome;
pub mod output;
pub mod parser;
pub mod subject;

pub use ast::{BinOp, Expr, Leaf, Token, TokenKind};
pub use document::Document;
pub use error::Error;
pub use evaluator::{evaluate, evaluate_all, Evaluator};
pub use lexer::{lex, lex_from, LexError, Lexer, Position};
pub use outcome::{Match, Outcome};
pub use output::{to_json, to_json_pretty, to_text};
pub use parser::{parse, ParseError, Parser};
pub use subject::{Hit, Subject};

/// Lex and parse query text into a syntax tree.
///
/// ```
/// use qmellow::{translate, Expr, Leaf};
///
/// let expr = translate("#foo and .bar.baz").unwrap();
/// assert_eq!(
///     expr,
///     Expr::and(
///         Leaf::CssId("foo".into()).into(),
///         Leaf::ClassNames(vec!["bar".into(), "baz".into()]).into(),
///     )
/// );
/// ```
pub fn translate(text: &str) -> Result<Expr, Error> {
    let tokens = lex(text)?;
    Ok(parse(tokens)?)
}
