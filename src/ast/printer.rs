//! Pretty-printing of syntax trees back to query source.
//!
//! The printed form re-parses to a tree that prints identically: string
//! literals keep their quote style and get escapes wherever the lexer needs
//! them, groups keep their parentheses, and infix keywords are surrounded by
//! single spaces.

use std::fmt::{self, Write};

use crate::ast::{Expr, Leaf};

fn write_quoted(f: &mut fmt::Formatter<'_>, quote: char, text: &str) -> fmt::Result {
    f.write_char(quote)?;
    for ch in text.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Anchor(path) | Leaf::Image(path) => f.write_str(path),
            Leaf::CssId(name) => write!(f, "#{}", name),
            Leaf::ClassNames(names) => {
                for name in names {
                    write!(f, ".{}", name)?;
                }
                Ok(())
            }
            Leaf::CaseInsensitiveString(text) => write_quoted(f, '\'', text),
            Leaf::CaseSensitiveString(text) => write_quoted(f, '"', text),
            Leaf::Css(path) => write!(f, "{}.css", path),
            Leaf::Js(path) => write!(f, "{}.js", path),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Leaf(leaf) => leaf.fmt(f),
            Expr::Not(sub) => write!(f, "not {}", sub),
            Expr::Group(sub) => write!(f, "({})", sub),
            Expr::BinaryOp { op, left, right } => {
                write!(f, "{} {} {}", left, op.keyword(), right)
            }
        }
    }
}

impl Expr {
    /// Serialize the tree back to valid query source.
    pub fn pretty_print(&self) -> String {
        self.to_string()
    }
}
