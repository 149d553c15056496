//! # qmellow - Abstract Syntax Tree
//!
//! This module defines the syntax tree for qmellow, a small boolean query
//! language describing inclusion criteria for a subject document.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes: match primitives and combinators
//! - **[operators]** - The binary combinators (`and`, `or`)
//! - **[printer]** - Pretty-printing back to source text
//!
//! ## Quick Start
//!
//! ```text
//! /styles/site.css and not /img/logo.png or 'sign in'
//! ```
//!
//! This query matches documents that reference the `/styles/site` stylesheet
//! without the logo image, or that mention "sign in" in any letter case.
//!
//! ## Match Primitives
//!
//! | Source             | Leaf                    |
//! |--------------------|-------------------------|
//! | `'text'`           | case-insensitive string |
//! | `"text"`           | case-sensitive string   |
//! | `#name`            | CSS id                  |
//! | `.a.b`             | class names (all on one element) |
//! | `/a/b.css`         | stylesheet `/a/b`       |
//! | `/a/b.js`          | script `/a/b`           |
//! | `/a/b.png` (`jpg`, `svg`, `gif`) | image `/a/b.png` |
//! | `/a/b`             | anchor `/a/b`           |
//!
//! ## Precedence
//!
//! From loosest to tightest: `or`, `and`, `not`, atoms. Both infix operators
//! are left-associative; parentheses group and are kept in the tree so the
//! query prints back the way it was written.
pub mod expressions;
pub mod operators;
pub mod printer;
pub mod tokens;

pub use expressions::{Expr, Leaf};
pub use operators::BinOp;
pub use tokens::{Token, TokenKind};
