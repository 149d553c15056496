//! CLI support for qmellow
//!
//! Provides programmatic access to the `qmellow` command's functionality so
//! it can be embedded in other tools or driven from tests.

mod check;
mod docs;
mod repl;

pub use check::{execute_check, execute_fmt, load_subjects, CheckOptions, CheckResult};
pub use docs::get_syntax_reference;
pub use repl::{run_repl, Continuation, Feed};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The query did not lex or parse
    #[error("{0}")]
    Query(#[from] crate::Error),

    /// A subject file could not be read
    #[error("could not read from \"{path}\": {source}")]
    Read { path: String, source: io::Error },

    /// Terminal or pipe IO failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No subject documents were given
    #[error("No subject documents given. Pass file paths or pipe a document to stdin.")]
    NoInput,
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Query(e.into())
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Query(e.into())
    }
}
