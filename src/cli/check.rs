//! Execute qmellow queries against subject documents

use std::path::PathBuf;

use rayon::prelude::*;

use super::CliError;
use crate::{output, translate, Document, Evaluator, Outcome};

/// Name given to a subject read from standard input
const STDIN_NAME: &str = "<stdin>";

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The qmellow query to evaluate
    pub query: String,
    /// Subject files, evaluated in the order given
    pub files: Vec<PathBuf>,
    /// Subject text read from stdin, used when no files are given
    pub stdin: Option<String>,
    /// Emit JSON instead of text
    pub json: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// Syntax validation passed; carries the canonical form of the query
    SyntaxValid(String),
    /// The query was evaluated against every subject
    Evaluated {
        /// Rendered report
        output: String,
        /// Number of subjects the query matched
        matched: usize,
        /// Number of subjects evaluated
        total: usize,
    },
}

/// Load subject files in parallel, keeping argument order.
pub fn load_subjects(files: &[PathBuf]) -> Result<Vec<Document>, CliError> {
    files
        .par_iter()
        .map(|path| {
            Document::load(path).map_err(|source| CliError::Read {
                path: path.display().to_string(),
                source,
            })
        })
        .collect()
}

/// Execute a qmellow check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = translate(&options.query)?;
    log::debug!("query has {} leaf criteria", expr.leaves().len());

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid(expr.pretty_print()));
    }

    let mut subjects = load_subjects(&options.files)?;
    if subjects.is_empty() {
        let text = options.stdin.as_deref().ok_or(CliError::NoInput)?;
        subjects.push(Document::from_text(STDIN_NAME, text));
    }

    let evaluator = Evaluator::new();
    let reports: Vec<(&str, Outcome<'_>)> = subjects
        .par_iter()
        .map(|doc| (doc.path(), evaluator.eval_expression(&expr, doc)))
        .collect();

    let matched = reports.iter().filter(|(_, outcome)| outcome.success).count();
    log::info!("query matched {} of {} subject(s)", matched, reports.len());

    let rendered = match (options.json, options.pretty) {
        (true, true) => output::to_json_pretty(&reports),
        (true, false) => output::to_json(&reports),
        (false, _) => output::to_text(&reports),
    };

    Ok(CheckResult::Evaluated {
        output: rendered,
        matched,
        total: reports.len(),
    })
}

/// Canonical pretty-printed form of a query
pub fn execute_fmt(query: &str) -> Result<String, CliError> {
    Ok(translate(query)?.pretty_print())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_only_returns_canonical_form() {
        let options = CheckOptions {
            query: "#a   and(.b or\n'c')".into(),
            syntax_only: true,
            ..Default::default()
        };
        assert_eq!(
            execute_check(&options).unwrap(),
            CheckResult::SyntaxValid("#a and (.b or 'c')".into())
        );
    }

    #[test]
    fn test_stdin_subject() {
        let options = CheckOptions {
            query: "'hello'".into(),
            stdin: Some("say\nHELLO\n".into()),
            ..Default::default()
        };
        match execute_check(&options).unwrap() {
            CheckResult::Evaluated {
                output,
                matched,
                total,
            } => {
                assert_eq!(output, "<stdin>:\nmatch\n2, ['hello']\n");
                assert_eq!((matched, total), (1, 1));
            }
            other => panic!("Expected evaluation, got {:?}", other),
        }
    }

    #[test]
    fn test_no_input() {
        let options = CheckOptions {
            query: "#a".into(),
            ..Default::default()
        };
        assert!(matches!(execute_check(&options), Err(CliError::NoInput)));
    }

    #[test]
    fn test_missing_file_names_path() {
        let options = CheckOptions {
            query: "#a".into(),
            files: vec![PathBuf::from("/definitely/not/here.html")],
            ..Default::default()
        };
        let err = execute_check(&options).unwrap_err();
        assert!(err.to_string().starts_with("could not read from \"/definitely/not/here.html\""));
    }
}
