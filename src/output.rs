//! Rendering of evaluation outcomes.
//!
//! Each outcome is reported against the subject it was computed for. Two
//! renderings are provided:
//!
//! - **Text** via [`to_text()`] - the verdict, then one `line, [cause]` row
//!   per match
//! - **JSON** via [`to_json()`] and [`to_json_pretty()`] - an array with one
//!   object per subject
//!
//! # Examples
//!
//! ```
//! use qmellow::{output::to_text, translate, Document, Evaluator};
//!
//! let expr = translate("\"Hello\"").unwrap();
//! let doc = Document::from_text("greeting.txt", "Hello, world\n");
//! let outcome = Evaluator::new().eval_expression(&expr, &doc);
//!
//! assert_eq!(
//!     to_text(&[(doc.path(), outcome)]),
//!     "greeting.txt:\nmatch\n1, [\"Hello\"]\n"
//! );
//! ```

use serde_json::{json, Value};

use crate::outcome::{Match, Outcome};

fn match_to_value(m: &Match<'_>) -> Value {
    json!({
        "line": m.line_number,
        "cause": m.cause.to_string(),
        "text": m.line_text,
        "sub_file": m.sub_file_path,
    })
}

/// One subject's outcome as a JSON object.
pub fn outcome_to_value(subject: &str, outcome: &Outcome<'_>) -> Value {
    json!({
        "subject": subject,
        "success": outcome.success,
        "matches": outcome.matches.iter().map(match_to_value).collect::<Vec<_>>(),
    })
}

fn reports_to_value(reports: &[(&str, Outcome<'_>)]) -> Value {
    Value::Array(
        reports
            .iter()
            .map(|(subject, outcome)| outcome_to_value(subject, outcome))
            .collect(),
    )
}

/// Renders each subject as `path:` followed by its outcome.
pub fn to_text(reports: &[(&str, Outcome<'_>)]) -> String {
    let mut text = String::new();
    for (subject, outcome) in reports {
        text.push_str(subject);
        text.push_str(":\n");
        text.push_str(&outcome.to_string());
    }
    text
}

/// Compact JSON array of per-subject outcomes.
pub fn to_json(reports: &[(&str, Outcome<'_>)]) -> String {
    reports_to_value(reports).to_string()
}

/// JSON array of per-subject outcomes with 2-space indentation.
pub fn to_json_pretty(reports: &[(&str, Outcome<'_>)]) -> String {
    format!("{:#}", reports_to_value(reports))
}
