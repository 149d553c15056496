//! Verdicts and the evidence that justifies them.
//!
//! An [`Outcome`] is what evaluating a query against a subject produces: a
//! boolean verdict plus the set of [`Match`]es that determined it. Matches
//! borrow the leaf that produced them, so an outcome can never outlive the
//! tree it was computed from.
//!
//! # Combination
//!
//! When both operands of `and`/`or` agree, the evidence is the union of both
//! sides. When they disagree, the side that decided the result wins outright
//! and the other side's evidence is dropped: for `and` that is the failing
//! side, for `or` the succeeding one. Negation flips the verdict and keeps
//! the evidence.

use std::{cmp::Ordering, collections::BTreeSet, fmt, ops::Not};

use crate::{
    ast::{BinOp, Leaf},
    subject::Hit,
};

/// One piece of evidence: a line of the subject and the leaf that found it.
///
/// Identity is `(line_number, cause)`, where the cause is compared by
/// address. The text fields are informational only.
#[derive(Debug, Clone)]
pub struct Match<'a> {
    pub cause: &'a Leaf,
    pub line_number: usize,
    pub line_text: Option<String>,
    pub sub_file_path: Option<String>,
}

impl<'a> Match<'a> {
    pub fn new(cause: &'a Leaf, line_number: usize) -> Self {
        Match {
            cause,
            line_number,
            line_text: None,
            sub_file_path: None,
        }
    }

    pub fn from_hit(cause: &'a Leaf, hit: Hit) -> Self {
        Match {
            cause,
            line_number: hit.line_number,
            line_text: hit.line_text,
            sub_file_path: hit.sub_file_path,
        }
    }

    fn cause_id(&self) -> usize {
        std::ptr::from_ref(self.cause) as usize
    }
}

impl PartialEq for Match<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.line_number == other.line_number && std::ptr::eq(self.cause, other.cause)
    }
}

impl Eq for Match<'_> {}

impl PartialOrd for Match<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Match<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line_number
            .cmp(&other.line_number)
            .then_with(|| self.cause_id().cmp(&other.cause_id()))
    }
}

impl fmt::Display for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, [{}]", self.line_number, self.cause)?;
        if let Some(sub_file) = &self.sub_file_path {
            write!(f, " (in {})", sub_file)?;
        }
        Ok(())
    }
}

/// The verdict of evaluating an expression, with its evidence.
///
/// A fresh outcome is a failure with no evidence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome<'a> {
    pub success: bool,
    pub matches: BTreeSet<Match<'a>>,
}

impl<'a> Outcome<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matches(success: bool, matches: impl IntoIterator<Item = Match<'a>>) -> Self {
        Outcome {
            success,
            matches: matches.into_iter().collect(),
        }
    }

    /// Record a match. Any match makes the outcome a success.
    pub fn add(&mut self, m: Match<'a>) {
        self.success = true;
        self.matches.insert(m);
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine two outcomes under `op`, keeping only the evidence of the
    /// side that determined the result.
    pub fn combine(self, other: Outcome<'a>, op: BinOp) -> Outcome<'a> {
        if self.success == other.success {
            let success = op.apply(self.success, other.success);
            let mut matches = self.matches;
            matches.extend(other.matches);
            return Outcome { success, matches };
        }

        let left_decides = match op {
            BinOp::And => !self.success,
            BinOp::Or => self.success,
        };
        if left_decides { self } else { other }
    }

    pub fn and(self, other: Outcome<'a>) -> Outcome<'a> {
        self.combine(other, BinOp::And)
    }

    pub fn or(self, other: Outcome<'a>) -> Outcome<'a> {
        self.combine(other, BinOp::Or)
    }
}

impl<'a> Not for Outcome<'a> {
    type Output = Outcome<'a>;

    fn not(self) -> Outcome<'a> {
        Outcome {
            success: !self.success,
            matches: self.matches,
        }
    }
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", if self.success { "match" } else { "no match" })?;
        for m in &self.matches {
            writeln!(f, "{}", m)?;
        }
        Ok(())
    }
}
