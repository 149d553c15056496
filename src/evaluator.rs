use crate::{
    ast::{Expr, Leaf},
    outcome::{Match, Outcome},
    subject::{Hit, Subject},
};

/// Evaluates parsed queries against subjects.
///
/// Evaluation is a pure function of the tree and the subject. It never
/// fails: a leaf whose subject reports no hits is simply a failure with no
/// evidence.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Evaluator
    }

    /// Evaluates `expr` against `subject`.
    ///
    /// # Examples
    ///
    /// ```
    /// use qmellow::{translate, Evaluator, Document};
    ///
    /// let expr = translate("#nav and not 'lorem'").unwrap();
    /// let page = Document::from_text("index.html", "<div id=\"nav\">\n</div>\n");
    ///
    /// let outcome = Evaluator::new().eval_expression(&expr, &page);
    /// assert!(outcome.success);
    /// ```
    pub fn eval_expression<'a, S>(&self, expr: &'a Expr, subject: &S) -> Outcome<'a>
    where
        S: Subject + ?Sized,
    {
        let outcome = self.eval_expr(expr, subject);
        log::debug!(
            "evaluated {}: success={}, {} match(es)",
            expr,
            outcome.success,
            outcome.matches.len()
        );
        outcome
    }

    fn eval_expr<'a, S>(&self, expr: &'a Expr, subject: &S) -> Outcome<'a>
    where
        S: Subject + ?Sized,
    {
        match expr {
            Expr::Leaf(leaf) => self.eval_leaf(leaf, subject),
            Expr::Not(sub) => !self.eval_expr(sub, subject),
            Expr::Group(sub) => self.eval_expr(sub, subject),
            Expr::BinaryOp { op, left, right } => {
                let left = self.eval_expr(left, subject);
                let right = self.eval_expr(right, subject);
                left.combine(right, *op)
            }
        }
    }

    fn eval_leaf<'a, S>(&self, leaf: &'a Leaf, subject: &S) -> Outcome<'a>
    where
        S: Subject + ?Sized,
    {
        let hits: Vec<Hit> = match leaf {
            Leaf::Anchor(path) => subject.match_anchor(path),
            Leaf::CssId(id) => subject.match_css_id(id),
            Leaf::ClassNames(names) => subject.match_class_names(names),
            Leaf::CaseInsensitiveString(text) => subject.match_case_insensitive_string(text),
            Leaf::CaseSensitiveString(text) => subject.match_case_sensitive_string(text),
            Leaf::Css(path) => subject.match_css(path),
            Leaf::Js(path) => subject.match_js(path),
            Leaf::Image(path) => subject.match_image(path),
        };
        log::trace!("leaf {} reported {} hit(s)", leaf, hits.len());

        let mut outcome = Outcome::new();
        for hit in hits {
            outcome.add(Match::from_hit(leaf, hit));
        }
        outcome
    }
}

/// Evaluates `expr` against `subject`.
pub fn evaluate<'a, S>(expr: &'a Expr, subject: &S) -> Outcome<'a>
where
    S: Subject + ?Sized,
{
    Evaluator::new().eval_expression(expr, subject)
}

/// Evaluates `expr` against each subject in turn, in order.
pub fn evaluate_all<'a, 's, S>(expr: &'a Expr, subjects: &'s [S]) -> Vec<(&'s S, Outcome<'a>)>
where
    S: Subject,
{
    let evaluator = Evaluator::new();
    subjects
        .iter()
        .map(|subject| (subject, evaluator.eval_expression(expr, subject)))
        .collect()
}
