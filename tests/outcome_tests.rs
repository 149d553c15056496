// tests/outcome_tests.rs

use qmellow::ast::{BinOp, Expr, Leaf};
use qmellow::{evaluate, translate, Hit, Match, Outcome, Subject};
use std::collections::{BTreeSet, HashMap};

/// A subject that reports canned line numbers per leaf source text.
#[derive(Default)]
struct FakeSubject {
    hits: HashMap<String, Vec<usize>>,
}

impl FakeSubject {
    fn with(mut self, leaf: &str, lines: &[usize]) -> Self {
        self.hits.insert(leaf.to_string(), lines.to_vec());
        self
    }

    fn lookup(&self, key: String) -> Vec<Hit> {
        self.hits
            .get(&key)
            .map(|lines| lines.iter().map(|&n| Hit::new(n)).collect())
            .unwrap_or_default()
    }
}

impl Subject for FakeSubject {
    fn match_anchor(&self, path: &str) -> Vec<Hit> {
        self.lookup(path.to_string())
    }

    fn match_case_sensitive_string(&self, text: &str) -> Vec<Hit> {
        self.lookup(format!("\"{}\"", text))
    }

    fn match_case_insensitive_string(&self, text: &str) -> Vec<Hit> {
        self.lookup(format!("'{}'", text))
    }

    fn match_class_names(&self, names: &[String]) -> Vec<Hit> {
        self.lookup(names.iter().map(|n| format!(".{}", n)).collect())
    }

    fn match_css_id(&self, id: &str) -> Vec<Hit> {
        self.lookup(format!("#{}", id))
    }

    fn match_css(&self, path: &str) -> Vec<Hit> {
        self.lookup(format!("{}.css", path))
    }

    fn match_js(&self, path: &str) -> Vec<Hit> {
        self.lookup(format!("{}.js", path))
    }

    fn match_image(&self, path: &str) -> Vec<Hit> {
        self.lookup(path.to_string())
    }
}

fn lines(outcome: &Outcome<'_>) -> Vec<usize> {
    outcome.matches.iter().map(|m| m.line_number).collect()
}

fn causes(outcome: &Outcome<'_>) -> Vec<String> {
    outcome.matches.iter().map(|m| m.cause.to_string()).collect()
}

// ============================================================================
// Leaves
// ============================================================================

#[test]
fn test_each_leaf_uses_its_capability() {
    let subject = FakeSubject::default()
        .with("/about", &[1])
        .with("\"Exact\"", &[2])
        .with("'loose'", &[3])
        .with(".a.b", &[4])
        .with("#nav", &[5])
        .with("/site.css", &[6])
        .with("/app.js", &[7])
        .with("/logo.png", &[8]);

    let test_cases = vec![
        ("/about", 1),
        ("\"Exact\"", 2),
        ("'loose'", 3),
        (".a.b", 4),
        ("#nav", 5),
        ("/site.css", 6),
        ("/app.js", 7),
        ("/logo.png", 8),
    ];

    for (query, line) in test_cases {
        let expr = translate(query).unwrap();
        let outcome = evaluate(&expr, &subject);
        assert!(outcome.success, "Failed for query: {}", query);
        assert_eq!(lines(&outcome), vec![line], "Failed for query: {}", query);
        assert_eq!(causes(&outcome), vec![query.to_string()]);
    }
}

#[test]
fn test_leaf_without_hits_fails_with_no_evidence() {
    let expr = translate("#missing").unwrap();
    let outcome = evaluate(&expr, &FakeSubject::default());
    assert_eq!(outcome, Outcome::new());
}

#[test]
fn test_cause_is_the_leaf_node_itself() {
    let expr = translate("#nav").unwrap();
    let outcome = evaluate(&expr, &FakeSubject::default().with("#nav", &[1]));
    let leaf = match &expr {
        Expr::Leaf(leaf) => leaf,
        other => panic!("Expected leaf, got {:?}", other),
    };
    let m = outcome.matches.iter().next().unwrap();
    assert!(std::ptr::eq(m.cause, leaf));
}

// ============================================================================
// Not and Group
// ============================================================================

#[test]
fn test_not_flips_verdict_and_keeps_evidence() {
    let subject = FakeSubject::default().with("#a", &[3, 4]);

    let expr = translate("not #a").unwrap();
    let outcome = evaluate(&expr, &subject);
    assert!(!outcome.success);
    assert_eq!(lines(&outcome), vec![3, 4]);

    let expr = translate("not #b").unwrap();
    let outcome = evaluate(&expr, &subject);
    assert!(outcome.success);
    assert!(outcome.matches.is_empty());
}

#[test]
fn test_double_negation_is_identity() {
    let subject = FakeSubject::default().with("#a", &[3]).with("#b", &[8]);
    let inner = translate("#a or #b").unwrap();
    let twice = Expr::not(Expr::not(inner.clone()));

    let plain = evaluate(&inner, &subject);
    let negated = evaluate(&twice, &subject);
    assert_eq!(plain.success, negated.success);
    assert_eq!(lines(&plain), lines(&negated));
    assert_eq!(causes(&plain), causes(&negated));
}

#[test]
fn test_group_is_transparent() {
    let subject = FakeSubject::default().with("#a", &[1]);
    let bare = translate("#a and #b").unwrap();
    let grouped = translate("(#a and #b)").unwrap();

    let bare = evaluate(&bare, &subject);
    let grouped = evaluate(&grouped, &subject);
    assert_eq!(bare.success, grouped.success);
    assert_eq!(lines(&bare), lines(&grouped));
}

// ============================================================================
// Combination
// ============================================================================

#[test]
fn test_agreeing_success_unions_evidence() {
    let subject = FakeSubject::default().with("#a", &[1, 5]).with("#b", &[3]);

    for query in ["#a and #b", "#a or #b"] {
        let expr = translate(query).unwrap();
        let outcome = evaluate(&expr, &subject);
        assert!(outcome.success, "Failed for query: {}", query);
        assert_eq!(lines(&outcome), vec![1, 3, 5], "Failed for query: {}", query);
    }
}

#[test]
fn test_agreeing_failure_unions_evidence() {
    // Both sides fail while still carrying evidence (negated hits).
    let subject = FakeSubject::default().with("#a", &[2]).with("#b", &[7]);

    for query in ["not #a and not #b", "not #a or not #b"] {
        let expr = translate(query).unwrap();
        let outcome = evaluate(&expr, &subject);
        assert!(!outcome.success, "Failed for query: {}", query);
        assert_eq!(lines(&outcome), vec![2, 7], "Failed for query: {}", query);
    }
}

#[test]
fn test_and_keeps_only_failing_side() {
    let subject = FakeSubject::default().with("#a", &[1]).with("#b", &[9]);

    // #a succeeds, `not #b` fails with #b's evidence
    let expr = translate("#a and not #b").unwrap();
    let outcome = evaluate(&expr, &subject);
    assert!(!outcome.success);
    assert_eq!(lines(&outcome), vec![9]);
    assert_eq!(causes(&outcome), vec!["#b".to_string()]);
}

#[test]
fn test_or_keeps_only_succeeding_side() {
    let subject = FakeSubject::default().with("#a", &[1]).with("#b", &[9]);

    let expr = translate("not #a or #b").unwrap();
    let outcome = evaluate(&expr, &subject);
    assert!(outcome.success);
    assert_eq!(lines(&outcome), vec![9]);
}

#[test]
fn test_same_line_different_leaves_are_both_kept() {
    let subject = FakeSubject::default().with("#a", &[4]).with(".x", &[4]);
    let expr = translate("#a and .x").unwrap();
    let outcome = evaluate(&expr, &subject);
    assert_eq!(outcome.matches.len(), 2);
    assert_eq!(lines(&outcome), vec![4, 4]);
}

#[test]
fn test_repeated_leaf_text_gives_distinct_causes() {
    let subject = FakeSubject::default().with("#a", &[4]);
    let expr = translate("#a or #a").unwrap();
    let outcome = evaluate(&expr, &subject);
    assert_eq!(outcome.matches.len(), 2);
}

// ============================================================================
// Direct algebra
// ============================================================================

fn outcome<'a>(success: bool, leaf: &'a Leaf, lines: &[usize]) -> Outcome<'a> {
    Outcome::with_matches(success, lines.iter().map(|&n| Match::new(leaf, n)))
}

#[test]
fn test_combine_is_commutative_in_success() {
    let a = Leaf::CssId("a".into());
    let b = Leaf::CssId("b".into());

    for op in [BinOp::And, BinOp::Or] {
        for (ls, rs) in [(false, false), (false, true), (true, false), (true, true)] {
            let lr = outcome(ls, &a, &[1]).combine(outcome(rs, &b, &[2]), op);
            let rl = outcome(rs, &b, &[2]).combine(outcome(ls, &a, &[1]), op);
            assert_eq!(lr.success, rl.success, "{:?} {} {}", op, ls, rs);
            assert_eq!(lr.success, op.apply(ls, rs));
            assert_eq!(lr.matches, rl.matches, "{:?} {} {}", op, ls, rs);
        }
    }
}

#[test]
fn test_evidence_discard_law() {
    let a = Leaf::CssId("a".into());
    let b = Leaf::CssId("b".into());
    let left = outcome(true, &a, &[1, 2, 3]);
    let right = outcome(false, &b, &[2, 8]);
    let expected: BTreeSet<Match<'_>> = right.matches.clone();

    let combined = left.clone().combine(right.clone(), BinOp::And);
    assert!(!combined.success);
    assert_eq!(combined.matches, expected);

    let combined = left.clone().or(right);
    assert!(combined.success);
    assert_eq!(combined.matches, left.matches);
}

#[test]
fn test_union_deduplicates_by_line_and_cause() {
    let a = Leaf::CssId("a".into());
    let mut first = Match::new(&a, 5);
    first.line_text = Some("left".into());
    let mut second = Match::new(&a, 5);
    second.line_text = Some("right".into());

    let combined = Outcome::with_matches(true, vec![first])
        .and(Outcome::with_matches(true, vec![second]));
    assert_eq!(combined.matches.len(), 1);
}

#[test]
fn test_negation_keeps_matches() {
    let a = Leaf::CssId("a".into());
    let original = outcome(true, &a, &[4, 6]);
    let negated = !original.clone();
    assert!(!negated.success);
    assert_eq!(negated.matches, original.matches);
}
