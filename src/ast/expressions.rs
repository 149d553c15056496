use crate::ast::BinOp;

/// A primitive match criterion.
///
/// Leaves double as the identity of the evidence they produce: every
/// [`Match`](crate::Match) found while evaluating a leaf refers back to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    /// Link target
    ///
    /// # Example
    /// ```text
    /// /about/team.html    // Anchor("/about/team.html")
    /// ```
    Anchor(String),

    /// CSS id
    ///
    /// # Example
    /// ```text
    /// #login              // CssId("login")
    /// ```
    CssId(String),

    /// Class names that must all appear on a single element
    ///
    /// # Example
    /// ```text
    /// .btn.primary        // ClassNames(["btn", "primary"])
    /// ```
    ClassNames(Vec<String>),

    /// Literal text, matched ignoring case
    CaseInsensitiveString(String),

    /// Literal text, matched exactly
    CaseSensitiveString(String),

    /// Stylesheet reference, stored without its `.css` suffix
    ///
    /// # Example
    /// ```text
    /// /a/b/style.css      // Css("/a/b/style")
    /// ```
    Css(String),

    /// Script reference, stored without its `.js` suffix
    Js(String),

    /// Image reference, stored with its extension
    ///
    /// # Example
    /// ```text
    /// /img/logo.png       // Image("/img/logo.png")
    /// ```
    Image(String),
}

/// Syntax tree node of a parsed query.
///
/// The tree is immutable once built and every node is owned by exactly one
/// parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A match primitive
    Leaf(Leaf),

    /// Negation (`not x`)
    Not(Box<Expr>),

    /// Parenthesised sub-expression. Evaluates exactly like its child and
    /// only exists so the query prints back with its parentheses.
    Group(Box<Expr>),

    /// `and` / `or` combination
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    pub fn group(expr: Expr) -> Self {
        Expr::Group(Box::new(expr))
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::binary(BinOp::And, left, right)
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::binary(BinOp::Or, left, right)
    }

    /// All leaves in left-to-right source order.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        match self {
            Expr::Leaf(leaf) => out.push(leaf),
            Expr::Not(sub) | Expr::Group(sub) => sub.collect_leaves(out),
            Expr::BinaryOp { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }
}

impl From<Leaf> for Expr {
    fn from(leaf: Leaf) -> Self {
        Expr::Leaf(leaf)
    }
}
