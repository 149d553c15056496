/// Binary combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

impl BinOp {
    /// Apply the operator to two verdicts.
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            BinOp::And => left && right,
            BinOp::Or => left || right,
        }
    }

    /// The source keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }
}
