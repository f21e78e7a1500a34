use std::fmt;

/// Boolean operators joining the parts of a boolean query.
///
/// There is no negation; `not` is an ordinary identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Logical AND (`and`), binds tighter than `or`
    And,
    /// Logical OR (`or`), starts a new group
    Or,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => f.write_str("and"),
            Operator::Or => f.write_str("or"),
        }
    }
}
