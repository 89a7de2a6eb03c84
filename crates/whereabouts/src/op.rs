//! Operator keys used inside a predicate specification.
//!
//! Each leaf predicate serializes as a small mapping whose keys are drawn
//! from [`Op`]. Which keys appear depends on the predicate kind.

/// Key of a predicate specification mapping.
///
/// - `Equals` is used by exact-match predicates
/// - `Contains` is used by substring predicates
/// - `Gte` and `Lt` always appear together on date-range predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    /// Exact match.
    Equals,
    /// Substring match.
    Contains,
    /// Lower bound, inclusive.
    Gte,
    /// Upper bound.
    Lt,
}

impl Op {
    /// Returns the key name as it appears in a condition document.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Equals => "equals",
            Op::Contains => "contains",
            Op::Gte => "gte",
            Op::Lt => "lt",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
