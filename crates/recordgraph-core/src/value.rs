//! Module: value
//! Responsibility: `Value`, the dynamically-typed scalar stored in a
//! record's attributes.
//! Does not own: relationship data — a relationship's target identities are
//! never `Value`s (see `record::RelatedData`).
//! Boundary: attribute comparisons in predicates and sort keys go through
//! `Value`'s `PartialOrd`/`PartialEq`, never through ad hoc matching.

use std::cmp::Ordering;

///
/// Value
///
/// A dynamically-typed attribute scalar. Equality is structural. Ordering
/// is defined only *within* a variant — comparing across variants (e.g.
/// `Int` against `String`) yields `None` rather than panicking, so a
/// cross-type comparison makes a predicate false rather than error.
///

#[derive(Clone, Debug, PartialEq, derive_more::From, serde::Serialize, serde::Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    #[from(skip)]
    List(Vec<Value>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// A stable discriminant name, used in error messages and logging.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }
}

impl PartialOrd for Value {
    /// Same-variant comparison only. `Null` is comparable only to `Null`
    /// (and then always `Equal`) — it never sorts as less-than or
    /// greater-than a present value; null-ordering for sort is instead a
    /// policy decided by `query::sort`, not by this impl.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Int(b)) => a.partial_cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::String(a), Self::String(b)) => a.partial_cmp(b),
            (Self::List(a), Self::List(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

// `From<bool>`/`From<i64>`/`From<f64>`/`From<String>` are derived above
// (`derive_more::From`); `&str` needs an owned conversion the derive can't
// produce, so it stays hand-written.
impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}
