//! Module: query::predicate
//! Responsibility: `Predicate`, the filter half of the query algebra —
//! an AND-combined list of attribute and related-record predicates.
//! Does not own: evaluating a related-record predicate against stored
//! records (see `evaluator`), only the shape and the comparisons that
//! don't need accessor access.
//! Boundary: cross-type attribute comparisons are never an error — they
//! are simply `false`, matching `Value`'s `PartialOrd`.

use crate::{identity::Identity, record::Record, value::Value};

///
/// AttributeOp
///
/// `equal` uses structural (deep) equality; the rest use `Value`'s
/// native ordering, which is only defined within a variant — a
/// cross-variant comparison simply fails to match.
///

#[derive(Clone, Debug, PartialEq)]
pub enum AttributeOp {
    Equal(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
}

impl AttributeOp {
    #[must_use]
    pub fn matches(&self, actual: Option<&Value>) -> bool {
        let actual = actual.unwrap_or(&Value::Null);
        match self {
            Self::Equal(expected) => actual == expected,
            Self::Gt(expected) => matches!(actual.partial_cmp(expected), Some(std::cmp::Ordering::Greater)),
            Self::Gte(expected) => matches!(
                actual.partial_cmp(expected),
                Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
            ),
            Self::Lt(expected) => matches!(actual.partial_cmp(expected), Some(std::cmp::Ordering::Less)),
            Self::Lte(expected) => matches!(
                actual.partial_cmp(expected),
                Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
            ),
        }
    }
}

///
/// SetOp
///
/// The four ways a set of expected identities can be compared against a
/// `hasMany` relationship's actual targets:
/// - `Equal`: same length, and every expected identity is present.
/// - `All`: every expected identity is present (length may differ).
/// - `Some`: at least one expected identity is present.
/// - `None`: no expected identity is present.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SetOp {
    Equal,
    All,
    Some,
    None,
}

impl SetOp {
    #[must_use]
    pub fn matches(self, expected: &[Identity], actual: &[Identity]) -> bool {
        match self {
            Self::Equal => expected.len() == actual.len() && expected.iter().all(|id| actual.contains(id)),
            Self::All => expected.iter().all(|id| actual.contains(id)),
            Self::Some => expected.iter().any(|id| actual.contains(id)),
            Self::None => !expected.iter().any(|id| actual.contains(id)),
        }
    }
}

///
/// Predicate
///
/// One clause of a `findRecords` filter (the filter as a whole is the AND
/// of its clauses). `RelatedRecord`/`RelatedRecords` predicates need the
/// accessor to resolve their targets, so they are evaluated in
/// `evaluator`, not here.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Attribute {
        name: String,
        op: AttributeOp,
    },
    /// `equal` against a `hasOne` relationship's current target — it
    /// matches if that target is present anywhere in `expected`.
    RelatedRecord {
        relationship: String,
        expected: Vec<Identity>,
    },
    RelatedRecords {
        relationship: String,
        op: SetOp,
        expected: Vec<Identity>,
    },
}

impl Predicate {
    #[must_use]
    pub fn attribute(name: impl Into<String>, op: AttributeOp) -> Self {
        Self::Attribute { name: name.into(), op }
    }

    #[must_use]
    pub fn related_record(relationship: impl Into<String>, expected: Vec<Identity>) -> Self {
        Self::RelatedRecord {
            relationship: relationship.into(),
            expected,
        }
    }

    #[must_use]
    pub fn related_records(relationship: impl Into<String>, op: SetOp, expected: Vec<Identity>) -> Self {
        Self::RelatedRecords {
            relationship: relationship.into(),
            op,
            expected,
        }
    }

    /// `true`/`false` when this predicate can be decided from `record`
    /// alone (a plain attribute comparison); `None` when it needs the
    /// accessor to resolve a relationship's current targets.
    #[must_use]
    pub fn matches_attribute_only(&self, record: &Record) -> Option<bool> {
        match self {
            Self::Attribute { name, op } => Some(op.matches(record.attribute(name))),
            Self::RelatedRecord { .. } | Self::RelatedRecords { .. } => None,
        }
    }
}
