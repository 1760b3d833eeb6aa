//! Module: identity
//! Responsibility: `Identity`, the `(type, id)` pair that names one record.
//! Does not own: the record's keys/attributes/relationships (see `record`).
//! Boundary: every accessor primitive, operator, and query is keyed on
//! `Identity`; nothing below this module invents its own notion of name.

use std::fmt;

///
/// Identity
///
/// A `(model, id)` pair. Equality is component-wise. There is no `Identity`
/// value for "null" — a relationship with no target is represented by
/// `None` at the call site (see `record::RelatedData`) rather than a
/// sentinel `Identity` variant.
///

#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Identity {
    pub model: String,
    pub id: String,
}

impl Identity {
    #[must_use]
    pub fn new(model: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.model, self.id)
    }
}
