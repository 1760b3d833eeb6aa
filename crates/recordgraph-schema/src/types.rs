//! Module: types
//! Responsibility: the relationship-kind vocabulary shared by schema
//! declarations and the core's processors.
//! Does not own: model/field identity (see `node`).
//! Boundary: read-only — the core consumes `RelationshipKind`, it never
//! constructs or mutates schema declarations.

use std::fmt;

///
/// RelationshipKind
///
/// Whether a relationship's `data` is a single optional identity
/// (`HasOne`) or an ordered sequence of identities (`HasMany`).
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RelationshipKind {
    HasOne,
    HasMany,
}

impl RelationshipKind {
    /// True when this kind stores at most one related identity.
    #[must_use]
    pub const fn is_has_one(self) -> bool {
        matches!(self, Self::HasOne)
    }

    /// True when this kind stores an ordered sequence of identities.
    #[must_use]
    pub const fn is_has_many(self) -> bool {
        matches!(self, Self::HasMany)
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HasOne => "hasOne",
            Self::HasMany => "hasMany",
        };
        write!(f, "{label}")
    }
}
