//! Module: record
//! Responsibility: `Record`, the keys/attributes/relationships bundle
//! stored under one `Identity`.
//! Does not own: storage of many records (see `accessor`) or the inverse
//! index (see `processor::cache_integrity`).
//! Boundary: a `Record` is a plain value type — it carries no reference to
//! the cache it lives in, so it can be read, cloned, and compared freely.

use std::collections::HashMap;

use crate::{identity::Identity, value::Value};

///
/// RelatedData
///
/// The data held by one relationship slot. `One` holds at most a single
/// target identity (a `hasOne` relationship); `Many` holds an ordered
/// sequence of target identities (a `hasMany` relationship) that `append`
/// writes can leave with duplicates — `addToRelatedRecords` is a raw
/// append, not a set-insert. This is deliberately not
/// `Value` — relationship targets are identities, not scalars, and the
/// two must never be conflated.
///

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RelatedData {
    One(Option<Identity>),
    Many(Vec<Identity>),
}

impl RelatedData {
    #[must_use]
    pub fn empty_one() -> Self {
        Self::One(None)
    }

    #[must_use]
    pub fn empty_many() -> Self {
        Self::Many(Vec::new())
    }

    /// The target identities held by this slot, in order, regardless of
    /// cardinality. Used by query evaluation and the inverse-index
    /// maintainer, which both want "every identity this slot points at"
    /// without caring whether it's a `hasOne` or a `hasMany`.
    #[must_use]
    pub fn identities(&self) -> Vec<Identity> {
        match self {
            Self::One(Some(id)) => vec![id.clone()],
            Self::One(None) => Vec::new(),
            Self::Many(ids) => ids.clone(),
        }
    }

    #[must_use]
    pub const fn is_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

///
/// Record
///
/// One stored record: its identity, its alternative keys, its attributes,
/// and its relationships. Field/relationship names are plain strings,
/// looked up dynamically against the schema rather than through generated
/// per-model Rust structs.
///
/// `keys` and `attributes` both map a name to an explicitly-nullable slot
/// — `None`/`Value::Null` is a present-but-cleared value, distinct from
/// the name being entirely absent from the map. `replaceRecord`'s
/// shallow-merge semantics depend on this: a delta inverse can carry
/// `Some(name) -> None` to restore "was unset" without removing the
/// entry the forward merge would otherwise have to delete.
///

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    pub identity: Identity,
    pub keys: HashMap<String, Option<String>>,
    pub attributes: HashMap<String, Value>,
    pub relationships: HashMap<String, RelatedData>,
}

impl Record {
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            keys: HashMap::new(),
            attributes: HashMap::new(),
            relationships: HashMap::new(),
        }
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// The effective value of key `name`: `None` both when the key was
    /// never set and when it was set to explicitly unset.
    #[must_use]
    pub fn key(&self, name: &str) -> Option<&str> {
        self.keys.get(name)?.as_deref()
    }

    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&RelatedData> {
        self.relationships.get(name)
    }
}
