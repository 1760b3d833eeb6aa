//! Module: accessor
//! Responsibility: the storage-backend seam — a
//! `RecordAccessor` owns the primary record store and the inverse-
//! relationship index, and is the only thing operators and the query
//! evaluator ever read or write through.
//! Does not own: patch semantics, validation, or query predicates — this
//! module is pure storage.
//! Boundary: swapping `EphemeralAccessor` for `SharedAccessor` changes
//! nothing about pipeline or query behavior, only the cost of cloning the
//! whole cache.

mod ephemeral;
mod shared;

pub use ephemeral::EphemeralAccessor;
pub use shared::SharedAccessor;

use crate::{identity::Identity, record::Record};

///
/// BackRef
///
/// One entry of the inverse-relationship index: "the record `owner`
/// points at the indexed identity through its relationship `name`".
///

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BackRef {
    pub owner: Identity,
    pub relationship: String,
}

impl BackRef {
    #[must_use]
    pub fn new(owner: Identity, relationship: impl Into<String>) -> Self {
        Self {
            owner,
            relationship: relationship.into(),
        }
    }
}

///
/// RecordAccessor
///
/// The storage contract every cache backend implements: CRUD on records
/// keyed by `Identity`, per-model iteration for `findRecords`, and
/// maintenance of the inverse index that `CacheIntegrity` relies on to
/// keep relationships symmetric.
///

pub trait RecordAccessor: Default {
    fn get(&self, identity: &Identity) -> Option<Record>;

    fn insert(&mut self, record: Record);

    /// Bulk upsert: every record must have `record.identity.model ==
    /// model`. Not called by any operator in
    /// `patch::operators` — the pipeline always mutates one record at a
    /// time — but kept on the trait for backends that can batch a bulk
    /// load more efficiently than repeated `insert` calls.
    fn set_records(&mut self, model: &str, records: Vec<Record>) {
        debug_assert!(records.iter().all(|record| record.identity.model == model));
        for record in records {
            self.insert(record);
        }
    }

    fn remove(&mut self, identity: &Identity) -> Option<Record>;

    /// Bulk remove: returns the prior records that existed, in no
    /// particular order, dropping identities that were already absent.
    fn remove_records(&mut self, model: &str, identities: &[Identity]) -> Vec<Record> {
        identities
            .iter()
            .filter(|identity| identity.model == model)
            .filter_map(|identity| self.remove(identity))
            .collect()
    }

    fn contains(&self, identity: &Identity) -> bool {
        self.get(identity).is_some()
    }

    /// Every stored record belonging to `model`, in unspecified order —
    /// ordering is imposed downstream by `query::sort`.
    fn records_of_model(&self, model: &str) -> Vec<Record>;

    /// Every `BackRef` pointing at `target` — the set of relationship
    /// slots (on other records) that must be updated when `target` is
    /// removed or when a relationship pointing at it changes.
    fn backrefs(&self, target: &Identity) -> Vec<BackRef>;

    fn add_backref(&mut self, target: &Identity, backref: BackRef);

    fn remove_backref(&mut self, target: &Identity, backref: &BackRef);

    /// Clear the entire back-ref list stored under `identity` — every
    /// `BackRef` describing an owner that currently points at `identity`.
    /// `pipeline::update_backrefs` reaches individual
    /// entries through `remove_backref` as each owner's own pointer is
    /// cleaned up by `CacheIntegrity`'s cascade, so by the time a
    /// `removeRecord` batch finishes, `identity`'s list is already empty
    /// through that path; this primitive is the direct one-call
    /// equivalent a backend may use instead of replaying the cascade.
    fn clear_backrefs(&mut self, identity: &Identity) {
        for backref in self.backrefs(identity) {
            self.remove_backref(identity, &backref);
        }
    }
}
