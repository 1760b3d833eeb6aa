//! Module: accessor::ephemeral
//! Responsibility: the default, non-shared `RecordAccessor` backed by
//! plain nested `HashMap`s.
//! Does not own: structural sharing — see `shared` for the forkable
//! alternative.
//! Boundary: every write mutates in place; cloning an `EphemeralAccessor`
//! is a deep clone of both the store and the inverse index.

use std::collections::HashMap;

use super::{BackRef, RecordAccessor};
use crate::{identity::Identity, record::Record};

///
/// EphemeralAccessor
///
/// A plain, per-process record store: `model -> id -> Record`, plus a
/// flat inverse index `target -> [BackRef]`. No history, no forking —
/// cloning it clones every record.
///

#[derive(Clone, Debug, Default)]
pub struct EphemeralAccessor {
    store: HashMap<String, HashMap<String, Record>>,
    inverse: HashMap<Identity, Vec<BackRef>>,
}

impl RecordAccessor for EphemeralAccessor {
    fn get(&self, identity: &Identity) -> Option<Record> {
        self.store.get(&identity.model)?.get(&identity.id).cloned()
    }

    fn insert(&mut self, record: Record) {
        self.store
            .entry(record.identity.model.clone())
            .or_default()
            .insert(record.identity.id.clone(), record);
    }

    fn remove(&mut self, identity: &Identity) -> Option<Record> {
        self.store.get_mut(&identity.model)?.remove(&identity.id)
    }

    fn records_of_model(&self, model: &str) -> Vec<Record> {
        self.store
            .get(model)
            .map(|bucket| bucket.values().cloned().collect())
            .unwrap_or_default()
    }

    fn backrefs(&self, target: &Identity) -> Vec<BackRef> {
        self.inverse.get(target).cloned().unwrap_or_default()
    }

    fn add_backref(&mut self, target: &Identity, backref: BackRef) {
        let entries = self.inverse.entry(target.clone()).or_default();
        if !entries.contains(&backref) {
            entries.push(backref);
        }
    }

    fn remove_backref(&mut self, target: &Identity, backref: &BackRef) {
        if let Some(entries) = self.inverse.get_mut(target) {
            entries.retain(|existing| existing != backref);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_round_trips() {
        let mut accessor = EphemeralAccessor::default();
        let identity = Identity::new("planet", "earth");
        accessor.insert(Record::new(identity.clone()));
        assert!(accessor.contains(&identity));
        assert_eq!(accessor.get(&identity).unwrap().identity, identity);
    }

    #[test]
    fn backref_add_is_idempotent() {
        let mut accessor = EphemeralAccessor::default();
        let target = Identity::new("planet", "earth");
        let backref = BackRef::new(Identity::new("moon", "luna"), "planet");
        accessor.add_backref(&target, backref.clone());
        accessor.add_backref(&target, backref.clone());
        assert_eq!(accessor.backrefs(&target), vec![backref]);
    }
}
