//! Module: accessor::shared
//! Responsibility: the structurally-shared `RecordAccessor` backed by
//! `im`'s persistent HAMT maps, so forking a cache is a cheap `Clone`
//! rather than a deep copy.
//! Does not own: any notion of history beyond "the base I forked from" —
//! this module does not keep a log of forks.
//! Boundary: `reset` is the only operation that is not O(per-entry); it
//! replaces this accessor's maps with a clone of `base`'s, which `im`
//! makes O(1) amortized because the two then share structure.

use im::{HashMap, Vector};

use super::{BackRef, RecordAccessor};
use crate::{identity::Identity, record::Record};

///
/// SharedAccessor
///
/// A record store built on `im::HashMap`/`im::Vector`. Cloning this type
/// is O(1) and the clone shares structure with the original until one of
/// the two is mutated, which is what makes `reset` a cheap way to fork a
/// cache from a known-good snapshot rather than a deep copy.
///

#[derive(Clone, Debug, Default)]
pub struct SharedAccessor {
    store: HashMap<String, HashMap<String, Record>>,
    inverse: HashMap<Identity, Vector<BackRef>>,
}

impl SharedAccessor {
    /// Replace this accessor's state with a structure-sharing clone of
    /// `base`'s. Used to fork a cache from a snapshot without touching any
    /// individual record.
    pub fn reset(&mut self, base: &Self) {
        self.store = base.store.clone();
        self.inverse = base.inverse.clone();
    }
}

impl RecordAccessor for SharedAccessor {
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
        self.inverse
            .get(target)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn add_backref(&mut self, target: &Identity, backref: BackRef) {
        let entries = self.inverse.entry(target.clone()).or_default();
        if !entries.iter().any(|existing| existing == &backref) {
            entries.push_back(backref);
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
    fn reset_forks_without_mutating_base() {
        let mut base = SharedAccessor::default();
        let identity = Identity::new("planet", "earth");
        base.insert(Record::new(identity.clone()));

        let mut fork = SharedAccessor::default();
        fork.reset(&base);
        fork.remove(&identity);

        assert!(base.contains(&identity));
        assert!(!fork.contains(&identity));
    }
}
