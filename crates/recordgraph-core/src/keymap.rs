//! Module: keymap
//! Responsibility: `KeyMap`, the optional alternative-identity index
//! contract — "what id does this (model, keyName,
//! keyValue) triple resolve to?"
//! Does not own: the primary record store; a key map is a read/write
//! side index the cache pushes to, never the source of truth.
//! Boundary: the cache calls `push_record` after any patch that could
//! alter `record.keys`; it never calls `key_to_id` itself — that's a
//! convenience exposed to the host application.

use crate::record::Record;

///
/// KeyMap
///
/// A narrow, pluggable interface: learn a record's keys, and resolve a
/// key back to an id. The core never assumes one is installed — a
/// `Cache` with no key map configured simply skips the push.
///

pub trait KeyMap {
    fn push_record(&mut self, record: &Record);

    fn key_to_id(&self, model: &str, key_name: &str, key_value: &str) -> Option<String>;
}

///
/// InMemoryKeyMap
///
/// The reference implementation: a flat `(model, keyName, keyValue) ->
/// id` table rebuilt incrementally as records are pushed. Good enough
/// for hosts that don't need a persisted alternative-identity index.
///

#[derive(Clone, Debug, Default)]
pub struct InMemoryKeyMap {
    table: std::collections::HashMap<(String, String, String), String>,
}

impl KeyMap for InMemoryKeyMap {
    fn push_record(&mut self, record: &Record) {
        for (key_name, value) in &record.keys {
            let Some(value) = value else { continue };
            self.table.insert(
                (record.identity.model.clone(), key_name.clone(), value.clone()),
                record.identity.id.clone(),
            );
        }
    }

    fn key_to_id(&self, model: &str, key_name: &str, key_value: &str) -> Option<String> {
        self.table
            .get(&(model.to_string(), key_name.to_string(), key_value.to_string()))
            .cloned()
    }
}
