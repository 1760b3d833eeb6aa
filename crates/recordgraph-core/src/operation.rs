//! Module: operation
//! Responsibility: the reified operation algebra — the nine closed
//! operation kinds a patch pipeline accepts.
//! Does not own: how an operation is applied (`patch::operators`) or
//! inverted (`patch::inverse`) — this module only names the shape.
//! Boundary: `Operation` values are the only unit of mutation the pipeline
//! understands; there is no other way to change a `Cache`.

use crate::{identity::Identity, record::Record, value::Value};

///
/// Operation
///
/// One reified mutation. Every variant names exactly the data it needs to
/// both apply itself and compute its own inverse — nothing in the
/// pipeline consults data outside an `Operation` to decide what to do
/// with it.
///

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Operation {
    AddRecord {
        record: Record,
    },
    ReplaceRecord {
        record: Record,
    },
    RemoveRecord {
        identity: Identity,
    },
    ReplaceKey {
        identity: Identity,
        key: String,
        /// `None` unsets the key; present-but-null is distinct from the
        /// key never having been declared on the record at all.
        value: Option<String>,
    },
    ReplaceAttribute {
        identity: Identity,
        attribute: String,
        value: Value,
    },
    AddToRelatedRecords {
        identity: Identity,
        relationship: String,
        target: Identity,
    },
    RemoveFromRelatedRecords {
        identity: Identity,
        relationship: String,
        target: Identity,
    },
    ReplaceRelatedRecords {
        identity: Identity,
        relationship: String,
        targets: Vec<Identity>,
    },
    ReplaceRelatedRecord {
        identity: Identity,
        relationship: String,
        target: Option<Identity>,
    },
}

impl Operation {
    /// The identity this operation acts on — the record it reads or
    /// writes, regardless of variant.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        match self {
            Self::AddRecord { record } | Self::ReplaceRecord { record } => &record.identity,
            Self::RemoveRecord { identity }
            | Self::ReplaceKey { identity, .. }
            | Self::ReplaceAttribute { identity, .. }
            | Self::AddToRelatedRecords { identity, .. }
            | Self::RemoveFromRelatedRecords { identity, .. }
            | Self::ReplaceRelatedRecords { identity, .. }
            | Self::ReplaceRelatedRecord { identity, .. } => identity,
        }
    }

    /// A short, stable name for logging and error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::AddRecord { .. } => "addRecord",
            Self::ReplaceRecord { .. } => "replaceRecord",
            Self::RemoveRecord { .. } => "removeRecord",
            Self::ReplaceKey { .. } => "replaceKey",
            Self::ReplaceAttribute { .. } => "replaceAttribute",
            Self::AddToRelatedRecords { .. } => "addToRelatedRecords",
            Self::RemoveFromRelatedRecords { .. } => "removeFromRelatedRecords",
            Self::ReplaceRelatedRecords { .. } => "replaceRelatedRecords",
            Self::ReplaceRelatedRecord { .. } => "replaceRelatedRecord",
        }
    }
}

///
/// PatchData
///
/// The generic "(record | identity | null)" payload a patch step reads or
/// produces. Most operators only ever populate one of the
/// three; this is the common type that lets the pipeline thread a single
/// result shape through all nine operator kinds.
///

#[derive(Clone, Debug, PartialEq)]
pub enum PatchData {
    Record(Record),
    Identity(Identity),
    Null,
}

impl PatchData {
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}
