//! Module: patch::operators
//! Responsibility: the nine forward patch operators — each
//! mutates a `RecordAccessor` and returns the generic `(record | identity
//! | null)` result the pipeline threads onward.
//! Does not own: inverse computation (see `inverse`), which must read
//! state *before* these operators run, nor whether an operator runs at
//! all — the pipeline skips calling `apply` entirely for a no-op.
//! Boundary: called exactly once per primary or sub-operation that made
//! it past the no-op check, after validation and before any `after`
//! hook's staged sub-operations run.

use crate::{
    accessor::RecordAccessor,
    operation::{Operation, PatchData},
    record::{RelatedData, Record},
};

/// Load the record at `identity`, or a bare `(type, id)` skeleton if none
/// exists — "synthesize bare", what lets a
/// relationship-only or key-only write create a record from nothing.
fn load_or_synthesize<A: RecordAccessor>(accessor: &A, identity: &crate::identity::Identity) -> Record {
    accessor.get(identity).unwrap_or_else(|| Record::new(identity.clone()))
}

///
/// apply
///
/// Apply `op` to `accessor` and return its result payload. This function
/// performs no validation and raises no error — by the time it runs,
/// `SchemaValidation::validate` has already accepted the operation, and
/// the pipeline has already established the inverse is non-trivial.
///

pub fn apply<A: RecordAccessor>(op: &Operation, accessor: &mut A) -> PatchData {
    match op {
        Operation::AddRecord { record } => {
            accessor.insert(record.clone());
            PatchData::Record(record.clone())
        }

        Operation::ReplaceRecord { record } => {
            let merged = match accessor.get(&record.identity) {
                Some(mut current) => {
                    current.keys.extend(record.keys.clone());
                    current.attributes.extend(record.attributes.clone());
                    current.relationships.extend(record.relationships.clone());
                    current
                }
                None => record.clone(),
            };
            accessor.insert(merged.clone());
            PatchData::Record(merged)
        }

        Operation::RemoveRecord { identity } => {
            accessor.remove(identity);
            PatchData::Identity(identity.clone())
        }

        Operation::ReplaceKey { identity, key, value } => {
            // `value: None` still inserts an explicit null entry rather
            // than removing `key` — the merge semantics in
            // `ReplaceRecord` depend on "present but null" staying
            // distinguishable from "absent".
            let mut record = load_or_synthesize(accessor, identity);
            record.keys.insert(key.clone(), value.clone());
            accessor.insert(record.clone());
            PatchData::Record(record)
        }

        Operation::ReplaceAttribute {
            identity,
            attribute,
            value,
        } => {
            let mut record = load_or_synthesize(accessor, identity);
            record.attributes.insert(attribute.clone(), value.clone());
            accessor.insert(record.clone());
            PatchData::Record(record)
        }

        Operation::AddToRelatedRecords {
            identity,
            relationship,
            target,
        } => {
            let mut record = load_or_synthesize(accessor, identity);
            // Raw-append: duplicates are preserved here. The inverse
            // operator is what checks membership, against pre-mutation
            // state, before this ever runs.
            match record
                .relationships
                .entry(relationship.clone())
                .or_insert_with(RelatedData::empty_many)
            {
                RelatedData::Many(targets) => targets.push(target.clone()),
                RelatedData::One(slot) => *slot = Some(target.clone()),
            }
            accessor.insert(record.clone());
            PatchData::Record(record)
        }

        Operation::RemoveFromRelatedRecords {
            identity,
            relationship,
            target,
        } => {
            // No-op if record absent: unlike the other operators, this
            // one does not synthesize.
            let Some(mut record) = accessor.get(identity) else {
                return PatchData::Null;
            };
            if let Some(RelatedData::Many(targets)) = record.relationships.get_mut(relationship) {
                targets.retain(|existing| existing != target);
            }
            accessor.insert(record.clone());
            PatchData::Record(record)
        }

        Operation::ReplaceRelatedRecords {
            identity,
            relationship,
            targets,
        } => {
            let mut record = load_or_synthesize(accessor, identity);
            record
                .relationships
                .insert(relationship.clone(), RelatedData::Many(targets.clone()));
            accessor.insert(record.clone());
            PatchData::Record(record)
        }

        Operation::ReplaceRelatedRecord {
            identity,
            relationship,
            target,
        } => {
            let mut record = load_or_synthesize(accessor, identity);
            record
                .relationships
                .insert(relationship.clone(), RelatedData::One(target.clone()));
            accessor.insert(record.clone());
            PatchData::Record(record)
        }
    }
}
