//! Module: processor::schema_consistency
//! Responsibility: keep declared-inverse relationships symmetric — when a
//! relationship changes on one side, mirror the change onto the inverse
//! relationship slot on the other side.
//! Does not own: the backref index used for cascading removal (see
//! `cache_integrity`); this processor only knows about relationships that
//! declare an `inverse` name in the schema.
//! Boundary: emits sub-operations from both `before` and `after` —
//! removal from a previous inverse slot must be read and
//! scheduled *before* the main mutation overwrites the previous value,
//! while addition to the new inverse slot is scheduled *after* the main
//! mutation commits. Scheduling additions from `before` would make the
//! mirror sub-operation's own consistency pass see the same stale
//! pre-mutation state and mirror back indefinitely.

use recordgraph_schema::{node::Relationship, types::RelationshipKind};

use super::Processor;
use crate::{accessor::RecordAccessor, operation::Operation, pipeline::GenericCache, record::RelatedData};

///
/// SchemaConsistency
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaConsistency;

impl<A: RecordAccessor> Processor<A> for SchemaConsistency {
    fn before(&self, op: &Operation, cache: &GenericCache<A>) -> Vec<Operation> {
        let Some(model) = cache.schema().get_model(&op.identity().model) else {
            return Vec::new();
        };

        match op {
            Operation::ReplaceRecord { record } => {
                let previous = cache.accessor_get(&record.identity);
                record
                    .relationships
                    .iter()
                    .flat_map(|(relationship, data)| {
                        let old_ids = previous
                            .as_ref()
                            .and_then(|r| r.relationship(relationship).cloned())
                            .map(|d| d.identities())
                            .unwrap_or_default();
                        let new_ids = data.identities();
                        old_ids
                            .iter()
                            .filter(|id| !new_ids.contains(id))
                            .flat_map(|removed| mirror_remove(model, relationship, &record.identity, removed, cache))
                            .collect::<Vec<_>>()
                    })
                    .collect()
            }

            Operation::RemoveRecord { identity } => cache
                .accessor_get(identity)
                .map(|record| {
                    record
                        .relationships
                        .iter()
                        .flat_map(|(relationship, data)| {
                            data.identities()
                                .into_iter()
                                .flat_map(|target| mirror_remove(model, relationship, identity, &target, cache))
                                .collect::<Vec<_>>()
                        })
                        .collect()
                })
                .unwrap_or_default(),

            Operation::RemoveFromRelatedRecords {
                identity,
                relationship,
                target,
            } => mirror_remove(model, relationship, identity, target, cache),

            Operation::ReplaceRelatedRecord {
                identity,
                relationship,
                target,
            } => {
                let previous = cache
                    .accessor_get(identity)
                    .and_then(|record| record.relationship(relationship).cloned())
                    .and_then(|data| match data {
                        RelatedData::One(previous) => previous,
                        RelatedData::Many(_) => None,
                    });

                match &previous {
                    Some(previous) if Some(previous) != target.as_ref() => {
                        mirror_remove(model, relationship, identity, previous, cache)
                    }
                    _ => Vec::new(),
                }
            }

            Operation::ReplaceRelatedRecords {
                identity,
                relationship,
                targets,
            } => {
                let previous = cache
                    .accessor_get(identity)
                    .and_then(|record| record.relationship(relationship).cloned())
                    .map(|data| data.identities())
                    .unwrap_or_default();

                previous
                    .iter()
                    .filter(|id| !targets.contains(id))
                    .flat_map(|removed| mirror_remove(model, relationship, identity, removed, cache))
                    .collect()
            }

            _ => Vec::new(),
        }
    }

    fn after(&self, op: &Operation, cache: &GenericCache<A>) -> Vec<Operation> {
        let Some(model) = cache.schema().get_model(&op.identity().model) else {
            return Vec::new();
        };

        match op {
            // Mirror every identity the record now claims for a
            // relationship, not just the ones added relative to before:
            // `mirror_add`'s target is itself idempotent (see
            // `AddToRelatedRecords`/`ReplaceRelatedRecord`'s own
            // `compute_inverse`), so re-asserting an unchanged link is a
            // harmless no-op rather than a duplicate.
            Operation::AddRecord { record } => record
                .relationships
                .iter()
                .flat_map(|(relationship, data)| {
                    data.identities()
                        .into_iter()
                        .flat_map(|target| mirror_add(model, relationship, &record.identity, &target, cache))
                        .collect::<Vec<_>>()
                })
                .collect(),

            Operation::ReplaceRecord { record } => record
                .relationships
                .iter()
                .flat_map(|(relationship, data)| {
                    data.identities()
                        .into_iter()
                        .flat_map(|target| mirror_add(model, relationship, &record.identity, &target, cache))
                        .collect::<Vec<_>>()
                })
                .collect(),

            Operation::AddToRelatedRecords {
                identity,
                relationship,
                target,
            } => mirror_add(model, relationship, identity, target, cache),

            Operation::ReplaceRelatedRecord {
                identity,
                relationship,
                target: Some(target),
            } => mirror_add(model, relationship, identity, target, cache),

            Operation::ReplaceRelatedRecords {
                identity,
                relationship,
                targets,
            } => targets
                .iter()
                .flat_map(|target| mirror_add(model, relationship, identity, target, cache))
                .collect(),

            _ => Vec::new(),
        }
    }
}

/// Build the sub-operation that adds `identity` to `target`'s inverse
/// relationship slot, if `relationship` declares one.
fn mirror_add<A: RecordAccessor>(
    model: &recordgraph_schema::node::Model,
    relationship: &str,
    identity: &crate::identity::Identity,
    target: &crate::identity::Identity,
    cache: &GenericCache<A>,
) -> Vec<Operation> {
    let Some(inverse) = inverse_relationship(model, relationship, cache) else {
        return Vec::new();
    };
    match inverse.kind {
        RelationshipKind::HasMany => vec![Operation::AddToRelatedRecords {
            identity: target.clone(),
            relationship: inverse.name.clone(),
            target: identity.clone(),
        }],
        RelationshipKind::HasOne => vec![Operation::ReplaceRelatedRecord {
            identity: target.clone(),
            relationship: inverse.name.clone(),
            target: Some(identity.clone()),
        }],
    }
}

/// Build the sub-operation that removes `identity` from `target`'s
/// inverse relationship slot, if `relationship` declares one.
fn mirror_remove<A: RecordAccessor>(
    model: &recordgraph_schema::node::Model,
    relationship: &str,
    identity: &crate::identity::Identity,
    target: &crate::identity::Identity,
    cache: &GenericCache<A>,
) -> Vec<Operation> {
    let Some(inverse) = inverse_relationship(model, relationship, cache) else {
        return Vec::new();
    };
    match inverse.kind {
        RelationshipKind::HasMany => vec![Operation::RemoveFromRelatedRecords {
            identity: target.clone(),
            relationship: inverse.name.clone(),
            target: identity.clone(),
        }],
        RelationshipKind::HasOne => vec![Operation::ReplaceRelatedRecord {
            identity: target.clone(),
            relationship: inverse.name.clone(),
            target: None,
        }],
    }
}

fn inverse_relationship<A: RecordAccessor>(
    model: &recordgraph_schema::node::Model,
    relationship: &str,
    cache: &GenericCache<A>,
) -> Option<Relationship> {
    let declared = model.relationship_named(relationship)?;
    let inverse_name = declared.inverse.as_ref()?;
    let target_model = cache.schema().get_model(&declared.model)?;
    target_model.relationship_named(inverse_name).cloned()
}
