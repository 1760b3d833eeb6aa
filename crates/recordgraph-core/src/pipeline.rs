//! Module: pipeline
//! Responsibility: `GenericCache`, the patch pipeline
//! that threads every `Operation` through validation, inverse
//! computation, the three processors' hooks, and the forward operator.
//! Does not own: the operators or processors themselves — this module
//! only sequences them.
//! Boundary: `patch`/`patch_batch` are the only entry points that mutate
//! a cache; nothing else in this crate writes to a `RecordAccessor`.

use recordgraph_schema::registry::SchemaRegistry;

use crate::{
    accessor::{BackRef, EphemeralAccessor, RecordAccessor, SharedAccessor},
    error::Error,
    identity::Identity,
    keymap::KeyMap,
    obs::{EventSink, PatchMetrics, TracingSink},
    operation::{Operation, PatchData},
    patch::{compute_inverse, operators},
    processor::{CacheIntegrity, Processor, SchemaConsistency, SchemaValidation},
    record::{RelatedData, Record},
};

/// The default cache: a non-shared, `HashMap`-backed store.
pub type Cache = GenericCache<EphemeralAccessor>;

/// The forkable cache: an `im`-backed, structurally-shared store.
pub type SharedCache = GenericCache<SharedAccessor>;

///
/// PatchResult
///
/// What a successful `patch`/`patch_batch` call returns:
/// `inverse` is the full, ordered undo sequence, most-recent-operation
/// first; `data` holds one entry per *primary* operation, in submission
/// order — sub-operations injected by processors never contribute to
/// `data`.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatchResult {
    pub inverse: Vec<Operation>,
    pub data: Vec<PatchData>,
}

///
/// GenericCache
///
/// The cache proper: a schema, a storage backend, an optional key map,
/// an event sink, and running metrics. Parameterized over
/// `RecordAccessor` so the same pipeline logic runs identically over
/// `EphemeralAccessor` and `SharedAccessor`.
///

pub struct GenericCache<A: RecordAccessor> {
    schema: SchemaRegistry,
    accessor: A,
    key_map: Option<Box<dyn KeyMap>>,
    sink: Box<dyn EventSink>,
    metrics: PatchMetrics,
}

impl<A: RecordAccessor> GenericCache<A> {
    #[must_use]
    pub fn new(schema: SchemaRegistry) -> Self {
        Self {
            schema,
            accessor: A::default(),
            key_map: None,
            sink: Box::new(TracingSink),
            metrics: PatchMetrics::default(),
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub fn with_key_map(mut self, key_map: Box<dyn KeyMap>) -> Self {
        self.key_map = Some(key_map);
        self
    }

    #[must_use]
    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    #[must_use]
    pub fn metrics(&self) -> &PatchMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn key_map(&self) -> Option<&dyn KeyMap> {
        self.key_map.as_deref()
    }

    #[must_use]
    pub fn accessor_get(&self, identity: &Identity) -> Option<Record> {
        self.accessor.get(identity)
    }

    #[must_use]
    pub fn records_of_model(&self, model: &str) -> Vec<Record> {
        self.accessor.records_of_model(model)
    }

    #[must_use]
    pub fn backrefs_of(&self, identity: &Identity) -> Vec<BackRef> {
        self.accessor.backrefs(identity)
    }

    /// Apply a single operation. Equivalent to `patch_batch(vec![op])`.
    pub fn patch(&mut self, op: Operation) -> Result<PatchResult, Error> {
        self.patch_batch(vec![op])
    }

    /// Apply a sequence of operations as one patch. Each top-level
    /// operation runs to full completion — including its own
    /// sub-operations — before the next begins; the returned inverse
    /// undoes the whole batch, most-recent operation first.
    pub fn patch_batch(&mut self, ops: Vec<Operation>) -> Result<PatchResult, Error> {
        let mut inverse = Vec::new();
        let mut data = Vec::new();
        for op in ops {
            let mut outcome = self.run_one(op, true)?;
            inverse.append(&mut outcome.inverse);
            data.extend(outcome.data);
        }
        inverse.reverse();
        Ok(PatchResult { inverse, data })
    }

    /// Run one operation — primary or a sub-operation produced by a
    /// processor hook — through the full pipeline.
    fn run_one(&mut self, op: Operation, primary: bool) -> Result<RunOutcome, Error> {
        self.run_one_inner(op, primary, true)
    }

    /// `mirror` sub-operations — the ones `SchemaConsistency` generates to
    /// keep an inverse relationship in step — must not themselves be
    /// mirrored: the forward side of the change is already being applied
    /// by the operation that produced them, so re-running
    /// `SchemaConsistency` on a mirror would regenerate that very
    /// operation before either side has committed, recursing forever.
    /// `mirror_consistency` is `true` for the primary operation and for
    /// every other processor's sub-operations, and `false` only for
    /// `SchemaConsistency`'s own.
    fn run_one_inner(&mut self, op: Operation, primary: bool, mirror_consistency: bool) -> Result<RunOutcome, Error> {
        if let Err(err) = SchemaValidation
            .validate(&op, self)
            .and_then(|()| SchemaConsistency.validate(&op, self))
            .and_then(|()| CacheIntegrity.validate(&op, self))
        {
            self.metrics.validation_failures += 1;
            return Err(err);
        }

        let Some(this_inverse) = compute_inverse(&op, &self.accessor) else {
            // No-op: the forward operator is never invoked, and no hook
            // runs — only the primary caller sees anything, and all it
            // sees is a `null` data entry.
            let mut outcome = RunOutcome::default();
            if primary {
                outcome.data.push(PatchData::Null);
            }
            return Ok(outcome);
        };

        let before_ops = {
            let mut ops = Vec::new();
            ops.extend(SchemaValidation.before(&op, self).into_iter().map(|o| (o, true)));
            if mirror_consistency {
                ops.extend(SchemaConsistency.before(&op, self).into_iter().map(|o| (o, false)));
            }
            ops.extend(CacheIntegrity.before(&op, self).into_iter().map(|o| (o, true)));
            ops
        };

        let mut outcome = RunOutcome::default();
        for (sub, sub_mirror) in before_ops {
            let sub_outcome = self.run_one_inner(sub, false, sub_mirror)?;
            outcome.inverse.extend(sub_outcome.inverse);
        }

        // Staged `after` sub-operations are computed against
        // pre-operator state, then actually run once the operator below
        // has committed.
        let staged_after = {
            let mut ops = Vec::new();
            ops.extend(SchemaValidation.after(&op, self).into_iter().map(|o| (o, true)));
            if mirror_consistency {
                ops.extend(SchemaConsistency.after(&op, self).into_iter().map(|o| (o, false)));
            }
            ops.extend(CacheIntegrity.after(&op, self).into_iter().map(|o| (o, true)));
            ops
        };

        let result = operators::apply(&op, &mut self.accessor);
        self.update_backrefs(&op, &this_inverse);
        self.push_keys(&op, &result);

        SchemaValidation.immediate(&op, self);
        SchemaConsistency.immediate(&op, self);
        CacheIntegrity.immediate(&op, self);

        if primary {
            self.sink.on_commit(&op);
            self.metrics.primary_committed += 1;
            outcome.data.push(result);
        } else {
            self.metrics.sub_operations_committed += 1;
        }

        outcome.inverse.push(this_inverse);

        for (sub, sub_mirror) in staged_after {
            let sub_outcome = self.run_one_inner(sub, false, sub_mirror)?;
            outcome.inverse.extend(sub_outcome.inverse);
        }

        let finally_ops = {
            let mut ops = Vec::new();
            ops.extend(SchemaValidation.finally(&op, self).into_iter().map(|o| (o, true)));
            if mirror_consistency {
                ops.extend(SchemaConsistency.finally(&op, self).into_iter().map(|o| (o, false)));
            }
            ops.extend(CacheIntegrity.finally(&op, self).into_iter().map(|o| (o, true)));
            ops
        };
        for (sub, sub_mirror) in finally_ops {
            let sub_outcome = self.run_one_inner(sub, false, sub_mirror)?;
            outcome.inverse.extend(sub_outcome.inverse);
        }

        Ok(outcome)
    }

    /// Push the post-mutation record's keys to the key map, for any
    /// operation that could have altered `record.keys`.
    fn push_keys(&mut self, op: &Operation, result: &PatchData) {
        if !matches!(
            op,
            Operation::AddRecord { .. } | Operation::ReplaceRecord { .. } | Operation::ReplaceKey { .. }
        ) {
            return;
        }
        if let (Some(key_map), Some(record)) = (self.key_map.as_mut(), result.as_record()) {
            key_map.push_record(record);
        }
    }

    /// True when `relationship`, declared on `model`, names an inverse —
    /// the only relationships the backref index (§3) stores anything for.
    fn relationship_has_inverse(&self, model: &str, relationship: &str) -> bool {
        self.schema
            .get_model(model)
            .and_then(|m| m.relationship_named(relationship))
            .is_some_and(|r| r.inverse.is_some())
    }

    /// Keep the inverse-relationship index in step with whatever the
    /// operator just did. `inverse_op` carries the pre-mutation state we
    /// would otherwise have lost, so diffing against it is enough to know
    /// exactly which backrefs changed. Only relationships that declare an
    /// inverse are indexed at all (§3); every branch below gates on that
    /// before touching the index.
    fn update_backrefs(&mut self, op: &Operation, inverse_op: &Operation) {
        match op {
            Operation::AddRecord { record } => {
                for (relationship, data) in &record.relationships {
                    if !self.relationship_has_inverse(&record.identity.model, relationship) {
                        continue;
                    }
                    for target in data.identities() {
                        self.accessor
                            .add_backref(&target, BackRef::new(record.identity.clone(), relationship.clone()));
                    }
                }
            }

            Operation::ReplaceRecord { record } => {
                if let Operation::ReplaceRecord { record: previous } = inverse_op {
                    self.diff_record_backrefs(previous, record);
                } else if let Operation::RemoveRecord { .. } = inverse_op {
                    for (relationship, data) in &record.relationships {
                        if !self.relationship_has_inverse(&record.identity.model, relationship) {
                            continue;
                        }
                        for target in data.identities() {
                            self.accessor.add_backref(
                                &target,
                                BackRef::new(record.identity.clone(), relationship.clone()),
                            );
                        }
                    }
                }
            }

            Operation::RemoveRecord { identity } => {
                if let Operation::AddRecord { record: previous } = inverse_op {
                    for (relationship, data) in &previous.relationships {
                        if !self.relationship_has_inverse(&identity.model, relationship) {
                            continue;
                        }
                        for target in data.identities() {
                            self.accessor.remove_backref(
                                &target,
                                &BackRef::new(identity.clone(), relationship.clone()),
                            );
                        }
                    }
                }
            }

            Operation::AddToRelatedRecords {
                identity,
                relationship,
                target,
            } => {
                if self.relationship_has_inverse(&identity.model, relationship) {
                    self.accessor
                        .add_backref(target, BackRef::new(identity.clone(), relationship.clone()));
                }
            }

            Operation::RemoveFromRelatedRecords {
                identity,
                relationship,
                target,
            } => {
                if self.relationship_has_inverse(&identity.model, relationship) {
                    self.accessor
                        .remove_backref(target, &BackRef::new(identity.clone(), relationship.clone()));
                }
            }

            Operation::ReplaceRelatedRecords {
                identity,
                relationship,
                targets,
            } => {
                if let Operation::ReplaceRelatedRecords {
                    targets: previous, ..
                } = inverse_op
                {
                    if self.relationship_has_inverse(&identity.model, relationship) {
                        for removed in previous.iter().filter(|id| !targets.contains(id)) {
                            self.accessor
                                .remove_backref(removed, &BackRef::new(identity.clone(), relationship.clone()));
                        }
                        for added in targets.iter().filter(|id| !previous.contains(id)) {
                            self.accessor
                                .add_backref(added, BackRef::new(identity.clone(), relationship.clone()));
                        }
                    }
                }
            }

            Operation::ReplaceRelatedRecord {
                identity,
                relationship,
                target,
            } => {
                if let Operation::ReplaceRelatedRecord {
                    target: previous, ..
                } = inverse_op
                {
                    if previous.as_ref() != target.as_ref() && self.relationship_has_inverse(&identity.model, relationship) {
                        if let Some(previous) = previous {
                            self.accessor.remove_backref(
                                previous,
                                &BackRef::new(identity.clone(), relationship.clone()),
                            );
                        }
                        if let Some(target) = target {
                            self.accessor.add_backref(
                                target,
                                BackRef::new(identity.clone(), relationship.clone()),
                            );
                        }
                    }
                }
            }

            Operation::ReplaceKey { .. } | Operation::ReplaceAttribute { .. } => {}
        }
    }

    /// Diff backrefs for a `replaceRecord` merge. Only relationships
    /// *mentioned in the incoming operation* were touched — the merge
    /// leaves every other relationship alone, so only those names may
    /// have changed backrefs. Relationships with no declared inverse are
    /// never indexed (§3).
    fn diff_record_backrefs(&mut self, previous: &Record, incoming: &Record) {
        for (relationship, new_data) in &incoming.relationships {
            if !self.relationship_has_inverse(&incoming.identity.model, relationship) {
                continue;
            }
            let old_ids = previous
                .relationship(relationship)
                .map(RelatedData::identities)
                .unwrap_or_default();
            let new_ids = new_data.identities();

            for removed in old_ids.iter().filter(|id| !new_ids.contains(id)) {
                self.accessor.remove_backref(
                    removed,
                    &BackRef::new(incoming.identity.clone(), relationship.clone()),
                );
            }
            for added in new_ids.iter().filter(|id| !old_ids.contains(id)) {
                self.accessor.add_backref(
                    added,
                    BackRef::new(incoming.identity.clone(), relationship.clone()),
                );
            }
        }
    }
}

#[derive(Default)]
struct RunOutcome {
    inverse: Vec<Operation>,
    data: Vec<PatchData>,
}

#[cfg(test)]
mod tests {
    use recordgraph_schema::{
        node::{Model, Relationship},
        registry::SchemaRegistry,
        types::RelationshipKind,
    };

    use super::*;

    /// A `hasMany` relationship with no declared `inverse` is valid per
    /// §3 — the inverse index stores nothing for it, so removing the
    /// target must not touch the owner's forward pointer at all (I5
    /// explicitly scopes cascading removal to "a relationship with a
    /// declared inverse").
    fn schema_without_inverse() -> SchemaRegistry {
        SchemaRegistry::builder()
            .model(
                Model::new("planet")
                    .relationship(Relationship::new("tags", RelationshipKind::HasMany, "tag")),
            )
            .model(Model::new("tag"))
            .build()
            .expect("fixture schema builds")
    }

    #[test]
    fn removing_target_of_an_uninversed_relationship_leaves_owner_untouched() {
        let mut cache = Cache::new(schema_without_inverse());
        let tag = Identity::new("tag", "t0");
        let planet = Identity::new("planet", "earth");

        cache
            .patch(Operation::AddRecord { record: Record::new(tag.clone()) })
            .unwrap();

        let mut record = Record::new(planet.clone());
        record
            .relationships
            .insert("tags".into(), RelatedData::Many(vec![tag.clone()]));
        cache.patch(Operation::AddRecord { record }).unwrap();

        assert!(
            cache.backrefs_of(&tag).is_empty(),
            "a relationship with no declared inverse must never populate the backref index"
        );

        cache.patch(Operation::RemoveRecord { identity: tag.clone() }).unwrap();

        let owner = cache.accessor_get(&planet).expect("owner survives the target's removal");
        assert_eq!(
            owner.relationship("tags"),
            Some(&RelatedData::Many(vec![tag])),
            "removing the target of an uninversed relationship must not clear the owner's forward pointer"
        );
    }
}
