//! Module: processor::cache_integrity
//! Responsibility: referential integrity — when a record is removed, no
//! other record is left pointing at it.
//! Does not own: mirroring declared relationship inverses on ordinary
//! writes (see `schema_consistency`); this processor only reacts to
//! removal, using the inverse index the pipeline maintains.
//! Boundary: reads `cache.backrefs_of` — the index the pipeline updates
//! after every operator call — and never inspects relationship data
//! directly.

use recordgraph_schema::types::RelationshipKind;

use super::Processor;
use crate::{accessor::RecordAccessor, operation::Operation, pipeline::GenericCache};

///
/// CacheIntegrity
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CacheIntegrity;

impl<A: RecordAccessor> Processor<A> for CacheIntegrity {
    fn after(&self, op: &Operation, cache: &GenericCache<A>) -> Vec<Operation> {
        let Operation::RemoveRecord { identity } = op else {
            return Vec::new();
        };

        cache
            .backrefs_of(identity)
            .into_iter()
            .filter_map(|backref| {
                let owner_model = cache.schema().get_model(&backref.owner.model)?;
                let declared = owner_model.relationship_named(&backref.relationship)?;
                Some(match declared.kind {
                    RelationshipKind::HasMany => Operation::RemoveFromRelatedRecords {
                        identity: backref.owner,
                        relationship: backref.relationship,
                        target: identity.clone(),
                    },
                    RelationshipKind::HasOne => Operation::ReplaceRelatedRecord {
                        identity: backref.owner,
                        relationship: backref.relationship,
                        target: None,
                    },
                })
            })
            .collect()
    }
}
