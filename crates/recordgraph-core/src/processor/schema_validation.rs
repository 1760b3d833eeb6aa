//! Module: processor::schema_validation
//! Responsibility: reject any operation that does not conform to the
//! declared schema — unknown models, attributes, keys, relationships,
//! wrong related-model types, or cardinality mismatches.
//! Does not own: referential integrity between existing records (see
//! `cache_integrity`) — this processor only checks the operation against
//! the schema, never against other records' current state.
//! Boundary: runs first, and is the only processor that can fail the
//! pipeline; once it accepts an operation, no later processor rejects it.

use recordgraph_schema::{node::Model, types::RelationshipKind};

use super::Processor;
use crate::{
    accessor::RecordAccessor,
    error::{Error, SchemaValidationError},
    operation::Operation,
    pipeline::GenericCache,
};

///
/// SchemaValidation
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaValidation;

impl<A: RecordAccessor> Processor<A> for SchemaValidation {
    fn validate(&self, op: &Operation, cache: &GenericCache<A>) -> Result<(), Error> {
        let identity = op.identity();
        let model = cache
            .schema()
            .get_model(&identity.model)
            .ok_or_else(|| SchemaValidationError::UnknownModel(identity.model.clone()))?;

        match op {
            Operation::AddRecord { record } | Operation::ReplaceRecord { record } => {
                for attribute in record.attributes.keys() {
                    require_attribute(model, attribute)?;
                }
                for key in record.keys.keys() {
                    require_key(model, key)?;
                }
                for (relationship, data) in &record.relationships {
                    let declared = require_relationship(model, relationship)?;
                    check_cardinality(model, declared, data.is_many())?;
                    for target in data.identities() {
                        check_related_model(model, declared, &target.model)?;
                    }
                }
            }

            Operation::RemoveRecord { .. } => {}

            Operation::ReplaceKey { key, .. } => {
                require_key(model, key)?;
            }

            Operation::ReplaceAttribute { attribute, .. } => {
                require_attribute(model, attribute)?;
            }

            Operation::AddToRelatedRecords {
                relationship,
                target,
                ..
            }
            | Operation::RemoveFromRelatedRecords {
                relationship,
                target,
                ..
            } => {
                let declared = require_relationship(model, relationship)?;
                check_cardinality(model, declared, true)?;
                check_related_model(model, declared, &target.model)?;
            }

            Operation::ReplaceRelatedRecords {
                relationship,
                targets,
                ..
            } => {
                let declared = require_relationship(model, relationship)?;
                check_cardinality(model, declared, true)?;
                for target in targets {
                    check_related_model(model, declared, &target.model)?;
                }
            }

            Operation::ReplaceRelatedRecord {
                relationship,
                target,
                ..
            } => {
                let declared = require_relationship(model, relationship)?;
                check_cardinality(model, declared, false)?;
                if let Some(target) = target {
                    check_related_model(model, declared, &target.model)?;
                }
            }
        }

        Ok(())
    }
}

fn require_attribute(model: &Model, attribute: &str) -> Result<(), SchemaValidationError> {
    if model.has_attribute(attribute) {
        Ok(())
    } else {
        Err(SchemaValidationError::UnknownAttribute {
            model: model.name.clone(),
            attribute: attribute.to_string(),
        })
    }
}

fn require_key(model: &Model, key: &str) -> Result<(), SchemaValidationError> {
    if model.has_key(key) {
        Ok(())
    } else {
        Err(SchemaValidationError::UnknownKey {
            model: model.name.clone(),
            key: key.to_string(),
        })
    }
}

fn require_relationship<'a>(
    model: &'a Model,
    relationship: &str,
) -> Result<&'a recordgraph_schema::node::Relationship, SchemaValidationError> {
    model
        .relationship_named(relationship)
        .ok_or_else(|| SchemaValidationError::UnknownRelationship {
            model: model.name.clone(),
            relationship: relationship.to_string(),
        })
}

fn check_cardinality(
    model: &Model,
    declared: &recordgraph_schema::node::Relationship,
    requires_many: bool,
) -> Result<(), SchemaValidationError> {
    let is_many = declared.kind == RelationshipKind::HasMany;
    if is_many == requires_many {
        Ok(())
    } else {
        Err(SchemaValidationError::CardinalityMismatch {
            model: model.name.clone(),
            relationship: declared.name.clone(),
        })
    }
}

fn check_related_model(
    model: &Model,
    declared: &recordgraph_schema::node::Relationship,
    actual: &str,
) -> Result<(), SchemaValidationError> {
    if declared.model == actual {
        Ok(())
    } else {
        Err(SchemaValidationError::WrongRelatedModel {
            model: model.name.clone(),
            relationship: declared.name.clone(),
            expected: declared.model.clone(),
            actual: actual.to_string(),
        })
    }
}
