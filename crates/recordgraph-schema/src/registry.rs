//! Module: registry
//! Responsibility: assemble a set of `Model` declarations into a validated,
//! queryable `SchemaRegistry` (the `getModel(type)` contract of §6.3).
//! Does not own: record storage or mutation.
//! Boundary: built once by the host application before constructing a
//! `Cache`; consumed read-only for the lifetime of the cache.

use std::collections::HashMap;

use crate::{error::SchemaBuildError, node::Model};
#[cfg(test)]
use crate::node::Relationship;

///
/// SchemaRegistry
///
/// Read-only view over a fixed set of models, keyed by name. The core
/// consumes this read-only; it never constructs one itself.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    models: HashMap<String, Model>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// `getModel(type)` — returns the declaration for `name`, or `None` if
    /// no such model was declared.
    #[must_use]
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// True when `name` names a declared model.
    #[must_use]
    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Iterate over every declared model name. Used to pre-populate empty
    /// buckets in the record store at construction time.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}

///
/// SchemaRegistryBuilder
///

#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    models: Vec<Model>,
}

impl SchemaRegistryBuilder {
    /// Declare one model. Panics are never raised here — conflicts and
    /// dangling references are reported by `build`.
    #[must_use]
    pub fn model(mut self, model: Model) -> Self {
        self.models.push(model);
        self
    }

    /// Validate every model name is unique, every relationship's target
    /// model exists, and — where declared — its inverse is a relationship
    /// actually declared on the target — then freeze the declarations
    /// into a `SchemaRegistry`.
    pub fn build(self) -> Result<SchemaRegistry, SchemaBuildError> {
        let mut models = HashMap::with_capacity(self.models.len());
        for model in self.models {
            if models.contains_key(&model.name) {
                return Err(SchemaBuildError::DuplicateModel(model.name));
            }
            models.insert(model.name.clone(), model);
        }

        for model in models.values() {
            for relationship in &model.relationships {
                let target = models.get(&relationship.model).ok_or_else(|| {
                    SchemaBuildError::UnknownTargetModel {
                        model: model.name.clone(),
                        relationship: relationship.name.clone(),
                        target: relationship.model.clone(),
                    }
                })?;

                if let Some(inverse) = &relationship.inverse {
                    if target.relationship_named(inverse).is_none() {
                        return Err(SchemaBuildError::UnknownInverse {
                            model: model.name.clone(),
                            relationship: relationship.name.clone(),
                            target: target.name.clone(),
                            inverse: inverse.clone(),
                        });
                    }
                }
            }
        }

        Ok(SchemaRegistry { models })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RelationshipKind;

    fn planet_schema() -> SchemaRegistry {
        SchemaRegistry::builder()
            .model(
                Model::new("planet")
                    .attribute("name")
                    .attribute("classification")
                    .key("remoteId")
                    .relationship(
                        Relationship::new("moons", RelationshipKind::HasMany, "moon")
                            .with_inverse("planet"),
                    )
                    .relationship(
                        Relationship::new("solarSystem", RelationshipKind::HasOne, "solarSystem")
                            .with_inverse("planets"),
                    ),
            )
            .model(
                Model::new("moon")
                    .relationship(
                        Relationship::new("planet", RelationshipKind::HasOne, "planet")
                            .with_inverse("moons"),
                    ),
            )
            .model(
                Model::new("solarSystem").relationship(
                    Relationship::new("planets", RelationshipKind::HasMany, "planet")
                        .with_inverse("solarSystem"),
                ),
            )
            .build()
            .expect("schema builds")
    }

    #[test]
    fn resolves_declared_models_and_relationships() {
        let schema = planet_schema();
        let planet = schema.get_model("planet").expect("planet declared");
        assert!(planet.has_attribute("name"));
        assert!(planet.has_key("remoteId"));
        assert_eq!(
            planet.relationship_named("moons").unwrap().kind,
            RelationshipKind::HasMany
        );
    }

    #[test]
    fn rejects_relationship_targeting_undeclared_model() {
        let err = SchemaRegistry::builder()
            .model(Model::new("planet").relationship(Relationship::new(
                "moons",
                RelationshipKind::HasMany,
                "moon",
            )))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaBuildError::UnknownTargetModel { .. }));
    }

    #[test]
    fn rejects_dangling_inverse_name() {
        let err = SchemaRegistry::builder()
            .model(Model::new("planet").relationship(
                Relationship::new("moons", RelationshipKind::HasMany, "moon")
                    .with_inverse("doesNotExist"),
            ))
            .model(Model::new("moon"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaBuildError::UnknownInverse { .. }));
    }

    #[test]
    fn rejects_duplicate_model_name() {
        let err = SchemaRegistry::builder()
            .model(Model::new("planet"))
            .model(Model::new("planet"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaBuildError::DuplicateModel(name) if name == "planet"));
    }
}
