//! Module: node
//! Responsibility: the schema AST — models, their attribute/key names, and
//! their relationships.
//! Does not own: validation of cross-model references (see `registry`).
//! Boundary: this is the read-only contract the core queries through
//! `SchemaView`; nothing here mutates at runtime.

use crate::types::RelationshipKind;

///
/// Relationship
///
/// One relationship declared on a model: its cardinality (`kind`), the
/// related model's name, and — optionally — the name of the relationship
/// on the target model that is its semantic inverse.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Relationship {
    pub name: String,
    pub kind: RelationshipKind,
    pub model: String,
    pub inverse: Option<String>,
}

impl Relationship {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: RelationshipKind, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            model: model.into(),
            inverse: None,
        }
    }

    /// Declare the named relationship on the target model as this
    /// relationship's inverse.
    #[must_use]
    pub fn with_inverse(mut self, inverse: impl Into<String>) -> Self {
        self.inverse = Some(inverse.into());
        self
    }
}

///
/// Model
///
/// One model's full declaration: its attribute names, its alternative-key
/// names, and its relationships. Field/key/relationship names are plain
/// strings — the core looks them up dynamically rather than through
/// generated Rust types (see DESIGN.md's scoping note).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Model {
    pub name: String,
    pub attributes: Vec<String>,
    pub keys: Vec<String>,
    pub relationships: Vec<Relationship>,
}

impl Model {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            keys: Vec::new(),
            relationships: Vec::new(),
        }
    }

    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    #[must_use]
    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.keys.push(name.into());
        self
    }

    #[must_use]
    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Look up a relationship declared on this model by name.
    #[must_use]
    pub fn relationship_named(&self, name: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.name == name)
    }

    /// True when `name` is a declared attribute.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a == name)
    }

    /// True when `name` is a declared key.
    #[must_use]
    pub fn has_key(&self, name: &str) -> bool {
        self.keys.iter().any(|k| k == name)
    }
}
