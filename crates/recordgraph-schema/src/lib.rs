//! Schema declarations for RecordGraph: models, relationships, and the
//! registry the core consumes read-only.
//!
//! This crate owns the *shape* of a schema only. It has no opinion about
//! record storage, patches, or queries — those live in `recordgraph-core`,
//! which depends on this crate but never the other way around.

pub mod error;
pub mod node;
pub mod registry;
pub mod types;

///
/// Prelude
///
/// Schema-authoring vocabulary only — no errors, no core runtime types.
///

pub mod prelude {
    pub use crate::{
        node::{Model, Relationship},
        registry::{SchemaRegistry, SchemaRegistryBuilder},
        types::RelationshipKind,
    };
}
