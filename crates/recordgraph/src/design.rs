//! Schema-authoring surface: the types a host uses once, up front, to
//! declare its models before any `Cache` exists.
//!
//! Kept separate from [`crate::prelude`] — a schema is assembled once,
//! typically in a dedicated module, while the runtime prelude is glob
//! imported everywhere the cache is actually driven.

pub mod prelude {
    pub use recordgraph_schema::{
        error::SchemaBuildError,
        node::{Model, Relationship},
        registry::{SchemaRegistry, SchemaRegistryBuilder},
        types::RelationshipKind,
    };
}
