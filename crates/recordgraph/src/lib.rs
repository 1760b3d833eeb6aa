//! # recordgraph
//!
//! `recordgraph` is the **public facade crate** for the RecordGraph
//! runtime — a synchronous, in-memory record-graph cache for normalized
//! entities linked by typed relationships, where every mutation is
//! reified as an [`Operation`] and applied through a fixed pipeline that
//! validates it, derives its exact inverse, and keeps inverse-relationship
//! symmetry and referential integrity intact.
//!
//! This is the recommended dependency for downstream applications. The
//! engine (`recordgraph-core`) and the schema AST (`recordgraph-schema`)
//! are re-exported here rather than depended on directly, so a host only
//! ever names one crate.
//!
//! ## Crate layout
//!
//! - `prelude`
//!   The runtime surface a host application actually drives: `Cache`,
//!   `Operation`, `Query`, and friends. Intended to be glob-imported.
//!
//! - `design::prelude`
//!   The schema-authoring vocabulary: `Model`, `Relationship`,
//!   `SchemaRegistry`. Kept separate from `prelude` because a host
//!   typically builds its schema once, in one place, and drives the cache
//!   from many others.
//!
//! - `core` / `schema`
//!   Direct re-exports of `recordgraph-core` and `recordgraph-schema` for
//!   callers that want the fully-qualified path rather than the prelude.

pub mod design;
pub mod prelude;

pub use recordgraph_core as core;
pub use recordgraph_schema as schema;

pub use recordgraph_core::{
    error::Error,
    pipeline::{Cache, GenericCache, PatchResult, SharedCache},
};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
