//! Runtime prelude: everything a host application needs to build
//! operations, drive the patch pipeline, and run queries against a
//! [`Cache`](recordgraph_core::pipeline::Cache), without separately
//! depending on `recordgraph-core`.
//!
//! Does not include schema-authoring types — those live in
//! [`crate::design::prelude`], kept apart because a host builds its
//! schema once and drives the cache from many call sites.

pub use recordgraph_core::{
    accessor::{BackRef, EphemeralAccessor, RecordAccessor, SharedAccessor},
    error::{Error, SchemaValidationError},
    identity::Identity,
    keymap::{InMemoryKeyMap, KeyMap},
    obs::{EventSink, NullSink, PatchMetrics, TracingSink},
    operation::{Operation, PatchData},
    pipeline::{Cache, GenericCache, PatchResult, SharedCache},
    query::{evaluate, AttributeOp, Direction, Nulls, Page, Predicate, Query, QueryResult, SetOp, SortField, SortSpec},
    record::{RelatedData, Record},
    value::Value,
};
