//! Core runtime for RecordGraph: the record/identity data model, the
//! pluggable storage accessor, the patch pipeline and its operators, the
//! three schema/consistency/integrity processors, and the query
//! evaluator.
//!
//! This crate never constructs a schema itself — it depends on
//! `recordgraph-schema` and consumes a `SchemaRegistry` read-only. It has
//! no opinion about how a host application builds or serializes that
//! schema; see the facade crate (`recordgraph`) for a combined prelude.

// public exports are one module level down, following the leaf-first
// dependency order: identity/value/record first, accessor and keymap on
// top of those, then patch/processor, with pipeline and query last
pub mod accessor;
pub mod error;
pub mod identity;
pub mod keymap;
pub mod obs;
pub mod operation;
pub mod patch;
pub mod pipeline;
pub mod processor;
pub mod query;
pub mod record;
pub mod value;
