//! Module: processor
//! Responsibility: the `Processor` trait and the three
//! fixed, ordered processors — `SchemaValidation`, `SchemaConsistency`,
//! `CacheIntegrity` — the pipeline always runs in that order.
//! Does not own: the pipeline procedure itself (see `pipeline`), which
//! decides *when* each hook runs relative to the operator and to other
//! operations' hooks.
//! Boundary: a processor only ever inspects the operation and a read-only
//! `Cache`; it never calls back into the pipeline.

pub mod cache_integrity;
pub mod schema_consistency;
pub mod schema_validation;

pub use cache_integrity::CacheIntegrity;
pub use schema_consistency::SchemaConsistency;
pub use schema_validation::SchemaValidation;

use crate::{accessor::RecordAccessor, error::Error, operation::Operation, pipeline::GenericCache};

///
/// Processor
///
/// The five hooks a processor may implement. Every method has a no-op
/// default so a concrete processor only overrides what its concern
/// requires: `SchemaValidation` overrides only `validate`,
/// `SchemaConsistency` overrides `before`/`after`, `CacheIntegrity`
/// overrides only `after`.
///

pub trait Processor<A: RecordAccessor> {
    /// Reject the operation outright. The only hook that can fail.
    fn validate(&self, _op: &Operation, _cache: &GenericCache<A>) -> Result<(), Error> {
        Ok(())
    }

    /// Sub-operations to run, and fully finish, before the operator for
    /// `op` runs.
    fn before(&self, _op: &Operation, _cache: &GenericCache<A>) -> Vec<Operation> {
        Vec::new()
    }

    /// Sub-operations to run after the operator for `op` has run, staged
    /// so every processor's `after` sees the same post-operator state.
    fn after(&self, _op: &Operation, _cache: &GenericCache<A>) -> Vec<Operation> {
        Vec::new()
    }

    /// Side effects that happen exactly once, right after the operator
    /// runs, with no further operations produced (e.g. emitting events).
    fn immediate(&self, _op: &Operation, _cache: &GenericCache<A>) {}

    /// Sub-operations to run once the whole primary operation — including
    /// every `before`/`after` sub-operation — has committed.
    fn finally(&self, _op: &Operation, _cache: &GenericCache<A>) -> Vec<Operation> {
        Vec::new()
    }
}
