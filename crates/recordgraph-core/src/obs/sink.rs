//! Module: obs::sink
//! Responsibility: `EventSink`, the trait a `Cache` emits committed
//! operations to, and `TracingSink`, the default implementation backed by
//! the `tracing` crate.
//! Does not own: deciding which operations are "committed" — the pipeline
//! only calls `on_commit` for primary operations that ran to completion.
//! Boundary: a sink is advisory. Nothing about cache correctness depends
//! on a sink being installed; `Cache::new` defaults to `TracingSink`.

use crate::operation::Operation;

///
/// EventSink
///
/// Receives one call per primary operation that committed successfully.
/// Sub-operations produced by `before`/`after`/`finally` are not reported
/// individually — only the primary operation the caller submitted.
///

pub trait EventSink {
    fn on_commit(&self, op: &Operation);
}

///
/// TracingSink
///
/// Emits one `tracing::debug!` event per commit, named after the
/// operation's kind and target identity. This is the default sink; most
/// callers never need to implement their own.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn on_commit(&self, op: &Operation) {
        tracing::debug!(
            kind = op.kind_name(),
            identity = %op.identity(),
            "patch committed"
        );
    }
}

///
/// NullSink
///
/// Discards every event. Useful in tests that want deterministic output
/// without installing `tracing-subscriber`.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_commit(&self, _op: &Operation) {}
}
