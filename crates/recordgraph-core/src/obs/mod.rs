//! Module: obs
//! Responsibility: the cache's observability seam — the `EventSink` a
//! `Cache` emits committed operations to, and the running `PatchMetrics`
//! counters a caller can inspect.
//! Does not own: pipeline control flow; a sink can log or count but never
//! change what the pipeline does.
//! Boundary: `immediate` hooks are the only place a processor touches
//! `obs` — nothing in `patch` or `query` emits directly.

mod metrics;
mod sink;

pub use metrics::PatchMetrics;
pub use sink::{EventSink, NullSink, TracingSink};
