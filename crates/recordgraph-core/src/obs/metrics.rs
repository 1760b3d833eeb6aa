//! Module: obs::metrics
//! Responsibility: `PatchMetrics`, running counters of primary operations
//! committed, sub-operations generated, and validation failures.
//! Does not own: exporting these counters anywhere — `metrics_report`
//! just formats them; wiring them into a metrics backend is the host
//! application's job.
//! Boundary: updated only by `GenericCache::patch_batch`, never by a
//! processor directly.

use std::fmt;

///
/// PatchMetrics
///

#[derive(Clone, Copy, Debug, Default)]
pub struct PatchMetrics {
    pub primary_committed: u64,
    pub sub_operations_committed: u64,
    pub validation_failures: u64,
}

impl PatchMetrics {
    #[must_use]
    pub fn metrics_report(&self) -> String {
        format!(
            "primary_committed={} sub_operations_committed={} validation_failures={}",
            self.primary_committed, self.sub_operations_committed, self.validation_failures
        )
    }
}

impl fmt::Display for PatchMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.metrics_report())
    }
}
