//! Per-iteration diagnostics.

use std::time::Duration;

/// Snapshot taken after each iteration's reinforcement phase.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationReport {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Wall time spent on this iteration.
    pub elapsed: Duration,
    /// Best cost found in this iteration alone.
    pub iteration_best_cost: Option<f64>,
    /// Global best cost after this iteration.
    pub best_cost: Option<f64>,
    /// Edge count of the global best path.
    pub best_edge_count: Option<usize>,
    /// Ants that reached the destination.
    pub reached: usize,
    /// Ants that ran out of candidates.
    pub stuck: usize,
    /// Ants that exhausted their step budget.
    pub aborted: usize,
    /// Number of trails in the pheromone table.
    pub trail_count: usize,
}

/// Observer invoked between iterations.
///
/// Closures taking `&IterationReport` implement this trait, and `()`
/// is a reporter that ignores everything.
///
/// # Examples
///
/// ```
/// use std::sync::Mutex;
/// use u_antpath::aco::{IterationReport, IterationReporter};
///
/// let costs = Mutex::new(Vec::new());
/// let reporter = |r: &IterationReport| costs.lock().unwrap().push(r.best_cost);
/// # let _ = &reporter as &dyn IterationReporter;
/// ```
pub trait IterationReporter: Send + Sync {
    fn on_iteration(&self, report: &IterationReport);
}

impl IterationReporter for () {
    fn on_iteration(&self, _report: &IterationReport) {}
}

impl<F> IterationReporter for F
where
    F: Fn(&IterationReport) + Send + Sync,
{
    fn on_iteration(&self, report: &IterationReport) {
        self(report)
    }
}

/// Emits one `tracing` event per iteration at `INFO` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl IterationReporter for TracingReporter {
    fn on_iteration(&self, report: &IterationReport) {
        tracing::info!(
            iteration = report.iteration,
            elapsed_ms = report.elapsed.as_secs_f64() * 1000.0,
            best_cost = ?report.best_cost,
            best_edges = ?report.best_edge_count,
            reached = report.reached,
            stuck = report.stuck,
            aborted = report.aborted,
            "aco iteration complete"
        );
    }
}
