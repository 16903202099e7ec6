//! ACO iteration loop.
//!
//! # Algorithm
//!
//! For each iteration:
//! 1. Launch `ant_count` independent walks against the current trails
//! 2. Register every transition the walks took
//! 3. Rank completed walks by cost; the best `elite_ant_count` deposit
//!    `Q / local_cost` on each of their transitions
//! 4. Evaporate every trail by `1 - rho`
//! 5. Replace the global best on strict improvement only
//!
//! Iterations are separated by a hard barrier. Within an iteration the
//! table is only read, so ants may run in parallel.
//!
//! # Reference
//!
//! Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//! Colony of Cooperating Agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::ant::{walk, AntState, AntWalk, CandidatePath, WalkContext};
use super::config::AcoConfig;
use super::pheromone::{Deposit, PheromoneTable};
use super::report::{IterationReport, IterationReporter};
use super::types::PathProblem;
use crate::error::AcoError;
use crate::graph::{Graph, NodeId, RouteResult, Weighting};

/// Walk outcome counters accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub reached: usize,
    pub stuck: usize,
    pub aborted: usize,
    /// Elite deposits skipped because the transition's local cost was zero.
    pub zero_cost_deposits: usize,
}

/// Result of an ACO path query.
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// Materialized best route. Empty when no path was found.
    pub route: RouteResult,

    /// Cost of the best path, `None` if the destination was never reached.
    pub best_cost: Option<f64>,

    /// Iterations actually executed.
    pub iterations: usize,

    /// Iteration in which the best path was found.
    pub best_iteration: Option<usize>,

    /// Global best cost after each iteration that had one.
    pub cost_history: Vec<f64>,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Whether the wall-clock budget ran out.
    pub timed_out: bool,

    pub stats: WalkStats,
}

impl AcoResult {
    /// Returns `true` if any ant reached the destination.
    pub fn is_found(&self) -> bool {
        self.best_cost.is_some()
    }
}

/// Executes the ACO path search.
pub struct AcoRunner;

impl AcoRunner {
    /// Searches for a low-cost path from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// Refuses the query with [`AcoError::InvalidConfig`] or
    /// [`AcoError::UnknownNode`], and aborts it with
    /// [`AcoError::MalformedCost`] if the weighting misbehaves.
    /// An unreachable destination is not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_antpath::aco::{AcoConfig, AcoRunner};
    /// use u_antpath::graph::AdjacencyGraph;
    ///
    /// let mut g = AdjacencyGraph::new(4);
    /// g.add_edge(0, 1, 1.0);
    /// g.add_edge(1, 3, 1.0);
    /// g.add_edge(0, 2, 5.0);
    /// g.add_edge(2, 3, 5.0);
    ///
    /// let config = AcoConfig::default()
    ///     .with_ant_count(20)
    ///     .with_elite_ant_count(5)
    ///     .with_max_iterations(10)
    ///     .with_seed(42);
    /// let result = AcoRunner::run(&g, 0, 3, &config).unwrap();
    /// assert_eq!(result.best_cost, Some(2.0));
    /// assert_eq!(result.route.nodes(), vec![0, 1, 3]);
    /// ```
    pub fn run<P: PathProblem>(
        problem: &P,
        origin: NodeId,
        destination: NodeId,
        config: &AcoConfig,
    ) -> Result<AcoResult, AcoError> {
        Self::run_with_cancel(problem, origin, destination, config, &(), None)
    }

    /// Runs the search with a reporter and an optional cancellation token.
    ///
    /// `reporter` is called once after every iteration. If `cancel` is
    /// set to `true`, the search stops before the next iteration and
    /// returns the best path found so far.
    pub fn run_with_cancel<P: PathProblem>(
        problem: &P,
        origin: NodeId,
        destination: NodeId,
        config: &AcoConfig,
        reporter: &dyn IterationReporter,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult, AcoError> {
        config.validate().map_err(AcoError::InvalidConfig)?;
        let node_count = problem.node_count();
        if origin >= node_count {
            return Err(AcoError::UnknownNode(origin));
        }
        if destination >= node_count {
            return Err(AcoError::UnknownNode(destination));
        }

        tracing::info!(
            origin,
            destination,
            ants = config.ant_count,
            max_iterations = config.max_iterations,
            "aco query started"
        );

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let started = Instant::now();
        let mut table = PheromoneTable::new();
        let mut best: Option<CandidatePath> = None;
        let mut best_iteration = None;
        let mut cost_history = Vec::with_capacity(config.max_iterations);
        let mut stats = WalkStats::default();
        let mut iterations = 0usize;
        let mut cancelled = false;
        let mut timed_out = false;

        for iteration in 0..config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    timed_out = true;
                    break;
                }
            }

            let iteration_started = Instant::now();

            // Seeds are drawn up front so results don't depend on scheduling.
            let seeds: Vec<u64> = (0..config.ant_count).map(|_| rng.random()).collect();
            let ctx = WalkContext {
                graph: problem,
                weighting: problem,
                table: &table,
                config,
                origin,
                destination,
            };
            let walks = run_ants(&ctx, &seeds, config.parallel)?;

            // Reinforcement phase: single writer from here on.
            let (mut reached, mut stuck, mut aborted) = (0, 0, 0);
            for w in &walks {
                match w.state {
                    AntState::Reached => reached += 1,
                    AntState::Stuck => stuck += 1,
                    AntState::Aborted => aborted += 1,
                    AntState::Walking => {}
                }
                for (key, local_cost) in w.discovered() {
                    table.register(key, local_cost);
                }
            }
            stats.reached += reached;
            stats.stuck += stuck;
            stats.aborted += aborted;

            let mut pool: Vec<CandidatePath> =
                walks.into_iter().filter_map(AntWalk::into_candidate).collect();
            pool.sort_by(|a, b| {
                a.cost()
                    .partial_cmp(&b.cost())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            for elite in pool.iter().take(config.elite_ant_count) {
                for key in elite.chain().filter_map(|s| s.key) {
                    if table.reinforce(key, config.deposit_constant) == Deposit::ZeroCost {
                        tracing::warn!(?key, "skipping deposit on zero-cost transition");
                        stats.zero_cost_deposits += 1;
                    }
                }
            }

            table.evaporate(config.evaporation_rate);

            let iteration_best_cost = pool.first().map(CandidatePath::cost);
            if let Some(candidate) = pool.into_iter().next() {
                if best.as_ref().is_none_or(|b| candidate.cost() < b.cost()) {
                    best = Some(candidate);
                    best_iteration = Some(iteration);
                }
            }
            if let Some(ref b) = best {
                cost_history.push(b.cost());
            }
            iterations += 1;

            tracing::debug!(
                iteration,
                reached,
                stuck,
                aborted,
                trails = table.len(),
                best_cost = ?best.as_ref().map(CandidatePath::cost),
                "aco iteration"
            );

            reporter.on_iteration(&IterationReport {
                iteration,
                elapsed: iteration_started.elapsed(),
                iteration_best_cost,
                best_cost: best.as_ref().map(CandidatePath::cost),
                best_edge_count: best.as_ref().map(CandidatePath::edge_count),
                reached,
                stuck,
                aborted,
                trail_count: table.len(),
            });
        }

        let route = match best {
            Some(ref b) => problem.reconstruct(&b.transitions()),
            None => problem.reconstruct(&[]),
        };
        let best_cost = best.as_ref().map(CandidatePath::cost);

        tracing::info!(
            iterations,
            best_cost = ?best_cost,
            edges = route.edge_count(),
            cancelled,
            timed_out,
            "aco query finished"
        );

        Ok(AcoResult {
            route,
            best_cost,
            iterations,
            best_iteration,
            cost_history,
            cancelled,
            timed_out,
            stats,
        })
    }
}

#[cfg(feature = "parallel")]
fn run_ants<G: Graph, W: Weighting>(
    ctx: &WalkContext<'_, G, W>,
    seeds: &[u64],
    parallel: bool,
) -> Result<Vec<AntWalk>, AcoError> {
    if parallel {
        // Every walk finishes before errors are inspected, so the error
        // reported is the first in ant order, as in the sequential path.
        let walks: Vec<Result<AntWalk, AcoError>> = seeds
            .par_iter()
            .map(|&seed| walk(ctx, &mut StdRng::seed_from_u64(seed)))
            .collect();
        walks.into_iter().collect()
    } else {
        run_ants_sequential(ctx, seeds)
    }
}

#[cfg(not(feature = "parallel"))]
fn run_ants<G: Graph, W: Weighting>(
    ctx: &WalkContext<'_, G, W>,
    seeds: &[u64],
    _parallel: bool,
) -> Result<Vec<AntWalk>, AcoError> {
    run_ants_sequential(ctx, seeds)
}

fn run_ants_sequential<G: Graph, W: Weighting>(
    ctx: &WalkContext<'_, G, W>,
    seeds: &[u64],
) -> Result<Vec<AntWalk>, AcoError> {
    seeds
        .iter()
        .map(|&seed| walk(ctx, &mut StdRng::seed_from_u64(seed)))
        .collect()
}
