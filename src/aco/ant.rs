//! A single ant's stochastic walk.
//!
//! # States
//!
//! ```text
//! Start -> Walking -> { Reached, Stuck, Aborted }
//! ```
//!
//! - `Start`: the arena holds only the synthetic origin step.
//! - `Walking`: enumerate the current node's edges, filter them, and
//!   pick one by roulette wheel over desirability.
//! - `Reached`: the walk stands on the destination. It becomes a
//!   [`CandidatePath`].
//! - `Stuck`: no candidate survived filtering. The walk is discarded.
//! - `Aborted`: the step budget ran out. The walk is discarded.
//!
//! # Selection
//!
//! ```text
//! desirability = (1 / cumulative_cost)^alpha * pheromone^beta
//! ```
//!
//! Candidates whose target this ant has already visited get their
//! pheromone read as zero for this decision only. The penalty is
//! private to the walking ant; the shared table is never written
//! during a walk.

use std::collections::HashSet;

use rand::Rng;

use super::config::AcoConfig;
use super::pheromone::{PheromoneKey, PheromoneTable};
use super::step::{PathStep, StepArena, StepId, Transition};
use crate::error::AcoError;
use crate::graph::{EdgeRef, Graph, NodeId, Weighting};

/// Where a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntState {
    Walking,
    Reached,
    Stuck,
    Aborted,
}

/// Read-only inputs shared by every ant of an iteration.
pub struct WalkContext<'a, G, W> {
    pub graph: &'a G,
    pub weighting: &'a W,
    pub table: &'a PheromoneTable,
    pub config: &'a AcoConfig,
    pub origin: NodeId,
    pub destination: NodeId,
}

/// A proposed extension of the current step.
#[derive(Debug, Clone, Copy)]
struct Proposal {
    edge: EdgeRef,
    key: PheromoneKey,
    local_cost: f64,
    cumulative_cost: f64,
    pheromone: f64,
}

/// The finished walk of one ant, whatever its outcome.
#[derive(Debug, Clone)]
pub struct AntWalk {
    pub state: AntState,
    arena: StepArena,
    terminal: StepId,
}

impl AntWalk {
    /// Transitions this walk took, with the local cost observed for each.
    ///
    /// Registered into the pheromone table between iterations.
    pub fn discovered(&self) -> impl Iterator<Item = (PheromoneKey, f64)> + '_ {
        self.arena
            .chain(self.terminal)
            .filter_map(|s| s.key.map(|k| (k, s.transition.local_cost)))
    }

    /// Number of edges walked.
    pub fn steps(&self) -> usize {
        self.arena.len() - 1
    }

    /// Converts a `Reached` walk into a candidate path.
    pub fn into_candidate(self) -> Option<CandidatePath> {
        match self.state {
            AntState::Reached => Some(CandidatePath {
                cost: self.arena.get(self.terminal).weight_of_visited_path(),
                arena: self.arena,
                terminal: self.terminal,
            }),
            _ => None,
        }
    }
}

/// A completed walk: terminal step at the destination plus its cost.
#[derive(Debug, Clone)]
pub struct CandidatePath {
    arena: StepArena,
    terminal: StepId,
    cost: f64,
}

impl CandidatePath {
    /// Cumulative cost of the terminal step.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn terminal(&self) -> &PathStep {
        self.arena.get(self.terminal)
    }

    /// Steps from the destination back to the origin.
    pub fn chain(&self) -> impl Iterator<Item = &PathStep> + '_ {
        self.arena.chain(self.terminal)
    }

    /// Ordered transitions, origin first.
    pub fn transitions(&self) -> Vec<Transition> {
        self.arena.reconstruct(self.terminal)
    }

    /// Nodes on the path, including origin and destination.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.chain().map(|s| s.target_node())
    }

    /// Number of edges on the path.
    pub fn edge_count(&self) -> usize {
        self.arena.len() - 1
    }
}

/// Per-ant walking state.
struct Ant<'c, 'a, G, W> {
    ctx: &'c WalkContext<'a, G, W>,
    arena: StepArena,
    current: StepId,
    /// Every node this ant has stood on.
    visited: HashSet<NodeId>,
    /// `(from, to)` pairs already offered as candidates.
    explored: HashSet<(NodeId, NodeId)>,
    /// Node two steps behind the current one.
    prev_node: Option<NodeId>,
    steps: usize,
}

impl<'c, 'a, G: Graph, W: Weighting> Ant<'c, 'a, G, W> {
    fn start(ctx: &'c WalkContext<'a, G, W>) -> (Self, AntState) {
        let (arena, current) = StepArena::with_origin(ctx.origin);
        let ant = Self {
            ctx,
            arena,
            current,
            visited: HashSet::from([ctx.origin]),
            explored: HashSet::new(),
            prev_node: None,
            steps: 0,
        };
        let state = if ctx.origin == ctx.destination {
            AntState::Reached
        } else {
            AntState::Walking
        };
        (ant, state)
    }

    fn advance<R: Rng>(&mut self, rng: &mut R) -> Result<AntState, AcoError> {
        let proposals = self.proposals()?;
        if proposals.is_empty() {
            return Ok(AntState::Stuck);
        }

        let chosen = proposals[select(
            &proposals,
            self.ctx.config.alpha,
            self.ctx.config.beta,
            &self.visited,
            rng,
        )];

        let parent = self.current;
        self.prev_node = self
            .arena
            .get(parent)
            .parent
            .map(|p| self.arena.get(p).target_node());
        self.current = self
            .arena
            .extend(parent, chosen.edge, chosen.local_cost, chosen.key);
        self.visited.insert(chosen.edge.adj_node);
        self.steps += 1;

        if chosen.edge.adj_node == self.ctx.destination {
            Ok(AntState::Reached)
        } else if self.steps >= self.ctx.config.max_visited_nodes {
            Ok(AntState::Aborted)
        } else {
            Ok(AntState::Walking)
        }
    }

    /// Filters the current node's edges into selectable proposals.
    fn proposals(&mut self) -> Result<Vec<Proposal>, AcoError> {
        let step = self.arena.get(self.current);
        let node = step.target_node();
        let incoming = step.transition.edge;
        let base_cost = step.weight_of_visited_path();

        let mut proposals = Vec::new();
        for edge in self.ctx.graph.neighbors(node) {
            let target = edge.adj_node;
            if self.explored.contains(&(node, target))
                || target == self.ctx.origin
                || Some(target) == self.prev_node
                || self.visited.contains(&target)
            {
                continue;
            }

            let cost = self.ctx.weighting.cost(incoming, edge);
            if cost.is_nan() || cost < 0.0 {
                return Err(AcoError::MalformedCost {
                    from: node,
                    to: target,
                    edge: edge.edge,
                    cost,
                });
            }
            if cost.is_infinite() {
                continue;
            }

            let key = PheromoneKey::for_move(self.ctx.config.traversal_mode, node, incoming, edge);
            let entry = self.ctx.table.lookup(key, cost);
            proposals.push(Proposal {
                edge,
                key,
                local_cost: cost,
                cumulative_cost: base_cost + cost,
                pheromone: entry.pheromone,
            });
            self.explored.insert((node, target));
        }
        Ok(proposals)
    }

    fn finish(self, state: AntState) -> AntWalk {
        AntWalk {
            state,
            arena: self.arena,
            terminal: self.current,
        }
    }
}

/// Runs one ant from the context's origin until it reaches the
/// destination, gets stuck, or exhausts its step budget.
///
/// # Errors
///
/// Returns [`AcoError::MalformedCost`] if the weighting yields NaN or a
/// negative cost for any examined edge.
pub fn walk<G: Graph, W: Weighting, R: Rng>(
    ctx: &WalkContext<'_, G, W>,
    rng: &mut R,
) -> Result<AntWalk, AcoError> {
    let (mut ant, mut state) = Ant::start(ctx);
    while state == AntState::Walking {
        state = ant.advance(rng)?;
    }
    Ok(ant.finish(state))
}

/// Desirability of a proposal; pheromone reads as zero on nodes the ant
/// has already visited.
fn desirability(p: &Proposal, alpha: f64, beta: f64, visited: &HashSet<NodeId>) -> f64 {
    let pheromone = if visited.contains(&p.edge.adj_node) {
        0.0
    } else {
        p.pheromone
    };
    let heuristic = (1.0 / p.cumulative_cost.max(f64::MIN_POSITIVE)).powf(alpha);
    heuristic * pheromone.powf(beta)
}

/// Roulette-wheel selection over desirability, scanning in order.
///
/// Falls back to a uniform pick when the total is zero or not finite.
fn select<R: Rng>(
    proposals: &[Proposal],
    alpha: f64,
    beta: f64,
    visited: &HashSet<NodeId>,
    rng: &mut R,
) -> usize {
    let weights: Vec<f64> = proposals
        .iter()
        .map(|p| desirability(p, alpha, beta, visited))
        .collect();
    let total: f64 = weights.iter().sum();

    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(0..proposals.len());
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative >= threshold {
            return i;
        }
    }
    proposals.len() - 1
}
