//! Transitions, path steps, and the step arena.
//!
//! A walk is stored as an append-only arena of [`PathStep`]s. Each step
//! records its parent's [`StepId`], so the chain from any step back to
//! the origin is a sequence of index hops. A step is only ever created
//! as an extension of an existing step, so chains cannot be cyclic.

use super::pheromone::PheromoneKey;
use crate::graph::{EdgeId, EdgeRef, NodeId};

/// One directed move of a walk.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// Edge taken. `None` only for the synthetic origin step.
    pub edge: Option<EdgeId>,
    /// Node the move starts from.
    pub source_node: NodeId,
    /// Node the move ends at.
    pub target_node: NodeId,
    /// Cost of this move alone.
    pub local_cost: f64,
    /// Sum of local costs from the origin up to and including this move.
    pub cumulative_cost: f64,
}

impl Transition {
    /// The synthetic zero-cost step that sits at the origin.
    pub fn origin(node: NodeId) -> Self {
        Self {
            edge: None,
            source_node: node,
            target_node: node,
            local_cost: 0.0,
            cumulative_cost: 0.0,
        }
    }

    pub fn is_origin(&self) -> bool {
        self.edge.is_none()
    }
}

/// Index of a step inside a [`StepArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(usize);

impl StepId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A step of a walk: the transition taken plus a link to its parent.
///
/// The step does not hold pheromone; that lives in the shared
/// [`PheromoneTable`](super::PheromoneTable) under [`PathStep::key`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    pub transition: Transition,
    /// Trail identity. `None` for the origin step.
    pub key: Option<PheromoneKey>,
    pub parent: Option<StepId>,
}

impl PathStep {
    /// Total cost from the origin to this step.
    ///
    /// Used as the "distance so far" in the selection heuristic.
    pub fn weight_of_visited_path(&self) -> f64 {
        self.transition.cumulative_cost
    }

    pub fn target_node(&self) -> NodeId {
        self.transition.target_node
    }
}

/// Append-only storage for the steps of one walk.
#[derive(Debug, Clone)]
pub struct StepArena {
    steps: Vec<PathStep>,
}

impl StepArena {
    /// Creates an arena holding only the origin step.
    pub fn with_origin(origin: NodeId) -> (Self, StepId) {
        let arena = Self {
            steps: vec![PathStep {
                transition: Transition::origin(origin),
                key: None,
                parent: None,
            }],
        };
        (arena, StepId(0))
    }

    /// Appends a step extending `parent` over `edge`.
    ///
    /// The cumulative cost is fixed here from the parent's.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this arena.
    pub fn extend(
        &mut self,
        parent: StepId,
        edge: EdgeRef,
        local_cost: f64,
        key: PheromoneKey,
    ) -> StepId {
        let base = &self.steps[parent.0].transition;
        let transition = Transition {
            edge: Some(edge.edge),
            source_node: base.target_node,
            target_node: edge.adj_node,
            local_cost,
            cumulative_cost: base.cumulative_cost + local_cost,
        };
        let id = StepId(self.steps.len());
        self.steps.push(PathStep {
            transition,
            key: Some(key),
            parent: Some(parent),
        });
        id
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this arena.
    pub fn get(&self, id: StepId) -> &PathStep {
        &self.steps[id.0]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates from `terminal` back to the origin, newest first.
    pub fn chain(&self, terminal: StepId) -> impl Iterator<Item = &PathStep> + '_ {
        std::iter::successors(Some(self.get(terminal)), move |step| {
            step.parent.map(|p| self.get(p))
        })
    }

    /// Ordered transitions from the origin to `terminal`, oldest first.
    ///
    /// The synthetic origin step is not included, so a walk that never
    /// left the origin yields an empty sequence.
    pub fn reconstruct(&self, terminal: StepId) -> Vec<Transition> {
        let mut transitions: Vec<Transition> = self
            .chain(terminal)
            .filter(|s| !s.transition.is_origin())
            .map(|s| s.transition)
            .collect();
        transitions.reverse();
        transitions
    }
}
