//! Route materialization.

use crate::aco::Transition;
use crate::graph::NodeId;

/// A materialized route.
///
/// An empty `transitions` list means no path was found.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Transitions from origin to destination, oldest first.
    pub transitions: Vec<Transition>,
    /// Sum of edge distances along the route.
    pub total_distance: f64,
    /// Sum of edge durations along the route.
    pub total_duration: f64,
}

impl RouteResult {
    /// The "no path" route.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if the route has no transitions.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Number of edges in the route.
    pub fn edge_count(&self) -> usize {
        self.transitions.len()
    }

    /// Weighted cost of the route (cumulative cost of the last transition).
    pub fn weight(&self) -> f64 {
        self.transitions
            .last()
            .map_or(0.0, |t| t.cumulative_cost)
    }

    /// Node sequence including the origin.
    ///
    /// Returns an empty vector for the empty route.
    pub fn nodes(&self) -> Vec<NodeId> {
        let Some(first) = self.transitions.first() else {
            return Vec::new();
        };
        let mut nodes = Vec::with_capacity(self.transitions.len() + 1);
        nodes.push(first.source_node);
        nodes.extend(self.transitions.iter().map(|t| t.target_node));
        nodes
    }
}

/// Converts an ordered transition chain into a [`RouteResult`].
///
/// Called exactly once per query. An empty slice means "no path" and
/// must produce an empty route.
pub trait RouteMaterializer: Send + Sync {
    fn reconstruct(&self, transitions: &[Transition]) -> RouteResult;
}
