//! In-memory adjacency-list graph.

use std::collections::HashMap;

use super::route::{RouteMaterializer, RouteResult};
use super::types::{EdgeId, EdgeRef, Graph, NodeId, Weighting};
use crate::aco::Transition;

#[derive(Debug, Clone)]
struct EdgeData {
    from: NodeId,
    to: NodeId,
    weight: f64,
    distance: f64,
    duration: f64,
}

/// A directed graph stored as adjacency lists.
///
/// Serves as the graph, the weighting, and the route materializer at
/// once: edge weights drive the search, while distance and duration are
/// only summed when a route is materialized. Turn costs and forbidden
/// turns are keyed by `(incoming edge, outgoing edge)`.
///
/// # Examples
///
/// ```
/// use u_antpath::graph::{AdjacencyGraph, Graph};
///
/// let mut g = AdjacencyGraph::new(3);
/// let a = g.add_edge(0, 1, 2.0);
/// let b = g.add_edge(1, 2, 3.0);
/// g.forbid_turn(a, b);
///
/// assert_eq!(g.node_count(), 3);
/// assert_eq!(g.neighbors(0).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    out_edges: Vec<Vec<EdgeId>>,
    edges: Vec<EdgeData>,
    turn_costs: HashMap<(EdgeId, EdgeId), f64>,
}

impl AdjacencyGraph {
    /// Creates a graph with `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            out_edges: vec![Vec::new(); node_count],
            edges: Vec::new(),
            turn_costs: HashMap::new(),
        }
    }

    /// Adds a directed edge whose weight doubles as its distance.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is out of bounds.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> EdgeId {
        self.add_edge_with(from, to, weight, weight, 0.0)
    }

    /// Adds a directed edge with explicit weight, distance and duration.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is out of bounds.
    pub fn add_edge_with(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: f64,
        distance: f64,
        duration: f64,
    ) -> EdgeId {
        assert!(
            from < self.out_edges.len() && to < self.out_edges.len(),
            "edge endpoint out of bounds: {from} -> {to}"
        );
        let id = self.edges.len();
        self.edges.push(EdgeData {
            from,
            to,
            weight,
            distance,
            duration,
        });
        self.out_edges[from].push(id);
        id
    }

    /// Adds edges in both directions; returns `(forward, backward)`.
    pub fn add_bidirectional(&mut self, a: NodeId, b: NodeId, weight: f64) -> (EdgeId, EdgeId) {
        (self.add_edge(a, b, weight), self.add_edge(b, a, weight))
    }

    /// Adds an extra cost when `to_edge` is taken right after `from_edge`.
    pub fn add_turn_cost(&mut self, from_edge: EdgeId, to_edge: EdgeId, cost: f64) {
        self.turn_costs.insert((from_edge, to_edge), cost);
    }

    /// Forbids taking `to_edge` right after `from_edge`.
    pub fn forbid_turn(&mut self, from_edge: EdgeId, to_edge: EdgeId) {
        self.turn_costs.insert((from_edge, to_edge), f64::INFINITY);
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Endpoints of an edge, or `None` if the id is unknown.
    pub fn endpoints(&self, edge: EdgeId) -> Option<(NodeId, NodeId)> {
        self.edges.get(edge).map(|e| (e.from, e.to))
    }
}

impl Graph for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.out_edges.len()
    }

    fn neighbors(&self, node: NodeId) -> Vec<EdgeRef> {
        self.out_edges
            .get(node)
            .map(|ids| {
                ids.iter()
                    .map(|&edge| EdgeRef {
                        edge,
                        adj_node: self.edges[edge].to,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Weighting for AdjacencyGraph {
    fn cost(&self, previous_edge: Option<EdgeId>, edge: EdgeRef) -> f64 {
        let Some(data) = self.edges.get(edge.edge) else {
            return f64::INFINITY;
        };
        let turn = previous_edge
            .and_then(|prev| self.turn_costs.get(&(prev, edge.edge)))
            .copied()
            .unwrap_or(0.0);
        data.weight + turn
    }
}

impl RouteMaterializer for AdjacencyGraph {
    fn reconstruct(&self, transitions: &[Transition]) -> RouteResult {
        let (total_distance, total_duration) = transitions
            .iter()
            .filter_map(|t| t.edge.and_then(|e| self.edges.get(e)))
            .fold((0.0, 0.0), |(dist, dur), e| (dist + e.distance, dur + e.duration));

        RouteResult {
            transitions: transitions.to_vec(),
            total_distance,
            total_duration,
        }
    }
}
