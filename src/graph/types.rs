//! Core graph traits.

/// Node identifier in the external graph.
pub type NodeId = usize;

/// Edge identifier in the external graph.
pub type EdgeId = usize;

/// One outgoing edge as seen from its base node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeRef {
    /// Edge identity.
    pub edge: EdgeId,
    /// Node the edge leads to.
    pub adj_node: NodeId,
}

/// Read-only access to a directed graph.
///
/// # Thread Safety
///
/// `Graph` must be `Send + Sync` because ant walks of one iteration may
/// run in parallel using rayon.
pub trait Graph: Send + Sync {
    /// Number of nodes. Valid node ids are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Outgoing edges of `node`, in a stable order.
    ///
    /// Must be re-enumerable: calling twice returns the same sequence.
    /// The roulette-wheel scan visits candidates in this order.
    fn neighbors(&self, node: NodeId) -> Vec<EdgeRef>;
}

/// Edge cost function.
///
/// Returns a cost `>= 0`, or `f64::INFINITY` when the move is forbidden
/// (access restriction, banned turn). NaN and negative values are
/// treated as a misconfigured weighting and abort the query.
pub trait Weighting: Send + Sync {
    /// Cost of traversing `edge` after arriving over `previous_edge`.
    ///
    /// `previous_edge` is `None` for the first step out of the origin.
    fn cost(&self, previous_edge: Option<EdgeId>, edge: EdgeRef) -> f64;
}
