//! Graph collaborators consumed by the ACO engine.
//!
//! The engine never inspects graph storage directly. It needs three
//! things, each expressed as a trait:
//!
//! - [`Graph`]: enumerate the outgoing edges of a node.
//! - [`Weighting`]: the cost of taking an edge given the edge the walk
//!   arrived on (turn costs, access rules). `f64::INFINITY` forbids it.
//! - [`RouteMaterializer`]: turn an ordered chain of transitions into a
//!   user-facing route with distance and duration.
//!
//! [`AdjacencyGraph`] implements all three for in-memory graphs.

mod adjacency;
mod route;
mod types;

pub use adjacency::AdjacencyGraph;
pub use route::{RouteMaterializer, RouteResult};
pub use types::{EdgeId, EdgeRef, Graph, NodeId, Weighting};
