//! Ant Colony Optimization path search over large weighted directed graphs.
//!
//! - [`aco`]: the colony. Pheromone trails, ant walks, and the iteration
//!   controller ([`aco::AcoRunner`]).
//! - [`graph`]: the collaborators the colony consumes. Neighbor
//!   enumeration, edge weighting with turn costs, route materialization,
//!   and an in-memory [`graph::AdjacencyGraph`] implementing all three.
//! - [`error`]: [`AcoError`], the ways a query can be refused.
//!
//! # Example
//!
//! ```
//! use u_antpath::aco::{AcoConfig, AcoRunner};
//! use u_antpath::graph::AdjacencyGraph;
//!
//! let mut g = AdjacencyGraph::new(2);
//! g.add_edge(0, 1, 10.0);
//!
//! let config = AcoConfig::default()
//!     .with_ant_count(5)
//!     .with_elite_ant_count(5)
//!     .with_max_iterations(1)
//!     .with_seed(7);
//! let result = AcoRunner::run(&g, 0, 1, &config).unwrap();
//! assert_eq!(result.best_cost, Some(10.0));
//! ```
//!
//! # Architecture
//!
//! Graph storage, cost functions and route rendering live outside this
//! crate behind the traits in [`graph`]. The crate holds only the search.

pub mod aco;
pub mod error;
pub mod graph;

pub use error::AcoError;
