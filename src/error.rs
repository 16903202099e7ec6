//! Error types for ACO path queries.

use crate::graph::{EdgeId, NodeId};
use thiserror::Error;

/// Reasons a path query is refused.
///
/// Only configuration problems end up here. An unreachable destination
/// is a normal outcome (see [`AcoResult::is_found`](crate::aco::AcoResult::is_found)),
/// and per-ant failures (dead ends, exhausted step budgets, zero-cost
/// deposits) are absorbed by the runner.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AcoError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("node not found: {0}")]
    UnknownNode(NodeId),

    #[error("weighting returned malformed cost {cost} for edge {edge} ({from} -> {to})")]
    MalformedCost {
        from: NodeId,
        to: NodeId,
        edge: EdgeId,
        cost: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_malformed_cost() {
        let err = AcoError::MalformedCost {
            from: 1,
            to: 2,
            edge: 7,
            cost: -3.0,
        };
        assert_eq!(
            err.to_string(),
            "weighting returned malformed cost -3 for edge 7 (1 -> 2)"
        );
    }

    #[test]
    fn test_display_invalid_config() {
        let err = AcoError::InvalidConfig("ant_count must be at least 1".into());
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
