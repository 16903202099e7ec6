//! Property tests for trail updates and runner invariants.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use proptest::prelude::*;
use u_antpath::aco::{AcoConfig, AcoRunner, PheromoneKey, PheromoneTable};
use u_antpath::graph::{AdjacencyGraph, Graph, Weighting};

const NODES: usize = 8;

fn graph_from(edges: &[(usize, usize, f64)]) -> AdjacencyGraph {
    let mut g = AdjacencyGraph::new(NODES);
    for &(a, b, w) in edges {
        if a != b {
            g.add_edge(a, b, w);
        }
    }
    g
}

fn edges_strategy() -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
    prop::collection::vec((0..NODES, 0..NODES, 1.0f64..10.0), 0..24)
}

fn config(seed: u64) -> AcoConfig {
    AcoConfig::default()
        .with_ant_count(8)
        .with_elite_ant_count(3)
        .with_max_iterations(6)
        .with_max_visited_nodes(NODES)
        .with_seed(seed)
}

#[derive(PartialEq)]
struct Entry(f64, usize);
impl Eq for Entry {}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.partial_cmp(&self.0).unwrap_or(Ordering::Equal)
    }
}

/// Reference shortest distance (Dijkstra), `None` if unreachable.
fn dijkstra(g: &AdjacencyGraph, from: usize, to: usize) -> Option<f64> {
    let mut dist = vec![f64::INFINITY; g.node_count()];
    let mut heap = BinaryHeap::new();
    dist[from] = 0.0;
    heap.push(Entry(0.0, from));
    while let Some(Entry(d, u)) = heap.pop() {
        if d > dist[u] {
            continue;
        }
        for e in g.neighbors(u) {
            let nd = d + g.cost(None, e);
            if nd < dist[e.adj_node] {
                dist[e.adj_node] = nd;
                heap.push(Entry(nd, e.adj_node));
            }
        }
    }
    dist[to].is_finite().then_some(dist[to])
}

proptest! {
    #[test]
    fn evaporation_scales_every_trail(
        deposits in prop::collection::vec(0.0f64..100.0, 1..20),
        rho in 0.0f64..=1.0,
    ) {
        let mut table = PheromoneTable::new();
        for (i, &amount) in deposits.iter().enumerate() {
            let key = PheromoneKey::Nodes { from: i, to: i + 1 };
            table.register(key, 1.0);
            table.deposit(key, amount);
        }
        let before: Vec<(PheromoneKey, f64)> =
            table.iter().map(|(k, e)| (*k, e.pheromone)).collect();

        table.evaporate(rho);

        for (key, prior) in before {
            let after = table.pheromone(key);
            prop_assert!((after - prior * (1.0 - rho)).abs() <= 1e-9 * prior.max(1.0));
            prop_assert!(after >= 0.0 && after.is_finite());
        }
    }

    #[test]
    fn same_seed_same_result(edges in edges_strategy(), seed in any::<u64>()) {
        let g = graph_from(&edges);
        let a = AcoRunner::run(&g, 0, NODES - 1, &config(seed)).unwrap();
        let b = AcoRunner::run(&g, 0, NODES - 1, &config(seed).with_parallel(false)).unwrap();
        prop_assert_eq!(a.best_cost, b.best_cost);
        prop_assert_eq!(a.cost_history, b.cost_history);
        prop_assert_eq!(a.route, b.route);
    }

    #[test]
    fn best_cost_is_monotone_and_never_beats_optimum(edges in edges_strategy(), seed in any::<u64>()) {
        let g = graph_from(&edges);
        let result = AcoRunner::run(&g, 0, NODES - 1, &config(seed)).unwrap();

        for w in result.cost_history.windows(2) {
            prop_assert!(w[1] <= w[0]);
        }
        match (result.best_cost, dijkstra(&g, 0, NODES - 1)) {
            (Some(found), Some(optimal)) => prop_assert!(found >= optimal - 1e-9),
            (Some(_), None) => prop_assert!(false, "found a path to an unreachable node"),
            (None, _) => prop_assert!(result.route.is_empty()),
        }
    }

    #[test]
    fn found_routes_are_simple_paths(edges in edges_strategy(), seed in any::<u64>()) {
        let g = graph_from(&edges);
        let result = AcoRunner::run(&g, 0, NODES - 1, &config(seed)).unwrap();
        let nodes = result.route.nodes();
        let unique: HashSet<usize> = nodes.iter().copied().collect();
        prop_assert_eq!(unique.len(), nodes.len());
        prop_assert!(result.route.edge_count() <= NODES);
    }

    #[test]
    fn unreachable_destination_returns_no_path(edges in edges_strategy(), seed in any::<u64>()) {
        // drop every edge into the destination
        let edges: Vec<_> = edges.into_iter().filter(|&(_, b, _)| b != NODES - 1).collect();
        let g = graph_from(&edges);
        let result = AcoRunner::run(&g, 0, NODES - 1, &config(seed)).unwrap();
        prop_assert!(!result.is_found());
        prop_assert_eq!(result.iterations, 6);
    }
}
