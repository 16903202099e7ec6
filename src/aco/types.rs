//! Problem definition for the ACO runner.

use crate::graph::{EdgeId, EdgeRef, Graph, NodeId, RouteMaterializer, RouteResult, Weighting};

use super::step::Transition;

/// Everything the runner needs from the outside world.
///
/// Implemented automatically for any type that is a [`Graph`], a
/// [`Weighting`] and a [`RouteMaterializer`] at once, such as
/// [`AdjacencyGraph`](crate::graph::AdjacencyGraph). When the three
/// collaborators are separate values, bundle them in a [`SearchSpace`].
pub trait PathProblem: Graph + Weighting + RouteMaterializer {}

impl<T: Graph + Weighting + RouteMaterializer + ?Sized> PathProblem for T {}

/// Borrowed bundle of independent collaborators.
///
/// # Examples
///
/// ```
/// use u_antpath::aco::{AcoConfig, AcoRunner, SearchSpace};
/// use u_antpath::graph::{AdjacencyGraph, EdgeRef, Weighting};
///
/// struct Uniform;
/// impl Weighting for Uniform {
///     fn cost(&self, _prev: Option<usize>, _edge: EdgeRef) -> f64 { 1.0 }
/// }
///
/// let mut g = AdjacencyGraph::new(2);
/// g.add_edge(0, 1, 99.0);
///
/// let space = SearchSpace::new(&g, &Uniform, &g);
/// let config = AcoConfig::default().with_ant_count(4).with_elite_ant_count(2)
///     .with_max_iterations(2).with_seed(1);
/// let result = AcoRunner::run(&space, 0, 1, &config).unwrap();
/// assert_eq!(result.best_cost, Some(1.0));
/// ```
#[derive(Debug)]
pub struct SearchSpace<'a, G: ?Sized, W: ?Sized, M: ?Sized> {
    pub graph: &'a G,
    pub weighting: &'a W,
    pub materializer: &'a M,
}

impl<'a, G: ?Sized, W: ?Sized, M: ?Sized> SearchSpace<'a, G, W, M> {
    pub fn new(graph: &'a G, weighting: &'a W, materializer: &'a M) -> Self {
        Self {
            graph,
            weighting,
            materializer,
        }
    }
}

impl<G, W, M> Graph for SearchSpace<'_, G, W, M>
where
    G: Graph + ?Sized,
    W: Weighting + ?Sized,
    M: RouteMaterializer + ?Sized,
{
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn neighbors(&self, node: NodeId) -> Vec<EdgeRef> {
        self.graph.neighbors(node)
    }
}

impl<G, W, M> Weighting for SearchSpace<'_, G, W, M>
where
    G: Graph + ?Sized,
    W: Weighting + ?Sized,
    M: RouteMaterializer + ?Sized,
{
    fn cost(&self, previous_edge: Option<EdgeId>, edge: EdgeRef) -> f64 {
        self.weighting.cost(previous_edge, edge)
    }
}

impl<G, W, M> RouteMaterializer for SearchSpace<'_, G, W, M>
where
    G: Graph + ?Sized,
    W: Weighting + ?Sized,
    M: RouteMaterializer + ?Sized,
{
    fn reconstruct(&self, transitions: &[Transition]) -> RouteResult {
        self.materializer.reconstruct(transitions)
    }
}
