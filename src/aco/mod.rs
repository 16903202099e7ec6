//! Ant Colony Optimization for point-to-point paths.
//!
//! A colony of ants performs randomized, pheromone-biased walks from an
//! origin toward a destination. After every iteration the best walks
//! reinforce the transitions they used and every trail evaporates, so
//! the colony converges toward a low-cost route. The result is a good
//! path, not a guaranteed shortest one.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod ant;
mod config;
mod pheromone;
mod report;
mod runner;
mod step;
mod types;

pub use ant::{walk, AntState, AntWalk, CandidatePath, WalkContext};
pub use config::{AcoConfig, TraversalMode};
pub use pheromone::{Deposit, PheromoneEntry, PheromoneKey, PheromoneTable, SEED_PHEROMONE};
pub use report::{IterationReport, IterationReporter, TracingReporter};
pub use runner::{AcoResult, AcoRunner, WalkStats};
pub use step::{PathStep, StepArena, StepId, Transition};
pub use types::{PathProblem, SearchSpace};
