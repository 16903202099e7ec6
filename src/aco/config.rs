//! ACO configuration.

/// How pheromone trails are keyed.
///
/// # Examples
///
/// ```
/// use u_antpath::aco::TraversalMode;
///
/// assert_eq!(TraversalMode::default(), TraversalMode::NodeBased);
/// assert!(TraversalMode::EdgeBased.is_edge_based());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraversalMode {
    /// One trail per `(source node, target node)` pair.
    #[default]
    NodeBased,

    /// One trail per `(incoming edge, outgoing edge)` pair.
    ///
    /// Needed when the weighting uses turn costs or turn restrictions,
    /// so the deposited amount matches the cost the ant actually paid.
    EdgeBased,
}

impl TraversalMode {
    pub fn is_edge_based(self) -> bool {
        matches!(self, TraversalMode::EdgeBased)
    }
}

/// Configuration for the ACO path search.
///
/// # Parameters
///
/// - `alpha` weights the heuristic term `1 / cumulative_cost`.
/// - `beta` weights the pheromone term.
///
/// Desirability of a candidate step is
/// `(1 / cumulative_cost)^alpha * pheromone^beta`.
///
/// # Defaults
///
/// | Parameter | Default |
/// |-----------|---------|
/// | ant_count | 100 |
/// | max_iterations | 100 |
/// | evaporation_rate | 0.5 |
/// | deposit_constant | 5.0 |
/// | elite_ant_count | 50 |
/// | alpha | 0.3 |
/// | beta | 1.2 |
/// | max_visited_nodes | unlimited |
///
/// # References
///
/// Dorigo & Stützle (2004), *Ant Colony Optimization*, MIT Press.
///
/// # Examples
///
/// ```
/// use u_antpath::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ant_count(40)
///     .with_max_iterations(25)
///     .with_elite_ant_count(10)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants launched per iteration.
    pub ant_count: usize,

    /// Number of iterations (generations). 0 runs nothing.
    pub max_iterations: usize,

    /// Evaporation rate rho in [0, 1]. Every trail is multiplied by
    /// `1 - rho` once per iteration.
    pub evaporation_rate: f64,

    /// Deposit constant Q. Each elite transition receives `Q / local_cost`.
    pub deposit_constant: f64,

    /// Number of best walks per iteration that deposit pheromone.
    pub elite_ant_count: usize,

    /// Exponent on the heuristic term.
    pub alpha: f64,

    /// Exponent on the pheromone term.
    pub beta: f64,

    /// Maximum steps a single ant may take before it is discarded.
    pub max_visited_nodes: usize,

    /// Pheromone keying mode.
    pub traversal_mode: TraversalMode,

    /// Whether to run the ants of one iteration in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results do not
    /// depend on this flag.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Wall-clock budget in milliseconds, checked between iterations.
    pub time_limit_ms: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ant_count: 100,
            max_iterations: 100,
            evaporation_rate: 0.5,
            deposit_constant: 5.0,
            elite_ant_count: 50,
            alpha: 0.3,
            beta: 1.2,
            max_visited_nodes: usize::MAX,
            traversal_mode: TraversalMode::NodeBased,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl AcoConfig {
    pub fn with_ant_count(mut self, n: usize) -> Self {
        self.ant_count = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_evaporation_rate(mut self, rho: f64) -> Self {
        self.evaporation_rate = rho;
        self
    }

    pub fn with_deposit_constant(mut self, q: f64) -> Self {
        self.deposit_constant = q;
        self
    }

    pub fn with_elite_ant_count(mut self, n: usize) -> Self {
        self.elite_ant_count = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_max_visited_nodes(mut self, n: usize) -> Self {
        self.max_visited_nodes = n;
        self
    }

    pub fn with_traversal_mode(mut self, mode: TraversalMode) -> Self {
        self.traversal_mode = mode;
        self
    }

    /// Enables or disables parallel ant walks.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.ant_count == 0 {
            return Err("ant_count must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(format!(
                "evaporation_rate must be in [0, 1], got {}",
                self.evaporation_rate
            ));
        }
        if !self.deposit_constant.is_finite() || self.deposit_constant <= 0.0 {
            return Err(format!(
                "deposit_constant must be positive and finite, got {}",
                self.deposit_constant
            ));
        }
        if self.elite_ant_count > self.ant_count {
            return Err(format!(
                "elite_ant_count ({}) must not exceed ant_count ({})",
                self.elite_ant_count, self.ant_count
            ));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(format!("alpha must be non-negative, got {}", self.alpha));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(format!("beta must be non-negative, got {}", self.beta));
        }
        if self.max_visited_nodes == 0 {
            return Err("max_visited_nodes must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.ant_count, 100);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.elite_ant_count, 50);
        assert!((config.evaporation_rate - 0.5).abs() < 1e-12);
        assert!((config.deposit_constant - 5.0).abs() < 1e-12);
        assert!((config.alpha - 0.3).abs() < 1e-12);
        assert!((config.beta - 1.2).abs() < 1e-12);
        assert_eq!(config.max_visited_nodes, usize::MAX);
        assert_eq!(config.traversal_mode, TraversalMode::NodeBased);
        assert!(config.parallel);
        assert!(config.seed.is_none());
        assert!(config.time_limit_ms.is_none());
    }

    #[test]
    fn test_builder() {
        let config = AcoConfig::default()
            .with_ant_count(10)
            .with_max_iterations(3)
            .with_evaporation_rate(0.1)
            .with_deposit_constant(2.0)
            .with_elite_ant_count(4)
            .with_alpha(1.0)
            .with_beta(2.0)
            .with_max_visited_nodes(64)
            .with_traversal_mode(TraversalMode::EdgeBased)
            .with_parallel(false)
            .with_seed(7)
            .with_time_limit_ms(500);

        assert_eq!(config.ant_count, 10);
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.elite_ant_count, 4);
        assert_eq!(config.max_visited_nodes, 64);
        assert!(config.traversal_mode.is_edge_based());
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.time_limit_ms, Some(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_ok() {
        assert!(AcoConfig::default().validate().is_ok());
        assert!(AcoConfig::default().with_max_iterations(0).validate().is_ok());
        assert!(AcoConfig::default().with_evaporation_rate(0.0).validate().is_ok());
        assert!(AcoConfig::default().with_evaporation_rate(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_ants() {
        let config = AcoConfig::default().with_ant_count(0).with_elite_ant_count(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_rho() {
        assert!(AcoConfig::default().with_evaporation_rate(-0.1).validate().is_err());
        assert!(AcoConfig::default().with_evaporation_rate(1.5).validate().is_err());
        assert!(AcoConfig::default().with_evaporation_rate(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_bad_deposit() {
        assert!(AcoConfig::default().with_deposit_constant(0.0).validate().is_err());
        assert!(AcoConfig::default()
            .with_deposit_constant(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_elite_exceeds_ants() {
        let config = AcoConfig::default().with_ant_count(5).with_elite_ant_count(6);
        let err = config.validate().unwrap_err();
        assert!(err.contains("elite_ant_count"));
    }

    #[test]
    fn test_validate_bad_exponents() {
        assert!(AcoConfig::default().with_alpha(-1.0).validate().is_err());
        assert!(AcoConfig::default().with_beta(-0.5).validate().is_err());
        assert!(AcoConfig::default().with_beta(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_zero_step_budget() {
        assert!(AcoConfig::default().with_max_visited_nodes(0).validate().is_err());
    }
}
