//! Shared pheromone trails.
//!
//! The table is read by every ant during an iteration and written only
//! between iterations, by a single owner. During the walk phase it is
//! handed out as `&PheromoneTable`, so the borrow checker enforces that
//! no ant observes a deposit made in the same iteration.

use std::collections::HashMap;

use super::config::TraversalMode;
use crate::graph::{EdgeId, EdgeRef, NodeId};

/// Pheromone assigned to a transition the first time it is seen.
pub const SEED_PHEROMONE: f64 = 0.0;

/// Identity of a pheromone trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PheromoneKey {
    /// Node-based trail: `from -> to`.
    Nodes { from: NodeId, to: NodeId },
    /// Edge-based trail: `outgoing` taken after `incoming`.
    ///
    /// `incoming` is `None` for moves out of the origin.
    Turn {
        incoming: Option<EdgeId>,
        outgoing: EdgeId,
    },
}

impl PheromoneKey {
    /// Key for taking `edge` from `from`, having arrived over `incoming`.
    pub fn for_move(
        mode: TraversalMode,
        from: NodeId,
        incoming: Option<EdgeId>,
        edge: EdgeRef,
    ) -> Self {
        match mode {
            TraversalMode::NodeBased => PheromoneKey::Nodes {
                from,
                to: edge.adj_node,
            },
            TraversalMode::EdgeBased => PheromoneKey::Turn {
                incoming,
                outgoing: edge.edge,
            },
        }
    }
}

/// State of one trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PheromoneEntry {
    /// Current intensity. Always finite and `>= 0`.
    pub pheromone: f64,
    /// Local cost last observed for this transition.
    pub local_cost: f64,
}

/// Outcome of [`PheromoneTable::reinforce`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deposit {
    /// Pheromone was added.
    Applied(f64),
    /// The cached local cost is zero, so `Q / cost` is undefined.
    ZeroCost,
    /// The key was never registered.
    Missing,
}

/// Mapping from trail identity to pheromone and cached local cost.
///
/// # Examples
///
/// ```
/// use u_antpath::aco::{PheromoneKey, PheromoneTable};
///
/// let mut table = PheromoneTable::new();
/// let key = PheromoneKey::Nodes { from: 0, to: 1 };
/// table.register(key, 2.0);
/// table.deposit(key, 4.0);
/// table.evaporate(0.5);
/// assert_eq!(table.pheromone(key), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PheromoneTable {
    entries: HashMap<PheromoneKey, PheromoneEntry>,
}

impl PheromoneTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `key`, or a seeded entry carrying
    /// `local_cost` if the transition has not been registered yet.
    ///
    /// Never mutates the table.
    pub fn lookup(&self, key: PheromoneKey, local_cost: f64) -> PheromoneEntry {
        self.entries.get(&key).copied().unwrap_or(PheromoneEntry {
            pheromone: SEED_PHEROMONE,
            local_cost,
        })
    }

    pub fn get(&self, key: PheromoneKey) -> Option<&PheromoneEntry> {
        self.entries.get(&key)
    }

    /// Current pheromone of `key`, or the seed value if unknown.
    pub fn pheromone(&self, key: PheromoneKey) -> f64 {
        self.entries.get(&key).map_or(SEED_PHEROMONE, |e| e.pheromone)
    }

    /// Records a transition discovered by a walk.
    ///
    /// New keys start at [`SEED_PHEROMONE`]. The cached local cost is
    /// overwritten with the latest observation; pheromone is kept.
    pub fn register(&mut self, key: PheromoneKey, local_cost: f64) {
        self.entries
            .entry(key)
            .and_modify(|e| e.local_cost = local_cost)
            .or_insert(PheromoneEntry {
                pheromone: SEED_PHEROMONE,
                local_cost,
            });
    }

    /// Adds `amount` to the trail of `key`.
    ///
    /// Returns `false` and leaves the table untouched if the key is
    /// unknown or the amount is negative or not finite.
    pub fn deposit(&mut self, key: PheromoneKey, amount: f64) -> bool {
        if !amount.is_finite() || amount < 0.0 {
            return false;
        }
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.pheromone += amount;
                true
            }
            None => false,
        }
    }

    /// Deposits `q / local_cost` on `key`, using the cached local cost.
    pub fn reinforce(&mut self, key: PheromoneKey, q: f64) -> Deposit {
        let Some(entry) = self.entries.get(&key) else {
            return Deposit::Missing;
        };
        if entry.local_cost <= 0.0 {
            return Deposit::ZeroCost;
        }
        let amount = q / entry.local_cost;
        if self.deposit(key, amount) {
            Deposit::Applied(amount)
        } else {
            Deposit::ZeroCost
        }
    }

    /// Multiplies every trail by `1 - rho`.
    ///
    /// Applies to every registered transition, used this iteration or not.
    pub fn evaporate(&mut self, rho: f64) {
        let factor = (1.0 - rho).clamp(0.0, 1.0);
        for entry in self.entries.values_mut() {
            entry.pheromone *= factor;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PheromoneKey, &PheromoneEntry)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const K01: PheromoneKey = PheromoneKey::Nodes { from: 0, to: 1 };
    const K12: PheromoneKey = PheromoneKey::Nodes { from: 1, to: 2 };

    #[test]
    fn test_lookup_miss_is_seeded_and_not_inserted() {
        let table = PheromoneTable::new();
        let entry = table.lookup(K01, 3.0);
        assert_eq!(entry.pheromone, SEED_PHEROMONE);
        assert_eq!(entry.local_cost, 3.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_register_keeps_pheromone_updates_cost() {
        let mut table = PheromoneTable::new();
        table.register(K01, 2.0);
        assert!(table.deposit(K01, 1.5));
        table.register(K01, 4.0);

        let entry = table.get(K01).unwrap();
        assert_eq!(entry.pheromone, 1.5);
        assert_eq!(entry.local_cost, 4.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_deposit_unknown_key() {
        let mut table = PheromoneTable::new();
        assert!(!table.deposit(K01, 1.0));
        assert!(table.is_empty());
    }

    #[test]
    fn test_deposit_rejects_bad_amounts() {
        let mut table = PheromoneTable::new();
        table.register(K01, 1.0);
        assert!(!table.deposit(K01, -1.0));
        assert!(!table.deposit(K01, f64::NAN));
        assert!(!table.deposit(K01, f64::INFINITY));
        assert_eq!(table.pheromone(K01), 0.0);
    }

    #[test]
    fn test_reinforce_q_over_cost() {
        let mut table = PheromoneTable::new();
        table.register(K01, 4.0);
        assert_eq!(table.reinforce(K01, 10.0), Deposit::Applied(2.5));
        assert!((table.pheromone(K01) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_reinforce_zero_cost_skipped() {
        let mut table = PheromoneTable::new();
        table.register(K01, 0.0);
        assert_eq!(table.reinforce(K01, 5.0), Deposit::ZeroCost);
        assert_eq!(table.pheromone(K01), 0.0);
        assert_eq!(table.reinforce(K12, 5.0), Deposit::Missing);
    }

    #[test]
    fn test_evaporate_all_entries() {
        let mut table = PheromoneTable::new();
        table.register(K01, 1.0);
        table.register(K12, 1.0);
        table.deposit(K01, 8.0);
        table.deposit(K12, 2.0);

        table.evaporate(0.25);
        assert!((table.pheromone(K01) - 6.0).abs() < 1e-12);
        assert!((table.pheromone(K12) - 1.5).abs() < 1e-12);

        table.evaporate(1.0);
        assert_eq!(table.pheromone(K01), 0.0);
        assert_eq!(table.pheromone(K12), 0.0);
    }

    #[test]
    fn test_key_modes() {
        let edge = EdgeRef { edge: 9, adj_node: 4 };
        assert_eq!(
            PheromoneKey::for_move(TraversalMode::NodeBased, 2, Some(1), edge),
            PheromoneKey::Nodes { from: 2, to: 4 }
        );
        assert_eq!(
            PheromoneKey::for_move(TraversalMode::EdgeBased, 2, Some(1), edge),
            PheromoneKey::Turn {
                incoming: Some(1),
                outgoing: 9
            }
        );
        assert_eq!(
            PheromoneKey::for_move(TraversalMode::EdgeBased, 2, None, edge),
            PheromoneKey::Turn {
                incoming: None,
                outgoing: 9
            }
        );
    }
}
