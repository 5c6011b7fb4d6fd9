//! Solvers for Tiers
//!
//! A tier solver answers "what is the cheapest way to buy exactly `count` units" for one SKU.
//! [`GreedySolver`] consumes the largest tiers first and is only correct for curated tier
//! sets where larger tiers are never less efficient than combinations of smaller ones.
//! [`ExhaustiveSolver`] searches every combination and is correct for any tier set.

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

use crate::tiers::Tiers;

pub mod exhaustive;
pub mod greedy;

pub use exhaustive::ExhaustiveSolver;
pub use greedy::GreedySolver;

/// Solver Errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// The price does not fit in minor units.
    #[error("price for {count} units overflows")]
    Overflow {
        /// Number of units being priced
        count: u64,
    },

    /// The quantity is too large to search exhaustively on this platform.
    #[error("quantity {0} is too large for an exhaustive search")]
    QuantityTooLarge(u64),
}

/// Trait for pricing a quantity of one SKU from its tiers
pub trait TierSolver {
    /// Price exactly `count` units using the given tiers.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the price cannot be represented.
    fn solve(tiers: &Tiers, count: u64) -> Result<u64, SolverError>;
}

/// Which tier solver a rule table prices with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TierStrategy {
    /// Largest tier first; requires curated tiers.
    #[default]
    Greedy,

    /// Dynamic programming over quantity; optimal for any tiers.
    Exhaustive,
}

impl TierStrategy {
    /// Price exactly `count` units with this strategy's solver.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the price cannot be represented.
    pub fn solve(self, tiers: &Tiers, count: u64) -> Result<u64, SolverError> {
        match self {
            TierStrategy::Greedy => GreedySolver::solve(tiers, count),
            TierStrategy::Exhaustive => ExhaustiveSolver::solve(tiers, count),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::tiers::Tier;

    use super::*;

    #[test]
    fn strategy_dispatches_to_solver() -> TestResult {
        let mut tiers = Tiers::with_unit_price(10);
        tiers.insert(Tier::new(4, 36));
        tiers.insert(Tier::new(3, 24));

        assert_eq!(TierStrategy::Greedy.solve(&tiers, 6)?, 56);
        assert_eq!(TierStrategy::Exhaustive.solve(&tiers, 6)?, 48);

        Ok(())
    }

    #[test]
    fn strategy_parses_from_yaml() -> TestResult {
        let strategy: TierStrategy = serde_norway::from_str("exhaustive")?;

        assert_eq!(strategy, TierStrategy::Exhaustive);
        assert_eq!(TierStrategy::default(), TierStrategy::Greedy);

        Ok(())
    }
}
