//! Greedy Solver

use crate::{
    solvers::{SolverError, TierSolver},
    tiers::Tiers,
};

/// Consumes as many applications of the largest tier as possible, then the next largest,
/// down to the unit tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver;

impl TierSolver for GreedySolver {
    fn solve(tiers: &Tiers, count: u64) -> Result<u64, SolverError> {
        let mut remaining = count;
        let mut total = 0_u64;

        for tier in tiers.iter() {
            let applications = remaining / tier.quantity();
            remaining %= tier.quantity();

            total = applications
                .checked_mul(tier.price())
                .and_then(|price| total.checked_add(price))
                .ok_or(SolverError::Overflow { count })?;

            if remaining == 0 {
                break;
            }
        }

        Ok(total)
    }
}
