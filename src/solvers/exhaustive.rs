//! Exhaustive Solver

use crate::{
    solvers::{SolverError, TierSolver},
    tiers::{Tier, Tiers},
};

/// Largest quantity the dynamic-programming table is built for.
///
/// Larger counts are first reduced by whole applications of the most efficient tier, so
/// this only limits tier sets whose quantities are themselves very large.
pub const MAX_SEARCH_QUANTITY: u64 = 1 << 20;

/// Finds the cheapest combination of tiers by dynamic programming over quantity.
///
/// `cost[q] = min(cost[q - t.quantity] + t.price)` over every tier `t` no larger than `q`.
/// The unit tier makes every quantity reachable.
///
/// Some optimal combination uses fewer than `e.quantity` applications of tiers other than
/// the most efficient tier `e`: any `e.quantity` applications contain a subset covering a
/// multiple of `e.quantity` units, which `e` prices no higher. Counts above
/// `e.quantity * max_quantity` are therefore priced as whole applications of `e` plus a
/// search over the remainder, keeping the table bounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSolver;

impl TierSolver for ExhaustiveSolver {
    fn solve(tiers: &Tiers, count: u64) -> Result<u64, SolverError> {
        let (applied, remainder) = reduce(tiers, count)?;

        search(tiers, remainder)?
            .checked_add(applied)
            .ok_or(SolverError::Overflow { count })
    }
}

/// Split `count` into the price of whole applications of the most efficient tier and the
/// quantity left to search.
fn reduce(tiers: &Tiers, count: u64) -> Result<(u64, u64), SolverError> {
    let Some(efficient) = tiers.iter().min_by(|a, b| {
        let a_cost = u128::from(a.price()) * u128::from(b.quantity());
        let b_cost = u128::from(b.price()) * u128::from(a.quantity());

        a_cost.cmp(&b_cost)
    }) else {
        return Ok((0, count));
    };

    let largest = tiers.iter().map(Tier::quantity).max().unwrap_or(1);
    let bound = efficient.quantity().saturating_mul(largest);

    if count <= bound {
        return Ok((0, count));
    }

    let applications = (count - bound).div_ceil(efficient.quantity());

    let applied = applications
        .checked_mul(efficient.price())
        .ok_or(SolverError::Overflow { count })?;

    let remainder = applications
        .checked_mul(efficient.quantity())
        .and_then(|units| count.checked_sub(units))
        .ok_or(SolverError::Overflow { count })?;

    Ok((applied, remainder))
}

/// Price exactly `count` units by filling the cost table up to `count`.
fn search(tiers: &Tiers, count: u64) -> Result<u64, SolverError> {
    if count > MAX_SEARCH_QUANTITY {
        return Err(SolverError::QuantityTooLarge(count));
    }

    let len = usize::try_from(count)
        .ok()
        .and_then(|count| count.checked_add(1))
        .ok_or(SolverError::QuantityTooLarge(count))?;

    let mut costs: Vec<u64> = Vec::with_capacity(len);
    costs.push(0);

    for quantity in 1..len {
        let mut best: Option<u64> = None;

        for tier in tiers.iter() {
            let Some(rest) = usize::try_from(tier.quantity())
                .ok()
                .and_then(|tier_quantity| quantity.checked_sub(tier_quantity))
            else {
                continue;
            };

            let Some(rest_cost) = costs.get(rest) else {
                continue;
            };

            let cost = rest_cost
                .checked_add(tier.price())
                .ok_or(SolverError::Overflow { count })?;

            best = Some(best.map_or(cost, |best| best.min(cost)));
        }

        costs.push(best.ok_or(SolverError::Overflow { count })?);
    }

    costs.last().copied().ok_or(SolverError::Overflow { count })
}
