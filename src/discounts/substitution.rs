//! Substitution Discounts
//!
//! "Buy N of X, get M of Y free". Each complete set of `buy` source units removes `free`
//! target units from the cart, never taking the target count below zero.
//!
//! Rules are applied in registration order and their reductions are cumulative: when two
//! rules free units of the same target, both reductions are taken.

use tracing::debug;

use crate::{
    cart::Cart,
    skus::{Sku, SkuId},
};

/// Buy `buy` units of `source`, get `free` units of `target` free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionDiscount {
    source: Sku,
    buy: u64,
    target: Sku,
    free: u64,
}

impl SubstitutionDiscount {
    /// Create a new substitution discount.
    pub fn new(source: Sku, buy: u64, target: Sku, free: u64) -> Self {
        Self {
            source,
            buy,
            target,
            free,
        }
    }

    /// Return the SKU that has to be bought.
    pub fn source(&self) -> &Sku {
        &self.source
    }

    /// Return the number of source units per application.
    pub fn buy(&self) -> u64 {
        self.buy
    }

    /// Return the SKU that becomes free.
    pub fn target(&self) -> &Sku {
        &self.target
    }

    /// Return the number of target units freed per application.
    pub fn free(&self) -> u64 {
        self.free
    }

    /// Number of target units freed when `source_count` source units are bought.
    pub fn free_units(&self, source_count: u64) -> u64 {
        source_count
            .checked_div(self.buy)
            .unwrap_or_default()
            .saturating_mul(self.free)
    }
}

/// Remove free target units from the cart for every substitution discount, in order.
pub fn apply_substitution_discounts(cart: &mut Cart, rules: &[SubstitutionDiscount]) {
    for rule in rules {
        let free_units = rule.free_units(cart.count_of(&rule.source));

        if free_units == 0 {
            continue;
        }

        let removed = cart.remove_units(&SkuId::from(&rule.target), free_units);

        debug!(
            source = %rule.source(),
            buy = rule.buy(),
            target = %rule.target(),
            free = rule.free(),
            free_units,
            removed,
            "applied substitution discount"
        );
    }
}
