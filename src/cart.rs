//! Cart

use rustc_hash::FxHashMap;

use crate::skus::{Sku, SkuId};

/// Per-checkout tally of SKU counts.
///
/// Built once per checkout from the scanned SKUs, rewritten in place by discounts, then
/// priced. Lines never hold a zero count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    counts: FxHashMap<SkuId, u64>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a string of single-character SKU codes.
    ///
    /// Every character is one SKU token; order does not matter.
    pub fn from_chars(skus: &str) -> Self {
        Self::from_skus(skus.chars().map(Sku::from))
    }

    /// Tally a sequence of SKUs.
    pub fn from_skus(skus: impl IntoIterator<Item = Sku>) -> Self {
        let mut cart = Self::new();

        for sku in skus {
            cart.add(SkuId::Product(sku), 1);
        }

        cart
    }

    /// Get the count of a line, zero when absent.
    pub fn count(&self, sku: &SkuId) -> u64 {
        self.counts.get(sku).copied().unwrap_or_default()
    }

    /// Get the count of a product SKU, zero when absent.
    pub fn count_of(&self, sku: &Sku) -> u64 {
        self.count(&SkuId::from(sku))
    }

    /// Add `units` to a line.
    pub fn add(&mut self, sku: SkuId, units: u64) {
        if units == 0 {
            return;
        }

        let count = self.counts.entry(sku).or_default();
        *count = count.saturating_add(units);
    }

    /// Remove up to `units` from a line, returning how many were actually removed.
    pub fn remove_units(&mut self, sku: &SkuId, units: u64) -> u64 {
        let Some(count) = self.counts.get_mut(sku) else {
            return 0;
        };

        let removed = units.min(*count);
        *count -= removed;

        if *count == 0 {
            self.counts.remove(sku);
        }

        removed
    }

    /// Iterate over the nonzero lines, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&SkuId, u64)> {
        self.counts.iter().map(|(sku, count)| (sku, *count))
    }

    /// Total number of units across all lines.
    pub fn total_units(&self) -> u64 {
        self.counts
            .values()
            .fold(0_u64, |total, count| total.saturating_add(*count))
    }

    /// Get the number of distinct lines.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<Sku> for Cart {
    fn from_iter<I: IntoIterator<Item = Sku>>(iter: I) -> Self {
        Self::from_skus(iter)
    }
}
