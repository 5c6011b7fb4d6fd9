//! Tiers

use smallvec::{SmallVec, smallvec};

/// A bulk offer: exactly `quantity` units cost `price` minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    quantity: u64,
    price: u64,
}

impl Tier {
    /// Create a new tier.
    pub const fn new(quantity: u64, price: u64) -> Self {
        Self { quantity, price }
    }

    /// Return the number of units the tier covers.
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Return the price of one application of the tier.
    pub const fn price(&self) -> u64 {
        self.price
    }
}

/// The tiers of a single SKU.
///
/// Always holds the quantity-1 unit tier. Tiers are kept sorted by descending quantity,
/// so the unit tier is last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tiers {
    tiers: SmallVec<[Tier; 4]>,
    unit_price: u64,
}

impl Tiers {
    /// Create the tiers of a SKU holding only its unit price.
    pub fn with_unit_price(unit_price: u64) -> Self {
        Self {
            tiers: smallvec![Tier::new(1, unit_price)],
            unit_price,
        }
    }

    /// Return the price of a single unit, ignoring bulk tiers.
    pub const fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// Check whether a tier already covers `quantity`.
    pub fn contains_quantity(&self, quantity: u64) -> bool {
        self.tiers.iter().any(|tier| tier.quantity == quantity)
    }

    /// Insert a tier, keeping descending quantity order.
    ///
    /// Callers are responsible for quantities being positive and unique.
    pub(crate) fn insert(&mut self, tier: Tier) {
        let index = self
            .tiers
            .partition_point(|existing| existing.quantity > tier.quantity);

        self.tiers.insert(index, tier);
    }

    /// Iterate over the tiers from largest to smallest quantity.
    pub fn iter(&self) -> impl Iterator<Item = &Tier> {
        self.tiers.iter()
    }

    /// Get the number of tiers, including the unit tier.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always false; a SKU cannot exist without its unit tier.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_unit_tier() {
        let tiers = Tiers::with_unit_price(50);

        assert_eq!(tiers.iter().copied().collect::<Vec<_>>(), vec![Tier::new(1, 50)]);
        assert_eq!(tiers.unit_price(), 50);
        assert!(!tiers.is_empty());
    }

    #[test]
    fn insert_keeps_descending_order() {
        let mut tiers = Tiers::with_unit_price(50);

        tiers.insert(Tier::new(3, 130));
        tiers.insert(Tier::new(5, 200));
        tiers.insert(Tier::new(4, 170));

        let quantities: Vec<u64> = tiers.iter().map(Tier::quantity).collect();

        assert_eq!(quantities, vec![5, 4, 3, 1]);
        assert_eq!(tiers.len(), 4);
        assert_eq!(tiers.unit_price(), 50);
    }

    #[test]
    fn contains_quantity_checks_existing_tiers() {
        let mut tiers = Tiers::with_unit_price(30);
        tiers.insert(Tier::new(2, 45));

        assert!(tiers.contains_quantity(1));
        assert!(tiers.contains_quantity(2));
        assert!(!tiers.contains_quantity(3));
    }
}
