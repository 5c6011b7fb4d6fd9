//! Rule Table
//!
//! Holds every pricing rule: the tiers of each SKU, substitution discounts and group
//! discounts. Built once during setup through the `register_*` methods, then only read.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    discounts::{GroupDiscount, SubstitutionDiscount},
    skus::{GroupKey, Sku, SkuId},
    solvers::{SolverError, TierStrategy},
    tiers::{Tier, Tiers},
};

/// Configuration errors raised while building a rule table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// A unit price was registered twice for the same SKU.
    #[error("SKU {0} is already registered")]
    DuplicateSku(Sku),

    /// A rule refers to a SKU without a unit price.
    #[error("SKU {0} has no unit price")]
    UnknownSku(Sku),

    /// A tier quantity was registered twice for the same SKU.
    #[error("SKU {sku} already has a tier for {quantity} units")]
    DuplicateTier {
        /// SKU the tier was registered for
        sku: Sku,

        /// Repeated quantity
        quantity: u64,
    },

    /// A quantity that must be positive was zero.
    #[error("{what} must be at least 1")]
    InvalidQuantity {
        /// Which quantity was invalid
        what: &'static str,
    },

    /// A group discount was registered without members.
    #[error("group discount {0:?} has no members")]
    EmptyGroup(String),
}

/// Errors raised while pricing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The SKU is not in the rule table.
    #[error("unknown SKU {0}")]
    UnknownSku(SkuId),

    /// Wrapped tier solver error
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Rule Table
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    /// Tiers of every product SKU and every synthetic group SKU
    tiers: FxHashMap<SkuId, Tiers>,

    /// Substitution discounts in registration order, at most one per source
    substitutions: Vec<SubstitutionDiscount>,

    /// Group discounts in registration order
    groups: Vec<GroupDiscount>,
    group_keys: SlotMap<GroupKey, ()>,

    strategy: TierStrategy,
}

impl RuleTable {
    /// Create an empty rule table using the greedy tier strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `strategy` to resolve tiers.
    #[must_use]
    pub fn with_strategy(mut self, strategy: TierStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Return the tier strategy.
    pub fn strategy(&self) -> TierStrategy {
        self.strategy
    }

    /// Register a SKU with its unit price.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::DuplicateSku`] if the SKU is already registered.
    pub fn register_unit_price(&mut self, sku: Sku, price: u64) -> Result<(), RuleError> {
        if self.contains(&sku) {
            return Err(RuleError::DuplicateSku(sku));
        }

        debug!(%sku, price, "registered unit price");

        self.tiers.insert(SkuId::Product(sku), Tiers::with_unit_price(price));

        Ok(())
    }

    /// Register a bulk tier: `quantity` units of `sku` cost `price`.
    ///
    /// # Errors
    ///
    /// - [`RuleError::InvalidQuantity`]: `quantity` is zero.
    /// - [`RuleError::UnknownSku`]: the SKU has no unit price yet.
    /// - [`RuleError::DuplicateTier`]: the SKU already has a tier for `quantity`.
    pub fn register_tier(&mut self, sku: &Sku, quantity: u64, price: u64) -> Result<(), RuleError> {
        if quantity == 0 {
            return Err(RuleError::InvalidQuantity {
                what: "tier quantity",
            });
        }

        let tiers = self
            .tiers
            .get_mut(&SkuId::from(sku))
            .ok_or_else(|| RuleError::UnknownSku(sku.clone()))?;

        if tiers.contains_quantity(quantity) {
            return Err(RuleError::DuplicateTier {
                sku: sku.clone(),
                quantity,
            });
        }

        tiers.insert(Tier::new(quantity, price));

        debug!(%sku, quantity, price, "registered tier");

        Ok(())
    }

    /// Register "buy `buy` of `source`, get `free` of `target` free".
    ///
    /// When `source` and `target` are the same SKU the offer becomes a tier of
    /// `buy + free` units at `buy` unit prices. A second rule for the same source replaces
    /// the first, keeping its position.
    ///
    /// # Errors
    ///
    /// - [`RuleError::InvalidQuantity`]: `buy` or `free` is zero.
    /// - [`RuleError::UnknownSku`]: `source` or `target` has no unit price.
    /// - [`RuleError::DuplicateTier`]: the synthesised tier clashes with an existing one.
    pub fn register_substitution_discount(
        &mut self,
        source: Sku,
        buy: u64,
        target: Sku,
        free: u64,
    ) -> Result<(), RuleError> {
        if buy == 0 {
            return Err(RuleError::InvalidQuantity {
                what: "substitution buy count",
            });
        }

        if free == 0 {
            return Err(RuleError::InvalidQuantity {
                what: "substitution free count",
            });
        }

        let unit_price = self.registered_unit_price(&source)?;
        self.registered_unit_price(&target)?;

        if source == target {
            return self.register_tier(
                &source,
                buy.saturating_add(free),
                buy.saturating_mul(unit_price),
            );
        }

        let rule = SubstitutionDiscount::new(source, buy, target, free);

        if let Some(existing) = self
            .substitutions
            .iter_mut()
            .find(|existing| existing.source() == rule.source())
        {
            warn!(
                source = %rule.source(),
                "replacing existing substitution discount for source"
            );

            *existing = rule;
        } else {
            debug!(
                source = %rule.source(),
                target = %rule.target(),
                buy,
                free,
                "registered substitution discount"
            );

            self.substitutions.push(rule);
        }

        Ok(())
    }

    /// Register "any `size` of `members` for `price`" and its synthetic group SKU.
    ///
    /// Repeated members are ignored. Member order breaks ties between equally priced units.
    ///
    /// # Errors
    ///
    /// - [`RuleError::InvalidQuantity`]: `size` is zero.
    /// - [`RuleError::EmptyGroup`]: no members were given.
    /// - [`RuleError::UnknownSku`]: a member has no unit price.
    pub fn register_group_discount(
        &mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = Sku>,
        size: u64,
        price: u64,
    ) -> Result<GroupKey, RuleError> {
        let name = name.into();

        if size == 0 {
            return Err(RuleError::InvalidQuantity {
                what: "group size",
            });
        }

        let mut unique: SmallVec<[Sku; 5]> = SmallVec::new();

        for sku in members {
            self.registered_unit_price(&sku)?;

            if !unique.contains(&sku) {
                unique.push(sku);
            }
        }

        if unique.is_empty() {
            return Err(RuleError::EmptyGroup(name));
        }

        let key = self.group_keys.insert(());

        self.tiers
            .insert(SkuId::Group(key), Tiers::with_unit_price(price));

        debug!(group = %name, members = unique.len(), size, price, "registered group discount");

        self.groups
            .push(GroupDiscount::new(key, name, unique, size, price));

        Ok(key)
    }

    /// Price exactly `count` units of a SKU with the table's tier strategy.
    ///
    /// # Errors
    ///
    /// - [`PricingError::UnknownSku`]: the SKU is not registered.
    /// - [`PricingError::Solver`]: the price cannot be represented.
    pub fn best_price(&self, sku: &SkuId, count: u64) -> Result<u64, PricingError> {
        let tiers = self
            .tiers
            .get(sku)
            .ok_or_else(|| PricingError::UnknownSku(sku.clone()))?;

        Ok(self.strategy.solve(tiers, count)?)
    }

    /// Return the price of a single unit of a product, ignoring its bulk tiers.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownSku`] if the SKU is not registered.
    pub fn unit_price(&self, sku: &Sku) -> Result<u64, PricingError> {
        let id = SkuId::from(sku);

        self.tiers
            .get(&id)
            .map(Tiers::unit_price)
            .ok_or(PricingError::UnknownSku(id))
    }

    /// Return the tiers of a SKU, if registered.
    pub fn tiers(&self, sku: &SkuId) -> Option<&Tiers> {
        self.tiers.get(sku)
    }

    /// Check if a product SKU is registered.
    pub fn contains(&self, sku: &Sku) -> bool {
        self.tiers.contains_key(&SkuId::from(sku))
    }

    /// Substitution discounts in registration order.
    pub fn substitutions(&self) -> &[SubstitutionDiscount] {
        &self.substitutions
    }

    /// Group discounts in registration order.
    pub fn groups(&self) -> &[GroupDiscount] {
        &self.groups
    }

    /// Get a group discount by key.
    pub fn group(&self, key: GroupKey) -> Option<&GroupDiscount> {
        self.groups.iter().find(|group| group.key() == key)
    }

    fn registered_unit_price(&self, sku: &Sku) -> Result<u64, RuleError> {
        self.tiers
            .get(&SkuId::from(sku))
            .map(Tiers::unit_price)
            .ok_or_else(|| RuleError::UnknownSku(sku.clone()))
    }
}
