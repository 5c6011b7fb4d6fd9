//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    checkout::{Checkout, CheckoutError, INVALID_CART, checkout},
    config::{ConfigError, PricingConfig},
    discounts::{
        GroupDiscount, SubstitutionDiscount, apply_group_discounts, apply_substitution_discounts,
    },
    receipt::{Receipt, ReceiptError, ReceiptLine},
    rules::{PricingError, RuleError, RuleTable},
    skus::{GroupKey, Sku, SkuId},
    solvers::{ExhaustiveSolver, GreedySolver, SolverError, TierSolver, TierStrategy},
    tiers::{Tier, Tiers},
};
