//! Discounts
//!
//! Multi-item promotions rewrite the cart before any per-SKU pricing happens:
//! substitution discounts first, then group discounts on what is left.

pub mod group;
pub mod substitution;

pub use group::{GroupDiscount, apply_group_discounts};
pub use substitution::{SubstitutionDiscount, apply_substitution_discounts};
