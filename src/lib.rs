//! Till
//!
//! Till prices a checkout of SKU codes against a fixed rule table of multi-buy tiers,
//! "buy N of X, get M of Y free" offers and "any N of a group for a flat price" offers.
//!
//! ```
//! use till::{checkout::Checkout, rules::RuleTable};
//!
//! let table = RuleTable::reference()?;
//!
//! assert_eq!(Checkout::new(&table).total("AAAAA")?, 200);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod discounts;
pub mod prelude;
pub mod receipt;
pub mod rules;
pub mod skus;
pub mod solvers;
pub mod tiers;
