//! Checkout
//!
//! Tally scanned SKUs into a cart, apply substitution discounts, then group discounts, then
//! price every remaining line with its best tier combination. A single unknown SKU fails
//! the whole cart; partial totals are never returned.

use thiserror::Error;
use tracing::{Span, warn};

use crate::{
    cart::Cart,
    discounts::{GroupDiscount, apply_group_discounts, apply_substitution_discounts},
    receipt::{Receipt, ReceiptLine},
    rules::{PricingError, RuleTable},
    skus::{Sku, SkuId},
    tiers::Tiers,
};

/// Total reported by [`checkout`] for a cart that cannot be priced.
pub const INVALID_CART: i64 = -1;

/// Errors that fail a whole checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Wrapped pricing error, including unknown SKUs.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The cart total does not fit in minor units.
    #[error("cart total overflows")]
    Overflow,
}

impl CheckoutError {
    /// Return the unknown SKU that failed the checkout, if that was the cause.
    pub fn unknown_sku(&self) -> Option<&SkuId> {
        match self {
            CheckoutError::Pricing(PricingError::UnknownSku(sku)) => Some(sku),
            _ => None,
        }
    }
}

/// Prices carts against one rule table.
#[derive(Debug, Clone, Copy)]
pub struct Checkout<'a> {
    table: &'a RuleTable,
}

impl<'a> Checkout<'a> {
    /// Create a checkout for the given rule table.
    pub fn new(table: &'a RuleTable) -> Self {
        Self { table }
    }

    /// Return the rule table.
    pub fn table(&self) -> &'a RuleTable {
        self.table
    }

    /// Apply substitution discounts, then group discounts, to a cart in place.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a group member has no unit price.
    pub fn apply_discounts(&self, cart: &mut Cart) -> Result<(), PricingError> {
        apply_substitution_discounts(cart, self.table.substitutions());
        apply_group_discounts(cart, self.table)
    }

    /// Total for a string of single-character SKU codes.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if any SKU is unknown or the total overflows.
    pub fn total(&self, skus: &str) -> Result<u64, CheckoutError> {
        self.total_cart(Cart::from_chars(skus))
    }

    /// Total for a tallied cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if any SKU is unknown or the total overflows.
    #[tracing::instrument(
        name = "checkout.total",
        skip_all,
        fields(units = cart.total_units(), total = tracing::field::Empty)
    )]
    pub fn total_cart(&self, mut cart: Cart) -> Result<u64, CheckoutError> {
        self.apply_discounts(&mut cart)?;

        let total = sum(self.priced_lines(&cart)?.iter().map(ReceiptLine::price))?;

        Span::current().record("total", total);

        Ok(total)
    }

    /// Itemised receipt for a string of single-character SKU codes.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if any SKU is unknown or an amount overflows.
    pub fn receipt(&self, skus: &str) -> Result<Receipt, CheckoutError> {
        self.receipt_for_cart(Cart::from_chars(skus))
    }

    /// Itemised receipt for a tallied cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if any SKU is unknown or an amount overflows.
    pub fn receipt_for_cart(&self, mut cart: Cart) -> Result<Receipt, CheckoutError> {
        let subtotal = cart.iter().try_fold(0_u64, |subtotal, (sku, count)| {
            self.undiscounted_price(sku, count)?
                .checked_add(subtotal)
                .ok_or(CheckoutError::Overflow)
        })?;

        self.apply_discounts(&mut cart)?;

        let lines = self.priced_lines(&cart)?;
        let total = sum(lines.iter().map(ReceiptLine::price))?;

        Ok(Receipt::new(lines, subtotal, total))
    }

    /// Price every cart line: products by SKU code, then groups in registration order.
    fn priced_lines(&self, cart: &Cart) -> Result<Vec<ReceiptLine>, CheckoutError> {
        let mut lines = cart
            .iter()
            .map(|(sku, count)| self.priced_line(sku, count))
            .collect::<Result<Vec<_>, _>>()?;

        lines.sort_by(|a, b| self.line_order(a.sku()).cmp(&self.line_order(b.sku())));

        Ok(lines)
    }

    fn priced_line(&self, sku: &SkuId, count: u64) -> Result<ReceiptLine, CheckoutError> {
        let price = self.table.best_price(sku, count)?;

        let label = match sku {
            SkuId::Product(product) => product.as_str(),
            SkuId::Group(key) => self
                .table
                .group(*key)
                .map(GroupDiscount::name)
                .ok_or_else(|| PricingError::UnknownSku(sku.clone()))?,
        };

        Ok(ReceiptLine::new(sku.clone(), label, count, price))
    }

    /// Sort key for receipt lines; groups come after every product.
    fn line_order<'s>(&self, sku: &'s SkuId) -> (Option<usize>, Option<&'s Sku>) {
        match sku {
            SkuId::Product(product) => (None, Some(product)),
            SkuId::Group(key) => (
                self.table
                    .groups()
                    .iter()
                    .position(|group| group.key() == *key),
                None,
            ),
        }
    }

    fn undiscounted_price(&self, sku: &SkuId, count: u64) -> Result<u64, CheckoutError> {
        let unit_price = self
            .table
            .tiers(sku)
            .map(Tiers::unit_price)
            .ok_or_else(|| PricingError::UnknownSku(sku.clone()))?;

        unit_price
            .checked_mul(count)
            .ok_or(CheckoutError::Overflow)
    }
}

fn sum(prices: impl IntoIterator<Item = u64>) -> Result<u64, CheckoutError> {
    prices
        .into_iter()
        .try_fold(0_u64, u64::checked_add)
        .ok_or(CheckoutError::Overflow)
}

/// Total for a string of single-character SKU codes, or [`INVALID_CART`] if any SKU is
/// unknown or the total cannot be represented.
pub fn checkout(table: &RuleTable, skus: &str) -> i64 {
    let total = Checkout::new(table)
        .total(skus)
        .and_then(|total| i64::try_from(total).map_err(|_err| CheckoutError::Overflow));

    match total {
        Ok(total) => total,
        Err(err) => {
            warn!(error = %err, "rejected cart");

            INVALID_CART
        }
    }
}
