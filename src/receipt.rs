//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::skus::SkuId;

/// Errors raised while rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Writing to the output failed.
    #[error("failed to write receipt")]
    IO,

    /// An amount is too large to format as money.
    #[error("amount {0} cannot be formatted as money")]
    AmountNotRepresentable(u64),
}

/// One priced line of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    sku: SkuId,
    label: String,
    quantity: u64,
    price: u64,
}

impl ReceiptLine {
    /// Create a new receipt line.
    pub fn new(sku: SkuId, label: impl Into<String>, quantity: u64, price: u64) -> Self {
        Self {
            sku,
            label: label.into(),
            quantity,
            price,
        }
    }

    /// Return the SKU the line was priced under.
    pub fn sku(&self) -> &SkuId {
        &self.sku
    }

    /// Return the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Return the number of units charged on this line.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Return the line price in minor units.
    pub fn price(&self) -> u64 {
        self.price
    }
}

/// Final receipt for a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Charged lines: products by SKU code, then groups in registration order
    lines: Vec<ReceiptLine>,

    /// Every scanned unit at its unit price, before any tier or promotion
    subtotal: u64,

    /// Sum of all line prices
    total: u64,
}

impl Receipt {
    /// Create a new receipt with the given details.
    pub fn new(lines: Vec<ReceiptLine>, subtotal: u64, total: u64) -> Self {
        Self {
            lines,
            subtotal,
            total,
        }
    }

    /// Charged lines.
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Total before tiers and promotions.
    pub fn subtotal(&self) -> u64 {
        self.subtotal
    }

    /// Total amount to pay.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Savings made by tiers and promotions, zero if they did not help.
    pub fn savings(&self) -> u64 {
        self.subtotal.saturating_sub(self.total)
    }

    /// Write the receipt as a table, formatting amounts in `currency`.
    ///
    /// # Errors
    ///
    /// - [`ReceiptError::IO`]: writing to `out` failed.
    /// - [`ReceiptError::AmountNotRepresentable`]: an amount does not fit in money.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        currency: &'static Currency,
    ) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["SKU", "Qty", "Price"]);

        for line in &self.lines {
            builder.push_record([
                line.label.clone(),
                line.quantity.to_string(),
                money(line.price, currency)?.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

        writeln!(out, " Subtotal: {}", money(self.subtotal, currency)?)
            .map_err(|_err| ReceiptError::IO)?;

        writeln!(out, " Savings:  {}", money(self.savings(), currency)?)
            .map_err(|_err| ReceiptError::IO)?;

        writeln!(out, " Total:    {}", money(self.total, currency)?)
            .map_err(|_err| ReceiptError::IO)
    }
}

fn money(minor: u64, currency: &'static Currency) -> Result<Money<'static, Currency>, ReceiptError> {
    let minor_units =
        i64::try_from(minor).map_err(|_err| ReceiptError::AmountNotRepresentable(minor))?;

    Ok(Money::from_minor(minor_units, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn receipt() -> Receipt {
        Receipt::new(
            vec![
                ReceiptLine::new(SkuId::from('A'), "A", 3, 130),
                ReceiptLine::new(SkuId::from('C'), "C", 1, 20),
            ],
            170,
            150,
        )
    }

    #[test]
    fn accessors_return_values_from_constructor() {
        let receipt = receipt();

        assert_eq!(receipt.lines().len(), 2);
        assert_eq!(receipt.subtotal(), 170);
        assert_eq!(receipt.total(), 150);
        assert_eq!(receipt.savings(), 20);
    }

    #[test]
    fn savings_never_go_negative() {
        let receipt = Receipt::new(Vec::new(), 100, 120);

        assert_eq!(receipt.savings(), 0);
    }

    #[test]
    fn write_to_renders_lines_and_totals() -> TestResult {
        let mut out = Vec::new();

        receipt().write_to(&mut out, GBP)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("1.30"), "line price missing: {rendered}");
        assert!(rendered.contains("Subtotal"), "subtotal missing: {rendered}");
        assert!(rendered.contains("1.50"), "total missing: {rendered}");

        Ok(())
    }

    #[test]
    fn oversized_amounts_are_rejected() {
        let receipt = Receipt::new(Vec::new(), u64::MAX, 0);

        assert!(matches!(
            receipt.write_to(Vec::new(), GBP),
            Err(ReceiptError::AmountNotRepresentable(u64::MAX))
        ));
    }
}
