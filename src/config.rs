//! Pricing Configuration
//!
//! Rule tables are described in YAML and registered in file order: unit prices, then
//! offers, then substitution discounts, then group discounts.
//!
//! ```yaml
//! currency: GBP
//! strategy: greedy
//! prices:
//!   - { sku: "A", price: 50 }
//! offers:
//!   - { sku: "A", quantity: 3, price: 130 }
//! substitutions:
//!   - { source: "E", buy: 2, target: "B", free: 1 }
//! groups:
//!   - { members: ["S", "T", "X"], size: 3, price: 45 }
//! ```

use std::{fs, path::Path};

use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    rules::{RuleError, RuleTable},
    skus::Sku,
    solvers::TierStrategy,
};

/// The built-in reference price table.
const REFERENCE: &str = include_str!("../fixtures/reference.yml");

/// Configuration Errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a pricing file
    #[error("Failed to read pricing file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The rules are inconsistent
    #[error(transparent)]
    Rules(#[from] RuleError),
}

/// A complete pricing configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// ISO currency code used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Tier resolution strategy
    #[serde(default)]
    pub strategy: TierStrategy,

    /// Unit prices, one per SKU
    pub prices: Vec<UnitPriceConfig>,

    /// Multi-buy tiers
    #[serde(default)]
    pub offers: Vec<OfferConfig>,

    /// Buy-N-get-M-free offers
    #[serde(default)]
    pub substitutions: Vec<SubstitutionConfig>,

    /// Any-N-of-a-group offers
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

/// Unit price of one SKU
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitPriceConfig {
    /// SKU code
    pub sku: Sku,

    /// Price of one unit in minor units
    pub price: u64,
}

/// Multi-buy tier: `quantity` units of `sku` for `price`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfferConfig {
    /// SKU code
    pub sku: Sku,

    /// Units covered by the offer
    pub quantity: u64,

    /// Price of the offer in minor units
    pub price: u64,
}

/// Buy `buy` of `source`, get `free` of `target` free
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubstitutionConfig {
    /// SKU that has to be bought
    pub source: Sku,

    /// Source units per application
    pub buy: u64,

    /// SKU that becomes free
    pub target: Sku,

    /// Target units freed per application
    pub free: u64,
}

/// Any `size` of `members` for `price`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    /// Display name, derived from the members when omitted
    #[serde(default)]
    pub name: Option<String>,

    /// Member SKUs, most preferred first when prices tie
    pub members: Vec<Sku>,

    /// Units per group
    pub size: u64,

    /// Flat price of one group in minor units
    pub price: u64,
}

impl GroupConfig {
    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            let members: Vec<&str> = self.members.iter().map(Sku::as_str).collect();

            format!("any {} of {}", self.size, members.join(", "))
        })
    }
}

fn default_currency() -> String {
    "GBP".to_string()
}

impl PricingConfig {
    /// Parse a configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document does not match the schema.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// The built-in reference configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the embedded file is malformed.
    pub fn reference() -> Result<Self, ConfigError> {
        Self::from_yaml(REFERENCE)
    }

    /// Resolve the display currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for unsupported codes.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        match self.currency.as_str() {
            "GBP" => Ok(GBP),
            "USD" => Ok(USD),
            "EUR" => Ok(EUR),
            other => Err(ConfigError::UnknownCurrency(other.to_string())),
        }
    }

    /// Build a rule table, registering every rule in file order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Rules`] if the rules are inconsistent, for example a SKU
    /// priced twice or an offer for an unpriced SKU.
    pub fn build(&self) -> Result<RuleTable, ConfigError> {
        let mut table = RuleTable::new().with_strategy(self.strategy);

        for unit in &self.prices {
            table.register_unit_price(unit.sku.clone(), unit.price)?;
        }

        for offer in &self.offers {
            table.register_tier(&offer.sku, offer.quantity, offer.price)?;
        }

        for substitution in &self.substitutions {
            table.register_substitution_discount(
                substitution.source.clone(),
                substitution.buy,
                substitution.target.clone(),
                substitution.free,
            )?;
        }

        for group in &self.groups {
            table.register_group_discount(
                group.display_name(),
                group.members.iter().cloned(),
                group.size,
                group.price,
            )?;
        }

        Ok(table)
    }
}

impl RuleTable {
    /// Build the reference rule table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the embedded configuration is invalid.
    pub fn reference() -> Result<Self, ConfigError> {
        PricingConfig::reference()?.build()
    }
}
