//! SKUs

use std::fmt;

use serde::Deserialize;
use slotmap::new_key_type;

new_key_type! {
    /// Group Discount Key
    pub struct GroupKey;
}

/// Stock-keeping unit code for one product type.
///
/// Codes are compared exactly, so `a` and `A` are different products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Create a SKU from its code.
    pub fn new(code: impl Into<String>) -> Self {
        Sku(code.into())
    }

    /// Return the SKU code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Sku {
    fn from(code: &str) -> Self {
        Sku::new(code)
    }
}

impl From<String> for Sku {
    fn from(code: String) -> Self {
        Sku(code)
    }
}

impl From<char> for Sku {
    fn from(code: char) -> Self {
        Sku(code.to_string())
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A priced line identity.
///
/// Group discounts are priced through a synthetic SKU of their own, which can never collide
/// with a product code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SkuId {
    /// A real product SKU
    Product(Sku),

    /// The synthetic SKU of a group discount
    Group(GroupKey),
}

impl SkuId {
    /// Return the product SKU, if this is not a group SKU.
    pub fn as_product(&self) -> Option<&Sku> {
        match self {
            SkuId::Product(sku) => Some(sku),
            SkuId::Group(_) => None,
        }
    }
}

impl From<Sku> for SkuId {
    fn from(sku: Sku) -> Self {
        SkuId::Product(sku)
    }
}

impl From<&Sku> for SkuId {
    fn from(sku: &Sku) -> Self {
        SkuId::Product(sku.clone())
    }
}

impl From<&str> for SkuId {
    fn from(code: &str) -> Self {
        SkuId::Product(Sku::from(code))
    }
}

impl From<char> for SkuId {
    fn from(code: char) -> Self {
        SkuId::Product(Sku::from(code))
    }
}

impl From<GroupKey> for SkuId {
    fn from(key: GroupKey) -> Self {
        SkuId::Group(key)
    }
}

impl fmt::Display for SkuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkuId::Product(sku) => sku.fmt(f),
            SkuId::Group(key) => write!(f, "group {key:?}"),
        }
    }
}
