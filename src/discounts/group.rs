//! Group Discounts
//!
//! "Any N of these SKUs for a flat price". Member units are ranked by unit price and the
//! most expensive ones are grouped first, so the customer saves as much as possible. Each
//! group formed moves `size` units out of their product lines and adds one unit of the
//! discount's synthetic group SKU, which the rule table prices at the flat price.

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    cart::Cart,
    rules::{PricingError, RuleTable},
    skus::{GroupKey, Sku, SkuId},
};

/// Any `size` units drawn from `members` cost `price`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDiscount {
    key: GroupKey,
    name: String,
    members: SmallVec<[Sku; 5]>,
    size: u64,
    price: u64,
}

impl GroupDiscount {
    /// Create a new group discount.
    ///
    /// Members keep their given order, which breaks ties between equally priced units.
    pub fn new(
        key: GroupKey,
        name: impl Into<String>,
        members: SmallVec<[Sku; 5]>,
        size: u64,
        price: u64,
    ) -> Self {
        Self {
            key,
            name: name.into(),
            members,
            size,
            price,
        }
    }

    /// Return the group key, which also identifies the synthetic group SKU.
    pub fn key(&self) -> GroupKey {
        self.key
    }

    /// Return the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the member SKUs in tiebreak order.
    pub fn members(&self) -> &[Sku] {
        &self.members
    }

    /// Return the number of units per group.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Return the flat price of one group.
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Return the synthetic SKU groups are counted under.
    pub fn sku(&self) -> SkuId {
        SkuId::Group(self.key)
    }
}

/// Member units present in the cart for one SKU.
#[derive(Debug)]
struct MemberUnits<'a> {
    sku: &'a Sku,
    unit_price: u64,
    count: u64,
}

/// Replace the most expensive member units with group units, for every group discount in
/// registration order.
///
/// # Errors
///
/// Returns [`PricingError::UnknownSku`] if a member has no unit price in `table`.
pub fn apply_group_discounts(cart: &mut Cart, table: &RuleTable) -> Result<(), PricingError> {
    for group in table.groups() {
        let mut units: SmallVec<[MemberUnits<'_>; 5]> = SmallVec::new();

        for sku in group.members() {
            let count = cart.count_of(sku);

            if count == 0 {
                continue;
            }

            units.push(MemberUnits {
                sku,
                unit_price: table.unit_price(sku)?,
                count,
            });
        }

        let matching_units = units
            .iter()
            .fold(0_u64, |total, member| total.saturating_add(member.count));

        let groups_formed = matching_units.checked_div(group.size()).unwrap_or_default();

        if groups_formed == 0 {
            continue;
        }

        // Stable, so equally priced members keep their registration order.
        units.sort_by(|a, b| b.unit_price.cmp(&a.unit_price));

        let mut to_remove = groups_formed.saturating_mul(group.size());

        for member in &units {
            if to_remove == 0 {
                break;
            }

            to_remove -= cart.remove_units(&SkuId::from(member.sku), member.count.min(to_remove));
        }

        cart.add(group.sku(), groups_formed);

        debug!(
            group = group.name(),
            matching_units, groups_formed, "applied group discount"
        );
    }

    Ok(())
}
