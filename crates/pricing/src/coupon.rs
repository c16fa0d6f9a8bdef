//! Coupon records and applicability rules.
//!
//! A coupon is *applicable* to a cart iff it is active, inside its date
//! window, under its usage limit, the subtotal meets its minimum, and
//! (when restricted) at least one line matches its product/category
//! lists. Applicability is re-checked on every quote, not just at
//! apply-time: removing items can invalidate a previously applied
//! coupon, and callers are expected to clear it when that happens.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use orderly_core::{CategoryId, ProductId};

use crate::cart::LineItem;

/// How a coupon reduces the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Fixed amount off the subtotal.
    Fixed,
    /// Percentage off the subtotal.
    Percentage,
    /// Shipping cost waived; contributes nothing to the discount amount.
    FreeShipping,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed Amount"),
            Self::Percentage => write!(f, "Percentage"),
            Self::FreeShipping => write!(f, "Free Shipping"),
        }
    }
}

/// A coupon record as supplied by the coupon lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// The code the shopper entered.
    pub code: String,
    /// Kind of discount.
    pub discount_type: DiscountType,
    /// Amount off (fixed) or percent off (percentage).
    #[serde(default, deserialize_with = "orderly_core::types::money::lenient_amount")]
    pub discount_value: Decimal,
    /// Cap on percentage discounts.
    #[serde(default)]
    pub max_discount_amount: Option<Decimal>,
    /// Minimum subtotal for the coupon to apply.
    #[serde(default)]
    pub min_purchase_amount: Option<Decimal>,
    /// When non-empty, at least one cart line must be one of these
    /// products.
    #[serde(default)]
    pub applicable_product_ids: Vec<ProductId>,
    /// When non-empty, at least one cart line must belong to one of
    /// these categories.
    #[serde(default)]
    pub applicable_category_ids: Vec<CategoryId>,
    /// Start of the validity window.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// End of the validity window.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Maximum number of redemptions, when limited.
    #[serde(default)]
    pub usage_limit: Option<i64>,
    /// Redemptions so far.
    #[serde(default)]
    pub usage_count: i64,
    /// Whether the coupon is enabled at all.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

/// Why a coupon cannot be applied to a cart.
///
/// These are expected, user-facing conditions, not faults; callers map
/// them to display messages. The engine only emits the first failing
/// reason.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponRejection {
    /// Coupon is disabled.
    #[error("coupon is not active")]
    Inactive,
    /// Validity window has closed.
    #[error("coupon has expired")]
    Expired,
    /// Validity window has not opened yet.
    #[error("coupon is not active yet")]
    NotStarted,
    /// All redemptions have been used.
    #[error("coupon usage limit reached")]
    UsageLimitReached,
    /// Subtotal is below the coupon's minimum.
    #[error("subtotal below the minimum purchase of {required}")]
    BelowMinimumPurchase {
        /// The minimum subtotal the coupon demands.
        required: Decimal,
    },
    /// Product restriction present and no cart line matches it.
    #[error("no cart item is eligible for this coupon")]
    NoMatchingProduct,
    /// Category restriction present and no cart line matches it.
    #[error("no cart item is in an eligible category")]
    NoMatchingCategory,
}

impl Coupon {
    /// Check whether this coupon may be applied to the given cart.
    ///
    /// Checks run in a fixed order and short-circuit on the first
    /// failure, so callers always get the most fundamental reason:
    /// active, date window, usage limit, minimum purchase, product
    /// restriction, category restriction.
    ///
    /// `product_categories` maps each cart product to the categories it
    /// belongs to; products missing from the map simply match no
    /// category restriction.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`CouponRejection`].
    pub fn validate_applicability(
        &self,
        items: &[LineItem],
        product_categories: &HashMap<ProductId, Vec<CategoryId>>,
        subtotal: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), CouponRejection> {
        if !self.is_active {
            return Err(CouponRejection::Inactive);
        }
        if self.end_date.is_some_and(|end| end < now) {
            return Err(CouponRejection::Expired);
        }
        if self.start_date.is_some_and(|start| start > now) {
            return Err(CouponRejection::NotStarted);
        }
        if self
            .usage_limit
            .is_some_and(|limit| self.usage_count >= limit)
        {
            return Err(CouponRejection::UsageLimitReached);
        }
        if let Some(required) = self.min_purchase_amount
            && subtotal < required
        {
            return Err(CouponRejection::BelowMinimumPurchase { required });
        }
        if !self.applicable_product_ids.is_empty()
            && !items
                .iter()
                .any(|item| self.applicable_product_ids.contains(&item.product_id))
        {
            return Err(CouponRejection::NoMatchingProduct);
        }
        if !self.applicable_category_ids.is_empty()
            && !items.iter().any(|item| {
                product_categories
                    .get(&item.product_id)
                    .is_some_and(|categories| {
                        categories
                            .iter()
                            .any(|c| self.applicable_category_ids.contains(c))
                    })
            })
        {
            return Err(CouponRejection::NoMatchingCategory);
        }
        Ok(())
    }
}
