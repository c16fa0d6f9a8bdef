//! One-shot quoting over a cart snapshot.
//!
//! [`QuoteRequest`] is the serde-friendly bundle a caller assembles from
//! its cart store, coupon lookup, tax-rule source, and method catalogs.
//! [`quote`] revalidates the coupon against the current cart on every
//! call, so a coupon that became inapplicable after a cart change is
//! dropped from the computation and its rejection reason is carried on
//! the [`Quote`] for the caller to clear and message.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderly_core::{CategoryId, ProductId};

use crate::cart::{LineItem, PriceFallback};
use crate::coupon::{Coupon, CouponRejection};
use crate::engine::{self, OrderTotals, TaxPolicy};
use crate::methods::{PaymentMethod, ShippingMethod, TaxRule};

/// Everything needed to price an order, as one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Cart line items.
    pub items: Vec<LineItem>,
    /// Catalog prices for lines whose recorded price is missing.
    #[serde(default)]
    pub fallbacks: HashMap<ProductId, PriceFallback>,
    /// Category memberships, for coupon category restrictions.
    #[serde(default)]
    pub product_categories: HashMap<ProductId, Vec<CategoryId>>,
    /// The applied coupon, if any.
    #[serde(default)]
    pub coupon: Option<Coupon>,
    /// Store tax rules.
    #[serde(default)]
    pub tax_rules: Vec<TaxRule>,
    /// Shipping destination country code.
    #[serde(default)]
    pub destination_country: String,
    /// Selected shipping method.
    #[serde(default)]
    pub shipping_method: Option<ShippingMethod>,
    /// Selected payment method.
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    /// Tax ordering policy.
    #[serde(default)]
    pub tax_policy: TaxPolicy,
}

/// Result of pricing a [`QuoteRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The derived totals.
    pub totals: OrderTotals,
    /// Whether the request's coupon survived revalidation and was
    /// priced in.
    pub coupon_applied: bool,
    /// Why the coupon was dropped, when it was. Callers should clear
    /// the applied coupon and surface a message for this reason.
    pub coupon_rejection: Option<CouponRejection>,
}

/// Price a cart snapshot at a given instant.
///
/// The coupon lifecycle lives here: the request's coupon is validated
/// against the current cart contents, and an inapplicable one is
/// excluded from the totals (no discount, no shipping exemption) rather
/// than rejected as an error. An empty cart always prices to all-zero
/// totals with no coupon applied.
#[must_use]
pub fn quote(request: &QuoteRequest, now: DateTime<Utc>) -> Quote {
    if request.items.is_empty() {
        return Quote {
            totals: OrderTotals::zero(),
            coupon_applied: false,
            coupon_rejection: None,
        };
    }

    let subtotal = engine::subtotal(&request.items, &request.fallbacks);

    let (coupon, rejection) = match &request.coupon {
        None => (None, None),
        Some(coupon) => match coupon.validate_applicability(
            &request.items,
            &request.product_categories,
            subtotal,
            now,
        ) {
            Ok(()) => (Some(coupon), None),
            Err(rejection) => {
                tracing::debug!(
                    code = %coupon.code,
                    reason = %rejection,
                    "dropping inapplicable coupon from quote"
                );
                (None, Some(rejection))
            }
        },
    };

    let totals = engine::order_totals(
        &request.items,
        &request.fallbacks,
        coupon,
        &request.tax_rules,
        &request.destination_country,
        request.shipping_method.as_ref(),
        request.payment_method.as_ref(),
        request.tax_policy,
    );

    Quote {
        totals,
        coupon_applied: coupon.is_some(),
        coupon_rejection: rejection,
    }
}
