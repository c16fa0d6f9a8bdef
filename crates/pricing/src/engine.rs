//! The pure pricing computations.
//!
//! Every function here is a deterministic function of its explicit
//! arguments. Amounts never go negative: each step clamps at zero, and
//! a discount can never exceed the subtotal it applies to. Arithmetic
//! on snapshot amounts is checked, with overflow coercing to zero the
//! same way malformed fields do. Final [`OrderTotals`] components are
//! rounded to 2 decimal places.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderly_core::{
    ProductId, add_or_zero, clamp_non_negative, mul_or_zero, round_money, sum_or_zero,
};

use crate::cart::{LineItem, PriceFallback};
use crate::coupon::{Coupon, DiscountType};
use crate::methods::{PaymentFeeType, PaymentMethod, ShippingMethod, ShippingMethodType, TaxRule};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// When tax is assessed relative to the order discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxPolicy {
    /// Tax each line on its pre-discount total. This matches the
    /// storefront's historical behavior.
    #[default]
    BeforeDiscount,
    /// Prorate the order discount across lines by their share of the
    /// subtotal, then tax the reduced amounts.
    AfterDiscount,
}

impl std::fmt::Display for TaxPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BeforeDiscount => write!(f, "before-discount"),
            Self::AfterDiscount => write!(f, "after-discount"),
        }
    }
}

impl std::str::FromStr for TaxPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "before-discount" | "before_discount" => Ok(Self::BeforeDiscount),
            "after-discount" | "after_discount" => Ok(Self::AfterDiscount),
            other => Err(format!("unknown tax policy: {other}")),
        }
    }
}

/// The derived totals for an order. Immutable output value; all amounts
/// are rounded to 2 decimal places and non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of all line totals before any adjustment.
    pub subtotal: Decimal,
    /// Coupon discount amount (never exceeds `subtotal`).
    pub discount: Decimal,
    /// Total tax across lines.
    pub tax: Decimal,
    /// Shipping cost after threshold/coupon exemptions.
    pub shipping_cost: Decimal,
    /// Payment method fee.
    pub payment_fee: Decimal,
    /// `subtotal - discount + shipping_cost + payment_fee + tax`.
    pub total: Decimal,
}

impl OrderTotals {
    /// All-zero totals, returned for an empty cart.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            payment_fee: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Total for one line: `(effective unit price + option surcharges) * quantity`.
///
/// The recorded `unit_price` wins when positive; otherwise the catalog
/// fallback's effective price is used; otherwise the line prices at
/// zero. Never fails: malformed inputs have already been coerced to
/// zero/one at the deserialization boundary, a negative result clamps
/// to zero, and magnitudes too large for `Decimal` coerce to zero.
#[must_use]
pub fn line_total(item: &LineItem, fallback: Option<&PriceFallback>) -> Decimal {
    let unit_price = if item.unit_price > Decimal::ZERO {
        item.unit_price
    } else {
        fallback.map_or(Decimal::ZERO, PriceFallback::effective_price)
    };
    let options_surcharge = sum_or_zero(item.selected_options.iter().map(|o| o.price));
    let per_unit = add_or_zero(unit_price, options_surcharge);
    clamp_non_negative(mul_or_zero(per_unit, Decimal::from(item.quantity)))
}

/// Sum of [`line_total`] over all items. Empty cart prices at zero.
#[must_use]
pub fn subtotal(items: &[LineItem], fallbacks: &HashMap<ProductId, PriceFallback>) -> Decimal {
    sum_or_zero(
        items
            .iter()
            .map(|item| line_total(item, fallbacks.get(&item.product_id))),
    )
}

/// Discount amount for a coupon against a subtotal.
///
/// Fixed coupons clamp to the subtotal; percentage coupons clamp to
/// `max_discount_amount` (when set) and then to the subtotal.
/// Free-shipping coupons contribute nothing here: their benefit is a
/// shipping exemption, applied in [`shipping_cost`].
#[must_use]
pub fn discount(subtotal: Decimal, coupon: Option<&Coupon>) -> Decimal {
    let Some(coupon) = coupon else {
        return Decimal::ZERO;
    };
    let amount = match coupon.discount_type {
        DiscountType::Fixed => coupon.discount_value,
        DiscountType::Percentage => {
            let raw = mul_or_zero(subtotal, coupon.discount_value) / ONE_HUNDRED;
            match coupon.max_discount_amount {
                Some(cap) if cap > Decimal::ZERO => raw.min(cap),
                _ => raw,
            }
        }
        DiscountType::FreeShipping => Decimal::ZERO,
    };
    clamp_non_negative(amount).min(clamp_non_negative(subtotal))
}

/// Total tax across all lines for a destination country.
///
/// Each line's rate comes from the tax rule it references (zero when it
/// references none, or the rule lists no rate for the country). Under
/// [`TaxPolicy::AfterDiscount`] the order discount is prorated across
/// lines by their share of the subtotal before the rate is applied.
#[must_use]
pub fn tax(
    items: &[LineItem],
    fallbacks: &HashMap<ProductId, PriceFallback>,
    tax_rules: &[TaxRule],
    destination_country: &str,
    discount: Decimal,
    policy: TaxPolicy,
) -> Decimal {
    let base = subtotal(items, fallbacks);
    if base <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let taxable_ratio = match policy {
        TaxPolicy::BeforeDiscount => Decimal::ONE,
        TaxPolicy::AfterDiscount => {
            (base - clamp_non_negative(discount).min(base)) / base
        }
    };

    let total = sum_or_zero(items.iter().map(|item| {
        let rate = item
            .tax_rule_id
            .as_ref()
            .and_then(|id| tax_rules.iter().find(|rule| &rule.id == id))
            .map_or(Decimal::ZERO, |rule| rule.rate_for(destination_country));
        if rate <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let taxable = mul_or_zero(
            line_total(item, fallbacks.get(&item.product_id)),
            taxable_ratio,
        );
        mul_or_zero(taxable, rate) / ONE_HUNDRED
    }));
    clamp_non_negative(total)
}

/// Shipping cost for the selected method.
///
/// No method selected prices at zero. A valid, applied free-shipping
/// coupon waives the cost entirely. A free-shipping method waives it
/// when the subtotal meets its threshold (inclusive) and otherwise
/// falls back to its flat rate.
#[must_use]
pub fn shipping_cost(
    method: Option<&ShippingMethod>,
    subtotal: Decimal,
    free_shipping_coupon_applied: bool,
) -> Decimal {
    let Some(method) = method else {
        return Decimal::ZERO;
    };
    if free_shipping_coupon_applied {
        return Decimal::ZERO;
    }
    match method.method_type {
        ShippingMethodType::FreeShipping if subtotal >= method.free_shipping_min_order => {
            Decimal::ZERO
        }
        ShippingMethodType::FreeShipping | ShippingMethodType::FlatRate => {
            clamp_non_negative(method.flat_rate_cost)
        }
    }
}

/// Payment fee for the selected method, computed against the
/// pre-discount subtotal.
#[must_use]
pub fn payment_fee(method: Option<&PaymentMethod>, subtotal: Decimal) -> Decimal {
    let Some(method) = method else {
        return Decimal::ZERO;
    };
    if method.fee_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match method.fee_type {
        PaymentFeeType::None => Decimal::ZERO,
        PaymentFeeType::Fixed => method.fee_amount,
        PaymentFeeType::Percentage => {
            mul_or_zero(clamp_non_negative(subtotal), method.fee_amount) / ONE_HUNDRED
        }
    }
}

/// Derive the complete [`OrderTotals`] for a cart.
///
/// The coupon passed here is assumed to have already passed
/// applicability validation (see [`crate::quote::quote`], which handles
/// the validate-then-drop lifecycle). An empty cart yields all-zero
/// totals regardless of the other inputs.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn order_totals(
    items: &[LineItem],
    fallbacks: &HashMap<ProductId, PriceFallback>,
    coupon: Option<&Coupon>,
    tax_rules: &[TaxRule],
    destination_country: &str,
    shipping_method: Option<&ShippingMethod>,
    payment_method: Option<&PaymentMethod>,
    policy: TaxPolicy,
) -> OrderTotals {
    if items.is_empty() {
        return OrderTotals::zero();
    }

    let subtotal_amount = subtotal(items, fallbacks);
    let discount_amount = discount(subtotal_amount, coupon);
    let tax_amount = tax(
        items,
        fallbacks,
        tax_rules,
        destination_country,
        discount_amount,
        policy,
    );
    let free_shipping_applied =
        coupon.is_some_and(|c| c.discount_type == DiscountType::FreeShipping);
    let shipping_amount = shipping_cost(shipping_method, subtotal_amount, free_shipping_applied);
    let fee_amount = payment_fee(payment_method, subtotal_amount);

    let subtotal_amount = round_money(subtotal_amount);
    let discount_amount = round_money(discount_amount).min(subtotal_amount);
    let tax_amount = round_money(tax_amount);
    let shipping_amount = round_money(shipping_amount);
    let fee_amount = round_money(fee_amount);

    OrderTotals {
        subtotal: subtotal_amount,
        discount: discount_amount,
        tax: tax_amount,
        shipping_cost: shipping_amount,
        payment_fee: fee_amount,
        total: sum_or_zero([
            subtotal_amount - discount_amount,
            shipping_amount,
            fee_amount,
            tax_amount,
        ]),
    }
}
