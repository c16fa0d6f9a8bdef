//! End-to-end quoting scenarios over complete cart snapshots.

use chrono::Utc;
use rust_decimal::Decimal;

use orderly_core::TaxRuleId;
use orderly_integration_tests::{
    coupon, free_shipping_method, line, percentage_fee_method, request, tax_rule,
};
use orderly_pricing::{DiscountType, OrderTotals, TaxPolicy, quote};

// =============================================================================
// Baseline cart arithmetic
// =============================================================================

#[test]
fn test_plain_cart_totals() {
    // 2 x $10, nothing else configured
    let req = request(vec![line("prod-1", 10, 2)]);
    let result = quote(&req, Utc::now());

    assert_eq!(result.totals.subtotal, Decimal::from(20));
    assert_eq!(result.totals.discount, Decimal::ZERO);
    assert_eq!(result.totals.tax, Decimal::ZERO);
    assert_eq!(result.totals.total, Decimal::from(20));
}

#[test]
fn test_percentage_coupon_reduces_total() {
    let mut req = request(vec![line("prod-1", 10, 2)]);
    req.coupon = Some(coupon(DiscountType::Percentage, 10));

    let result = quote(&req, Utc::now());
    assert!(result.coupon_applied);
    assert_eq!(result.totals.discount, Decimal::from(2));
    assert_eq!(result.totals.total, Decimal::from(18));
}

#[test]
fn test_fixed_coupon_caps_at_subtotal() {
    let mut req = request(vec![line("prod-1", 10, 2)]);
    req.coupon = Some(coupon(DiscountType::Fixed, 50));

    let result = quote(&req, Utc::now());
    assert_eq!(result.totals.discount, Decimal::from(20));
    assert_eq!(result.totals.total, Decimal::ZERO);
}

#[test]
fn test_empty_cart_prices_to_zero_regardless_of_configuration() {
    let mut req = request(vec![]);
    req.coupon = Some(coupon(DiscountType::Fixed, 10));
    req.tax_rules = vec![tax_rule("tax-us", "US", 8)];
    req.shipping_method = Some(free_shipping_method(0, 5));
    req.payment_method = Some(percentage_fee_method(3));

    let result = quote(&req, Utc::now());
    assert_eq!(result.totals, OrderTotals::zero());
    assert!(!result.coupon_applied);
}

// =============================================================================
// Shipping thresholds
// =============================================================================

#[test]
fn test_free_shipping_at_exact_threshold() {
    let mut req = request(vec![line("prod-1", 10, 2)]);
    req.shipping_method = Some(free_shipping_method(20, 5));

    let result = quote(&req, Utc::now());
    assert_eq!(result.totals.shipping_cost, Decimal::ZERO);
}

#[test]
fn test_flat_rate_one_cent_below_threshold() {
    // 19.99 subtotal, one cent under the threshold
    let mut req = request(vec![{
        let mut l = line("prod-1", 0, 1);
        l.unit_price = Decimal::new(1999, 2);
        l
    }]);
    req.shipping_method = Some(free_shipping_method(20, 5));

    let result = quote(&req, Utc::now());
    assert_eq!(result.totals.subtotal, Decimal::new(1999, 2));
    assert_eq!(result.totals.shipping_cost, Decimal::from(5));
    assert_eq!(result.totals.total, Decimal::new(2499, 2));
}

#[test]
fn test_free_shipping_coupon_zeroes_shipping_below_threshold() {
    let mut req = request(vec![line("prod-1", 10, 1)]);
    req.shipping_method = Some(free_shipping_method(100, 5));
    req.coupon = Some(coupon(DiscountType::FreeShipping, 0));

    let result = quote(&req, Utc::now());
    assert!(result.coupon_applied);
    // The coupon's benefit is the shipping exemption, not a discount.
    assert_eq!(result.totals.discount, Decimal::ZERO);
    assert_eq!(result.totals.shipping_cost, Decimal::ZERO);
    assert_eq!(result.totals.total, Decimal::from(10));
}

// =============================================================================
// Tax and payment fees
// =============================================================================

#[test]
fn test_tax_by_destination_country() {
    let mut req = request(vec![{
        let mut l = line("prod-1", 100, 1);
        l.tax_rule_id = Some(TaxRuleId::new("tax-us"));
        l
    }]);
    req.tax_rules = vec![tax_rule("tax-us", "US", 8)];

    let result = quote(&req, Utc::now());
    assert_eq!(result.totals.tax, Decimal::from(8));
    assert_eq!(result.totals.total, Decimal::from(108));

    req.destination_country = "DE".to_string();
    let result = quote(&req, Utc::now());
    assert_eq!(result.totals.tax, Decimal::ZERO);
}

#[test]
fn test_percentage_payment_fee_on_pre_discount_subtotal() {
    let mut req = request(vec![line("prod-1", 100, 1)]);
    req.payment_method = Some(percentage_fee_method(3));
    req.coupon = Some(coupon(DiscountType::Fixed, 50));

    let result = quote(&req, Utc::now());
    // Fee is 3% of the pre-discount subtotal, not of 50.
    assert_eq!(result.totals.payment_fee, Decimal::from(3));
    assert_eq!(result.totals.total, Decimal::from(53));
}

#[test]
fn test_tax_policy_changes_taxable_base() {
    let mut req = request(vec![{
        let mut l = line("prod-1", 100, 1);
        l.tax_rule_id = Some(TaxRuleId::new("tax-us"));
        l
    }]);
    req.tax_rules = vec![tax_rule("tax-us", "US", 10)];
    req.coupon = Some(coupon(DiscountType::Percentage, 50));

    let before = quote(&req, Utc::now());
    assert_eq!(before.totals.tax, Decimal::from(10));

    req.tax_policy = TaxPolicy::AfterDiscount;
    let after = quote(&req, Utc::now());
    assert_eq!(after.totals.tax, Decimal::from(5));
}

// =============================================================================
// Full stack-up
// =============================================================================

#[test]
fn test_all_components_compose() {
    let mut req = request(vec![{
        let mut l = line("prod-1", 50, 2);
        l.tax_rule_id = Some(TaxRuleId::new("tax-us"));
        l
    }]);
    req.coupon = Some(coupon(DiscountType::Percentage, 10));
    req.tax_rules = vec![tax_rule("tax-us", "US", 8)];
    req.shipping_method = Some(free_shipping_method(200, 5));
    req.payment_method = Some(percentage_fee_method(3));

    let result = quote(&req, Utc::now());
    assert_eq!(result.totals.subtotal, Decimal::from(100));
    assert_eq!(result.totals.discount, Decimal::from(10));
    assert_eq!(result.totals.tax, Decimal::from(8));
    assert_eq!(result.totals.shipping_cost, Decimal::from(5));
    assert_eq!(result.totals.payment_fee, Decimal::from(3));
    assert_eq!(result.totals.total, Decimal::from(106));
}

#[test]
fn test_quote_is_idempotent() {
    let mut req = request(vec![line("prod-1", 10, 3), line("prod-2", 7, 2)]);
    req.coupon = Some(coupon(DiscountType::Percentage, 15));
    req.shipping_method = Some(free_shipping_method(100, 4));

    let now = Utc::now();
    assert_eq!(quote(&req, now), quote(&req, now));
}
