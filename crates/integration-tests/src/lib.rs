//! Shared fixtures for Orderly integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;

use orderly_core::{PaymentMethodId, ProductId, ShippingMethodId, TaxRuleId};
use orderly_pricing::{
    Coupon, CountryRate, DiscountType, LineItem, PaymentFeeType, PaymentMethod, QuoteRequest,
    ShippingMethod, ShippingMethodType, TaxPolicy, TaxRule,
};

/// A bare quote request for a destination, with everything else empty.
#[must_use]
pub fn request(items: Vec<LineItem>) -> QuoteRequest {
    QuoteRequest {
        items,
        fallbacks: std::collections::HashMap::new(),
        product_categories: std::collections::HashMap::new(),
        coupon: None,
        tax_rules: vec![],
        destination_country: "US".to_string(),
        shipping_method: None,
        payment_method: None,
        tax_policy: TaxPolicy::default(),
    }
}

/// A plain line item with no options and no tax rule.
#[must_use]
pub fn line(product_id: &str, unit_price: i64, quantity: u32) -> LineItem {
    LineItem {
        product_id: ProductId::new(product_id),
        quantity,
        unit_price: Decimal::from(unit_price),
        selected_options: vec![],
        tax_rule_id: None,
    }
}

/// An unrestricted, always-valid coupon of the given type and value.
#[must_use]
pub fn coupon(discount_type: DiscountType, value: i64) -> Coupon {
    Coupon {
        code: "TEST".to_string(),
        discount_type,
        discount_value: Decimal::from(value),
        max_discount_amount: None,
        min_purchase_amount: None,
        applicable_product_ids: vec![],
        applicable_category_ids: vec![],
        start_date: None,
        end_date: None,
        usage_limit: None,
        usage_count: 0,
        is_active: true,
    }
}

/// A single-country tax rule with a percent rate.
#[must_use]
pub fn tax_rule(id: &str, country: &str, rate: i64) -> TaxRule {
    TaxRule {
        id: TaxRuleId::new(id),
        country_rates: vec![CountryRate {
            country: country.to_string(),
            rate: Decimal::from(rate),
        }],
    }
}

/// A free-over-threshold shipping method.
#[must_use]
pub fn free_shipping_method(threshold: i64, flat_rate: i64) -> ShippingMethod {
    ShippingMethod {
        id: ShippingMethodId::new("ship-std"),
        method_type: ShippingMethodType::FreeShipping,
        flat_rate_cost: Decimal::from(flat_rate),
        free_shipping_min_order: Decimal::from(threshold),
    }
}

/// A percentage-fee payment method.
#[must_use]
pub fn percentage_fee_method(percent: i64) -> PaymentMethod {
    PaymentMethod {
        id: PaymentMethodId::new("pay-card"),
        fee_type: PaymentFeeType::Percentage,
        fee_amount: Decimal::from(percent),
    }
}
