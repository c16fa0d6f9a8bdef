//! Tax rules and shipping/payment method catalogs.
//!
//! These records are supplied by the store's settings backend; the
//! engine treats them as read-only lookups.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderly_core::{PaymentMethodId, ShippingMethodId, TaxRuleId};

/// A per-country tax rate entry inside a [`TaxRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRate {
    /// Destination country code (ISO 3166-1 alpha-2, e.g. "US").
    pub country: String,
    /// Rate in percent (8 means 8%).
    #[serde(default, deserialize_with = "orderly_core::types::money::lenient_amount")]
    pub rate: Decimal,
}

/// A tax rule: an ordered country-to-rate table.
///
/// Rates are keyed by the *destination* (shipping) country resolved at
/// checkout time, not the store's origin country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRule {
    /// Rule identifier, referenced by product lines.
    pub id: TaxRuleId,
    /// Country rate table, first match wins.
    #[serde(default)]
    pub country_rates: Vec<CountryRate>,
}

impl TaxRule {
    /// Rate (in percent) for a destination country; zero when the
    /// country has no listed rate.
    #[must_use]
    pub fn rate_for(&self, destination_country: &str) -> Decimal {
        self.country_rates
            .iter()
            .find(|entry| entry.country.eq_ignore_ascii_case(destination_country))
            .map_or(Decimal::ZERO, |entry| entry.rate)
    }
}

/// How a shipping method charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingMethodType {
    /// Always charges the flat rate.
    FlatRate,
    /// Free above a minimum order value, flat rate below it.
    FreeShipping,
}

impl std::fmt::Display for ShippingMethodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FlatRate => write!(f, "Flat Rate"),
            Self::FreeShipping => write!(f, "Free Shipping"),
        }
    }
}

/// A selectable shipping method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingMethod {
    /// Method identifier.
    pub id: ShippingMethodId,
    /// Charging model.
    pub method_type: ShippingMethodType,
    /// Cost charged when shipping is not free.
    #[serde(default, deserialize_with = "orderly_core::types::money::lenient_amount")]
    pub flat_rate_cost: Decimal,
    /// Subtotal threshold for free shipping (inclusive).
    #[serde(default, deserialize_with = "orderly_core::types::money::lenient_amount")]
    pub free_shipping_min_order: Decimal,
}

/// How a payment method charges its fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentFeeType {
    /// No fee.
    #[default]
    None,
    /// Fixed fee per order.
    Fixed,
    /// Percentage of the pre-discount subtotal.
    Percentage,
}

impl std::fmt::Display for PaymentFeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "No Fee"),
            Self::Fixed => write!(f, "Fixed Fee"),
            Self::Percentage => write!(f, "Percentage Fee"),
        }
    }
}

/// A selectable payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Method identifier.
    pub id: PaymentMethodId,
    /// Fee model.
    #[serde(default)]
    pub fee_type: PaymentFeeType,
    /// Fee amount (fixed) or percent (percentage).
    #[serde(default, deserialize_with = "orderly_core::types::money::lenient_amount")]
    pub fee_amount: Decimal,
}
