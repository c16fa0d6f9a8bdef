//! Orderly Pricing - deterministic order-total derivation.
//!
//! This crate computes order totals (subtotal, coupon discount, tax,
//! shipping cost, payment fee, grand total) from a cart snapshot and the
//! shopper's selected shipping/payment methods. Everything is a pure
//! function of its inputs: no I/O, no clocks (callers pass `now`), no
//! shared state, so the engine is safe to call repeatedly and
//! concurrently.
//!
//! # Modules
//!
//! - [`cart`] - Line items, selected options, and catalog price fallbacks
//! - [`coupon`] - Coupon records, applicability checks, rejection reasons
//! - [`methods`] - Tax rules and shipping/payment method catalogs
//! - [`engine`] - The pure computation functions and [`OrderTotals`]
//! - [`quote`] - One-shot quoting over a serde-friendly request snapshot
//!
//! # Failure semantics
//!
//! Malformed numeric data (a price arriving as `"abc"`, a missing
//! quantity) is coerced to safe defaults at the deserialization boundary
//! and never surfaces as an error; pricing must stay resilient to
//! partial upstream data. Business-rule failures (expired coupon, below
//! minimum purchase) are typed [`coupon::CouponRejection`] reason codes,
//! never panics.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod coupon;
pub mod engine;
pub mod methods;
pub mod quote;

pub use cart::{LineItem, PriceFallback, SelectedOption};
pub use coupon::{Coupon, CouponRejection, DiscountType};
pub use engine::{OrderTotals, TaxPolicy};
pub use methods::{
    CountryRate, PaymentFeeType, PaymentMethod, ShippingMethod, ShippingMethodType, TaxRule,
};
pub use quote::{Quote, QuoteRequest, quote};
