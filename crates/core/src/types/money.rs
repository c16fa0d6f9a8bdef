//! Money helpers: rounding, clamping, and lenient deserialization.
//!
//! All monetary amounts in Orderly are `rust_decimal::Decimal`. Cart
//! snapshots arrive from an external backend that is not always
//! well-formed (prices as strings, missing quantities, nulls), and a
//! malformed field must never fail an entire quote. The `lenient_*`
//! deserializers coerce anything unparseable to a safe default instead
//! of returning an error.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};

/// Round a monetary amount to 2 decimal places, midpoint away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamp an amount to zero if negative.
#[must_use]
pub fn clamp_non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

/// Multiply two amounts, coercing overflow to zero.
///
/// Snapshot magnitudes are untrusted: two values that each fit a
/// `Decimal` can still overflow when combined, and pricing must never
/// panic on bad upstream data.
#[must_use]
pub fn mul_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::ZERO)
}

/// Add two amounts, coercing overflow to zero.
#[must_use]
pub fn add_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::ZERO)
}

/// Sum amounts, coercing overflow to zero.
#[must_use]
pub fn sum_or_zero<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .unwrap_or(Decimal::ZERO)
}

/// Deserialize a monetary amount leniently.
///
/// Accepts a JSON number, a numeric string, or null. Anything else
/// (or an unparseable string) coerces to `Decimal::ZERO`. Pair with
/// `#[serde(default)]` so a missing field also lands on zero.
///
/// # Errors
///
/// Only fails if the underlying input is not valid JSON at all.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(Decimal::ZERO, coerce_amount))
}

/// Deserialize a line quantity leniently.
///
/// Accepts a JSON integer, float (truncated), or numeric string. Any
/// missing, non-numeric, or sub-1 value coerces to 1.
///
/// # Errors
///
/// Only fails if the underlying input is not valid JSON at all.
pub fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(1, coerce_quantity))
}

/// Default quantity for `#[serde(default = ...)]` on missing fields.
#[must_use]
pub const fn default_quantity() -> u32 {
    1
}

fn coerce_amount(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else {
                // Non-finite floats never survive JSON parsing, but a
                // huge magnitude can still overflow Decimal.
                n.as_f64().and_then(Decimal::from_f64).unwrap_or(Decimal::ZERO)
            }
        }
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn coerce_quantity(value: &serde_json::Value) -> u32 {
    let quantity = match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(1),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(1),
        _ => 1,
    };
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(json: &str) -> Decimal {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(default, deserialize_with = "lenient_amount")]
            value: Decimal,
        }
        let payload: Payload = serde_json::from_str(json).expect("valid json");
        payload.value
    }

    fn quantity(json: &str) -> u32 {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(
                default = "default_quantity",
                deserialize_with = "lenient_quantity"
            )]
            value: u32,
        }
        let payload: Payload = serde_json::from_str(json).expect("valid json");
        payload.value
    }

    #[test]
    fn test_round_money_midpoint_away_from_zero() {
        assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2)); // 12.345 -> 12.35
        assert_eq!(round_money(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
        assert_eq!(round_money(Decimal::new(105, 2)), Decimal::new(105, 2));
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(clamp_non_negative(Decimal::new(-5, 0)), Decimal::ZERO);
        assert_eq!(clamp_non_negative(Decimal::new(5, 0)), Decimal::new(5, 0));
    }

    #[test]
    fn test_mul_or_zero_coerces_overflow() {
        assert_eq!(mul_or_zero(Decimal::from(6), Decimal::from(7)), Decimal::from(42));
        assert_eq!(mul_or_zero(Decimal::MAX, Decimal::from(2)), Decimal::ZERO);
    }

    #[test]
    fn test_add_or_zero_coerces_overflow() {
        assert_eq!(add_or_zero(Decimal::from(1), Decimal::from(2)), Decimal::from(3));
        assert_eq!(add_or_zero(Decimal::MAX, Decimal::ONE), Decimal::ZERO);
    }

    #[test]
    fn test_sum_or_zero_coerces_overflow() {
        let amounts = [Decimal::from(1), Decimal::from(2), Decimal::from(3)];
        assert_eq!(sum_or_zero(amounts), Decimal::from(6));
        assert_eq!(sum_or_zero([Decimal::MAX, Decimal::MAX]), Decimal::ZERO);
        assert_eq!(sum_or_zero(std::iter::empty::<Decimal>()), Decimal::ZERO);
    }

    #[test]
    fn test_lenient_amount_accepts_numbers_and_strings() {
        assert_eq!(amount(r#"{"value": 19.99}"#), Decimal::new(1999, 2));
        assert_eq!(amount(r#"{"value": "19.99"}"#), Decimal::new(1999, 2));
        assert_eq!(amount(r#"{"value": 7}"#), Decimal::from(7));
    }

    #[test]
    fn test_lenient_amount_coerces_garbage_to_zero() {
        assert_eq!(amount(r#"{"value": "abc"}"#), Decimal::ZERO);
        assert_eq!(amount(r#"{"value": null}"#), Decimal::ZERO);
        assert_eq!(amount(r#"{"value": [1, 2]}"#), Decimal::ZERO);
        assert_eq!(amount(r"{}"), Decimal::ZERO);
    }

    #[test]
    fn test_lenient_quantity_coerces_invalid_to_one() {
        assert_eq!(quantity(r#"{"value": 3}"#), 3);
        assert_eq!(quantity(r#"{"value": "4"}"#), 4);
        assert_eq!(quantity(r#"{"value": "abc"}"#), 1);
        assert_eq!(quantity(r#"{"value": 0}"#), 1);
        assert_eq!(quantity(r#"{"value": -2}"#), 1);
        assert_eq!(quantity(r"{}"), 1);
    }
}
