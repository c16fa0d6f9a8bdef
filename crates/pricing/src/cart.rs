//! Cart line items and catalog price fallbacks.
//!
//! Line items are owned by the cart session; the engine only reads them.
//! Snapshots come from an external backend that is not always
//! well-formed, so the monetary fields deserialize through the lenient
//! coercion helpers in `orderly-core` (garbage prices become zero,
//! missing quantities become 1) rather than failing the whole cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderly_core::{ProductId, TaxRuleId};

/// A per-unit add-on chosen for a line item (e.g. a variant upgrade).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g. "Gift wrap").
    pub name: String,
    /// Additive per-unit surcharge. Missing or unparseable values count
    /// as zero.
    #[serde(default, deserialize_with = "orderly_core::types::money::lenient_amount")]
    pub price: Decimal,
}

/// One product entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog product this line refers to.
    pub product_id: ProductId,
    /// Units of the product. Invalid or missing values default to 1.
    #[serde(
        default = "orderly_core::types::money::default_quantity",
        deserialize_with = "orderly_core::types::money::lenient_quantity"
    )]
    pub quantity: u32,
    /// Price recorded when the item was added to the cart. Authoritative
    /// over the catalog price when positive; otherwise the engine falls
    /// back to [`PriceFallback`].
    #[serde(default, deserialize_with = "orderly_core::types::money::lenient_amount")]
    pub unit_price: Decimal,
    /// Per-unit option surcharges, in selection order.
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    /// Tax rule associated with the product, if any. Lines without one
    /// are untaxed.
    #[serde(default)]
    pub tax_rule_id: Option<TaxRuleId>,
}

/// Catalog price used when a line's recorded `unit_price` is absent or
/// non-positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFallback {
    /// Current catalog price.
    #[serde(default, deserialize_with = "orderly_core::types::money::lenient_amount")]
    pub price: Decimal,
    /// Strike-through compare price, when the product is on sale.
    #[serde(default)]
    pub compare_price: Option<Decimal>,
}

impl PriceFallback {
    /// Effective fallback price: when a positive `compare_price` differs
    /// from `price`, the shopper pays the lower of the two.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match self.compare_price {
            Some(compare) if compare > Decimal::ZERO && compare != self.price => {
                self.price.min(compare)
            }
            _ => self.price,
        }
    }
}
