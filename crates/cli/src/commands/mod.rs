//! CLI command implementations.

pub mod quote;
pub mod validate_coupon;

use std::path::Path;

use orderly_pricing::{CouponRejection, QuoteRequest, TaxPolicy};
use thiserror::Error;

/// Errors a CLI command can surface.
#[derive(Debug, Error)]
pub enum CliError {
    /// Snapshot file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be parsed or output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `ORDERLY_TAX_POLICY` is set to an unknown value.
    #[error("invalid ORDERLY_TAX_POLICY: {0}")]
    InvalidTaxPolicy(String),

    /// The snapshot's coupon does not apply (validate-coupon only).
    #[error("coupon rejected: {0}")]
    CouponRejected(CouponRejection),
}

/// Load a `QuoteRequest` snapshot, applying the `ORDERLY_TAX_POLICY`
/// environment override when present.
pub fn load_request(path: &Path) -> Result<QuoteRequest, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.display().to_string(),
        source,
    })?;
    let mut request: QuoteRequest = serde_json::from_str(&raw)?;

    if let Ok(policy) = std::env::var("ORDERLY_TAX_POLICY") {
        request.tax_policy = policy
            .parse::<TaxPolicy>()
            .map_err(CliError::InvalidTaxPolicy)?;
    }

    Ok(request)
}
