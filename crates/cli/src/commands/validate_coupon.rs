//! `orderly validate-coupon` - applicability check without pricing.

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use orderly_pricing::engine;

use super::{CliError, load_request};

/// Validate the snapshot's coupon against its cart and report the
/// verdict. Exits non-zero (code 2) when the coupon is rejected so the
/// command is usable from scripts.
pub fn run(input: &Path) -> Result<(), CliError> {
    let request = load_request(input)?;
    let mut stdout = std::io::stdout().lock();

    let Some(coupon) = &request.coupon else {
        writeln!(stdout, "no coupon in snapshot").ok();
        return Ok(());
    };

    let subtotal = engine::subtotal(&request.items, &request.fallbacks);
    match coupon.validate_applicability(
        &request.items,
        &request.product_categories,
        subtotal,
        Utc::now(),
    ) {
        Ok(()) => {
            writeln!(stdout, "coupon {} is applicable", coupon.code).ok();
            Ok(())
        }
        Err(rejection) => {
            writeln!(stdout, "coupon {} rejected: {rejection}", coupon.code).ok();
            Err(CliError::CouponRejected(rejection))
        }
    }
}
