//! `orderly quote` - price a cart snapshot.

use std::io::Write;
use std::path::Path;

use chrono::Utc;

use super::{CliError, load_request};

/// Price the snapshot at `now` and print the quote as JSON on stdout.
pub fn run(input: &Path, pretty: bool) -> Result<(), CliError> {
    let request = load_request(input)?;
    let quote = orderly_pricing::quote(&request, Utc::now());

    let json = if pretty {
        serde_json::to_string_pretty(&quote)?
    } else {
        serde_json::to_string(&quote)?
    };

    // stdout is the command's output channel, logging goes to stderr
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").ok();

    if let Some(rejection) = &quote.coupon_rejection {
        tracing::warn!(reason = %rejection, "coupon was dropped from the quote");
    }

    Ok(())
}
