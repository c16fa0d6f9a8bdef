//! Orderly CLI - price cart snapshots from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Price a cart snapshot
//! orderly quote --input cart.json
//!
//! # Pretty-print the quote
//! orderly quote --input cart.json --pretty
//!
//! # Check only whether the snapshot's coupon applies
//! orderly validate-coupon --input cart.json
//! ```
//!
//! # Environment
//!
//! - `ORDERLY_LOG` - tracing filter (default: `warn`)
//! - `ORDERLY_TAX_POLICY` - `before-discount` | `after-discount`,
//!   overrides the snapshot's tax policy

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "orderly")]
#[command(author, version, about = "Orderly pricing tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a cart snapshot and print the quote as JSON
    Quote {
        /// Path to a QuoteRequest JSON snapshot
        #[arg(short, long)]
        input: PathBuf,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Check whether the snapshot's coupon applies to its cart
    ValidateCoupon {
        /// Path to a QuoteRequest JSON snapshot
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ORDERLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Quote { input, pretty } => commands::quote::run(&input, pretty),
        Commands::ValidateCoupon { input } => commands::validate_coupon::run(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::CouponRejected(_)) => ExitCode::from(2),
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}
