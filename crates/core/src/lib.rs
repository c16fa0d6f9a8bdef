//! Orderly Core - Shared types library.
//!
//! This crate provides common types used across all Orderly components:
//! - `pricing` - The order-pricing engine
//! - `cli` - Command-line tools for quoting cart snapshots
//!
//! # Architecture
//!
//! The core crate contains only types and helpers - no I/O, no clocks,
//! no hidden state. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and money helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
