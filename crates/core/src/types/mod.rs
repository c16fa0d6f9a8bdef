//! Core types for Orderly.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{add_or_zero, clamp_non_negative, mul_or_zero, round_money, sum_or_zero};
