//! Arithmetic and precision utilities for stable-swap calculations.
//!
//! This module provides the decimal normalizer, the StableSwap invariant
//! solver, [`CheckedArithmetic`] for overflow-safe operations on domain
//! wrappers, and rounding-aware division helpers.
//!
//! All reserve and invariant arithmetic is integer-only.  Products that
//! can exceed `u128` are formed on [`primitive_types::U256`].

mod checked;
mod invariant;
mod normalizer;
mod rounding;

pub use checked::CheckedArithmetic;
pub use invariant::{compute_d, compute_y, spot_price, MAX_ITERATIONS};
pub use normalizer::{denormalize, normalize};
pub use rounding::{div_round, mul_div, mul_div_u256, u256_to_u128};

/// Fractional digits of the internal fixed-point scale.
pub const INTERNAL_DECIMALS: u8 = 18;
