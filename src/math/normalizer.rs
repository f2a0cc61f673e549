//! Conversion between native asset precision and the internal scale.
//!
//! Every pool computes its invariant on reserves expressed with
//! [`INTERNAL_DECIMALS`](super::INTERNAL_DECIMALS) fractional digits, so a
//! 6-decimal and an 8-decimal stablecoin can share one curve.  Scaling up
//! is exact; scaling down truncates, which always favours the pool.
//!
//! # Examples
//!
//! ```
//! use tenk_amm::domain::{Amount, Decimals};
//! use tenk_amm::math::{denormalize, normalize};
//!
//! let usdc = Decimals::new(6).expect("valid");
//! assert_eq!(normalize(Amount::new(1_500_000), usdc), Ok(1_500_000_000_000_000_000));
//! assert_eq!(denormalize(1_499_999_999_999_999_999, usdc), Amount::new(1_499_999));
//! ```

use crate::domain::{Amount, Decimals};
use crate::error::AmmError;

/// Scales a native amount up to the internal 18-digit representation.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if the scaled value exceeds `u128`.
pub const fn normalize(amount: Amount, decimals: Decimals) -> Result<u128, AmmError> {
    match amount.get().checked_mul(decimals.scale_factor()) {
        Some(v) => Ok(v),
        None => Err(AmmError::Overflow("normalize: amount exceeds internal range")),
    }
}

/// Scales an internal value down to native precision, truncating.
pub const fn denormalize(internal: u128, decimals: Decimals) -> Amount {
    // scale_factor is at least 1 for every valid precision.
    Amount::new(internal / decimals.scale_factor())
}
