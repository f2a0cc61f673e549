//! Basis-point representation for fee rates and fee shares.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::AmmError;

/// 100% expressed in basis points.
const MAX_BPS: u32 = 10_000;

/// A percentage in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Used for the pool's trading fee rate and for the protocol's share of
/// fee growth.  Values above 10 000 are representable but rejected by
/// [`PoolConfig::validate`](crate::config::PoolConfig::validate).
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::{Amount, BasisPoints, Rounding};
///
/// let fee = BasisPoints::new(4);
/// assert_eq!(fee.apply(Amount::new(999), Rounding::Up).expect("fits"), Amount::new(1));
/// assert_eq!(fee.apply(Amount::new(999), Rounding::Down).expect("fits"), Amount::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// The denominator of every basis-point fraction.
    pub const DENOMINATOR: u128 = MAX_BPS as u128;

    /// Wraps a raw value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value lies in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BPS
    }

    /// Returns `10_000 - self`, saturating at zero.
    pub const fn complement(&self) -> Self {
        Self(MAX_BPS.saturating_sub(self.0))
    }

    /// Computes `amount · self / 10 000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the product exceeds `u128`.
    pub const fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        let product = match amount.get().checked_mul(self.0 as u128) {
            Some(v) => v,
            None => return Err(AmmError::Overflow("basis points apply overflow")),
        };
        match crate::math::div_round(product, Self::DENOMINATOR, rounding) {
            Some(v) => Ok(Amount::new(v)),
            None => Err(AmmError::DivisionByZero),
        }
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
