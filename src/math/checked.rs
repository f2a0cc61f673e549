//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic that
//! returns [`Result<Self, AmmError>`](crate::error::AmmError) instead of
//! an `Option`, so pool code can propagate with `?` and keep the failing
//! computation in the error context.
//!
//! # Implementations
//!
//! - [`Amount`]: raw asset quantities (`u128`)
//! - [`Shares`]: pool share quantities (`u128`)
//!
//! # Examples
//!
//! ```
//! use tenk_amm::domain::{Amount, Rounding};
//! use tenk_amm::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(1_000);
//! assert_eq!(reserve.safe_add(&Amount::new(24)), Ok(Amount::new(1_024)));
//! assert_eq!(reserve.safe_mul_div(3, 4, Rounding::Down), Ok(Amount::new(750)));
//! ```

use crate::domain::{Amount, Rounding, Shares};
use crate::error::AmmError;

use super::mul_div;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds `u128`.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// `self * numerator / denominator` with a 256-bit intermediate.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`AmmError::Overflow`] if the quotient exceeds `u128`.
    fn safe_mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, AmmError>;
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }

    fn safe_mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, AmmError> {
        if denominator == 0 {
            return Err(AmmError::DivisionByZero);
        }
        mul_div(self.get(), numerator, denominator, rounding)
            .map(Amount::new)
            .ok_or(AmmError::Overflow("amount mul_div overflow"))
    }
}

// ---------------------------------------------------------------------------
// Shares
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("shares addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("shares subtraction underflow"))
    }

    fn safe_mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, AmmError> {
        if denominator == 0 {
            return Err(AmmError::DivisionByZero);
        }
        mul_div(self.get(), numerator, denominator, rounding)
            .map(Shares::new)
            .ok_or(AmmError::Overflow("shares mul_div overflow"))
    }
}
