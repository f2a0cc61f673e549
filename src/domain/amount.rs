//! Raw asset amount in native precision.

use core::fmt;

use primitive_types::U256;

use super::Rounding;

/// An asset amount in the asset's smallest unit (its native precision).
///
/// `Amount` never interprets decimals; conversion into the pool's
/// internal 18-digit scale is the job of
/// [`normalize`](crate::math::normalize).  Arithmetic is checked and
/// returns `None` instead of wrapping or panicking.
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::{Amount, Rounding};
///
/// let reserve = Amount::new(1_000_000);
/// let shares = Amount::new(250);
/// let supply = Amount::new(1_000);
/// assert_eq!(
///     reserve.checked_mul_div(&shares, &supply, Rounding::Down),
///     Some(Amount::new(250_000))
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw `u128`.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw `u128`.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with explicit rounding.  `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        match crate::math::div_round(self.0, divisor.0, rounding) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Computes `self * numerator / denominator` with a 256-bit
    /// intermediate product, so that only the final quotient has to fit
    /// in `u128`.
    ///
    /// Returns `None` if `denominator` is zero or the quotient overflows.
    #[must_use]
    pub fn checked_mul_div(
        &self,
        numerator: &Self,
        denominator: &Self,
        rounding: Rounding,
    ) -> Option<Self> {
        crate::math::mul_div(self.0, numerator.0, denominator.0, rounding).map(Self)
    }

    /// Widens the amount into a 256-bit integer.
    pub fn to_u256(&self) -> U256 {
        U256::from(self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        assert_eq!(Amount::new(42).get(), 42);
        assert_eq!(Amount::default(), Amount::ZERO);
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn display() {
        assert_eq!(Amount::new(1_000_000).to_string(), "1000000");
    }

    #[test]
    fn add_and_sub() {
        let a = Amount::new(100);
        let b = Amount::new(200);
        assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
        assert_eq!(b.checked_sub(&a), Some(Amount::new(100)));
        assert_eq!(a.checked_sub(&b), None);
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
    }

    #[test]
    fn mul_overflow() {
        assert_eq!(Amount::MAX.checked_mul(&Amount::new(2)), None);
        assert_eq!(
            Amount::new(7).checked_mul(&Amount::new(6)),
            Some(Amount::new(42))
        );
    }

    #[test]
    fn div_rounding() {
        let ten = Amount::new(10);
        let three = Amount::new(3);
        assert_eq!(ten.checked_div(&three, Rounding::Down), Some(Amount::new(3)));
        assert_eq!(ten.checked_div(&three, Rounding::Up), Some(Amount::new(4)));
        assert_eq!(ten.checked_div(&Amount::ZERO, Rounding::Down), None);
    }

    #[test]
    fn mul_div_wide_intermediate() {
        // u128::MAX * 2 overflows u128 but the quotient fits.
        let a = Amount::MAX;
        let Some(r) = a.checked_mul_div(&Amount::new(2), &Amount::new(4), Rounding::Down) else {
            panic!("expected Some");
        };
        assert_eq!(r, Amount::new(u128::MAX / 2));
    }

    #[test]
    fn mul_div_rounding_directions() {
        let a = Amount::new(10);
        let n = Amount::new(1);
        let d = Amount::new(3);
        assert_eq!(a.checked_mul_div(&n, &d, Rounding::Down), Some(Amount::new(3)));
        assert_eq!(a.checked_mul_div(&n, &d, Rounding::Up), Some(Amount::new(4)));
    }

    #[test]
    fn mul_div_quotient_overflow() {
        let a = Amount::MAX;
        assert_eq!(
            a.checked_mul_div(&Amount::new(3), &Amount::new(2), Rounding::Down),
            None
        );
        assert_eq!(
            a.checked_mul_div(&Amount::new(1), &Amount::ZERO, Rounding::Down),
            None
        );
    }

    #[test]
    fn ordering() {
        assert!(Amount::new(1) < Amount::new(2));
    }
}
