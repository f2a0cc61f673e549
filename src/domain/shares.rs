//! Liquidity-share quantities.

use core::fmt;

/// A quantity of liquidity shares (pool equity), kept distinct from
/// [`Amount`](super::Amount) so share balances and asset balances cannot be
/// mixed up.
///
/// Shares are denominated in the pool's internal 18-digit unit: the first
/// deposit mints the initial invariant `D`.
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::Shares;
///
/// let a = Shares::new(1_000);
/// assert_eq!(a.checked_add(&Shares::new(1)), Some(Shares::new(1_001)));
/// assert_eq!(a.checked_sub(&Shares::new(1_001)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if zero.
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
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let s = Shares::new(10);
        assert_eq!(s.checked_add(&Shares::new(5)), Some(Shares::new(15)));
        assert_eq!(s.checked_sub(&Shares::new(10)), Some(Shares::ZERO));
        assert_eq!(Shares::new(u128::MAX).checked_add(&Shares::new(1)), None);
    }

    #[test]
    fn zero() {
        assert!(Shares::ZERO.is_zero());
        assert_eq!(Shares::default(), Shares::ZERO);
        assert_eq!(Shares::new(3).to_string(), "3");
    }
}
