//! Asset decimal precision.

use crate::error::AmmError;
use crate::math::INTERNAL_DECIMALS;

/// Number of fractional digits of an asset's native unit.
///
/// Valid range is `0..=18`: the pool's internal scale has 18 digits, so
/// every supported precision scales *up* into it without loss.
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::Decimals;
///
/// let usdc = Decimals::new(6).expect("6 is valid");
/// assert_eq!(usdc.get(), 6);
/// assert_eq!(usdc.scale_factor(), 1_000_000_000_000);
/// assert!(Decimals::new(19).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decimals(u8);

impl Decimals {
    /// Zero fractional digits.
    pub const ZERO: Self = Self(0);

    /// Highest supported precision, equal to the internal scale.
    pub const MAX: Self = Self(INTERNAL_DECIMALS);

    /// Validates and wraps a precision.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > INTERNAL_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw digit count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns `10^(18 - decimals)`, the multiplier from native units into
    /// the internal scale.  Never exceeds `10^18`.
    #[must_use]
    pub const fn scale_factor(&self) -> u128 {
        10u128.pow((INTERNAL_DECIMALS - self.0) as u32)
    }

    /// Returns `10^decimals`, the number of native units in one whole asset.
    #[must_use]
    pub const fn one(&self) -> u128 {
        10u128.pow(self.0 as u32)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_range() {
        for v in [0u8, 6, 8, 18] {
            let Ok(d) = Decimals::new(v) else {
                panic!("{v} should be valid");
            };
            assert_eq!(d.get(), v);
        }
    }

    #[test]
    fn rejects_above_internal_scale() {
        let Err(e) = Decimals::new(19) else {
            panic!("expected Err");
        };
        assert_eq!(e, AmmError::InvalidPrecision("decimals must be 0..=18"));
        assert!(Decimals::new(u8::MAX).is_err());
    }

    #[test]
    fn scale_factors() {
        let (Ok(d6), Ok(d8)) = (Decimals::new(6), Decimals::new(8)) else {
            panic!("valid decimals");
        };
        assert_eq!(d6.scale_factor(), 1_000_000_000_000);
        assert_eq!(d8.scale_factor(), 10_000_000_000);
        assert_eq!(Decimals::MAX.scale_factor(), 1);
        assert_eq!(Decimals::ZERO.scale_factor(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn one_whole_unit() {
        let Ok(d6) = Decimals::new(6) else {
            panic!("valid decimals");
        };
        assert_eq!(d6.one(), 1_000_000);
        assert_eq!(Decimals::ZERO.one(), 1);
    }

    #[test]
    fn ordering_and_default() {
        assert!(Decimals::ZERO < Decimals::MAX);
        assert_eq!(Decimals::default(), Decimals::ZERO);
    }
}
