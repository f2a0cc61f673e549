//! Canonically ordered pair of distinct asset identities.

use super::Address;
use crate::error::AmmError;

/// An unordered pair of assets stored in canonical (ascending) order.
///
/// `AssetPair::new(x, y)` and `AssetPair::new(y, x)` produce equal values,
/// which is what lets the registry guarantee a single pool per pair.
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::{Address, AssetPair};
///
/// let usdt = Address::from_u64(2);
/// let usdc = Address::from_u64(1);
/// let pair = AssetPair::new(usdt, usdc).expect("distinct");
/// assert_eq!(pair.first(), usdc);
/// assert_eq!(pair, AssetPair::new(usdc, usdt).expect("distinct"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetPair {
    first: Address,
    second: Address,
}

impl AssetPair {
    /// Sorts the two identities into canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalAssets`] if `x == y`.
    pub fn new(x: Address, y: Address) -> Result<Self, AmmError> {
        if x == y {
            return Err(AmmError::IdenticalAssets);
        }
        let (first, second) = if x < y { (x, y) } else { (y, x) };
        Ok(Self { first, second })
    }

    /// The lower identity (the pool's asset A).
    #[must_use]
    pub const fn first(&self) -> Address {
        self.first
    }

    /// The higher identity (the pool's asset B).
    #[must_use]
    pub const fn second(&self) -> Address {
        self.second
    }

    /// Returns `true` if `asset` is one side of the pair.
    #[must_use]
    pub fn contains(&self, asset: &Address) -> bool {
        self.first == *asset || self.second == *asset
    }

    /// Returns `true` if `asset` is the first (A) side.
    #[must_use]
    pub fn is_first(&self, asset: &Address) -> bool {
        self.first == *asset
    }

    /// Returns the counterpart of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if `asset` is not in the pair.
    pub fn other(&self, asset: &Address) -> Result<Address, AmmError> {
        if *asset == self.first {
            Ok(self.second)
        } else if *asset == self.second {
            Ok(self.first)
        } else {
            Err(AmmError::UnknownAsset)
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::from_u64(n)
    }

    #[test]
    fn sorts_reversed_input() {
        let Ok(pair) = AssetPair::new(addr(9), addr(4)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), addr(4));
        assert_eq!(pair.second(), addr(9));
        assert!(pair.first() < pair.second());
    }

    #[test]
    fn order_independent_equality() {
        let (Ok(p1), Ok(p2)) = (AssetPair::new(addr(1), addr(2)), AssetPair::new(addr(2), addr(1)))
        else {
            panic!("expected Ok");
        };
        assert_eq!(p1, p2);
    }

    #[test]
    fn rejects_identical() {
        assert_eq!(
            AssetPair::new(addr(5), addr(5)),
            Err(AmmError::IdenticalAssets)
        );
    }

    #[test]
    fn membership_and_other() {
        let Ok(pair) = AssetPair::new(addr(1), addr(2)) else {
            panic!("expected Ok");
        };
        assert!(pair.contains(&addr(1)));
        assert!(pair.is_first(&addr(1)));
        assert!(!pair.is_first(&addr(2)));
        assert!(!pair.contains(&addr(3)));
        assert_eq!(pair.other(&addr(1)), Ok(addr(2)));
        assert_eq!(pair.other(&addr(2)), Ok(addr(1)));
        assert_eq!(pair.other(&addr(3)), Err(AmmError::UnknownAsset));
    }
}
