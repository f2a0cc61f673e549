//! Validated multi-hop swap route.

use super::{Address, AssetPair};
use crate::error::AmmError;

/// An ordered route of at least two assets.
///
/// Every consecutive pair is one hop.  Consecutive duplicates are
/// rejected up front because such a hop can never resolve to a pool.
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::{Address, SwapPath};
///
/// let path = SwapPath::new(vec![Address::from_u64(1), Address::from_u64(2), Address::from_u64(3)])
///     .expect("valid path");
/// assert_eq!(path.hop_count(), 2);
/// assert!(SwapPath::new(vec![Address::from_u64(1)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapPath(Vec<Address>);

impl SwapPath {
    /// Validates a route.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if fewer than two assets are given.
    /// - [`AmmError::IdenticalAssets`] if a hop repeats the same asset.
    pub fn new(assets: Vec<Address>) -> Result<Self, AmmError> {
        if assets.len() < 2 {
            return Err(AmmError::InvalidPath);
        }
        for hop in assets.windows(2) {
            AssetPair::new(hop[0], hop[1])?;
        }
        Ok(Self(assets))
    }

    /// Returns the assets in order.
    #[must_use]
    pub fn assets(&self) -> &[Address] {
        &self.0
    }

    /// Number of hops (`len - 1`).
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.0.len() - 1
    }

    /// Asset sold at the start of the route.
    #[must_use]
    pub fn input(&self) -> Address {
        self.0[0]
    }

    /// Asset received at the end of the route.
    #[must_use]
    pub fn output(&self) -> Address {
        self.0[self.0.len() - 1]
    }

    /// Iterates `(asset_in, asset_out)` per hop.
    pub fn hops(&self) -> impl Iterator<Item = (Address, Address)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }
}

impl TryFrom<&[Address]> for SwapPath {
    type Error = AmmError;

    fn try_from(assets: &[Address]) -> Result<Self, Self::Error> {
        Self::new(assets.to_vec())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn a(n: u64) -> Address {
        Address::from_u64(n)
    }

    #[test]
    fn rejects_short_paths() {
        assert_eq!(SwapPath::new(vec![]), Err(AmmError::InvalidPath));
        assert_eq!(SwapPath::new(vec![a(1)]), Err(AmmError::InvalidPath));
    }

    #[test]
    fn rejects_degenerate_hop() {
        assert_eq!(
            SwapPath::new(vec![a(1), a(1)]),
            Err(AmmError::IdenticalAssets)
        );
    }

    #[test]
    fn hops_in_order() {
        let Ok(p) = SwapPath::new(vec![a(1), a(2), a(3)]) else {
            panic!("expected Ok");
        };
        let hops: Vec<_> = p.hops().collect();
        assert_eq!(hops, vec![(a(1), a(2)), (a(2), a(3))]);
        assert_eq!(p.input(), a(1));
        assert_eq!(p.output(), a(3));
    }

    #[test]
    fn revisiting_an_asset_is_allowed() {
        let Ok(p) = SwapPath::try_from([a(1), a(2), a(1)].as_slice()) else {
            panic!("expected Ok");
        };
        assert_eq!(p.hop_count(), 2);
    }
}
