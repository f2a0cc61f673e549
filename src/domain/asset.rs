//! Asset identity together with its precision.

use super::{Address, Amount, Decimals};
use crate::error::AmmError;
use crate::math;

/// A fungible asset as seen by a pool: its identity and its native
/// precision, both fixed for the pool's lifetime.
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::{Address, Amount, Asset, Decimals};
///
/// let usdc = Asset::new(Address::from_u64(1), Decimals::new(6).expect("valid"));
/// assert_eq!(usdc.normalize(Amount::new(1)).expect("fits"), 1_000_000_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Asset {
    id: Address,
    decimals: Decimals,
}

impl Asset {
    /// Creates an asset descriptor.
    #[must_use]
    pub const fn new(id: Address, decimals: Decimals) -> Self {
        Self { id, decimals }
    }

    /// Returns the asset identity.
    #[must_use]
    pub const fn id(&self) -> Address {
        self.id
    }

    /// Returns the native precision.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Scales a native amount into the internal 18-digit unit.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the scaled value exceeds `u128`.
    pub fn normalize(&self, amount: Amount) -> Result<u128, AmmError> {
        math::normalize(amount, self.decimals)
    }

    /// Scales an internal value back to native units, truncating.
    pub fn denormalize(&self, internal: u128) -> Amount {
        math::denormalize(internal, self.decimals)
    }
}
