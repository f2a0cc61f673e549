//! Registry-wide defaults applied to newly created pairs.

use super::PoolConfig;
use crate::domain::Address;
use crate::error::AmmError;

/// Settings of a [`PairRegistry`](crate::factory::PairRegistry).
///
/// `pool_defaults` is copied into every pool created through
/// [`create_pair`](crate::factory::PairRegistry::create_pair).  `fee_to`
/// names the protocol-fee recipient; `None` disables protocol fees
/// regardless of the pools' fee share.
///
/// # Examples
///
/// ```
/// use tenk_amm::config::{PoolConfig, RegistryConfig};
/// use tenk_amm::domain::Address;
///
/// let cfg = RegistryConfig::new(PoolConfig::default(), Some(Address::from_u64(7)))
///     .expect("valid");
/// assert_eq!(cfg.fee_to(), Some(Address::from_u64(7)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryConfig {
    pool_defaults: PoolConfig,
    fee_to: Option<Address>,
}

impl RegistryConfig {
    /// Creates a validated registry configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if `pool_defaults` is invalid or
    ///   `fee_to` is the burn sink.
    pub fn new(pool_defaults: PoolConfig, fee_to: Option<Address>) -> Result<Self, AmmError> {
        let config = Self {
            pool_defaults,
            fee_to,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the defaults and the fee recipient.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] on the first failure.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.pool_defaults.validate()?;
        if self.fee_to.is_some_and(|a| a.is_burn()) {
            return Err(AmmError::InvalidConfiguration(
                "fee recipient must not be the burn address",
            ));
        }
        Ok(())
    }

    /// Parameters applied to new pools.
    #[must_use]
    pub const fn pool_defaults(&self) -> &PoolConfig {
        &self.pool_defaults
    }

    /// Protocol-fee recipient, if any.
    #[must_use]
    pub const fn fee_to(&self) -> Option<Address> {
        self.fee_to
    }
}
