//! Per-pool StableSwap parameters.

use crate::domain::{BasisPoints, Shares};
use crate::error::AmmError;

/// Largest accepted amplification coefficient.
pub const MAX_AMPLIFICATION: u32 = 1_000_000;

/// Immutable parameters of one stable-swap pool.
///
/// # Amplification Parameter
///
/// The `amplification` parameter (`A`) controls the curve shape:
///
/// - `A = 1`: close to constant product
/// - `A → ∞`: approaches constant sum (1:1 swaps)
/// - Typical range for stablecoin pairs: 50–5000
///
/// # Defaults
///
/// | Field | Default |
/// |-------|---------|
/// | `amplification` | 100 |
/// | `fee_rate` | 4 bp |
/// | `protocol_fee_share` | 0 bp (off) |
/// | `minimum_locked_shares` | 1 000 |
///
/// # Validation
///
/// - `1 <= amplification <= 1_000_000`.
/// - `fee_rate` and `protocol_fee_share` at most 10 000 bp.
/// - `minimum_locked_shares > 0`.
///
/// # Examples
///
/// ```
/// use tenk_amm::config::PoolConfig;
/// use tenk_amm::domain::{BasisPoints, Shares};
///
/// let cfg = PoolConfig::new(200, BasisPoints::new(1), BasisPoints::ZERO, Shares::new(1_000))
///     .expect("valid");
/// assert_eq!(cfg.amplification(), 200);
/// assert!(PoolConfig::new(0, BasisPoints::new(1), BasisPoints::ZERO, Shares::new(1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    amplification: u32,
    fee_rate: BasisPoints,
    protocol_fee_share: BasisPoints,
    minimum_locked_shares: Shares,
}

impl PoolConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if any field is out of
    /// range (see [`validate`](Self::validate)).
    pub fn new(
        amplification: u32,
        fee_rate: BasisPoints,
        protocol_fee_share: BasisPoints,
        minimum_locked_shares: Shares,
    ) -> Result<Self, AmmError> {
        let config = Self {
            amplification,
            fee_rate,
            protocol_fee_share,
            minimum_locked_shares,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.amplification == 0 {
            return Err(AmmError::InvalidConfiguration(
                "amplification must be greater than zero",
            ));
        }
        if self.amplification > MAX_AMPLIFICATION {
            return Err(AmmError::InvalidConfiguration(
                "amplification must not exceed 1000000",
            ));
        }
        if !self.fee_rate.is_valid_percent() {
            return Err(AmmError::InvalidConfiguration(
                "fee rate must not exceed 10000 bp",
            ));
        }
        if !self.protocol_fee_share.is_valid_percent() {
            return Err(AmmError::InvalidConfiguration(
                "protocol fee share must not exceed 10000 bp",
            ));
        }
        if self.minimum_locked_shares.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum locked shares must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Returns the amplification coefficient `A`.
    #[must_use]
    pub const fn amplification(&self) -> u32 {
        self.amplification
    }

    /// Returns the trading fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> BasisPoints {
        self.fee_rate
    }

    /// Returns the share of invariant growth minted to the fee recipient.
    #[must_use]
    pub const fn protocol_fee_share(&self) -> BasisPoints {
        self.protocol_fee_share
    }

    /// Returns the shares locked in the burn sink on the first deposit.
    #[must_use]
    pub const fn minimum_locked_shares(&self) -> Shares {
        self.minimum_locked_shares
    }

    /// Returns a copy with a different amplification, validated.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if out of range.
    pub fn with_amplification(self, amplification: u32) -> Result<Self, AmmError> {
        Self::new(
            amplification,
            self.fee_rate,
            self.protocol_fee_share,
            self.minimum_locked_shares,
        )
    }

    /// Returns a copy with a different fee rate, validated.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if out of range.
    pub fn with_fee_rate(self, fee_rate: BasisPoints) -> Result<Self, AmmError> {
        Self::new(
            self.amplification,
            fee_rate,
            self.protocol_fee_share,
            self.minimum_locked_shares,
        )
    }

    /// Returns a copy with a different protocol fee share, validated.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if out of range.
    pub fn with_protocol_fee_share(self, share: BasisPoints) -> Result<Self, AmmError> {
        Self::new(
            self.amplification,
            self.fee_rate,
            share,
            self.minimum_locked_shares,
        )
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            amplification: 100,
            fee_rate: BasisPoints::new(4),
            protocol_fee_share: BasisPoints::ZERO,
            minimum_locked_shares: Shares::new(1_000),
        }
    }
}
