//! Observability events emitted by the registry and pools.

use core::fmt;

use super::{Address, Amount, PoolId, Shares};

/// Read-only audit trail entry.
///
/// Pools queue events while an operation runs; the queue is rolled back
/// together with the pool state when the operation fails, so a consumer
/// only ever sees events of committed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolEvent {
    /// A pool was registered for a canonical pair.
    PoolCreated {
        /// Lower asset identity.
        asset_a: Address,
        /// Higher asset identity.
        asset_b: Address,
        /// New pool.
        pool: PoolId,
    },
    /// Shares were minted against a deposit.
    Mint {
        /// Pool.
        pool: PoolId,
        /// Asset A deposited.
        amount_a: Amount,
        /// Asset B deposited.
        amount_b: Amount,
        /// Shares credited to the depositor's recipient.
        shares: Shares,
    },
    /// Shares were burned for a withdrawal.
    Burn {
        /// Pool.
        pool: PoolId,
        /// Asset A paid out.
        amount_a: Amount,
        /// Asset B paid out.
        amount_b: Amount,
        /// Shares destroyed.
        shares: Shares,
    },
    /// A swap executed.
    Swap {
        /// Pool.
        pool: PoolId,
        /// Amount received by the pool.
        amount_in: Amount,
        /// Amount paid out by the pool, net of fee.
        amount_out: Amount,
        /// `true` when asset A was sold into the pool.
        input_is_a: bool,
    },
    /// Reserves after a state change.
    Sync {
        /// Pool.
        pool: PoolId,
        /// Reserve of asset A.
        reserve_a: Amount,
        /// Reserve of asset B.
        reserve_b: Amount,
    },
    /// Protocol-fee shares were minted to the fee recipient.
    ProtocolFeeMinted {
        /// Pool.
        pool: PoolId,
        /// Fee recipient.
        recipient: Address,
        /// Shares minted.
        shares: Shares,
    },
}

impl PoolEvent {
    /// Returns the pool the event concerns.
    #[must_use]
    pub const fn pool(&self) -> PoolId {
        match self {
            Self::PoolCreated { pool, .. }
            | Self::Mint { pool, .. }
            | Self::Burn { pool, .. }
            | Self::Swap { pool, .. }
            | Self::Sync { pool, .. }
            | Self::ProtocolFeeMinted { pool, .. } => *pool,
        }
    }
}

impl fmt::Display for PoolEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PoolCreated {
                asset_a,
                asset_b,
                pool,
            } => write!(f, "PoolCreated({asset_a}, {asset_b}, {pool})"),
            Self::Mint {
                pool,
                amount_a,
                amount_b,
                shares,
            } => write!(f, "Mint({pool}, {amount_a}, {amount_b}, {shares})"),
            Self::Burn {
                pool,
                amount_a,
                amount_b,
                shares,
            } => write!(f, "Burn({pool}, {amount_a}, {amount_b}, {shares})"),
            Self::Swap {
                pool,
                amount_in,
                amount_out,
                input_is_a,
            } => write!(f, "Swap({pool}, {amount_in}, {amount_out}, {input_is_a})"),
            Self::Sync {
                pool,
                reserve_a,
                reserve_b,
            } => write!(f, "Sync({pool}, {reserve_a}, {reserve_b})"),
            Self::ProtocolFeeMinted {
                pool,
                recipient,
                shares,
            } => write!(f, "ProtocolFeeMinted({pool}, {recipient}, {shares})"),
        }
    }
}
