//! Per-pool operation guard.
//!
//! A pool is either [`PoolStatus::Idle`] or [`PoolStatus::InOperation`].
//! [`StablePool::enter`](super::StablePool::enter) is the only way to obtain
//! an [`OperationTicket`], and every state-changing pool operation takes
//! one.  Entering a pool that is already in operation fails with
//! [`AmmError::ReentrancyDetected`](crate::error::AmmError::ReentrancyDetected).

use core::fmt;

use crate::domain::PoolId;

/// Execution state of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolStatus {
    /// No operation in flight.
    #[default]
    Idle,
    /// An operation holds the pool.
    InOperation,
}

impl PoolStatus {
    /// Returns `true` if no operation holds the pool.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::InOperation => write!(f, "in-operation"),
        }
    }
}

/// Proof that the holder entered a specific pool.
///
/// Not `Clone` or `Copy`, and only constructible inside this crate's pool
/// module, so holding one means the pool was idle when it was issued.
/// [`StablePool::exit`](super::StablePool::exit) consumes it.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pool stays locked until its ticket is passed to exit"]
pub struct OperationTicket {
    pool: PoolId,
}

impl OperationTicket {
    pub(super) const fn issue(pool: PoolId) -> Self {
        Self { pool }
    }

    /// The pool this ticket unlocks.
    #[must_use]
    pub const fn pool(&self) -> PoolId {
        self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert!(PoolStatus::default().is_idle());
        assert!(!PoolStatus::InOperation.is_idle());
        assert_eq!(PoolStatus::InOperation.to_string(), "in-operation");
    }

    #[test]
    fn ticket_names_its_pool() {
        let t = OperationTicket::issue(PoolId::new(4));
        assert_eq!(t.pool(), PoolId::new(4));
    }
}
