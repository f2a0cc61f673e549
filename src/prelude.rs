//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use tenk_amm::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    Address, Amount, Asset, AssetPair, BasisPoints, Decimals, Deposit, PoolEvent, PoolId,
    Rounding, Shares, SwapPath, SwapResult, Withdrawal,
};

// Re-export core traits
pub use crate::traits::{AssetLedger, Clock, ManualClock, SystemClock};

// Re-export math utilities
pub use crate::math::CheckedArithmetic;

// Re-export configuration
pub use crate::config::{PoolConfig, RegistryConfig};

// Re-export error types
pub use crate::error::{AmmError, Result};

// Re-export registry, pools and router
pub use crate::factory::PairRegistry;
pub use crate::ledger::MemoryLedger;
pub use crate::pools::{OperationTicket, PoolStatus, StablePool};
pub use crate::router::{AddLiquidity, RemoveLiquidity, Router, SwapExactIn};
