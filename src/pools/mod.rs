//! The stable-swap pool engine.
//!
//! [`StablePool`] owns one pair's reserves, share ledger and cached
//! invariant.  [`PoolStatus`] and [`OperationTicket`] form the per-pool
//! operation guard; [`ShareLedger`] is the fungible share accounting.

mod share_ledger;
mod stable_pool;
mod status;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use share_ledger::ShareLedger;
pub use stable_pool::StablePool;
pub use status::{OperationTicket, PoolStatus};
