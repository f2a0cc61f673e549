//! Asset ledger implementations.
//!
//! [`MemoryLedger`] keeps balances and allowances in process memory and
//! implements [`AssetLedger`](crate::traits::AssetLedger).

mod memory;

pub use memory::MemoryLedger;
