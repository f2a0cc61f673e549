//! Pool creation and lookup.
//!
//! The [`PairRegistry`] maps each unordered asset pair to exactly one
//! [`StablePool`](crate::pools::StablePool), reads asset precisions from
//! the [`AssetLedger`](crate::traits::AssetLedger) at creation, and keeps
//! the published event log.
//!
//! # Usage
//!
//! ```rust
//! use tenk_amm::config::{PoolConfig, RegistryConfig};
//! use tenk_amm::domain::{Address, Decimals};
//! use tenk_amm::factory::PairRegistry;
//! use tenk_amm::ledger::MemoryLedger;
//!
//! let treasury = Address::from_u64(99);
//! let mut registry =
//!     PairRegistry::new(RegistryConfig::new(PoolConfig::default(), Some(treasury)).expect("valid"))
//!         .expect("valid");
//!
//! let mut ledger = MemoryLedger::new();
//! let (x, y) = (Address::from_u64(1), Address::from_u64(2));
//! ledger.register_asset(x, Decimals::new(6).expect("ok")).expect("new");
//! ledger.register_asset(y, Decimals::new(6).expect("ok")).expect("new");
//!
//! let id = registry.create_pair(&ledger, x, y).expect("created");
//! assert_eq!(registry.pool(id).expect("exists").fee_to(), Some(treasury));
//! ```

mod registry;

pub(crate) use registry::Checkpoint;
pub use registry::PairRegistry;
