//! Pool and registry configuration.
//!
//! [`PoolConfig`] holds the immutable per-pool curve and fee parameters;
//! [`RegistryConfig`] holds the defaults a registry applies to new pairs
//! together with the protocol-fee recipient.  Both validate on
//! construction and derive `serde` traits behind the `serde` feature.

mod pool_config;
mod registry_config;

pub use pool_config::{PoolConfig, MAX_AMPLIFICATION};
pub use registry_config::RegistryConfig;
