//! Fundamental domain value types used throughout the AMM library.
//!
//! This module contains the value types that model a stable-swap market:
//! asset identities and precisions, raw amounts, pool shares, pairs,
//! routes, operation outcomes and the event trail.  All types are
//! newtypes with validated constructors where an invariant exists.

mod address;
mod amount;
mod asset;
mod asset_pair;
mod basis_points;
mod decimals;
mod event;
mod liquidity_change;
mod pool_id;
mod rounding;
mod shares;
mod swap_path;
mod swap_result;

pub use address::Address;
pub use amount::Amount;
pub use asset::Asset;
pub use asset_pair::AssetPair;
pub use basis_points::BasisPoints;
pub use decimals::Decimals;
pub use event::PoolEvent;
pub use liquidity_change::{Deposit, Withdrawal};
pub use pool_id::PoolId;
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_path::SwapPath;
pub use swap_result::SwapResult;
