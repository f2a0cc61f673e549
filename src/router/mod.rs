//! Liquidity and swap orchestration across pools.
//!
//! [`Router`] borrows a [`PairRegistry`](crate::factory::PairRegistry) and an
//! [`AssetLedger`](crate::traits::AssetLedger) per call and makes every
//! operation all-or-nothing across the pools it touches.  Requests are
//! plain structs carrying the caller's bounds and deadline.

mod request;
mod stable_router;

pub use request::{AddLiquidity, RemoveLiquidity, SwapExactIn};
pub use stable_router::Router;
