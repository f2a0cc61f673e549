//! Router request descriptors.
//!
//! Each request carries the caller's bounds: minimum accepted amounts and
//! a deadline in seconds.  Asset order in a request is the caller's
//! order; the router maps it onto the pool's canonical order and back.

use crate::domain::{Address, Amount, Shares};

/// Parameters of [`Router::add_liquidity`](super::Router::add_liquidity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddLiquidity {
    /// First asset, in the caller's order.
    pub asset_a: Address,
    /// Second asset.
    pub asset_b: Address,
    /// Most of `asset_a` the caller will deposit.
    pub amount_a_desired: Amount,
    /// Most of `asset_b` the caller will deposit.
    pub amount_b_desired: Amount,
    /// Least of `asset_a` the caller accepts depositing.
    pub amount_a_min: Amount,
    /// Least of `asset_b` the caller accepts depositing.
    pub amount_b_min: Amount,
    /// Receiver of the minted shares.
    pub to: Address,
    /// Latest accepted time, in seconds.
    pub deadline: u64,
}

/// Parameters of [`Router::remove_liquidity`](super::Router::remove_liquidity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveLiquidity {
    /// First asset, in the caller's order.
    pub asset_a: Address,
    /// Second asset.
    pub asset_b: Address,
    /// Caller's shares to burn.
    pub shares: Shares,
    /// Least of `asset_a` the caller accepts receiving.
    pub amount_a_min: Amount,
    /// Least of `asset_b` the caller accepts receiving.
    pub amount_b_min: Amount,
    /// Receiver of both assets.
    pub to: Address,
    /// Latest accepted time, in seconds.
    pub deadline: u64,
}

/// Parameters of
/// [`Router::swap_exact_tokens_for_tokens`](super::Router::swap_exact_tokens_for_tokens).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapExactIn {
    /// Exact amount of `path[0]` sold.
    pub amount_in: Amount,
    /// Least of the last asset the caller accepts receiving.
    pub amount_out_min: Amount,
    /// Assets to route through, input first.
    pub path: Vec<Address>,
    /// Receiver of the output.
    pub to: Address,
    /// Latest accepted time, in seconds.
    pub deadline: u64,
}
