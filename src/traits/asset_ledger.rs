//! External fungible-asset collaborator.
//!
//! [`AssetLedger`] is the boundary between the AMM core and whatever
//! holds the actual asset balances (a host chain's token contracts, a
//! database, or the in-memory [`MemoryLedger`](crate::ledger::MemoryLedger)).
//! The core never stores asset balances itself: pool reserves are its own
//! accounting, and custody of the backing assets lives here under each
//! pool's [`custody`](crate::domain::PoolId::custody) account.
//!
//! # Transfer Semantics
//!
//! - [`AssetLedger::transfer`] is custodian-initiated: the core moves
//!   assets it controls (pool custody) to any account.
//! - [`AssetLedger::transfer_from`] is a pull: `spender` moves `from`'s
//!   assets and must hold a sufficient allowance granted by `from`.
//!
//! A failed transfer must leave the ledger unchanged.

use crate::domain::{Address, Amount, Decimals};
use crate::error::AmmError;

/// Balance, allowance and transfer interface over fungible assets.
///
/// # Errors
///
/// Implementations report:
///
/// - [`AmmError::UnknownAsset`] for an asset they do not track.
/// - [`AmmError::InsufficientBalance`] when `from` cannot cover a move.
/// - [`AmmError::InsufficientAllowance`] when a pull exceeds the approval.
pub trait AssetLedger {
    /// Fixed precision of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if the asset is not tracked.
    fn decimals(&self, asset: &Address) -> Result<Decimals, AmmError>;

    /// Balance of `holder` in `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if the asset is not tracked.
    fn balance_of(&self, asset: &Address, holder: &Address) -> Result<Amount, AmmError>;

    /// Amount `spender` may still pull from `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if the asset is not tracked.
    fn allowance(
        &self,
        asset: &Address,
        owner: &Address,
        spender: &Address,
    ) -> Result<Amount, AmmError>;

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// See the trait-level error list.
    fn transfer(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Pulls `amount` of `asset` from `from` to `to` on behalf of
    /// `spender`, consuming allowance.
    ///
    /// # Errors
    ///
    /// See the trait-level error list.
    fn transfer_from(
        &mut self,
        asset: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError>;
}
