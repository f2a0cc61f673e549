//! Per-pool liquidity share balances and approvals.

use std::collections::HashMap;

use crate::domain::{Address, Shares};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Fungible share accounting for one pool.
///
/// # Invariant
///
/// The sum of all holder balances equals [`total_supply`](Self::total_supply).
/// Every mutating method either applies completely or returns an error
/// without changing anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareLedger {
    supply: Shares,
    balances: HashMap<Address, Shares>,
    allowances: HashMap<(Address, Address), Shares>,
}

impl ShareLedger {
    /// Total outstanding shares.
    #[must_use]
    pub const fn total_supply(&self) -> Shares {
        self.supply
    }

    /// Balance of `holder`.
    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> Shares {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    /// Shares `spender` may still move on behalf of `owner`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Issues `shares` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if supply or balance overflows.
    pub fn mint(&mut self, to: &Address, shares: Shares) -> Result<(), AmmError> {
        let supply = self.supply.safe_add(&shares)?;
        let balance = self.balance_of(to).safe_add(&shares)?;
        self.supply = supply;
        self.balances.insert(*to, balance);
        Ok(())
    }

    /// Destroys `shares` held by `from`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `from` holds fewer.
    pub fn burn(&mut self, from: &Address, shares: Shares) -> Result<(), AmmError> {
        let balance = self
            .balance_of(from)
            .checked_sub(&shares)
            .ok_or(AmmError::InsufficientShares)?;
        let supply = self.supply.safe_sub(&shares)?;
        self.supply = supply;
        self.set_balance(from, balance);
        Ok(())
    }

    /// Moves shares between holders.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `from` holds fewer.
    pub fn transfer(&mut self, from: &Address, to: &Address, shares: Shares) -> Result<(), AmmError> {
        let from_balance = self
            .balance_of(from)
            .checked_sub(&shares)
            .ok_or(AmmError::InsufficientShares)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(to).safe_add(&shares)?;
        self.set_balance(from, from_balance);
        self.set_balance(to, to_balance);
        Ok(())
    }

    /// Holders with a zero balance have no entry.
    fn set_balance(&mut self, holder: &Address, balance: Shares) {
        if balance.is_zero() {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, balance);
        }
    }

    /// Sets `spender`'s allowance over `owner`'s shares.
    pub fn approve(&mut self, owner: &Address, spender: &Address, shares: Shares) {
        self.allowances.insert((*owner, *spender), shares);
    }

    /// Moves `from`'s shares on behalf of `spender`, consuming allowance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if the approval is too small.
    /// - [`AmmError::InsufficientShares`] if `from` holds fewer.
    pub fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        shares: Shares,
    ) -> Result<(), AmmError> {
        let remaining = self
            .allowance(from, spender)
            .checked_sub(&shares)
            .ok_or(AmmError::InsufficientAllowance)?;
        self.transfer(from, to, shares)?;
        self.allowances.insert((*from, *spender), remaining);
        Ok(())
    }
}
