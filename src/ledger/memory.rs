//! In-memory asset ledger.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{Address, Amount, Decimals};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::AssetLedger;

#[derive(Debug, Clone)]
struct AssetBook {
    decimals: Decimals,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl AssetBook {
    fn balance(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn move_balance(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), AmmError> {
        let from_balance = self
            .balance(from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance(to).safe_add(&amount)?;
        self.set_balance(from, from_balance);
        self.set_balance(to, to_balance);
        Ok(())
    }

    fn set_balance(&mut self, holder: &Address, balance: Amount) {
        if balance.is_zero() {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, balance);
        }
    }
}

/// A self-contained [`AssetLedger`] backed by hash maps.
///
/// Suitable for tests, simulations and the demo.  An allowance of
/// [`Amount::MAX`] is treated as unlimited and never decremented.
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::{Address, Amount, Decimals};
/// use tenk_amm::ledger::MemoryLedger;
/// use tenk_amm::traits::AssetLedger;
///
/// let usdc = Address::from_u64(1);
/// let alice = Address::from_u64(10);
/// let mut ledger = MemoryLedger::new();
/// ledger.register_asset(usdc, Decimals::new(6).expect("valid")).expect("new asset");
/// ledger.mint(&usdc, &alice, Amount::new(5_000_000)).expect("mint");
/// assert_eq!(ledger.balance_of(&usdc, &alice), Ok(Amount::new(5_000_000)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    assets: HashMap<Address, AssetBook>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `asset` with the given precision.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the asset is already
    /// registered.
    pub fn register_asset(&mut self, asset: Address, decimals: Decimals) -> Result<(), AmmError> {
        if self.assets.contains_key(&asset) {
            return Err(AmmError::InvalidConfiguration("asset already registered"));
        }
        self.assets.insert(
            asset,
            AssetBook {
                decimals,
                balances: HashMap::new(),
                allowances: HashMap::new(),
            },
        );
        Ok(())
    }

    /// Credits newly issued `amount` to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::UnknownAsset`] if the asset is not registered.
    /// - [`AmmError::Overflow`] if the balance would exceed `u128`.
    pub fn mint(&mut self, asset: &Address, to: &Address, amount: Amount) -> Result<(), AmmError> {
        let book = self.book_mut(asset)?;
        let balance = book.balance(to).safe_add(&amount)?;
        book.set_balance(to, balance);
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if the asset is not registered.
    pub fn approve(
        &mut self,
        asset: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.book_mut(asset)?
            .allowances
            .insert((*owner, *spender), amount);
        Ok(())
    }

    fn book(&self, asset: &Address) -> Result<&AssetBook, AmmError> {
        self.assets.get(asset).ok_or(AmmError::UnknownAsset)
    }

    fn book_mut(&mut self, asset: &Address) -> Result<&mut AssetBook, AmmError> {
        self.assets.get_mut(asset).ok_or(AmmError::UnknownAsset)
    }
}

impl AssetLedger for MemoryLedger {
    fn decimals(&self, asset: &Address) -> Result<Decimals, AmmError> {
        Ok(self.book(asset)?.decimals)
    }

    fn balance_of(&self, asset: &Address, holder: &Address) -> Result<Amount, AmmError> {
        Ok(self.book(asset)?.balance(holder))
    }

    fn allowance(
        &self,
        asset: &Address,
        owner: &Address,
        spender: &Address,
    ) -> Result<Amount, AmmError> {
        Ok(self.book(asset)?.allowance(owner, spender))
    }

    fn transfer(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.book_mut(asset)?.move_balance(from, to, amount)?;
        trace!(%asset, %from, %to, %amount, "transfer");
        Ok(())
    }

    fn transfer_from(
        &mut self,
        asset: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let book = self.book_mut(asset)?;
        let allowed = book.allowance(from, spender);
        let remaining = if allowed == Amount::MAX {
            allowed
        } else {
            allowed
                .checked_sub(&amount)
                .ok_or(AmmError::InsufficientAllowance)?
        };
        book.move_balance(from, to, amount)?;
        book.allowances.insert((*from, *spender), remaining);
        trace!(%asset, %spender, %from, %to, %amount, "transfer_from");
        Ok(())
    }
}
