//! Two-asset StableSwap pool engine (Curve style).
//!
//! Specialised for low-slippage swaps between assets expected to trade
//! near parity, such as stablecoins with different precisions.
//!
//! # Invariant (n = 2 assets)
//!
//! ```text
//! A·n·(x + y) + D = A·n·D + D³ / (n²·x·y)
//! ```
//!
//! solved on reserves normalized to 18 fractional digits (see
//! [`crate::math`]).
//!
//! # Swap Algorithm
//!
//! 1. `x_new = normalize(reserve_in + amount_in)`.
//! 2. Solve `y_new` with `D` held fixed.
//! 3. `gross = denormalize(y_old − y_new − 1)`.
//! 4. `fee = ceil(gross · fee_rate)`, `amount_out = gross − fee`.
//! 5. Update reserves and the cached invariant atomically.
//!
//! The fee stays in the output reserve, so `D` never decreases across a
//! swap.
//!
//! # Operation Guard
//!
//! State-changing operations take an [`OperationTicket`] obtained from
//! [`StablePool::enter`].  The convenience methods [`StablePool::swap`],
//! [`StablePool::deposit`] and [`StablePool::withdraw`] enter and exit
//! around a single operation.

use core::mem;

use primitive_types::U256;
use tracing::{debug, warn};

use super::status::{OperationTicket, PoolStatus};
use super::ShareLedger;
use crate::config::PoolConfig;
use crate::domain::{
    Address, Amount, Asset, AssetPair, BasisPoints, Deposit, PoolEvent, PoolId, Rounding, Shares,
    SwapResult, Withdrawal,
};
use crate::error::AmmError;
use crate::math::{
    compute_d, compute_y, mul_div_u256, spot_price, u256_to_u128, CheckedArithmetic,
};

/// A two-asset stable-swap pool.
///
/// # State
///
/// - `reserve_a` / `reserve_b`: balances in each asset's native precision.
/// - `shares`: liquidity share ledger (supply, balances, approvals).
/// - `cached_invariant`: `D` after the last state change.
/// - `last_invariant`: `D` checkpoint for protocol-fee accrual, refreshed
///   by deposits and withdrawals; zero while the protocol fee is off.
/// - `accumulated_fees_a` / `accumulated_fees_b`: lifetime trading fees
///   retained in each reserve.
/// - `pending`: events of the current operation, not yet published.
#[derive(Debug, Clone)]
pub struct StablePool {
    id: PoolId,
    pair: AssetPair,
    asset_a: Asset,
    asset_b: Asset,
    config: PoolConfig,
    fee_to: Option<Address>,
    reserve_a: Amount,
    reserve_b: Amount,
    shares: ShareLedger,
    cached_invariant: u128,
    last_invariant: u128,
    accumulated_fees_a: Amount,
    accumulated_fees_b: Amount,
    status: PoolStatus,
    pending: Vec<PoolEvent>,
}

impl StablePool {
    /// Creates an empty pool.  The assets are put in canonical order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if both assets share an identity.
    /// - [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(
        id: PoolId,
        x: Asset,
        y: Asset,
        config: PoolConfig,
        fee_to: Option<Address>,
    ) -> Result<Self, AmmError> {
        config.validate()?;
        let pair = AssetPair::new(x.id(), y.id())?;
        let (asset_a, asset_b) = if pair.is_first(&x.id()) { (x, y) } else { (y, x) };
        Ok(Self {
            id,
            pair,
            asset_a,
            asset_b,
            config,
            fee_to,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            shares: ShareLedger::default(),
            cached_invariant: 0,
            last_invariant: 0,
            accumulated_fees_a: Amount::ZERO,
            accumulated_fees_b: Amount::ZERO,
            status: PoolStatus::Idle,
            pending: Vec::new(),
        })
    }

    // -- accessors ----------------------------------------------------------

    /// Pool identity.
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// Canonical asset pair.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Lower-ordered asset.
    #[must_use]
    pub const fn asset_a(&self) -> Asset {
        self.asset_a
    }

    /// Higher-ordered asset.
    #[must_use]
    pub const fn asset_b(&self) -> Asset {
        self.asset_b
    }

    /// Curve and fee parameters.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Ledger account holding this pool's assets.
    #[must_use]
    pub const fn custody(&self) -> Address {
        self.id.custody()
    }

    /// Reserve of asset A.
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Reserve of asset B.
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Both reserves, in canonical order.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    /// Total outstanding shares, including the locked ones.
    pub const fn total_supply(&self) -> Shares {
        self.shares.total_supply()
    }

    /// Shares held by `holder`.
    pub fn balance_of(&self, holder: &Address) -> Shares {
        self.shares.balance_of(holder)
    }

    /// Shares `spender` may move on behalf of `owner`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.shares.allowance(owner, spender)
    }

    /// `D` after the last committed state change.
    #[must_use]
    pub const fn cached_invariant(&self) -> u128 {
        self.cached_invariant
    }

    /// Protocol-fee checkpoint.
    #[must_use]
    pub const fn last_invariant(&self) -> u128 {
        self.last_invariant
    }

    /// Lifetime trading fees retained in each reserve.
    #[must_use]
    pub const fn accumulated_fees(&self) -> (Amount, Amount) {
        (self.accumulated_fees_a, self.accumulated_fees_b)
    }

    /// Current protocol-fee recipient.
    #[must_use]
    pub const fn fee_to(&self) -> Option<Address> {
        self.fee_to
    }

    /// Execution state.
    #[must_use]
    pub const fn status(&self) -> PoolStatus {
        self.status
    }

    /// Events queued by operations and not yet published.
    #[must_use]
    pub fn pending_events(&self) -> &[PoolEvent] {
        &self.pending
    }

    /// `true` if `asset` is asset A, `false` if it is asset B.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if the pool does not hold `asset`.
    pub fn side_of(&self, asset: &Address) -> Result<bool, AmmError> {
        if *asset == self.asset_a.id() {
            Ok(true)
        } else if *asset == self.asset_b.id() {
            Ok(false)
        } else {
            Err(AmmError::UnknownAsset)
        }
    }

    /// Solves `D` from the current reserves.
    ///
    /// # Errors
    ///
    /// Propagates solver failures ([`AmmError::Overflow`],
    /// [`AmmError::InvariantDidNotConverge`]).
    pub fn invariant(&self) -> Result<u128, AmmError> {
        self.solve_d(self.reserve_a, self.reserve_b)
    }

    /// Marginal price of `base` in units of the other asset, as an
    /// 18-digit fixed-point integer on the internal scale.
    ///
    /// # Errors
    ///
    /// - [`AmmError::UnknownAsset`] if `base` is not in the pool.
    /// - [`AmmError::InsufficientLiquidity`] if the pool is empty.
    pub fn spot_price_scaled(&self, base: &Address) -> Result<u128, AmmError> {
        let base_is_a = self.side_of(base)?;
        let x = self.asset_a.normalize(self.reserve_a)?;
        let y = self.asset_b.normalize(self.reserve_b)?;
        if x == 0 || y == 0 {
            return Err(AmmError::InsufficientLiquidity);
        }
        let d = compute_d(x, y, self.config.amplification())?;
        if base_is_a {
            spot_price(x, y, d, self.config.amplification())
        } else {
            spot_price(y, x, d, self.config.amplification())
        }
    }

    // -- operation guard ----------------------------------------------------

    /// Locks the pool for one operation.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ReentrancyDetected`] if the pool is already in
    /// operation.
    pub fn enter(&mut self) -> Result<OperationTicket, AmmError> {
        if !self.status.is_idle() {
            warn!(pool = %self.id, "reentrant entry refused");
            return Err(AmmError::ReentrancyDetected);
        }
        self.status = PoolStatus::InOperation;
        Ok(OperationTicket::issue(self.id))
    }

    /// Unlocks the pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ReentrancyDetected`] if `ticket` was issued by
    /// another pool or the pool is not in operation.
    pub fn exit(&mut self, ticket: OperationTicket) -> Result<(), AmmError> {
        self.check_ticket(&ticket)?;
        self.status = PoolStatus::Idle;
        Ok(())
    }

    fn check_ticket(&self, ticket: &OperationTicket) -> Result<(), AmmError> {
        if ticket.pool() != self.id || self.status.is_idle() {
            return Err(AmmError::ReentrancyDetected);
        }
        Ok(())
    }

    fn require_idle(&self) -> Result<(), AmmError> {
        if self.status.is_idle() {
            Ok(())
        } else {
            Err(AmmError::ReentrancyDetected)
        }
    }

    fn guarded<T>(
        &mut self,
        op: impl FnOnce(&mut Self, &OperationTicket) -> Result<T, AmmError>,
    ) -> Result<T, AmmError> {
        let ticket = self.enter()?;
        let result = op(self, &ticket);
        self.exit(ticket)?;
        result
    }

    pub(crate) fn take_pending(&mut self) -> Vec<PoolEvent> {
        mem::take(&mut self.pending)
    }

    pub(crate) fn set_fee_to(&mut self, fee_to: Option<Address>) {
        self.fee_to = fee_to;
    }

    // -- swap ---------------------------------------------------------------

    /// Prices a swap without changing state.
    ///
    /// The result is exactly what [`swap_with`](Self::swap_with) would
    /// execute against the current reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if the pool is empty or the
    ///   output would drain the output reserve.
    /// - [`AmmError::InsufficientOutputAmount`] if the net output rounds
    ///   to zero.
    pub fn quote_swap(&self, amount_in: Amount, input_is_a: bool) -> Result<SwapResult, AmmError> {
        if amount_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        if self.reserve_a.is_zero() || self.reserve_b.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        let (asset_in, asset_out, reserve_in, reserve_out) = if input_is_a {
            (self.asset_a, self.asset_b, self.reserve_a, self.reserve_b)
        } else {
            (self.asset_b, self.asset_a, self.reserve_b, self.reserve_a)
        };

        let d = self.invariant()?;
        let x_new = asset_in.normalize(reserve_in.safe_add(&amount_in)?)?;
        let y_old = asset_out.normalize(reserve_out)?;
        let y_new = compute_y(x_new, d, self.config.amplification())?;

        // One internal unit is kept back to absorb solver rounding.
        let gross = asset_out.denormalize(y_old.saturating_sub(y_new).saturating_sub(1));
        let fee = self.config.fee_rate().apply(gross, Rounding::Up)?;
        let amount_out = gross.safe_sub(&fee)?;

        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }
        SwapResult::new(amount_in, amount_out, fee, input_is_a)
    }

    /// Executes a swap under an operation ticket.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ReentrancyDetected`] if `ticket` does not hold this
    ///   pool.
    /// - Everything [`quote_swap`](Self::quote_swap) reports.
    pub fn swap_with(
        &mut self,
        ticket: &OperationTicket,
        amount_in: Amount,
        input_is_a: bool,
    ) -> Result<SwapResult, AmmError> {
        self.check_ticket(ticket)?;
        let result = self.quote_swap(amount_in, input_is_a)?;

        let (reserve_a, reserve_b, fees_a, fees_b) = if input_is_a {
            (
                self.reserve_a.safe_add(&amount_in)?,
                self.reserve_b.safe_sub(&result.amount_out())?,
                self.accumulated_fees_a,
                self.accumulated_fees_b.safe_add(&result.fee())?,
            )
        } else {
            (
                self.reserve_a.safe_sub(&result.amount_out())?,
                self.reserve_b.safe_add(&amount_in)?,
                self.accumulated_fees_a.safe_add(&result.fee())?,
                self.accumulated_fees_b,
            )
        };
        let d = self.solve_d(reserve_a, reserve_b)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.accumulated_fees_a = fees_a;
        self.accumulated_fees_b = fees_b;
        self.cached_invariant = d;

        self.pending.push(PoolEvent::Swap {
            pool: self.id,
            amount_in,
            amount_out: result.amount_out(),
            input_is_a,
        });
        self.push_sync();
        debug!(
            pool = %self.id,
            %amount_in,
            amount_out = %result.amount_out(),
            fee = %result.fee(),
            input_is_a,
            "swap"
        );
        Ok(result)
    }

    /// Enters, swaps and exits.
    ///
    /// # Errors
    ///
    /// See [`swap_with`](Self::swap_with).
    pub fn swap(&mut self, amount_in: Amount, input_is_a: bool) -> Result<SwapResult, AmmError> {
        self.guarded(|pool, ticket| pool.swap_with(ticket, amount_in, input_is_a))
    }

    // -- deposit ------------------------------------------------------------

    /// Adds liquidity under an operation ticket and credits shares to `to`.
    ///
    /// For a funded pool the deposit is scaled down to the binding asset so
    /// the reserve ratio is preserved, and the minted shares are the
    /// smallest of the invariant-growth share and the two proportional
    /// shares.  The first deposit mints `D − minimum_locked_shares` to `to`
    /// and the locked remainder to [`Address::BURN`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::ReentrancyDetected`] if `ticket` does not hold this
    ///   pool.
    /// - [`AmmError::InsufficientInputAmount`] if either desired amount is
    ///   zero.
    /// - [`AmmError::InsufficientLiquidityMinted`] if no shares would be
    ///   minted.
    pub fn deposit_with(
        &mut self,
        ticket: &OperationTicket,
        to: &Address,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
    ) -> Result<Deposit, AmmError> {
        self.check_ticket(ticket)?;
        if amount_a_desired.is_zero() || amount_b_desired.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }

        let mut shares = self.shares.clone();
        let protocol_fee = self.accrue_protocol_fee(&mut shares)?;
        let supply = shares.total_supply();

        let (amount_a, amount_b, minted, locked) = if supply.is_zero() {
            let d = self.solve_d(amount_a_desired, amount_b_desired)?;
            let locked = self.config.minimum_locked_shares();
            if d <= locked.get() {
                return Err(AmmError::InsufficientLiquidityMinted);
            }
            (
                amount_a_desired,
                amount_b_desired,
                Shares::new(d - locked.get()),
                locked,
            )
        } else {
            let (a, b) = self.optimal_amounts(amount_a_desired, amount_b_desired)?;
            let d0 = self.invariant()?;
            let d1 = self.solve_d(self.reserve_a.safe_add(&a)?, self.reserve_b.safe_add(&b)?)?;
            let by_invariant = match d1.checked_sub(d0) {
                Some(growth) => supply.safe_mul_div(growth, d0, Rounding::Down)?,
                None => Shares::ZERO,
            };
            let by_a = supply.safe_mul_div(a.get(), self.reserve_a.get(), Rounding::Down)?;
            let by_b = supply.safe_mul_div(b.get(), self.reserve_b.get(), Rounding::Down)?;
            (a, b, by_invariant.min(by_a).min(by_b), Shares::ZERO)
        };

        if minted.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }
        if !locked.is_zero() {
            shares.mint(&Address::BURN, locked)?;
        }
        shares.mint(to, minted)?;

        let reserve_a = self.reserve_a.safe_add(&amount_a)?;
        let reserve_b = self.reserve_b.safe_add(&amount_b)?;
        let d = self.solve_d(reserve_a, reserve_b)?;

        self.shares = shares;
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.commit_invariant(d);

        self.push_protocol_fee(protocol_fee);
        self.pending.push(PoolEvent::Mint {
            pool: self.id,
            amount_a,
            amount_b,
            shares: minted,
        });
        self.push_sync();
        debug!(pool = %self.id, %amount_a, %amount_b, shares = %minted, %to, "deposit");

        Ok(Deposit {
            amount_a,
            amount_b,
            shares: minted,
        })
    }

    /// Enters, deposits and exits.
    ///
    /// # Errors
    ///
    /// See [`deposit_with`](Self::deposit_with).
    pub fn deposit(
        &mut self,
        to: &Address,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
    ) -> Result<Deposit, AmmError> {
        self.guarded(|pool, ticket| {
            pool.deposit_with(ticket, to, amount_a_desired, amount_b_desired)
        })
    }

    fn optimal_amounts(
        &self,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
    ) -> Result<(Amount, Amount), AmmError> {
        let b_optimal = amount_a_desired.safe_mul_div(
            self.reserve_b.get(),
            self.reserve_a.get(),
            Rounding::Down,
        )?;
        if b_optimal <= amount_b_desired {
            return Ok((amount_a_desired, b_optimal));
        }
        let a_optimal = amount_b_desired.safe_mul_div(
            self.reserve_a.get(),
            self.reserve_b.get(),
            Rounding::Down,
        )?;
        Ok((a_optimal, amount_b_desired))
    }

    // -- withdraw -----------------------------------------------------------

    /// Burns `shares_in` of `owner`'s shares under an operation ticket and
    /// releases the proportional reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ReentrancyDetected`] if `ticket` does not hold this
    ///   pool.
    /// - [`AmmError::InsufficientShares`] if `shares_in` is zero, exceeds
    ///   the owner's balance, or `owner` is [`Address::BURN`].
    /// - [`AmmError::InsufficientLiquidityBurned`] if both outputs round to
    ///   zero.
    pub fn withdraw_with(
        &mut self,
        ticket: &OperationTicket,
        owner: &Address,
        shares_in: Shares,
    ) -> Result<Withdrawal, AmmError> {
        self.check_ticket(ticket)?;
        if owner.is_burn() || shares_in.is_zero() || shares_in > self.shares.balance_of(owner) {
            return Err(AmmError::InsufficientShares);
        }

        let mut shares = self.shares.clone();
        let protocol_fee = self.accrue_protocol_fee(&mut shares)?;
        let supply = shares.total_supply().get();

        let amount_a = self
            .reserve_a
            .safe_mul_div(shares_in.get(), supply, Rounding::Down)?;
        let amount_b = self
            .reserve_b
            .safe_mul_div(shares_in.get(), supply, Rounding::Down)?;
        if amount_a.is_zero() && amount_b.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned);
        }
        shares.burn(owner, shares_in)?;

        let reserve_a = self.reserve_a.safe_sub(&amount_a)?;
        let reserve_b = self.reserve_b.safe_sub(&amount_b)?;
        let d = self.solve_d(reserve_a, reserve_b)?;

        self.shares = shares;
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.commit_invariant(d);

        self.push_protocol_fee(protocol_fee);
        self.pending.push(PoolEvent::Burn {
            pool: self.id,
            amount_a,
            amount_b,
            shares: shares_in,
        });
        self.push_sync();
        debug!(pool = %self.id, %amount_a, %amount_b, shares = %shares_in, %owner, "withdraw");

        Ok(Withdrawal {
            amount_a,
            amount_b,
            shares: shares_in,
        })
    }

    /// Enters, withdraws and exits.
    ///
    /// # Errors
    ///
    /// See [`withdraw_with`](Self::withdraw_with).
    pub fn withdraw(&mut self, owner: &Address, shares_in: Shares) -> Result<Withdrawal, AmmError> {
        self.guarded(|pool, ticket| pool.withdraw_with(ticket, owner, shares_in))
    }

    // -- share ledger -------------------------------------------------------

    /// Moves shares between holders.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ReentrancyDetected`] while an operation holds the pool.
    /// - [`AmmError::InsufficientShares`] if `from` holds fewer or is
    ///   [`Address::BURN`].
    pub fn transfer_shares(
        &mut self,
        from: &Address,
        to: &Address,
        shares: Shares,
    ) -> Result<(), AmmError> {
        self.require_idle()?;
        Self::require_redeemable(from)?;
        self.shares.transfer(from, to, shares)
    }

    /// Sets `spender`'s allowance over `owner`'s shares.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ReentrancyDetected`] while an operation holds
    /// the pool.
    pub fn approve_shares(
        &mut self,
        owner: &Address,
        spender: &Address,
        shares: Shares,
    ) -> Result<(), AmmError> {
        self.require_idle()?;
        self.shares.approve(owner, spender, shares);
        Ok(())
    }

    /// Moves `from`'s shares on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ReentrancyDetected`] while an operation holds the pool.
    /// - [`AmmError::InsufficientAllowance`] / [`AmmError::InsufficientShares`].
    /// - [`AmmError::InsufficientShares`] if `from` is [`Address::BURN`].
    pub fn transfer_shares_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        shares: Shares,
    ) -> Result<(), AmmError> {
        self.require_idle()?;
        Self::require_redeemable(from)?;
        self.shares.transfer_from(spender, from, to, shares)
    }

    /// Shares held by the burn sink never move again.
    fn require_redeemable(holder: &Address) -> Result<(), AmmError> {
        if holder.is_burn() {
            return Err(AmmError::InsufficientShares);
        }
        Ok(())
    }

    // -- internals ----------------------------------------------------------

    fn solve_d(&self, reserve_a: Amount, reserve_b: Amount) -> Result<u128, AmmError> {
        let x = self.asset_a.normalize(reserve_a)?;
        let y = self.asset_b.normalize(reserve_b)?;
        compute_d(x, y, self.config.amplification())
    }

    fn protocol_fee_recipient(&self) -> Option<Address> {
        if self.config.protocol_fee_share().get() == 0 {
            return None;
        }
        self.fee_to
    }

    /// Mints the protocol's cut of invariant growth since the last
    /// checkpoint into `shares`.
    fn accrue_protocol_fee(
        &self,
        shares: &mut ShareLedger,
    ) -> Result<Option<(Address, Shares)>, AmmError> {
        let Some(recipient) = self.protocol_fee_recipient() else {
            return Ok(None);
        };
        if self.last_invariant == 0 {
            return Ok(None);
        }
        let d = self.invariant()?;
        let Some(growth) = d.checked_sub(self.last_invariant).filter(|g| *g > 0) else {
            return Ok(None);
        };

        // supply·p·(D − D_last) / (10 000·D − p·(D − D_last))
        let weighted_growth = U256::from(self.config.protocol_fee_share().get())
            .checked_mul(U256::from(growth))
            .ok_or(AmmError::Overflow("protocol fee: growth overflow"))?;
        let denominator = U256::from(BasisPoints::DENOMINATOR)
            .checked_mul(U256::from(d))
            .and_then(|v| v.checked_sub(weighted_growth))
            .ok_or(AmmError::Underflow("protocol fee: denominator"))?;
        let minted = mul_div_u256(
            U256::from(shares.total_supply().get()),
            weighted_growth,
            denominator,
            Rounding::Down,
        )
        .and_then(u256_to_u128)
        .ok_or(AmmError::Overflow("protocol fee: shares overflow"))?;
        if minted == 0 {
            return Ok(None);
        }
        let minted = Shares::new(minted);
        shares.mint(&recipient, minted)?;
        Ok(Some((recipient, minted)))
    }

    fn commit_invariant(&mut self, d: u128) {
        self.cached_invariant = d;
        self.last_invariant = if self.protocol_fee_recipient().is_some() {
            d
        } else {
            0
        };
    }

    fn push_protocol_fee(&mut self, minted: Option<(Address, Shares)>) {
        if let Some((recipient, shares)) = minted {
            debug!(pool = %self.id, %recipient, %shares, "protocol fee minted");
            self.pending.push(PoolEvent::ProtocolFeeMinted {
                pool: self.id,
                recipient,
                shares,
            });
        }
    }

    fn push_sync(&mut self) {
        self.pending.push(PoolEvent::Sync {
            pool: self.id,
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
        });
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Decimals;
    use crate::math::mul_div;

    fn asset(n: u64, decimals: u8) -> Asset {
        let Ok(d) = Decimals::new(decimals) else {
            panic!("valid decimals");
        };
        Asset::new(Address::from_u64(n), d)
    }

    fn lp() -> Address {
        Address::from_u64(100)
    }

    fn empty_pool(config: PoolConfig, fee_to: Option<Address>) -> StablePool {
        let Ok(pool) = StablePool::new(PoolId::new(0), asset(1, 6), asset(2, 6), config, fee_to)
        else {
            panic!("valid pool");
        };
        pool
    }

    fn funded_pool(amp: u32, reserve: u128) -> StablePool {
        let Ok(config) = PoolConfig::default().with_amplification(amp) else {
            panic!("valid config");
        };
        let mut pool = empty_pool(config, None);
        let Ok(_) = pool.deposit(&lp(), Amount::new(reserve), Amount::new(reserve)) else {
            panic!("first deposit");
        };
        pool
    }

    // -- construction -------------------------------------------------------

    #[test]
    fn new_pool_is_empty_and_canonical() {
        let Ok(pool) = StablePool::new(
            PoolId::new(3),
            asset(9, 8),
            asset(2, 6),
            PoolConfig::default(),
            None,
        ) else {
            panic!("valid pool");
        };
        assert_eq!(pool.asset_a().id(), Address::from_u64(2));
        assert_eq!(pool.asset_b().id(), Address::from_u64(9));
        assert_eq!(pool.reserves(), (Amount::ZERO, Amount::ZERO));
        assert_eq!(pool.total_supply(), Shares::ZERO);
        assert_eq!(pool.cached_invariant(), 0);
        assert_eq!(pool.invariant(), Ok(0));
        assert!(pool.status().is_idle());
    }

    #[test]
    fn identical_assets_rejected() {
        let r = StablePool::new(
            PoolId::new(0),
            asset(1, 6),
            asset(1, 8),
            PoolConfig::default(),
            None,
        );
        assert!(matches!(r, Err(AmmError::IdenticalAssets)));
    }

    // -- swap ---------------------------------------------------------------

    #[test]
    fn swap_on_empty_pool() {
        let mut pool = empty_pool(PoolConfig::default(), None);
        assert!(matches!(
            pool.swap(Amount::new(1_000), true),
            Err(AmmError::InsufficientLiquidity)
        ));
    }

    #[test]
    fn zero_input_rejected() {
        let mut pool = funded_pool(100, 1_000_000);
        assert!(matches!(
            pool.swap(Amount::ZERO, true),
            Err(AmmError::InsufficientInputAmount)
        ));
    }

    #[test]
    fn reference_swap_near_peg() {
        let mut pool = funded_pool(100, 1_000_000);
        let Ok(r) = pool.swap(Amount::new(1_000), true) else {
            panic!("swap");
        };
        assert_eq!(r.amount_out(), Amount::new(998));
        assert_eq!(r.fee(), Amount::new(1));
        assert_eq!(pool.reserves(), (Amount::new(1_001_000), Amount::new(999_002)));
        assert_eq!(pool.accumulated_fees(), (Amount::ZERO, Amount::new(1)));
    }

    #[test]
    fn low_amplification_reference_swap() {
        let mut pool = funded_pool(1, 1_000_000);
        let Ok(r) = pool.swap(Amount::new(1_000), true) else {
            panic!("swap");
        };
        assert_eq!(r.amount_out(), Amount::new(998));
    }

    #[test]
    fn large_reserve_reference_swap() {
        let mut pool = funded_pool(100, 1_000_000_000_000);
        let Ok(r) = pool.swap(Amount::new(1_000_000_000), true) else {
            panic!("swap");
        };
        assert_eq!(r.amount_out(), Amount::new(999_590_102));
        assert_eq!(r.fee(), Amount::new(399_997));
        assert_eq!(r.gross_out(), Some(Amount::new(999_990_099)));
    }

    #[test]
    fn swap_does_not_decrease_invariant() {
        let mut pool = funded_pool(100, 1_000_000_000);
        let before = pool.cached_invariant();
        let Ok(_) = pool.swap(Amount::new(250_000_000), false) else {
            panic!("swap");
        };
        assert!(pool.cached_invariant() >= before);
        assert_eq!(pool.invariant(), Ok(pool.cached_invariant()));
    }

    #[test]
    fn quote_matches_execution() {
        let mut pool = funded_pool(100, 5_000_000);
        let Ok(quoted) = pool.quote_swap(Amount::new(12_345), false) else {
            panic!("quote");
        };
        let Ok(executed) = pool.swap(Amount::new(12_345), false) else {
            panic!("swap");
        };
        assert_eq!(quoted, executed);
    }

    #[test]
    fn dust_swap_rounds_to_zero() {
        let mut pool = funded_pool(100, 1_000_000);
        assert!(matches!(
            pool.swap(Amount::new(1), true),
            Err(AmmError::InsufficientOutputAmount)
        ));
    }

    #[test]
    fn huge_swap_never_drains_output() {
        let mut pool = funded_pool(1, 1_000);
        let Ok(r) = pool.swap(Amount::new(u128::from(u64::MAX)), true) else {
            panic!("swap");
        };
        assert!(r.amount_out() < Amount::new(1_000));
        assert!(!pool.reserve_b().is_zero());
    }

    #[test]
    fn swap_queues_events() {
        let mut pool = funded_pool(100, 1_000_000);
        let _ = pool.take_pending();
        let Ok(_) = pool.swap(Amount::new(1_000), true) else {
            panic!("swap");
        };
        assert_eq!(
            pool.pending_events(),
            &[
                PoolEvent::Swap {
                    pool: PoolId::new(0),
                    amount_in: Amount::new(1_000),
                    amount_out: Amount::new(998),
                    input_is_a: true,
                },
                PoolEvent::Sync {
                    pool: PoolId::new(0),
                    reserve_a: Amount::new(1_001_000),
                    reserve_b: Amount::new(999_002),
                },
            ]
        );
    }

    // -- operation guard ----------------------------------------------------

    #[test]
    fn reentry_is_refused() {
        let mut pool = funded_pool(100, 1_000_000);
        let Ok(ticket) = pool.enter() else {
            panic!("enter");
        };
        assert!(matches!(pool.enter(), Err(AmmError::ReentrancyDetected)));
        assert!(matches!(
            pool.swap(Amount::new(1_000), true),
            Err(AmmError::ReentrancyDetected)
        ));
        assert!(matches!(
            pool.transfer_shares(&lp(), &Address::from_u64(7), Shares::new(1)),
            Err(AmmError::ReentrancyDetected)
        ));
        let Ok(_) = pool.swap_with(&ticket, Amount::new(1_000), true) else {
            panic!("swap under ticket");
        };
        let Ok(()) = pool.exit(ticket) else {
            panic!("exit");
        };
        assert!(pool.status().is_idle());
    }

    #[test]
    fn foreign_ticket_rejected() {
        let mut pool = funded_pool(100, 1_000_000);
        let Ok(mut other) = StablePool::new(
            PoolId::new(1),
            asset(3, 6),
            asset(4, 6),
            PoolConfig::default(),
            None,
        ) else {
            panic!("valid pool");
        };
        let Ok(foreign) = other.enter() else {
            panic!("enter");
        };
        let Ok(_own) = pool.enter() else {
            panic!("enter");
        };
        assert!(matches!(
            pool.swap_with(&foreign, Amount::new(1_000), true),
            Err(AmmError::ReentrancyDetected)
        ));
    }

    // -- deposit ------------------------------------------------------------

    #[test]
    fn first_deposit_locks_minimum_shares() {
        let pool = funded_pool(100, 1_000_000);
        let d = 2_000_000_000_000_000_000u128;
        assert_eq!(pool.cached_invariant(), d);
        assert_eq!(pool.total_supply(), Shares::new(d));
        assert_eq!(pool.balance_of(&Address::BURN), Shares::new(1_000));
        assert_eq!(pool.balance_of(&lp()), Shares::new(d - 1_000));
    }

    #[test]
    fn first_deposit_mixed_precision() {
        let Ok(mut pool) = StablePool::new(
            PoolId::new(0),
            asset(1, 8),
            asset(2, 6),
            PoolConfig::default(),
            None,
        ) else {
            panic!("valid pool");
        };
        let Ok(dep) = pool.deposit(
            &lp(),
            Amount::new(10_000 * 100_000_000),
            Amount::new(10_000 * 1_000_000),
        ) else {
            panic!("deposit");
        };
        let d = 20_000_000_000_000_000_000_000u128;
        assert_eq!(pool.cached_invariant(), d);
        assert_eq!(dep.shares, Shares::new(d - 1_000));
    }

    #[test]
    fn first_deposit_below_lock() {
        let Ok(config) = PoolConfig::new(100, BasisPoints::new(4), BasisPoints::ZERO, Shares::new(u128::MAX))
        else {
            panic!("valid config");
        };
        let mut pool = empty_pool(config, None);
        assert!(matches!(
            pool.deposit(&lp(), Amount::new(10), Amount::new(10)),
            Err(AmmError::InsufficientLiquidityMinted)
        ));
        assert_eq!(pool.total_supply(), Shares::ZERO);
    }

    #[test]
    fn zero_desired_amount_rejected() {
        let mut pool = empty_pool(PoolConfig::default(), None);
        assert!(matches!(
            pool.deposit(&lp(), Amount::new(10), Amount::ZERO),
            Err(AmmError::InsufficientInputAmount)
        ));
    }

    #[test]
    fn later_deposit_keeps_ratio() {
        let mut pool = funded_pool(100, 1_000_000);
        let supply = pool.total_supply();
        let Ok(dep) = pool.deposit(&lp(), Amount::new(500_000), Amount::new(2_000_000)) else {
            panic!("deposit");
        };
        assert_eq!(dep.amount_a, Amount::new(500_000));
        assert_eq!(dep.amount_b, Amount::new(500_000));
        assert!(dep.shares <= Shares::new(supply.get() / 2));
        assert!(!dep.shares.is_zero());
    }

    // -- withdraw -----------------------------------------------------------

    #[test]
    fn withdraw_more_than_held() {
        let mut pool = funded_pool(100, 1_000_000);
        let held = pool.balance_of(&lp());
        let reserves = pool.reserves();
        let supply = pool.total_supply();
        assert!(matches!(
            pool.withdraw(&lp(), Shares::new(held.get() + 1)),
            Err(AmmError::InsufficientShares)
        ));
        assert!(matches!(
            pool.withdraw(&lp(), Shares::ZERO),
            Err(AmmError::InsufficientShares)
        ));
        assert_eq!(pool.reserves(), reserves);
        assert_eq!(pool.total_supply(), supply);
    }

    #[test]
    fn deposit_then_withdraw_never_gains() {
        let mut pool = funded_pool(100, 7_777_777);
        let other = Address::from_u64(200);
        let Ok(dep) = pool.deposit(&other, Amount::new(1_234_567), Amount::new(9_999_999)) else {
            panic!("deposit");
        };
        let Ok(w) = pool.withdraw(&other, dep.shares) else {
            panic!("withdraw");
        };
        assert!(w.amount_a <= dep.amount_a);
        assert!(w.amount_b <= dep.amount_b);
        assert_eq!(pool.balance_of(&other), Shares::ZERO);
    }

    #[test]
    fn withdraw_dust_burns_nothing() {
        let mut pool = funded_pool(100, 1_000_000);
        assert!(matches!(
            pool.withdraw(&lp(), Shares::new(1)),
            Err(AmmError::InsufficientLiquidityBurned)
        ));
    }

    #[test]
    fn locked_shares_never_leave_burn_sink() {
        let mut pool = funded_pool(100, 1_000_000);
        let held = pool.balance_of(&lp());
        let Ok(_) = pool.withdraw(&lp(), held) else {
            panic!("withdraw all");
        };
        let locked = Shares::new(1_000);
        assert_eq!(pool.total_supply(), locked);
        let reserves = pool.reserves();
        assert!(!reserves.0.is_zero() && !reserves.1.is_zero());

        assert_eq!(
            pool.withdraw(&Address::BURN, locked),
            Err(AmmError::InsufficientShares)
        );
        assert_eq!(
            pool.transfer_shares(&Address::BURN, &lp(), locked),
            Err(AmmError::InsufficientShares)
        );
        let Ok(()) = pool.approve_shares(&Address::BURN, &lp(), locked) else {
            panic!("approve");
        };
        assert_eq!(
            pool.transfer_shares_from(&lp(), &Address::BURN, &lp(), locked),
            Err(AmmError::InsufficientShares)
        );

        assert_eq!(pool.reserves(), reserves);
        assert_eq!(pool.total_supply(), locked);
        assert_eq!(pool.balance_of(&Address::BURN), locked);
        assert_eq!(pool.balance_of(&lp()), Shares::ZERO);
    }

    // -- protocol fee -------------------------------------------------------

    fn fee_bearing_pool(treasury: Address) -> StablePool {
        let Ok(config) = PoolConfig::default().with_protocol_fee_share(BasisPoints::new(5_000))
        else {
            panic!("valid config");
        };
        let mut pool = empty_pool(config, Some(treasury));
        let reserve = Amount::new(1_000_000_000_000);
        let Ok(_) = pool.deposit(&lp(), reserve, reserve) else {
            panic!("deposit");
        };
        for _ in 0..10 {
            let Ok(_) = pool.swap(Amount::new(10_000_000_000), true) else {
                panic!("swap");
            };
            let Ok(_) = pool.swap(Amount::new(10_000_000_000), false) else {
                panic!("swap");
            };
        }
        let _ = pool.take_pending();
        pool
    }

    #[test]
    fn protocol_fee_minted_before_withdrawal() {
        let treasury = Address::from_u64(500);
        let mut pool = fee_bearing_pool(treasury);
        assert_eq!(pool.balance_of(&treasury), Shares::ZERO);

        let supply = pool.total_supply().get();
        let (reserve_a, reserve_b) = pool.reserves();
        let last = pool.last_invariant();
        let Ok(d) = pool.invariant() else {
            panic!("invariant");
        };
        assert!(d > last);
        let weighted = 5_000 * (d - last);
        let Some(expected) = mul_div(supply, weighted, 10_000 * d - weighted, Rounding::Down)
        else {
            panic!("fee shares fit");
        };
        assert!(expected > 0);

        let shares_in = Shares::new(pool.balance_of(&lp()).get() / 2);
        let Ok(w) = pool.withdraw(&lp(), shares_in) else {
            panic!("withdraw");
        };
        let minted = pool.balance_of(&treasury);
        assert_eq!(minted, Shares::new(expected));
        assert!(matches!(
            pool.pending_events().first(),
            Some(PoolEvent::ProtocolFeeMinted { recipient, shares, .. })
                if *recipient == treasury && *shares == minted
        ));

        // Payout is pro-rata against the supply including the fee mint.
        let grown = supply + expected;
        assert_eq!(
            Some(w.amount_a.get()),
            mul_div(reserve_a.get(), shares_in.get(), grown, Rounding::Down)
        );
        assert_eq!(
            Some(w.amount_b.get()),
            mul_div(reserve_b.get(), shares_in.get(), grown, Rounding::Down)
        );
        assert_eq!(pool.total_supply().get(), grown - shares_in.get());
        assert_eq!(pool.last_invariant(), pool.cached_invariant());
    }

    #[test]
    fn protocol_fee_minted_on_growth() {
        let treasury = Address::from_u64(500);
        let mut pool = fee_bearing_pool(treasury);
        assert!(pool.last_invariant() > 0);
        assert_eq!(pool.balance_of(&treasury), Shares::ZERO);

        let Ok(_) = pool.deposit(&lp(), Amount::new(1_000_000), Amount::new(1_000_000)) else {
            panic!("deposit");
        };
        let minted = pool.balance_of(&treasury);
        assert!(!minted.is_zero());
        assert!(matches!(
            pool.pending_events().first(),
            Some(PoolEvent::ProtocolFeeMinted { recipient, shares, .. })
                if *recipient == treasury && *shares == minted
        ));
    }

    #[test]
    fn protocol_fee_off_keeps_checkpoint_zero() {
        let pool = funded_pool(100, 1_000_000);
        assert_eq!(pool.last_invariant(), 0);
    }

    // -- price --------------------------------------------------------------

    #[test]
    fn spot_price_balanced() {
        let pool = funded_pool(100, 1_000_000);
        assert_eq!(
            pool.spot_price_scaled(&Address::from_u64(1)),
            Ok(1_000_000_000_000_000_000)
        );
        assert_eq!(
            pool.spot_price_scaled(&Address::from_u64(9)),
            Err(AmmError::UnknownAsset)
        );
    }
}
