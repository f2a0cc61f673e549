//! Multi-hop router over the pair registry.
//!
//! The router owns no pool state.  Each state-changing call follows the
//! same sequence:
//!
//! 1. Check the deadline, then validate the request shape.
//! 2. Resolve every pool the call touches and enter each one once.
//! 3. Run the pool operations and publish their events.
//! 4. Check the caller's bounds.
//! 5. Move the backing assets through the [`AssetLedger`].
//! 6. Exit every pool.
//!
//! A failure at any step restores every touched pool and the event log to
//! their state before step 2, and reverses the asset transfers already
//! made.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, warn};

use super::request::{AddLiquidity, RemoveLiquidity, SwapExactIn};
use crate::domain::{
    Address, Amount, AssetPair, Deposit, PoolId, Rounding, SwapPath, Withdrawal,
};
use crate::error::AmmError;
use crate::factory::{Checkpoint, PairRegistry};
use crate::math::mul_div;
use crate::pools::{OperationTicket, StablePool};
use crate::traits::{AssetLedger, Clock, SystemClock};

/// Stateless orchestrator for liquidity and swaps.
///
/// `address` is the account callers approve on the [`AssetLedger`] so the
/// router can pull their assets into pool custody.  The caller passed to
/// each operation is the authenticated principal: its shares are burned
/// directly, and assets leave its account only through its own approvals.
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::{Address, Amount, Decimals};
/// use tenk_amm::factory::PairRegistry;
/// use tenk_amm::ledger::MemoryLedger;
/// use tenk_amm::router::{AddLiquidity, Router};
/// use tenk_amm::traits::ManualClock;
///
/// let (usdt, usdc) = (Address::from_u64(1), Address::from_u64(2));
/// let owner = Address::from_u64(10);
/// let router = Router::new(Address::from_u64(99), ManualClock::new(1_000));
///
/// let mut ledger = MemoryLedger::new();
/// for (asset, decimals) in [(usdt, 8), (usdc, 6)] {
///     ledger.register_asset(asset, Decimals::new(decimals).expect("valid")).expect("new");
///     ledger.mint(&asset, &owner, Amount::new(10u128.pow(15))).expect("mint");
///     ledger.approve(&asset, &owner, &router.address(), Amount::MAX).expect("approve");
/// }
///
/// let mut registry = PairRegistry::default();
/// registry.create_pair(&ledger, usdt, usdc).expect("created");
///
/// let request = AddLiquidity {
///     asset_a: usdt,
///     asset_b: usdc,
///     amount_a_desired: Amount::new(10_000 * 100_000_000),
///     amount_b_desired: Amount::new(10_000 * 1_000_000),
///     amount_a_min: Amount::ZERO,
///     amount_b_min: Amount::ZERO,
///     to: owner,
///     deadline: 2_000,
/// };
/// let deposit = router.add_liquidity(&mut registry, &mut ledger, &owner, &request).expect("added");
/// assert_eq!(deposit.amount_a, Amount::new(10_000 * 100_000_000));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Router<C: Clock = SystemClock> {
    address: Address,
    clock: C,
}

impl<C: Clock> Router<C> {
    /// Creates a router acting as `address` and reading time from `clock`.
    pub const fn new(address: Address, clock: C) -> Self {
        Self { address, clock }
    }

    /// Account callers approve for asset pulls.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Time source for deadlines.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    fn ensure(&self, deadline: u64) -> Result<(), AmmError> {
        if self.clock.now() > deadline {
            return Err(AmmError::Expired);
        }
        Ok(())
    }

    // -- queries ------------------------------------------------------------

    /// Pool serving `{x, y}`, in either order.
    #[must_use]
    pub fn get_pair(&self, registry: &PairRegistry, x: Address, y: Address) -> Option<PoolId> {
        registry.get_pair(x, y)
    }

    /// Proportional counterpart of `amount_a` at the ratio
    /// `reserve_b / reserve_a`, rounded down.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInputAmount`] if `amount_a` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
    /// - [`AmmError::Overflow`] if the result exceeds `u128`.
    pub fn quote(
        amount_a: Amount,
        reserve_a: Amount,
        reserve_b: Amount,
    ) -> Result<Amount, AmmError> {
        if amount_a.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        mul_div(amount_a.get(), reserve_b.get(), reserve_a.get(), Rounding::Down)
            .map(Amount::new)
            .ok_or(AmmError::Overflow("quote"))
    }

    /// Net output of selling `amount_in` of `asset_in` for `asset_out` in a
    /// single pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PairNotFound`] if no pool serves the pair.
    /// - Everything [`StablePool::quote_swap`] reports.
    pub fn get_amount_out(
        &self,
        registry: &PairRegistry,
        amount_in: Amount,
        asset_in: Address,
        asset_out: Address,
    ) -> Result<Amount, AmmError> {
        let pool = registry.pool_for(asset_in, asset_out)?;
        let input_is_a = pool.side_of(&asset_in)?;
        Ok(pool.quote_swap(amount_in, input_is_a)?.amount_out())
    }

    /// Per-hop amounts for selling `amount_in` along `path`, starting with
    /// `amount_in` itself.
    ///
    /// Hops run against scratch copies of the pools, so a route that
    /// revisits a pool sees that pool's earlier hop.  The result equals
    /// what [`swap_exact_tokens_for_tokens`](Self::swap_exact_tokens_for_tokens)
    /// would execute now.  A pool locked by an operation in flight reports
    /// [`AmmError::ReentrancyDetected`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] / [`AmmError::IdenticalAssets`] for a
    ///   malformed path.
    /// - [`AmmError::PairNotFound`] if a hop has no pool.
    /// - Any swap error of a hop.
    pub fn get_amounts_out(
        &self,
        registry: &PairRegistry,
        amount_in: Amount,
        path: &[Address],
    ) -> Result<Vec<Amount>, AmmError> {
        let path = SwapPath::try_from(path)?;
        let mut scratch: HashMap<PoolId, StablePool> = HashMap::new();
        let mut amounts = Vec::with_capacity(path.assets().len());
        amounts.push(amount_in);

        let mut current = amount_in;
        for (asset_in, asset_out) in path.hops() {
            let id = registry
                .get_pair(asset_in, asset_out)
                .ok_or(AmmError::PairNotFound)?;
            let pool = match scratch.entry(id) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(registry.pool(id)?.clone()),
            };
            let input_is_a = pool.side_of(&asset_in)?;
            current = pool.swap(current, input_is_a)?.amount_out();
            amounts.push(current);
        }
        Ok(amounts)
    }

    // -- liquidity ----------------------------------------------------------

    /// Deposits into the pool for `{asset_a, asset_b}`, pulling the used
    /// amounts from `caller` and crediting shares to `request.to`.
    ///
    /// Amounts in the result follow the request's asset order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if the deadline has passed.
    /// - [`AmmError::PairNotFound`] if no pool serves the pair.
    /// - [`AmmError::IdenticalAssets`] if both assets are the same.
    /// - [`AmmError::SlippageExceeded`] if a used amount is below its
    ///   minimum.
    /// - Everything [`StablePool::deposit_with`] and the ledger report.
    pub fn add_liquidity<L: AssetLedger>(
        &self,
        registry: &mut PairRegistry,
        ledger: &mut L,
        caller: &Address,
        request: &AddLiquidity,
    ) -> Result<Deposit, AmmError> {
        self.ensure(request.deadline)?;
        let id = resolve(registry, request.asset_a, request.asset_b)?;
        let a_is_first = registry.pool(id)?.side_of(&request.asset_a)?;
        let (first_desired, second_desired) = ordered(
            a_is_first,
            request.amount_a_desired,
            request.amount_b_desired,
        );

        let deposit = self.atomically(registry, ledger, &[id], |registry, transfers, session| {
            let used = registry.pool_mut(id)?.deposit_with(
                session.ticket(id)?,
                &request.to,
                first_desired,
                second_desired,
            )?;
            let (amount_a, amount_b) = ordered(a_is_first, used.amount_a, used.amount_b);
            if amount_a < request.amount_a_min {
                return Err(AmmError::SlippageExceeded("amount_a below minimum"));
            }
            if amount_b < request.amount_b_min {
                return Err(AmmError::SlippageExceeded("amount_b below minimum"));
            }
            registry.publish(id)?;

            let custody = id.custody();
            transfers.pull(&request.asset_a, &self.address, caller, &custody, amount_a)?;
            transfers.pull(&request.asset_b, &self.address, caller, &custody, amount_b)?;
            Ok(Deposit {
                amount_a,
                amount_b,
                shares: used.shares,
            })
        })?;

        debug!(
            pool = %id,
            amount_a = %deposit.amount_a,
            amount_b = %deposit.amount_b,
            shares = %deposit.shares,
            to = %request.to,
            "liquidity added"
        );
        Ok(deposit)
    }

    /// Burns `caller`'s shares in the pool for `{asset_a, asset_b}` and pays
    /// both assets to `request.to`.
    ///
    /// Amounts in the result follow the request's asset order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if the deadline has passed.
    /// - [`AmmError::PairNotFound`] if no pool serves the pair.
    /// - [`AmmError::IdenticalAssets`] if both assets are the same.
    /// - [`AmmError::InsufficientShares`] if `caller` holds fewer shares.
    /// - [`AmmError::SlippageExceeded`] if an output is below its minimum.
    pub fn remove_liquidity<L: AssetLedger>(
        &self,
        registry: &mut PairRegistry,
        ledger: &mut L,
        caller: &Address,
        request: &RemoveLiquidity,
    ) -> Result<Withdrawal, AmmError> {
        self.ensure(request.deadline)?;
        let id = resolve(registry, request.asset_a, request.asset_b)?;
        let a_is_first = registry.pool(id)?.side_of(&request.asset_a)?;

        let withdrawal = self.atomically(registry, ledger, &[id], |registry, transfers, session| {
            let paid = registry
                .pool_mut(id)?
                .withdraw_with(session.ticket(id)?, caller, request.shares)?;
            let (amount_a, amount_b) = ordered(a_is_first, paid.amount_a, paid.amount_b);
            if amount_a < request.amount_a_min {
                return Err(AmmError::SlippageExceeded("amount_a below minimum"));
            }
            if amount_b < request.amount_b_min {
                return Err(AmmError::SlippageExceeded("amount_b below minimum"));
            }
            registry.publish(id)?;

            let custody = id.custody();
            transfers.push(&request.asset_a, &custody, &request.to, amount_a)?;
            transfers.push(&request.asset_b, &custody, &request.to, amount_b)?;
            Ok(Withdrawal {
                amount_a,
                amount_b,
                shares: paid.shares,
            })
        })?;

        debug!(
            pool = %id,
            amount_a = %withdrawal.amount_a,
            amount_b = %withdrawal.amount_b,
            shares = %withdrawal.shares,
            to = %request.to,
            "liquidity removed"
        );
        Ok(withdrawal)
    }

    // -- swap ---------------------------------------------------------------

    /// Sells exactly `request.amount_in` of `path[0]` along `request.path`
    /// and pays the final output to `request.to`.
    ///
    /// Returns the amount entering each hop followed by the final output,
    /// so `amounts[0] == amount_in` and `amounts.len() == path.len()`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if the deadline has passed.
    /// - [`AmmError::InvalidPath`] / [`AmmError::IdenticalAssets`] for a
    ///   malformed path.
    /// - [`AmmError::PairNotFound`] if a hop has no pool.
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `amount_out_min`.
    /// - Any swap or ledger error.
    pub fn swap_exact_tokens_for_tokens<L: AssetLedger>(
        &self,
        registry: &mut PairRegistry,
        ledger: &mut L,
        caller: &Address,
        request: &SwapExactIn,
    ) -> Result<Vec<Amount>, AmmError> {
        self.ensure(request.deadline)?;
        let path = SwapPath::try_from(request.path.as_slice())?;
        let pools = path
            .hops()
            .map(|(x, y)| registry.get_pair(x, y).ok_or(AmmError::PairNotFound))
            .collect::<Result<Vec<_>, _>>()?;

        let amounts = self.atomically(registry, ledger, &pools, |registry, transfers, session| {
            let mut amounts = Vec::with_capacity(pools.len() + 1);
            amounts.push(request.amount_in);

            let mut current = request.amount_in;
            for ((asset_in, _), id) in path.hops().zip(&pools) {
                let pool = registry.pool_mut(*id)?;
                let input_is_a = pool.side_of(&asset_in)?;
                current = pool
                    .swap_with(session.ticket(*id)?, current, input_is_a)?
                    .amount_out();
                registry.publish(*id)?;
                amounts.push(current);
            }
            if current < request.amount_out_min {
                return Err(AmmError::SlippageExceeded("amount_out below minimum"));
            }

            transfers.pull(
                &path.input(),
                &self.address,
                caller,
                &pools[0].custody(),
                request.amount_in,
            )?;
            for (hop, (_, asset_out)) in path.hops().enumerate() {
                let from = pools[hop].custody();
                let to = pools.get(hop + 1).map_or(request.to, PoolId::custody);
                transfers.push(&asset_out, &from, &to, amounts[hop + 1])?;
            }
            Ok(amounts)
        })?;

        debug!(
            hops = path.hop_count(),
            amount_in = %request.amount_in,
            amount_out = %current_output(&amounts),
            to = %request.to,
            "swap routed"
        );
        Ok(amounts)
    }

    // -- atomic section -----------------------------------------------------

    /// Runs `body` with every pool in `ids` entered, rolling pools, the
    /// event log and completed transfers back if it fails.
    fn atomically<L, T>(
        &self,
        registry: &mut PairRegistry,
        ledger: &mut L,
        ids: &[PoolId],
        body: impl FnOnce(&mut PairRegistry, &mut Transfers<'_, L>, &Session) -> Result<T, AmmError>,
    ) -> Result<T, AmmError>
    where
        L: AssetLedger,
    {
        let mut session = Session::open(registry, ids)?;
        let mut transfers = Transfers::new(ledger);
        let outcome = body(registry, &mut transfers, &session)
            .and_then(|value| session.release(registry).map(|()| value));
        match outcome {
            Ok(value) => Ok(value),
            Err(err) => {
                transfers.unwind();
                session.abort(registry, err);
                Err(err)
            }
        }
    }
}

fn resolve(registry: &PairRegistry, x: Address, y: Address) -> Result<PoolId, AmmError> {
    let pair = AssetPair::new(x, y)?;
    registry
        .get_pair(pair.first(), pair.second())
        .ok_or(AmmError::PairNotFound)
}

fn ordered<T>(first: bool, x: T, y: T) -> (T, T) {
    if first {
        (x, y)
    } else {
        (y, x)
    }
}

fn current_output(amounts: &[Amount]) -> Amount {
    amounts.last().copied().unwrap_or_default()
}

/// Pools entered for one router call, plus their saved state.
struct Session {
    checkpoint: Checkpoint,
    tickets: Vec<OperationTicket>,
}

impl Session {
    fn open(registry: &mut PairRegistry, ids: &[PoolId]) -> Result<Self, AmmError> {
        let checkpoint = registry.checkpoint(ids)?;
        let mut session = Self {
            checkpoint,
            tickets: Vec::with_capacity(ids.len()),
        };
        for id in ids {
            if session.tickets.iter().any(|t| t.pool() == *id) {
                continue;
            }
            match registry.pool_mut(*id).and_then(StablePool::enter) {
                Ok(ticket) => session.tickets.push(ticket),
                Err(err) => {
                    session.abort(registry, err);
                    return Err(err);
                }
            }
        }
        Ok(session)
    }

    fn ticket(&self, id: PoolId) -> Result<&OperationTicket, AmmError> {
        self.tickets
            .iter()
            .find(|t| t.pool() == id)
            .ok_or(AmmError::ReentrancyDetected)
    }

    /// Exits every entered pool.
    fn release(&mut self, registry: &mut PairRegistry) -> Result<(), AmmError> {
        for ticket in self.tickets.drain(..) {
            registry.pool_mut(ticket.pool())?.exit(ticket)?;
        }
        Ok(())
    }

    /// Restores the saved pools, which also returns them to idle.
    fn abort(self, registry: &mut PairRegistry, err: AmmError) {
        warn!(error = %err, pools = self.tickets.len(), "router operation rolled back");
        registry.restore(self.checkpoint);
    }
}

/// Asset movements of one router call, kept so they can be reversed.
struct Transfers<'l, L: AssetLedger> {
    ledger: &'l mut L,
    done: Vec<(Address, Address, Address, Amount)>,
}

impl<'l, L: AssetLedger> Transfers<'l, L> {
    fn new(ledger: &'l mut L) -> Self {
        Self {
            ledger,
            done: Vec::new(),
        }
    }

    /// Pulls `from`'s assets using `spender`'s allowance.
    fn pull(
        &mut self,
        asset: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        self.ledger.transfer_from(asset, spender, from, to, amount)?;
        self.done.push((*asset, *from, *to, amount));
        Ok(())
    }

    /// Moves assets out of custody.
    fn push(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if amount.is_zero() || from == to {
            return Ok(());
        }
        self.ledger.transfer(asset, from, to, amount)?;
        self.done.push((*asset, *from, *to, amount));
        Ok(())
    }

    /// Reverses completed transfers, newest first.
    fn unwind(self) {
        for (asset, from, to, amount) in self.done.into_iter().rev() {
            if let Err(err) = self.ledger.transfer(&asset, &to, &from, amount) {
                warn!(%asset, %from, %to, %amount, error = %err, "transfer reversal failed");
            }
        }
    }
}
