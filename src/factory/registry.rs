//! Pair registry: one pool per unordered asset pair.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{PoolConfig, RegistryConfig};
use crate::domain::{Address, Asset, AssetPair, PoolEvent, PoolId};
use crate::error::AmmError;
use crate::pools::StablePool;
use crate::traits::AssetLedger;

/// Owner of every pool and of the published event log.
///
/// `PairRegistry` canonicalizes an unordered asset pair into a single
/// deterministic [`PoolId`], allocated sequentially in creation order.
/// Pools are never removed.  The registry is a plain single-owner value:
/// the [`Router`](crate::router::Router) borrows it mutably for each
/// operation.
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::{Address, Decimals};
/// use tenk_amm::factory::PairRegistry;
/// use tenk_amm::ledger::MemoryLedger;
///
/// let (usdt, usdc) = (Address::from_u64(1), Address::from_u64(2));
/// let mut ledger = MemoryLedger::new();
/// ledger.register_asset(usdt, Decimals::new(8).expect("valid")).expect("new");
/// ledger.register_asset(usdc, Decimals::new(6).expect("valid")).expect("new");
///
/// let mut registry = PairRegistry::default();
/// let id = registry.create_pair(&ledger, usdt, usdc).expect("created");
/// assert_eq!(registry.get_pair(usdc, usdt), Some(id));
/// assert!(registry.create_pair(&ledger, usdc, usdt).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PairRegistry {
    config: RegistryConfig,
    pools: Vec<StablePool>,
    index: HashMap<AssetPair, PoolId>,
    log: Vec<PoolEvent>,
}

/// Saved state of a set of pools and the event log length.
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    pools: Vec<StablePool>,
    log_len: usize,
}

impl PairRegistry {
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(config: RegistryConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Registry settings.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Creates a pool for `{x, y}` with the registry's default parameters.
    ///
    /// Asset precisions are read from `ledger`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if `x == y`.
    /// - [`AmmError::PairExists`] if a pool already serves the pair.
    /// - [`AmmError::UnknownAsset`] if the ledger does not know an asset.
    pub fn create_pair<L: AssetLedger>(
        &mut self,
        ledger: &L,
        x: Address,
        y: Address,
    ) -> Result<PoolId, AmmError> {
        let defaults = *self.config.pool_defaults();
        self.create_pair_with_config(ledger, x, y, defaults)
    }

    /// Creates a pool for `{x, y}` with explicit parameters.
    ///
    /// # Errors
    ///
    /// As [`create_pair`](Self::create_pair), plus
    /// [`AmmError::InvalidConfiguration`] for an invalid `config` and
    /// [`AmmError::Overflow`] once `u32::MAX` pools exist.
    pub fn create_pair_with_config<L: AssetLedger>(
        &mut self,
        ledger: &L,
        x: Address,
        y: Address,
        config: PoolConfig,
    ) -> Result<PoolId, AmmError> {
        let pair = AssetPair::new(x, y)?;
        if self.index.contains_key(&pair) {
            return Err(AmmError::PairExists);
        }
        let id = u32::try_from(self.pools.len())
            .map(PoolId::new)
            .map_err(|_| AmmError::Overflow("pool identifiers exhausted"))?;
        let asset_a = Asset::new(pair.first(), ledger.decimals(&pair.first())?);
        let asset_b = Asset::new(pair.second(), ledger.decimals(&pair.second())?);
        let pool = StablePool::new(id, asset_a, asset_b, config, self.config.fee_to())?;

        self.pools.push(pool);
        self.index.insert(pair, id);
        self.log.push(PoolEvent::PoolCreated {
            asset_a: pair.first(),
            asset_b: pair.second(),
            pool: id,
        });
        debug!(pool = %id, asset_a = %pair.first(), asset_b = %pair.second(), "pair created");
        Ok(id)
    }

    /// Looks up the pool for `{x, y}` in either order.
    #[must_use]
    pub fn get_pair(&self, x: Address, y: Address) -> Option<PoolId> {
        let pair = AssetPair::new(x, y).ok()?;
        self.index.get(&pair).copied()
    }

    /// Returns the pool with identity `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] for an unallocated identity.
    pub fn pool(&self, id: PoolId) -> Result<&StablePool, AmmError> {
        self.pools.get(id.index()).ok_or(AmmError::PoolNotFound)
    }

    /// Mutable access to a pool.
    ///
    /// Events queued by operations called directly on the pool stay in its
    /// pending queue until [`drain_events`](Self::drain_events).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] for an unallocated identity.
    pub fn pool_mut(&mut self, id: PoolId) -> Result<&mut StablePool, AmmError> {
        self.pools.get_mut(id.index()).ok_or(AmmError::PoolNotFound)
    }

    /// Returns the pool serving `{x, y}`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if `x == y`.
    /// - [`AmmError::PairNotFound`] if no pool serves the pair.
    pub fn pool_for(&self, x: Address, y: Address) -> Result<&StablePool, AmmError> {
        let pair = AssetPair::new(x, y)?;
        let id = self.index.get(&pair).copied().ok_or(AmmError::PairNotFound)?;
        self.pool(id)
    }

    /// All pools in creation order.
    pub fn all_pairs(&self) -> impl ExactSizeIterator<Item = &StablePool> + '_ {
        self.pools.iter()
    }

    /// Number of pools.
    #[must_use]
    pub fn all_pairs_len(&self) -> usize {
        self.pools.len()
    }

    /// Protocol-fee recipient.
    #[must_use]
    pub const fn fee_to(&self) -> Option<Address> {
        self.config.fee_to()
    }

    /// Changes the protocol-fee recipient for the registry and every pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if `fee_to` is the burn address.
    /// - [`AmmError::ReentrancyDetected`] if any pool is in operation.
    pub fn set_fee_to(&mut self, fee_to: Option<Address>) -> Result<(), AmmError> {
        let config = RegistryConfig::new(*self.config.pool_defaults(), fee_to)?;
        if self.pools.iter().any(|p| !p.status().is_idle()) {
            return Err(AmmError::ReentrancyDetected);
        }
        self.config = config;
        for pool in &mut self.pools {
            pool.set_fee_to(fee_to);
        }
        Ok(())
    }

    /// Published events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.log
    }

    /// Takes the published log, followed by any events still pending on
    /// pools in creation order.
    pub fn drain_events(&mut self) -> Vec<PoolEvent> {
        let mut events = core::mem::take(&mut self.log);
        for pool in &mut self.pools {
            events.extend(pool.take_pending());
        }
        events
    }

    // -- router support -----------------------------------------------------

    /// Moves a pool's pending events to the published log.
    pub(crate) fn publish(&mut self, id: PoolId) -> Result<(), AmmError> {
        let events = self.pool_mut(id)?.take_pending();
        self.log.extend(events);
        Ok(())
    }

    /// Saves the listed pools (duplicates ignored) and the log length.
    pub(crate) fn checkpoint(&self, ids: &[PoolId]) -> Result<Checkpoint, AmmError> {
        let mut pools: Vec<StablePool> = Vec::with_capacity(ids.len());
        for id in ids {
            if pools.iter().all(|p| p.id() != *id) {
                pools.push(self.pool(*id)?.clone());
            }
        }
        Ok(Checkpoint {
            pools,
            log_len: self.log.len(),
        })
    }

    /// Restores a checkpoint taken by [`checkpoint`](Self::checkpoint).
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        for pool in checkpoint.pools {
            if let Some(slot) = self.pools.get_mut(pool.id().index()) {
                *slot = pool;
            }
        }
        self.log.truncate(checkpoint.log_len);
    }
}
