//! # Tenk AMM
//!
//! StableSwap automated market maker core: a Curve-style invariant engine
//! for two-asset pools, a pair registry that maps every unordered asset
//! pair to one pool, and a router that adds and removes liquidity and
//! executes multi-hop swaps with slippage and deadline protection.
//!
//! Assets keep their native precision (0 to 18 fractional digits).  The
//! invariant is solved on reserves normalized to 18 digits, in 256-bit
//! integer arithmetic with Newton-Raphson iteration, so pools pairing
//! assets of different precision price them at parity.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for domain and config types |
//!
//! # Quick Start
//!
//! ```rust
//! use tenk_amm::prelude::*;
//!
//! let (usdt, usdc) = (Address::from_u64(1), Address::from_u64(2));
//! let owner = Address::from_u64(10);
//! let router = Router::new(Address::from_u64(99), ManualClock::new(0));
//!
//! // 1. Two stablecoins with different precisions
//! let mut ledger = MemoryLedger::new();
//! for (asset, decimals) in [(usdt, 8), (usdc, 6)] {
//!     ledger.register_asset(asset, Decimals::new(decimals).expect("valid")).expect("new");
//!     ledger.mint(&asset, &owner, Amount::new(10u128.pow(14))).expect("mint");
//!     ledger.approve(&asset, &owner, &router.address(), Amount::MAX).expect("approve");
//! }
//!
//! // 2. One pool per pair
//! let mut registry = PairRegistry::default();
//! registry.create_pair(&ledger, usdt, usdc).expect("created");
//!
//! // 3. Seed 10 000 of each
//! let add = AddLiquidity {
//!     asset_a: usdt,
//!     asset_b: usdc,
//!     amount_a_desired: Amount::new(10_000 * 100_000_000),
//!     amount_b_desired: Amount::new(10_000 * 1_000_000),
//!     amount_a_min: Amount::ZERO,
//!     amount_b_min: Amount::ZERO,
//!     to: owner,
//!     deadline: 60,
//! };
//! router.add_liquidity(&mut registry, &mut ledger, &owner, &add).expect("added");
//!
//! // 4. Sell 100 USDT for at least 99 USDC
//! let swap = SwapExactIn {
//!     amount_in: Amount::new(100 * 100_000_000),
//!     amount_out_min: Amount::new(99 * 1_000_000),
//!     path: vec![usdt, usdc],
//!     to: owner,
//!     deadline: 60,
//! };
//! let amounts = router
//!     .swap_exact_tokens_for_tokens(&mut registry, &mut ledger, &owner, &swap)
//!     .expect("swapped");
//! assert!(amounts[1] >= Amount::new(99 * 1_000_000));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Caller     │  AddLiquidity / RemoveLiquidity / SwapExactIn
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │    Router     │  deadline, path, slippage; all-or-nothing sessions
//! └──────┬───────┘
//!        │ &mut PairRegistry          &mut impl AssetLedger
//!        ▼
//! ┌──────────────┐
//! │ PairRegistry  │  one StablePool per unordered pair, event log
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │  StablePool   │  reserves, shares, invariant, operation guard
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │     Math      │  normalizer, D / y solvers, U256 mul-div
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Address`](domain::Address), [`SwapPath`](domain::SwapPath), [`PoolEvent`](domain::PoolEvent), etc. |
//! | [`math`] | Precision normalizer, StableSwap solvers, checked and rounded arithmetic |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) and [`RegistryConfig`](config::RegistryConfig) |
//! | [`pools`] | [`StablePool`](pools::StablePool), its share ledger and operation guard |
//! | [`factory`] | [`PairRegistry`](factory::PairRegistry) |
//! | [`router`] | [`Router`](router::Router) and its request types |
//! | [`traits`] | [`AssetLedger`](traits::AssetLedger) and [`Clock`](traits::Clock) collaborators |
//! | [`ledger`] | [`MemoryLedger`](ledger::MemoryLedger), an in-memory asset ledger |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod router;
pub mod traits;
