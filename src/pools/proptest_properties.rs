//! Property-based tests using `proptest` for pool and router invariants.
//!
//! 1. **Invariant preservation**: `D` never decreases across swaps.
//! 2. **Swap reversibility**: a round trip A→B→A returns at most the input.
//! 3. **Fee monotonicity**: a larger input never pays a smaller fee.
//! 4. **Liquidity conservation**: deposit then withdraw never gains.
//! 5. **Price movement direction**: selling A lowers A's spot price.
//! 6. **Zero input**: always `InsufficientInputAmount`.
//! 7. **Multi-hop equivalence**: a routed `[X, Y, Z]` swap equals `X→Y`
//!    followed by `Y→Z`.

use proptest::prelude::*;

use super::StablePool;
use crate::config::PoolConfig;
use crate::domain::{Address, Amount, Asset, Decimals, PoolId, Shares};
use crate::error::AmmError;
use crate::factory::PairRegistry;
use crate::ledger::MemoryLedger;
use crate::router::{AddLiquidity, Router, SwapExactIn};
use crate::traits::{AssetLedger, ManualClock};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset(n: u64, decimals: u8) -> Asset {
    let Ok(d) = Decimals::new(decimals) else {
        panic!("valid decimals");
    };
    Asset::new(Address::from_u64(n), d)
}

fn lp() -> Address {
    Address::from_u64(100)
}

/// Pool of an 8-decimal and a 6-decimal asset holding the same nominal
/// value on each side.
fn make_pool(amp: u32, units: u128) -> StablePool {
    let Ok(config) = PoolConfig::default().with_amplification(amp) else {
        panic!("valid config");
    };
    let Ok(mut pool) = StablePool::new(PoolId::new(0), asset(1, 8), asset(2, 6), config, None)
    else {
        panic!("valid pool");
    };
    let Ok(_) = pool.deposit(
        &lp(),
        Amount::new(units * 100_000_000),
        Amount::new(units * 1_000_000),
    ) else {
        panic!("seed deposit");
    };
    pool
}

const NOW: u64 = 1_000;

fn user() -> Address {
    Address::from_u64(10)
}

/// Three 6-decimal assets with pools {1,2} and {2,3}.
fn make_route(reserve_xy: u128, reserve_yz: u128) -> (Router<ManualClock>, PairRegistry, MemoryLedger) {
    let router = Router::new(Address::from_u64(99), ManualClock::new(NOW));
    let mut ledger = MemoryLedger::new();
    for n in 1..=3 {
        let Ok(d) = Decimals::new(6) else {
            panic!("valid decimals");
        };
        let a = Address::from_u64(n);
        let Ok(()) = ledger.register_asset(a, d) else {
            panic!("register");
        };
        let Ok(()) = ledger.mint(&a, &user(), Amount::new(u128::from(u64::MAX))) else {
            panic!("mint");
        };
        let Ok(()) = ledger.approve(&a, &user(), &router.address(), Amount::MAX) else {
            panic!("approve");
        };
    }
    let mut registry = PairRegistry::default();
    for (x, y, reserve) in [(1, 2, reserve_xy), (2, 3, reserve_yz)] {
        let (x, y) = (Address::from_u64(x), Address::from_u64(y));
        let Ok(_) = registry.create_pair(&ledger, x, y) else {
            panic!("create");
        };
        let request = AddLiquidity {
            asset_a: x,
            asset_b: y,
            amount_a_desired: Amount::new(reserve),
            amount_b_desired: Amount::new(reserve),
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: user(),
            deadline: NOW,
        };
        let Ok(_) = router.add_liquidity(&mut registry, &mut ledger, &user(), &request) else {
            panic!("seed liquidity");
        };
    }
    (router, registry, ledger)
}

fn swap_request(amount_in: u128, path: &[u64]) -> SwapExactIn {
    SwapExactIn {
        amount_in: Amount::new(amount_in),
        amount_out_min: Amount::ZERO,
        path: path.iter().map(|n| Address::from_u64(*n)).collect(),
        to: user(),
        deadline: NOW,
    }
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Whole units per side in [1_000, 100_000_000].
fn units_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=100_000_000u128
}

/// Amplification in [1, 5_000].
fn amplification_strategy() -> impl Strategy<Value = u32> {
    1u32..=5_000u32
}

/// Swap size as basis points of the input reserve, [1, 5_000].
fn fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=5_000u128
}

// ---------------------------------------------------------------------------
// Properties 1-3: swaps
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariant_never_decreases(
        units in units_strategy(),
        amp in amplification_strategy(),
        fraction in fraction_strategy(),
    ) {
        let mut pool = make_pool(amp, units);
        for round in 0..6 {
            let input_is_a = round % 2 == 0;
            let reserve = if input_is_a { pool.reserve_a() } else { pool.reserve_b() };
            let amount_in = (reserve.get() * fraction / 10_000).max(1);
            let before = pool.cached_invariant();
            if pool.swap(Amount::new(amount_in), input_is_a).is_err() {
                continue;
            }
            prop_assert!(
                pool.cached_invariant() >= before,
                "D decreased: {} < {}", pool.cached_invariant(), before
            );
        }
    }

    #[test]
    fn prop_swap_round_trip_loses_value(
        units in units_strategy(),
        amp in amplification_strategy(),
        fraction in fraction_strategy(),
    ) {
        let mut pool = make_pool(amp, units);
        let amount_in = (pool.reserve_a().get() * fraction / 10_000).max(1);
        let Ok(there) = pool.swap(Amount::new(amount_in), true) else {
            return Ok(());
        };
        let Ok(back) = pool.swap(there.amount_out(), false) else {
            return Ok(());
        };
        prop_assert!(
            back.amount_out().get() <= amount_in,
            "round trip gained: {} > {}", back.amount_out().get(), amount_in
        );
    }

    #[test]
    fn prop_fee_monotonic_in_input(
        units in units_strategy(),
        amp in amplification_strategy(),
        fraction in fraction_strategy(),
    ) {
        let pool = make_pool(amp, units);
        let small = (pool.reserve_a().get() * fraction / 20_000).max(1);
        let large = small * 2;
        let (Ok(s), Ok(l)) = (
            pool.quote_swap(Amount::new(small), true),
            pool.quote_swap(Amount::new(large), true),
        ) else {
            return Ok(());
        };
        prop_assert!(l.fee() >= s.fee(), "fee shrank: {} < {}", l.fee(), s.fee());
        prop_assert!(l.amount_out() >= s.amount_out());
    }
}

// ---------------------------------------------------------------------------
// Properties 4-6: liquidity, price, zero input
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_withdraw_never_gains(
        units in units_strategy(),
        amp in amplification_strategy(),
        a in 1u128..=1_000_000_000_000u128,
        b in 1u128..=1_000_000_000_000u128,
    ) {
        let mut pool = make_pool(amp, units);
        let other = Address::from_u64(200);
        let Ok(dep) = pool.deposit(&other, Amount::new(a), Amount::new(b)) else {
            return Ok(());
        };
        let Ok(w) = pool.withdraw(&other, dep.shares) else {
            return Ok(());
        };
        prop_assert!(w.amount_a <= dep.amount_a);
        prop_assert!(w.amount_b <= dep.amount_b);
        prop_assert_eq!(pool.balance_of(&other), Shares::ZERO);
    }

    #[test]
    fn prop_selling_a_lowers_its_price(
        units in units_strategy(),
        amp in amplification_strategy(),
        fraction in fraction_strategy(),
    ) {
        let mut pool = make_pool(amp, units);
        let base = Address::from_u64(1);
        let Ok(before) = pool.spot_price_scaled(&base) else {
            return Ok(());
        };
        let amount_in = (pool.reserve_a().get() * fraction / 10_000).max(1);
        if pool.swap(Amount::new(amount_in), true).is_err() {
            return Ok(());
        }
        let Ok(after) = pool.spot_price_scaled(&base) else {
            return Ok(());
        };
        prop_assert!(after <= before, "price rose: {} > {}", after, before);
    }

    #[test]
    fn prop_zero_input_rejected(
        units in units_strategy(),
        amp in amplification_strategy(),
        input_is_a in any::<bool>(),
    ) {
        let mut pool = make_pool(amp, units);
        prop_assert_eq!(
            pool.quote_swap(Amount::ZERO, input_is_a),
            Err(AmmError::InsufficientInputAmount)
        );
        prop_assert_eq!(
            pool.swap(Amount::ZERO, input_is_a),
            Err(AmmError::InsufficientInputAmount)
        );
    }
}

// ---------------------------------------------------------------------------
// Property 7: multi-hop equivalence
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_multi_hop_equals_sequential_hops(
        reserve_xy in 1_000_000u128..=1_000_000_000_000u128,
        reserve_yz in 1_000_000u128..=1_000_000_000_000u128,
        fraction in fraction_strategy(),
    ) {
        let (router, mut registry, mut ledger) = make_route(reserve_xy, reserve_yz);
        let (mut seq_registry, mut seq_ledger) = (registry.clone(), ledger.clone());
        let amount_in = (reserve_xy * fraction / 10_000).max(1);

        let Ok(quoted) = router.get_amounts_out(
            &registry,
            Amount::new(amount_in),
            &[Address::from_u64(1), Address::from_u64(2), Address::from_u64(3)],
        ) else {
            return Ok(());
        };
        let Ok(routed) = router.swap_exact_tokens_for_tokens(
            &mut registry,
            &mut ledger,
            &user(),
            &swap_request(amount_in, &[1, 2, 3]),
        ) else {
            panic!("route succeeds whenever the quote does");
        };
        prop_assert_eq!(&routed, &quoted);

        let Ok(first) = router.swap_exact_tokens_for_tokens(
            &mut seq_registry,
            &mut seq_ledger,
            &user(),
            &swap_request(amount_in, &[1, 2]),
        ) else {
            panic!("first hop");
        };
        let Ok(second) = router.swap_exact_tokens_for_tokens(
            &mut seq_registry,
            &mut seq_ledger,
            &user(),
            &swap_request(first[1].get(), &[2, 3]),
        ) else {
            panic!("second hop");
        };
        prop_assert_eq!(routed[1], first[1]);
        prop_assert_eq!(routed[2], second[1]);
        prop_assert_eq!(
            ledger.balance_of(&Address::from_u64(3), &user()),
            seq_ledger.balance_of(&Address::from_u64(3), &user())
        );
    }
}
