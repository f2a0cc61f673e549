//! Stable pair deployment walkthrough.
//!
//! Replays a full deployment: two stablecoins with different precisions,
//! a registry with a protocol-fee recipient, a router, then approve, add
//! liquidity, remove part of it and swap.
//!
//! # Run
//!
//! ```bash
//! cargo run --example stable_router
//! ```

use tenk_amm::config::{PoolConfig, RegistryConfig};
use tenk_amm::domain::{Address, Amount, Decimals, Shares};
use tenk_amm::factory::PairRegistry;
use tenk_amm::ledger::MemoryLedger;
use tenk_amm::router::{AddLiquidity, RemoveLiquidity, Router, SwapExactIn};
use tenk_amm::traits::{AssetLedger, Clock, SystemClock};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Stable Router Deployment ===\n");

    // ── 1. Accounts and assets ──────────────────────────────────────────
    let owner = Address::from_u64(0xA11CE);
    let user1 = Address::from_u64(0xB0B);
    let usdt = Address::from_u64(0x0815);
    let usdc = Address::from_u64(0x0816);
    let usdt_decimals = Decimals::new(8)?;
    let usdc_decimals = Decimals::new(6)?;
    let usdt_unit = 10u128.pow(u32::from(usdt_decimals.get()));
    let usdc_unit = 10u128.pow(u32::from(usdc_decimals.get()));

    let mut ledger = MemoryLedger::new();
    ledger.register_asset(usdt, usdt_decimals)?;
    ledger.register_asset(usdc, usdc_decimals)?;
    ledger.mint(&usdt, &owner, Amount::new(1_000_000 * usdt_unit))?;
    ledger.mint(&usdc, &owner, Amount::new(1_000_000 * usdc_unit))?;
    println!("owner: {owner}\nuser1: {user1}");
    println!("TestUSDT: {usdt} ({} decimals)", usdt_decimals.get());
    println!("TestUSDC: {usdc} ({} decimals)\n", usdc_decimals.get());

    // ── 2. Registry with user1 as fee recipient ─────────────────────────
    let mut registry = PairRegistry::new(RegistryConfig::new(PoolConfig::default(), Some(user1))?)?;
    let pool_id = registry.create_pair(&ledger, usdt, usdc)?;
    println!("stable pair: {pool_id} (custody {})", pool_id.custody());

    // ── 3. Router and approvals ─────────────────────────────────────────
    let router = Router::new(Address::from_u64(0x7E4C), SystemClock);
    let deadline = router.clock().now() + 600;
    ledger.approve(&usdt, &owner, &router.address(), Amount::MAX)?;
    ledger.approve(&usdc, &owner, &router.address(), Amount::MAX)?;
    println!("router getPair: {:?}\n", router.get_pair(&registry, usdt, usdc));

    // ── 4. Add liquidity: 10 000 of each ────────────────────────────────
    let deposit = router.add_liquidity(
        &mut registry,
        &mut ledger,
        &owner,
        &AddLiquidity {
            asset_a: usdt,
            asset_b: usdc,
            amount_a_desired: Amount::new(10_000 * usdt_unit),
            amount_b_desired: Amount::new(10_000 * usdc_unit),
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: owner,
            deadline,
        },
    )?;
    let pool = registry.pool(pool_id)?;
    println!("addLiquidity: {} USDT + {} USDC", deposit.amount_a, deposit.amount_b);
    println!("  shares minted: {}", deposit.shares);
    println!("  invariant D:   {}", pool.cached_invariant());
    println!("  owner shares:  {}\n", pool.balance_of(&owner));

    // ── 5. Remove a tenth of the position ───────────────────────────────
    let shares = Shares::new(pool.balance_of(&owner).get() / 10);
    let withdrawal = router.remove_liquidity(
        &mut registry,
        &mut ledger,
        &owner,
        &RemoveLiquidity {
            asset_a: usdt,
            asset_b: usdc,
            shares,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: owner,
            deadline,
        },
    )?;
    println!(
        "removeLiquidity: burned {} shares for {} USDT + {} USDC\n",
        withdrawal.shares, withdrawal.amount_a, withdrawal.amount_b
    );

    // ── 6. Swap 1 000 USDT for at least 990 USDC ────────────────────────
    let before_usdt = ledger.balance_of(&usdt, &owner)?;
    let before_usdc = ledger.balance_of(&usdc, &owner)?;
    println!("beforeUsdtBalance: {before_usdt}");
    println!("beforeUsdcBalance: {before_usdc}");

    let request = SwapExactIn {
        amount_in: Amount::new(1_000 * usdt_unit),
        amount_out_min: Amount::new(990 * usdc_unit),
        path: vec![usdt, usdc],
        to: owner,
        deadline,
    };
    let quoted = router.get_amounts_out(&registry, request.amount_in, &request.path)?;
    let amounts = router.swap_exact_tokens_for_tokens(&mut registry, &mut ledger, &owner, &request)?;
    println!("swap: quoted {quoted:?}, executed {amounts:?}");

    println!("afterUsdtBalance:  {}", ledger.balance_of(&usdt, &owner)?);
    println!("afterUsdcBalance:  {}", ledger.balance_of(&usdc, &owner)?);
    println!("user1Balance:      {}\n", ledger.balance_of(&usdc, &user1)?);

    // ── 7. Event trail ──────────────────────────────────────────────────
    println!("events:");
    for event in registry.drain_events() {
        println!("  {event}");
    }

    Ok(())
}
