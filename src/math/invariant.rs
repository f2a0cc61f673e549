//! StableSwap invariant solver for two-asset pools (Curve style).
//!
//! # Invariant (n = 2)
//!
//! ```text
//! A·n·(x + y) + D = A·n·D + D³ / (n²·x·y)
//! ```
//!
//! where `x`, `y` are reserves on the internal 18-digit scale, `A` is the
//! amplification coefficient and `D` the invariant (equal to `x + y` when
//! the pool is balanced).
//!
//! Both solvers run Newton-Raphson on 256-bit intermediates and stop when
//! two consecutive estimates differ by at most one internal unit.
//!
//! | A | Curve |
//! |---|-------|
//! | 1 | Close to constant product |
//! | 50–5 000 | Flat near the peg |
//! | → ∞ | Constant sum |

use primitive_types::U256;
use tracing::trace;

use super::rounding::{mul_div_u256, u256_to_u128};
use super::INTERNAL_DECIMALS;
use crate::domain::Rounding;
use crate::error::AmmError;

/// Number of assets in a pool.
const N: u64 = 2;

/// Maximum Newton-Raphson iterations before declaring non-convergence.
pub const MAX_ITERATIONS: u32 = 256;

/// Convergence threshold in internal units.
const CONVERGENCE_THRESHOLD: u64 = 1;

fn ann(amp: u32) -> Result<U256, AmmError> {
    if amp == 0 {
        return Err(AmmError::InvalidConfiguration("amplification must be positive"));
    }
    Ok(U256::from(amp) * U256::from(N))
}

fn mul(a: U256, b: U256, ctx: &'static str) -> Result<U256, AmmError> {
    a.checked_mul(b).ok_or(AmmError::Overflow(ctx))
}

fn add(a: U256, b: U256, ctx: &'static str) -> Result<U256, AmmError> {
    a.checked_add(b).ok_or(AmmError::Overflow(ctx))
}

fn div(a: U256, b: U256) -> Result<U256, AmmError> {
    if b.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    Ok(a / b)
}

fn narrow(value: U256, ctx: &'static str) -> Result<u128, AmmError> {
    u256_to_u128(value).ok_or(AmmError::Overflow(ctx))
}

/// Computes the invariant `D` for normalized reserves `x`, `y`.
///
/// Iterates
///
/// ```text
/// D_P    = D·D/(2x) · D/(2y)
/// D_next = (Ann·S + 2·D_P)·D / ((Ann − 1)·D + 3·D_P)
/// ```
///
/// from `D = S = x + y`.  Returns `0` for an empty pool.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if exactly one reserve is zero.
/// - [`AmmError::Overflow`] if an intermediate exceeds 256 bits or `D`
///   exceeds `u128`.  Extreme imbalance (one reserve near `1`, the other
///   near `10^36`) overflows on the first iteration, so this is the
///   failure such inputs report rather than non-convergence.
/// - [`AmmError::InvariantDidNotConverge`] after [`MAX_ITERATIONS`].
///
/// # Examples
///
/// ```
/// use tenk_amm::math::compute_d;
///
/// let one = 1_000_000_000_000_000_000u128;
/// assert_eq!(compute_d(one, one, 100), Ok(2 * one));
/// assert_eq!(compute_d(0, 0, 100), Ok(0));
/// ```
pub fn compute_d(x: u128, y: u128, amp: u32) -> Result<u128, AmmError> {
    let ann = ann(amp)?;
    let (x, y) = (U256::from(x), U256::from(y));
    let s = x + y;
    if s.is_zero() {
        return Ok(0);
    }
    let n = U256::from(N);
    let two_x = n * x;
    let two_y = n * y;

    let mut d = s;
    for i in 0..MAX_ITERATIONS {
        let d_p = div(mul(d, d, "D: D² overflow")?, two_x)?;
        let d_p = div(mul(d_p, d, "D: D_P overflow")?, two_y)?;
        let d_prev = d;

        let numerator = mul(
            add(
                mul(ann, s, "D: Ann·S overflow")?,
                mul(n, d_p, "D: n·D_P overflow")?,
                "D: numerator sum overflow",
            )?,
            d,
            "D: numerator overflow",
        )?;
        let denominator = add(
            mul(ann - U256::one(), d, "D: (Ann−1)·D overflow")?,
            mul(n + U256::one(), d_p, "D: (n+1)·D_P overflow")?,
            "D: denominator overflow",
        )?;
        d = div(numerator, denominator)?;

        let diff = if d > d_prev { d - d_prev } else { d_prev - d };
        if diff <= U256::from(CONVERGENCE_THRESHOLD) {
            trace!(iterations = i + 1, d = %d, "invariant D converged");
            return narrow(d, "D exceeds u128");
        }
    }

    Err(AmmError::InvariantDidNotConverge("D"))
}

/// Computes the reserve `y` of the other asset that keeps `D` constant
/// once the first asset's reserve becomes `x_new`.
///
/// Solves `y² + (b − D)·y = c` with
///
/// ```text
/// c = D·D/(2·x_new) · D/(2·Ann)
/// b = x_new + D/Ann
/// y_next = (y² + c) / (2y + b − D)
/// ```
///
/// starting from `y = D`.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `x_new` is zero.
/// - [`AmmError::Overflow`] / [`AmmError::Underflow`] on intermediate
///   range failures.  A dust `x_new` against a huge `D` overflows `c`
///   before iterating.
/// - [`AmmError::InvariantDidNotConverge`] after [`MAX_ITERATIONS`].
pub fn compute_y(x_new: u128, d: u128, amp: u32) -> Result<u128, AmmError> {
    let ann = ann(amp)?;
    let n = U256::from(N);
    let x = U256::from(x_new);
    let d = U256::from(d);

    let c = div(mul(d, d, "y: D² overflow")?, n * x)?;
    let c = div(mul(c, d, "y: c overflow")?, n * ann)?;
    let b = add(x, d / ann, "y: b overflow")?;

    let mut y = d;
    for i in 0..MAX_ITERATIONS {
        let y_prev = y;
        let numerator = add(mul(y, y, "y: y² overflow")?, c, "y: numerator overflow")?;
        let denominator = add(mul(n, y, "y: 2y overflow")?, b, "y: denominator overflow")?
            .checked_sub(d)
            .ok_or(AmmError::Underflow("y: denominator underflow"))?;
        y = div(numerator, denominator)?;

        let diff = if y > y_prev { y - y_prev } else { y_prev - y };
        if diff <= U256::from(CONVERGENCE_THRESHOLD) {
            trace!(iterations = i + 1, y = %y, "reserve y converged");
            return narrow(y, "y exceeds u128");
        }
    }

    Err(AmmError::InvariantDidNotConverge("y"))
}

/// Marginal price of `x` denominated in `y`, scaled by `10^18`.
///
/// The ratio of the invariant's partial derivatives, each multiplied by
/// `4xy`:
///
/// ```text
/// (4·Ann·x·y + D³/x) / (4·Ann·x·y + D³/y)
/// ```
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
/// - [`AmmError::Overflow`] on intermediate range failures.
pub fn spot_price(x: u128, y: u128, d: u128, amp: u32) -> Result<u128, AmmError> {
    if x == 0 || y == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    let ann = ann(amp)?;
    let (x, y, d) = (U256::from(x), U256::from(y), U256::from(d));
    let base = mul(
        mul(U256::from(N * N), ann, "price: 4·Ann overflow")?,
        mul(x, y, "price: x·y overflow")?,
        "price: 4·Ann·x·y overflow",
    )?;
    let d_sq = mul(d, d, "price: D² overflow")?;
    let dx = add(base, mul(d_sq / x, d, "price: D³/x overflow")?, "price: ∂x overflow")?;
    let dy = add(base, mul(d_sq / y, d, "price: D³/y overflow")?, "price: ∂y overflow")?;
    let scale = U256::exp10(usize::from(INTERNAL_DECIMALS));
    let price =
        mul_div_u256(dx, scale, dy, Rounding::Down).ok_or(AmmError::Overflow("price overflow"))?;
    narrow(price, "price exceeds u128")
}
