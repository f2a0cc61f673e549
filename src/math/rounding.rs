//! Integer division with an explicit rounding direction.
//!
//! [`div_round`] works on plain `u128`; [`mul_div`] and [`mul_div_u256`]
//! form a 256-bit product first so `a * b / c` only overflows when the
//! quotient itself does not fit.
//!
//! # Convention
//!
//! Rounding always favours the pool:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal output, minted shares | [`Rounding::Down`] |
//! | Trading fee, protocol-fee divisor | [`Rounding::Up`] |
//!
//! # Examples
//!
//! ```
//! use tenk_amm::domain::Rounding;
//! use tenk_amm::math::{div_round, mul_div};
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(mul_div(u128::MAX, 2, 4, Rounding::Down), Some(u128::MAX / 2));
//! ```

use primitive_types::U256;

use crate::domain::Rounding;

/// `numerator / denominator` rounded in the given direction.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q + 1 cannot overflow: a nonzero remainder implies q < u128::MAX.
        Rounding::Up if numerator % denominator != 0 => Some(q + 1),
        Rounding::Up => Some(q),
    }
}

/// `a * b / c` over 256 bits, rounded in the given direction.
///
/// Returns [`None`] if `c` is zero or the quotient exceeds `u128`.
#[must_use]
pub fn mul_div(a: u128, b: u128, c: u128, rounding: Rounding) -> Option<u128> {
    let q = mul_div_u256(U256::from(a), U256::from(b), U256::from(c), rounding)?;
    u256_to_u128(q)
}

/// `a * b / c` on 256-bit operands.
///
/// Returns [`None`] if `c` is zero or `a * b` overflows 256 bits.
#[must_use]
pub fn mul_div_u256(a: U256, b: U256, c: U256, rounding: Rounding) -> Option<U256> {
    if c.is_zero() {
        return None;
    }
    let product = a.checked_mul(b)?;
    let q = product / c;
    if rounding.is_up() && !(product % c).is_zero() {
        return q.checked_add(U256::one());
    }
    Some(q)
}

/// Narrows a 256-bit value to `u128`, or `None` if it does not fit.
#[must_use]
pub fn u256_to_u128(value: U256) -> Option<u128> {
    if value > U256::from(u128::MAX) {
        None
    } else {
        Some(value.low_u128())
    }
}
