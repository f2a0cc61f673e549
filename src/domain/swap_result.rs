//! Outcome of a single-pool swap.

use super::Amount;
use crate::error::AmmError;

/// Amounts exchanged by one swap against one pool.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee` is denominated in the output asset and was already deducted
///   from `amount_out`.
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::{Amount, SwapResult};
///
/// let r = SwapResult::new(Amount::new(1_000), Amount::new(998), Amount::new(1), true)
///     .expect("valid");
/// assert_eq!(r.gross_out(), Some(Amount::new(999)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapResult {
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
    input_is_a: bool,
}

impl SwapResult {
    /// Creates a validated result.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
    /// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
    pub const fn new(
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
        input_is_a: bool,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        Ok(Self {
            amount_in,
            amount_out,
            fee,
            input_is_a,
        })
    }

    /// Amount sold into the pool.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Amount paid out, net of fee.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Trading fee retained by the pool, in output-asset units.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// `true` when asset A was sold.
    #[must_use]
    pub const fn input_is_a(&self) -> bool {
        self.input_is_a
    }

    /// Output before the fee was deducted.
    #[must_use]
    pub const fn gross_out(&self) -> Option<Amount> {
        self.amount_out.checked_add(&self.fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_in() {
        let r = SwapResult::new(Amount::ZERO, Amount::new(1), Amount::ZERO, true);
        assert_eq!(r, Err(AmmError::InsufficientInputAmount));
    }

    #[test]
    fn rejects_zero_out() {
        let r = SwapResult::new(Amount::new(1), Amount::ZERO, Amount::ZERO, false);
        assert_eq!(r, Err(AmmError::InsufficientOutputAmount));
    }

    #[test]
    fn accessors() {
        let r = SwapResult::new(Amount::new(10), Amount::new(9), Amount::new(1), false);
        assert!(matches!(r, Ok(s) if s.amount_in() == Amount::new(10)
            && s.amount_out() == Amount::new(9)
            && s.fee() == Amount::new(1)
            && !s.input_is_a()));
    }
}
