//! Outcomes of deposits and withdrawals.

use super::{Amount, Shares};

/// Result of a deposit: the amounts actually taken (after scaling down to
/// the binding asset) and the shares credited to the recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deposit {
    /// Asset A moved into the pool.
    pub amount_a: Amount,
    /// Asset B moved into the pool.
    pub amount_b: Amount,
    /// Shares credited to the recipient (locked shares excluded).
    pub shares: Shares,
}

/// Result of a withdrawal: the amounts paid out for the burned shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Withdrawal {
    /// Asset A paid out.
    pub amount_a: Amount,
    /// Asset B paid out.
    pub amount_b: Amount,
    /// Shares burned.
    pub shares: Shares,
}

impl Deposit {
    /// Returns `(amount_a, amount_b, shares)`.
    #[must_use]
    pub const fn into_parts(self) -> (Amount, Amount, Shares) {
        (self.amount_a, self.amount_b, self.shares)
    }
}

impl Withdrawal {
    /// Returns `(amount_a, amount_b)`.
    #[must_use]
    pub const fn amounts(&self) -> (Amount, Amount) {
        (self.amount_a, self.amount_b)
    }
}
