//! Chain-agnostic account / asset identity.

use core::fmt;

/// A 32-byte identity used for assets, share holders, pool custody
/// accounts and the router itself.
///
/// Ordering is lexicographic over the bytes; it is the canonical ordering
/// used to sort asset pairs.
///
/// # Examples
///
/// ```
/// use tenk_amm::domain::Address;
///
/// let a = Address::from_u64(1);
/// let b = Address::from_u64(2);
/// assert!(a < b);
/// assert_eq!(Address::from_bytes(a.as_bytes()), a);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address([u8; 32]);

impl Address {
    /// The all-zero address.  Shares minted here are unredeemable, which
    /// is how the minimum locked shares are burned.
    pub const BURN: Self = Self([0u8; 32]);

    /// Wraps raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Builds an address whose last eight bytes hold `n` big-endian.
    ///
    /// Ordering of the results follows the ordering of `n`.
    #[must_use]
    pub const fn from_u64(n: u64) -> Self {
        let mut bytes = [0u8; 32];
        let be = n.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[24 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for [`Address::BURN`].
    #[must_use]
    pub fn is_burn(&self) -> bool {
        *self == Self::BURN
    }
}

impl fmt::Display for Address {
    /// Abbreviated hex: first four and last four bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for b in &self.0[..4] {
            write!(f, "{b:02x}")?;
        }
        write!(f, "…")?;
        for b in &self.0[28..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
