//! Deterministic pool identity.

use core::fmt;

use super::Address;

/// Tag byte that marks custody addresses derived from pool identities.
const CUSTODY_TAG: u8 = 0xff;

/// Identity of a pool inside a [`PairRegistry`](crate::factory::PairRegistry).
///
/// Identities are allocated sequentially from zero in creation order and
/// never reused (pools are never destroyed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolId(u32);

impl PoolId {
    /// Wraps a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the index as `usize` for slot lookup.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// The account that holds this pool's reserves in the asset ledger.
    ///
    /// The first byte is `0xff` and the last four bytes carry the index, so
    /// custody accounts never collide with each other or with
    /// [`Address::from_u64`] addresses.
    #[must_use]
    pub const fn custody(&self) -> Address {
        let mut bytes = [0u8; 32];
        bytes[0] = CUSTODY_TAG;
        let be = self.0.to_be_bytes();
        bytes[28] = be[0];
        bytes[29] = be[1];
        bytes[30] = be[2];
        bytes[31] = be[3];
        Address::from_bytes(bytes)
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}
