//! Trait abstractions at the boundary of the AMM core.
//!
//! [`AssetLedger`] is the external fungible-asset collaborator the router
//! pulls from and pays out through; [`Clock`] supplies the time used for
//! deadline checks.

mod asset_ledger;
mod clock;

pub use asset_ledger::AssetLedger;
pub use clock::{Clock, ManualClock, SystemClock};
