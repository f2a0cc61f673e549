//! Unified error types for the tenk-amm library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Every error aborts the whole operation: no pool, share
//! ledger, or event log is left partially updated when one is returned.
//!
//! Variants carrying a `&'static str` describe *where* the failure was
//! detected (for example `Overflow("D: numerator overflow")`); the variant
//! itself is the stable, matchable error kind.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Error kinds produced by the normalizer, pool engine, registry and router.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmmError {
    /// Both sides of a pair are the same asset.
    #[error("identical assets")]
    IdenticalAssets,

    /// A pool already exists for the unordered pair.
    #[error("pair already exists")]
    PairExists,

    /// No pool is registered for the requested pair.
    #[error("pair not found")]
    PairNotFound,

    /// A pool identifier does not refer to a registered pool.
    #[error("pool not found")]
    PoolNotFound,

    /// The caller's deadline has passed.
    #[error("transaction expired")]
    Expired,

    /// A swap path is shorter than two assets.
    #[error("invalid path")]
    InvalidPath,

    /// The input amount of a swap is zero.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// The net output of a swap rounds to zero.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// A caller-specified bound (minimum output or minimum deposit) was not met.
    #[error("slippage exceeded: {0}")]
    SlippageExceeded(&'static str),

    /// The curve cannot satisfy the request from current reserves.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A deposit would mint zero shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A withdrawal would return zero of both assets.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// A holder tried to burn or move more shares than it owns.
    #[error("insufficient shares")]
    InsufficientShares,

    /// A spender tried to move more than its approved allowance.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// An asset holder's balance does not cover a transfer.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The asset ledger does not know the requested asset.
    #[error("unknown asset")]
    UnknownAsset,

    /// Arithmetic overflow; the context names the failing computation.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow; the context names the failing computation.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero in an intermediate computation.
    #[error("division by zero")]
    DivisionByZero,

    /// Newton-Raphson iteration hit its cap without converging.
    #[error("invariant did not converge: {0}")]
    InvariantDidNotConverge(&'static str),

    /// A pool was entered while another operation on it is in flight.
    #[error("reentrancy detected")]
    ReentrancyDetected,

    /// An asset precision outside the supported range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}
