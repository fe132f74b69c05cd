// cpmm_pool_rs/src/types.rs
use std::collections::HashMap;
use thiserror::Error;

// Liquidity providers are identified by plain strings.
pub type Address = String;

// Using f64 for amounts and prices, the same way the pricing curve is defined.
// No rounding policy is applied anywhere in the crate.
pub type Amount = f64;
pub type Price = f64;

/// Liquidity-share balances keyed by owner.
pub type Balances = HashMap<Address, Amount>;

/// Every way a pool, ledger or configuration operation can fail.
///
/// All operations either succeed completely or return one of these without
/// mutating any state.
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Amount },

    #[error("reserves must be positive, got ({reserve_a}, {reserve_b})")]
    NonPositiveReserve { reserve_a: Amount, reserve_b: Amount },

    #[error("mint requires at least one of amount0 or amount1")]
    MissingAmounts,

    #[error("first deposit into an empty pool must supply both amounts")]
    FirstDepositRequiresBothAmounts,

    #[error("swap delta {delta} would drain reserve {reserve}")]
    ReserveDrained { reserve: Amount, delta: Amount },

    #[error("invalid amount: {0}")]
    InvalidAmount(Amount),

    #[error("insufficient balance for {address}: have {balance}, requested {requested}")]
    InsufficientBalance {
        address: Address,
        balance: Amount,
        requested: Amount,
    },

    #[error("insufficient liquidity: total supply {total_supply}, requested {requested}")]
    InsufficientLiquidity { total_supply: Amount, requested: Amount },

    #[error("reserve product is negative: {0}")]
    NegativeProduct(Amount),

    #[error("k invariant is not preserved: before={k_before}, after={k_after}, tolerance={tolerance}")]
    InvariantViolation {
        k_before: Amount,
        k_after: Amount,
        tolerance: f64,
    },

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PoolError>;

/// Relative slack allowed when a burn request exceeds the total supply,
/// for ledgers whose supply and balances drift apart by a few ulps.
pub(crate) const SUPPLY_EPSILON: f64 = 1e-12;

// Unknown owners hold nothing.
pub(crate) fn get_or_zero(map: &Balances, address: &str) -> Amount {
    *map.get(address).unwrap_or(&0.0)
}

// Rejects NaN, infinities and negative values.
pub(crate) fn ensure_non_negative(value: Amount) -> Result<Amount> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PoolError::InvalidAmount(value))
    }
}
