// cpmm_pool_rs/src/math.rs
use crate::types::{Amount, PoolError, Result};

/// Given some amount of one asset and the pair reserves, returns the
/// equivalent amount of the other asset at the current reserve ratio.
///
/// `amount_b = amount_a * reserve_b / reserve_a`
///
/// Used when adding liquidity with only one side supplied.
///
/// # Errors
/// * `NonPositiveAmount` if `amount_a <= 0`.
/// * `NonPositiveReserve` if either reserve is `<= 0`.
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
    // Negated comparisons so NaN is rejected as well.
    if !(amount_a > 0.0) || !amount_a.is_finite() {
        return Err(PoolError::NonPositiveAmount { amount: amount_a });
    }
    if !(reserve_a > 0.0 && reserve_b > 0.0) {
        return Err(PoolError::NonPositiveReserve { reserve_a, reserve_b });
    }
    Ok(amount_a * reserve_b / reserve_a)
}

/// Fee-free constant-product swap.
///
/// For a signed change `dx` to reserve0 and reserves `(x, y)`, returns the
/// signed change `dy` to reserve1 that solves `(x + dx) * (y + dy) = x * y`:
///
/// `dy = -dx * y / (x + dx)`
///
/// A positive `dx` (asset0 sold into the pool) gives a negative `dy` (asset1
/// paid out to the trader), and vice versa.
///
/// # Errors
/// * `InvalidAmount` if `dx` is not finite.
/// * `NonPositiveReserve` if `x <= 0` or `y <= 0`.
/// * `ReserveDrained` if `x + dx <= 0`.
pub fn get_amount_delta(amount0_delta: Amount, reserve0: Amount, reserve1: Amount) -> Result<Amount> {
    if !amount0_delta.is_finite() {
        return Err(PoolError::InvalidAmount(amount0_delta));
    }
    if !(reserve0 > 0.0 && reserve1 > 0.0) {
        return Err(PoolError::NonPositiveReserve {
            reserve_a: reserve0,
            reserve_b: reserve1,
        });
    }
    let (dx, x, y) = (amount0_delta, reserve0, reserve1);
    if x + dx <= 0.0 {
        return Err(PoolError::ReserveDrained { reserve: x, delta: dx });
    }
    Ok((-dx * y) / (x + dx))
}

/// Relative deviation of `k_after` from `k_before`.
///
/// Falls back to the absolute difference when `k_before` is zero.
pub fn k_deviation(k_before: Amount, k_after: Amount) -> f64 {
    let diff = (k_after - k_before).abs();
    if k_before == 0.0 {
        diff
    } else {
        diff / k_before.abs()
    }
}
