// cpmm_pool_rs/src/pool.rs
use crate::config::PoolConfig;
use crate::ledger::{InMemoryLedger, LiquidityLedger};
use crate::math::{get_amount_delta, k_deviation, quote};
use crate::types::{ensure_non_negative, Amount, PoolError, Price, Result, SUPPLY_EPSILON};
use log::debug;

/// A two-asset constant-product pool (`reserve0 * reserve1 = k`), fee free.
///
/// The pool holds the two reserves and composes the quoting and swap math
/// with a [`LiquidityLedger`] that tracks liquidity shares. It starts out
/// empty: the first [`mint`](Pool::mint) sets the initial reserve ratio and
/// the liquidity base, later deposits are measured against that ratio.
///
/// Known simplifications carried on purpose:
/// * no minimum liquidity is locked on the first deposit;
/// * on an unbalanced deposit the smaller implied share wins and the excess
///   stays in the reserves without credit or refund.
#[derive(Debug, Clone)]
pub struct Pool<L: LiquidityLedger = InMemoryLedger> {
    reserve0: Amount,
    reserve1: Amount,
    ledger: L,
    config: PoolConfig,
}

impl Pool<InMemoryLedger> {
    /// Empty pool backed by an in-memory ledger, default config.
    pub fn new() -> Self {
        Self {
            reserve0: 0.0,
            reserve1: 0.0,
            ledger: InMemoryLedger::new(),
            config: PoolConfig::default(),
        }
    }

    pub fn with_config(config: PoolConfig) -> Result<Self> {
        Self::with_ledger(InMemoryLedger::new(), config)
    }
}

impl Default for Pool<InMemoryLedger> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LiquidityLedger> Pool<L> {
    /// Empty pool on top of an injected ledger backend.
    pub fn with_ledger(ledger: L, config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reserve0: 0.0,
            reserve1: 0.0,
            ledger,
            config,
        })
    }

    pub fn reserve0(&self) -> Amount {
        self.reserve0
    }

    pub fn reserve1(&self) -> Amount {
        self.reserve1
    }

    pub fn reserves(&self) -> (Amount, Amount) {
        (self.reserve0, self.reserve1)
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    pub fn balance_of(&self, address: &str) -> Amount {
        self.ledger.balance_of(address)
    }

    /// The constant product `reserve0 * reserve1`.
    pub fn k(&self) -> Amount {
        self.reserve0 * self.reserve1
    }

    /// Geometric mean of the reserves, `sqrt(k)`.
    pub fn liquidity(&self) -> Result<Amount> {
        let k = self.k();
        if k < 0.0 {
            return Err(PoolError::NegativeProduct(k));
        }
        Ok(k.sqrt())
    }

    /// Deposits reserves and credits `to` with liquidity shares.
    ///
    /// When only one amount is given, the other is quoted against the current
    /// reserves. The first deposit must give both amounts and mints
    /// `sqrt(amount0 * amount1)`. Later deposits mint
    /// `min(amount0 / reserve0, amount1 / reserve1) * total_supply`.
    ///
    /// Returns the liquidity minted.
    ///
    /// # Errors
    /// * `MissingAmounts` if neither amount is given.
    /// * `FirstDepositRequiresBothAmounts` if the pool is empty and one is missing.
    /// * `NonPositiveAmount` if a first deposit side is not positive, or a
    ///   single given amount is not positive.
    /// * `InvalidAmount` for negative or non-finite amounts, or when a
    ///   reserve would overflow.
    pub fn mint(&mut self, to: &str, amount0: Option<Amount>, amount1: Option<Amount>) -> Result<Amount> {
        let (amount0, amount1) = self.resolve_deposit(amount0, amount1)?;
        let total_supply = self.ledger.total_supply();

        let liquidity = if total_supply == 0.0 {
            for amount in [amount0, amount1] {
                if !(amount > 0.0) {
                    return Err(PoolError::NonPositiveAmount { amount });
                }
            }
            (amount0 * amount1).sqrt()
        } else {
            self.ensure_reserves()?;
            let l1 = amount0 / self.reserve0 * total_supply;
            let l2 = amount1 / self.reserve1 * total_supply;
            // Smallest share wins, the unmatched excess is absorbed.
            l1.min(l2)
        };

        let reserve0_new = self.reserve0 + amount0;
        let reserve1_new = self.reserve1 + amount1;
        ensure_finite_reserves(reserve0_new, reserve1_new)?;

        self.ledger.mint(to, liquidity)?;
        self.reserve0 = reserve0_new;
        self.reserve1 = reserve1_new;

        debug!(
            "mint {} liquidity to {} for ({}, {}), reserves now ({}, {})",
            liquidity, to, amount0, amount1, self.reserve0, self.reserve1
        );
        Ok(liquidity)
    }

    /// Applies `amount0_delta` to reserve0 and moves reserve1 along the curve.
    ///
    /// Returns the signed change to reserve1: negative when the trader
    /// receives asset1, positive when the trader must pay it in.
    ///
    /// # Errors
    /// * `NonPositiveReserve` on an empty pool.
    /// * `ReserveDrained` if either reserve would reach zero or below.
    /// * `InvalidAmount` if a reserve would overflow.
    /// * `InvariantViolation` in strict mode when `k` drifts beyond tolerance.
    pub fn swap(&mut self, amount0_delta: Amount) -> Result<Amount> {
        let amount1_delta = get_amount_delta(amount0_delta, self.reserve0, self.reserve1)?;
        let reserve0_new = self.reserve0 + amount0_delta;
        let reserve1_new = self.reserve1 + amount1_delta;

        ensure_finite_reserves(reserve0_new, reserve1_new)?;
        if !(reserve1_new > 0.0) {
            return Err(PoolError::ReserveDrained {
                reserve: self.reserve1,
                delta: amount1_delta,
            });
        }
        if self.config.strict_invariant {
            self.check_invariant(reserve0_new * reserve1_new)?;
        }

        self.reserve0 = reserve0_new;
        self.reserve1 = reserve1_new;

        debug!(
            "swap {} asset0 for {} asset1, reserves now ({}, {})",
            amount0_delta, amount1_delta, self.reserve0, self.reserve1
        );
        Ok(amount1_delta)
    }

    /// Burns `liquidity` shares held by `from` and withdraws the matching
    /// share of both reserves. Returns the withdrawn `(amount0, amount1)`.
    ///
    /// Burning the whole supply pays out both reserves in full, so the pool is
    /// back to first-deposit rules afterwards. A request above the supply by
    /// no more than rounding slack counts as the whole supply.
    ///
    /// # Errors
    /// * `InvalidAmount` for negative or non-finite `liquidity`.
    /// * `InsufficientLiquidity` if it exceeds the total supply.
    /// * `InsufficientBalance` if `from` does not hold enough shares.
    pub fn burn(&mut self, from: &str, liquidity: Amount) -> Result<(Amount, Amount)> {
        let liquidity = ensure_non_negative(liquidity)?;
        let total_supply = self.ledger.total_supply();
        if total_supply <= 0.0 || liquidity > total_supply * (1.0 + SUPPLY_EPSILON) {
            return Err(PoolError::InsufficientLiquidity {
                total_supply,
                requested: liquidity,
            });
        }

        self.ledger.burn(from, liquidity)?;

        // Nothing below can fail, the ledger has already been debited.
        let full_exit = self.ledger.total_supply() <= 0.0 || liquidity >= total_supply;
        let (amount0, amount1) = if full_exit {
            (self.reserve0, self.reserve1)
        } else {
            let share = liquidity / total_supply;
            (self.reserve0 * share, self.reserve1 * share)
        };
        self.reserve0 -= amount0;
        self.reserve1 -= amount1;

        debug!(
            "burn {} liquidity from {} for ({}, {}), reserves now ({}, {})",
            liquidity, from, amount0, amount1, self.reserve0, self.reserve1
        );
        Ok((amount0, amount1))
    }

    /// Price of 1 asset0 in asset1.
    pub fn price0(&self) -> Result<Price> {
        self.ensure_reserves()?;
        Ok(self.reserve1 / self.reserve0)
    }

    /// Price of 1 asset1 in asset0.
    pub fn price1(&self) -> Result<Price> {
        self.ensure_reserves()?;
        Ok(self.reserve0 / self.reserve1)
    }

    /// Both reserves valued in asset0.
    pub fn reserves_priced_in_token0(&self) -> Result<Amount> {
        Ok(self.reserve0 + self.reserve1 * self.price1()?)
    }

    /// Both reserves valued in asset1.
    pub fn reserves_priced_in_token1(&self) -> Result<Amount> {
        Ok(self.reserve1 + self.reserve0 * self.price0()?)
    }

    // Fills in a missing side from the current ratio.
    fn resolve_deposit(&self, amount0: Option<Amount>, amount1: Option<Amount>) -> Result<(Amount, Amount)> {
        match (amount0, amount1) {
            (None, None) => Err(PoolError::MissingAmounts),
            (Some(amount0), Some(amount1)) => Ok((ensure_non_negative(amount0)?, ensure_non_negative(amount1)?)),
            (Some(amount0), None) => {
                self.ensure_initialized()?;
                Ok((amount0, quote(amount0, self.reserve0, self.reserve1)?))
            }
            (None, Some(amount1)) => {
                self.ensure_initialized()?;
                Ok((quote(amount1, self.reserve1, self.reserve0)?, amount1))
            }
        }
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.ledger.total_supply() == 0.0 {
            return Err(PoolError::FirstDepositRequiresBothAmounts);
        }
        Ok(())
    }

    fn ensure_reserves(&self) -> Result<()> {
        if !(self.reserve0 > 0.0 && self.reserve1 > 0.0) {
            return Err(PoolError::NonPositiveReserve {
                reserve_a: self.reserve0,
                reserve_b: self.reserve1,
            });
        }
        Ok(())
    }

    fn check_invariant(&self, k_after: Amount) -> Result<()> {
        let k_before = self.k();
        if k_deviation(k_before, k_after) > self.config.invariant_tolerance {
            return Err(PoolError::InvariantViolation {
                k_before,
                k_after,
                tolerance: self.config.invariant_tolerance,
            });
        }
        Ok(())
    }
}

// Reserves must stay finite for prices and quotes to be defined.
fn ensure_finite_reserves(reserve0: Amount, reserve1: Amount) -> Result<()> {
    for reserve in [reserve0, reserve1] {
        if !reserve.is_finite() {
            return Err(PoolError::InvalidAmount(reserve));
        }
    }
    Ok(())
}
