// cpmm_pool_rs/src/ledger.rs
use crate::types::{ensure_non_negative, get_or_zero, Address, Amount, Balances, PoolError, Result};
use log::trace;

/// Ownership ledger for the pool's liquidity-share unit.
///
/// The pool only needs this capability set, so alternative backends
/// (persisted, multi-asset, ...) can be swapped in without touching pool logic.
///
/// Implementations must keep `total_supply() == sum(balances().values())`.
pub trait LiquidityLedger {
    /// Credits `to` with `value` shares and grows the total supply.
    fn mint(&mut self, to: &str, value: Amount) -> Result<()>;

    /// Debits `from` by `value` shares and shrinks the total supply.
    fn burn(&mut self, from: &str, value: Amount) -> Result<()>;

    /// Balance of `address`, zero when unknown.
    fn balance_of(&self, address: &str) -> Amount;

    fn total_supply(&self) -> Amount;

    /// All known balances.
    fn balances(&self) -> &Balances;
}

/// A simple fungible-token ledger held in process memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryLedger {
    balances: Balances,
    total_supply: Amount,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // Summed from the balances rather than tracked incrementally, so the two
    // never drift apart and the last holder's balance is the whole supply.
    fn resync_supply(&mut self) {
        self.total_supply = self.balances.values().sum();
    }
}

impl LiquidityLedger for InMemoryLedger {
    fn mint(&mut self, to: &str, value: Amount) -> Result<()> {
        let value = ensure_non_negative(value)?;
        *self.balances.entry(to.to_string()).or_insert(0.0) += value;
        self.resync_supply();
        trace!("ledger mint {} to {}, total supply {}", value, to, self.total_supply);
        Ok(())
    }

    fn burn(&mut self, from: &str, value: Amount) -> Result<()> {
        let value = ensure_non_negative(value)?;
        let balance = get_or_zero(&self.balances, from);
        if value > balance {
            return Err(PoolError::InsufficientBalance {
                address: Address::from(from),
                balance,
                requested: value,
            });
        }
        *self.balances.entry(from.to_string()).or_insert(0.0) -= value;
        self.resync_supply();
        trace!("ledger burn {} from {}, total supply {}", value, from, self.total_supply);
        Ok(())
    }

    fn balance_of(&self, address: &str) -> Amount {
        get_or_zero(&self.balances, address)
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn balances(&self) -> &Balances {
        &self.balances
    }
}
