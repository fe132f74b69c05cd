// cpmm_pool_rs/src/report.rs
use crate::ledger::LiquidityLedger;
use crate::pool::Pool;
use crate::types::{Address, Amount, Price, Result};
use serde::Serialize;
use std::fmt;

/// Point-in-time view of a pool, for printing or serializing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolSummary {
    pub k: Amount,
    pub total_supply: Amount,
    pub reserve0: Amount,
    pub reserve1: Amount,
    pub reserves_in_token0: Amount,
    pub reserves_in_token1: Amount,
    /// LP balances sorted by address.
    pub liquidity_providers: Vec<(Address, Amount)>,
    pub price0: Price,
    pub price1: Price,
}

impl PoolSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for PoolSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "k = {}", self.k)?;
        writeln!(f, "lp_supply = {}", self.total_supply)?;
        writeln!(f, "reserve0 = {}", self.reserve0)?;
        writeln!(f, "reserve1 = {}", self.reserve1)?;
        writeln!(
            f,
            "total reserves = {} token0 aka {} token1",
            self.reserves_in_token0, self.reserves_in_token1
        )?;
        let lps: Vec<String> = self
            .liquidity_providers
            .iter()
            .map(|(address, balance)| format!("{}: {}", address, balance))
            .collect();
        writeln!(f, "LPs = {{{}}}", lps.join(", "))?;
        writeln!(f, "1 token0 = {} token1", self.price0)?;
        write!(f, "1 token1 = {} token0", self.price1)
    }
}

impl<L: LiquidityLedger> Pool<L> {
    /// Summary of the current state. Fails on an empty pool, where prices
    /// are undefined.
    pub fn summary(&self) -> Result<PoolSummary> {
        let mut liquidity_providers: Vec<(Address, Amount)> = self
            .ledger()
            .balances()
            .iter()
            .map(|(address, balance)| (address.clone(), *balance))
            .collect();
        liquidity_providers.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(PoolSummary {
            k: self.k(),
            total_supply: self.total_supply(),
            reserve0: self.reserve0(),
            reserve1: self.reserve1(),
            reserves_in_token0: self.reserves_priced_in_token0()?,
            reserves_in_token1: self.reserves_priced_in_token1()?,
            liquidity_providers,
            price0: self.price0()?,
            price1: self.price1()?,
        })
    }
}
