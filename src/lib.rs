// cpmm_pool_rs/src/lib.rs

// Declare modules
pub mod config;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod report;
pub mod types;

// Re-export key types, traits, and functions for easier use by library consumers.
pub use config::PoolConfig;
pub use ledger::{InMemoryLedger, LiquidityLedger};
pub use math::{get_amount_delta, k_deviation, quote};
pub use pool::Pool;
pub use report::PoolSummary;
pub use types::{
    Address, Amount, Price, Balances, // Basic types
    PoolError, Result, // Error handling
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notebook_walkthrough() {
        let mut pool = Pool::new();
        pool.mint("alice", Some(4.0), Some(9.0)).unwrap();
        pool.mint("bob", Some(4.0), None).unwrap();
        let amount1_delta = pool.swap(1.0).unwrap();

        assert!(amount1_delta < 0.0);
        assert_eq!(pool.total_supply(), 12.0);
        assert!(pool.summary().is_ok());
    }
}
