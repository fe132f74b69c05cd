// cpmm_pool_rs/demos/pool_walkthrough.rs

use cpmm_pool_rs::{Pool, PoolConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("Constant Product Pool Walkthrough");

    // 1. Optional config from the first argument, e.g. '{"strict_invariant": true}'
    let config = match std::env::args().nth(1) {
        Some(json) => PoolConfig::from_json_str(&json)?,
        None => PoolConfig::default(),
    };
    let mut pool = Pool::with_config(config)?;

    // 2. First deposit sets the ratio: 4 token0 for 9 token1 mints sqrt(36) = 6
    let minted = pool.mint("alice", Some(4.0), Some(9.0))?;
    println!("\nalice minted {} liquidity", minted);
    println!("{}", pool.summary()?);

    // 3. Second deposit with only token0, token1 is quoted at the current ratio
    let minted = pool.mint("bob", Some(4.0), None)?;
    println!("\nbob minted {} liquidity", minted);
    println!("{}", pool.summary()?);

    // 4. Unbalanced deposit: the excess token1 is absorbed without extra credit
    let minted = pool.mint("carol", Some(4.0), Some(100.0))?;
    println!("\ncarol minted {} liquidity", minted);
    println!("{}", pool.summary()?);

    // 5. Sell 1 token0 into the pool
    let amount1_delta = pool.swap(1.0)?;
    println!("\nswap 1 token0 -> {} token1", amount1_delta);
    println!("{}", pool.summary()?);

    // 6. carol withdraws the full share
    let carol_shares = pool.balance_of("carol");
    let (amount0, amount1) = pool.burn("carol", carol_shares)?;
    println!("\ncarol withdrew {} token0 and {} token1", amount0, amount1);
    println!("{}", pool.summary()?.to_json()?);

    Ok(())
}
