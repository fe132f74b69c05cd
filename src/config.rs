// cpmm_pool_rs/src/config.rs
use crate::types::{PoolError, Result};
use serde::{Deserialize, Serialize};

/// Default relative tolerance for the post-swap `k` check.
pub const DEFAULT_INVARIANT_TOLERANCE: f64 = 1e-9;

/// Behaviour knobs for a [`Pool`](crate::pool::Pool).
///
/// The `k` invariant is not enforced at runtime by default since floating
/// point swaps only preserve it approximately. Turning on `strict_invariant`
/// makes every swap compare the product of reserves before and after, and
/// reject the trade when the relative deviation exceeds `invariant_tolerance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub strict_invariant: bool,
    pub invariant_tolerance: f64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            strict_invariant: false,
            invariant_tolerance: DEFAULT_INVARIANT_TOLERANCE,
        }
    }
}

impl PoolConfig {
    /// Strict mode with the given tolerance.
    pub fn strict(invariant_tolerance: f64) -> Result<Self> {
        let config = Self {
            strict_invariant: true,
            invariant_tolerance,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document such as
    /// `{"strict_invariant": true, "invariant_tolerance": 1e-12}`.
    /// Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PoolConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.invariant_tolerance.is_finite() || self.invariant_tolerance < 0.0 {
            return Err(PoolError::InvalidAmount(self.invariant_tolerance));
        }
        Ok(())
    }
}
