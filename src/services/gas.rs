//! Gas limit policy applied before any transaction is submitted.

use crate::error::{AppError, Result};

/// Gas added on top of every estimate.
pub const DEFAULT_GAS_MARGIN: u64 = 10_000;

/// Largest estimate accepted by default.
pub const DEFAULT_GAS_CEILING: u64 = 8_000_000;

/// Turns a node's gas estimate into the gas limit to send with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPolicy {
    /// Gas added to the estimate.
    pub margin: u64,
    /// Estimates above this are refused.
    pub ceiling: u64,
}

impl Default for GasPolicy {
    fn default() -> Self {
        Self { margin: DEFAULT_GAS_MARGIN, ceiling: DEFAULT_GAS_CEILING }
    }
}

impl GasPolicy {
    /// Create a policy with the given margin and ceiling.
    pub fn new(margin: u64, ceiling: u64) -> Self {
        Self { margin, ceiling }
    }

    /// Gas limit for a transaction estimated at `estimate`.
    pub fn gas_limit(&self, estimate: u64) -> Result<u64> {
        if estimate > self.ceiling {
            return Err(AppError::GasCeilingExceeded { estimate, ceiling: self.ceiling });
        }
        Ok(estimate.saturating_add(self.margin))
    }
}
