use crate::errors::{AppError, Result};
use num_bigint::BigUint;

/// Liquidation incentive schedule parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncentiveParams {
    /// Cap on the liquidation incentive factor.
    pub max_incentive: f64,
    /// Weight of the LLTV in the LIF denominator.
    pub beta: f64,
}

impl Default for IncentiveParams {
    fn default() -> Self {
        Self {
            max_incentive: 1.15,
            beta: 0.3,
        }
    }
}

/// When to stop bisecting. The search ends as soon as any enabled
/// condition holds.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRule {
    pub max_iterations: u32,
    /// Stop once `high - low` is at most this many raw units.
    pub abs_tolerance: Option<BigUint>,
    /// Stop once `(high - low) / high` is at most this fraction.
    pub rel_tolerance: Option<f64>,
}

impl Default for StopRule {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            abs_tolerance: None,
            rel_tolerance: None,
        }
    }
}

impl StopRule {
    pub fn iterations(max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..Self::default()
        }
    }

    pub fn with_abs_tolerance(mut self, tolerance: BigUint) -> Self {
        self.abs_tolerance = Some(tolerance);
        self
    }

    pub fn with_rel_tolerance(mut self, tolerance: f64) -> Self {
        self.rel_tolerance = Some(tolerance);
        self
    }

    /// A relative tolerance must be a fraction in (0, 1). At 1 or above the
    /// first width check already passes and the search never runs.
    pub fn validate(&self) -> Result<()> {
        if let Some(rel) = self.rel_tolerance {
            if !rel.is_finite() || rel <= 0.0 || rel >= 1.0 {
                return Err(AppError::Domain(format!(
                    "relative tolerance must be in (0, 1), got {rel}"
                )));
            }
        }
        Ok(())
    }
}

/// Current bracket of the search. `low` always passed the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBounds {
    pub low: BigUint,
    pub high: BigUint,
}

impl SearchBounds {
    pub fn width(&self) -> BigUint {
        if self.high > self.low {
            &self.high - &self.low
        } else {
            BigUint::default()
        }
    }

    pub fn midpoint(&self) -> BigUint {
        (&self.low + &self.high) >> 1
    }
}

/// Full result of one search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Largest quoted amount whose ratio exceeded the target.
    pub amount: BigUint,
    pub bounds: SearchBounds,
    /// Bisection steps performed (reference quote excluded).
    pub iterations: u32,
    /// amount_out per raw unit in at the one-unit reference.
    pub reference_unit_price: f64,
}
