//! Liquidation incentive model: LLTV -> tolerated price ratio.

use super::types::IncentiveParams;
use crate::errors::{AppError, Result};

/// `min(max_incentive, 1 / (beta * lltv + (1 - beta)))`
pub fn liquidation_incentive_factor(lltv: f64, params: &IncentiveParams) -> Result<f64> {
    validate(lltv, params)?;
    let IncentiveParams { max_incentive, beta } = *params;
    Ok(max_incentive.min(1.0 / (beta * lltv + (1.0 - beta))))
}

/// Fraction of the reference price execution may fall to before a position
/// at `lltv` becomes liquidatable: `lltv / critical_ltv` with
/// `critical_ltv = 1 / lif`.
pub fn target_ratio(lltv: f64, params: &IncentiveParams) -> Result<f64> {
    let lif = liquidation_incentive_factor(lltv, params)?;
    let critical_ltv = 1.0 / lif;
    Ok(lltv / critical_ltv)
}

fn validate(lltv: f64, params: &IncentiveParams) -> Result<()> {
    if !lltv.is_finite() || lltv <= 0.0 || lltv > 1.0 {
        return Err(AppError::Domain(format!("lltv must be in (0, 1], got {lltv}")));
    }
    if !params.beta.is_finite() || !(0.0..=1.0).contains(&params.beta) {
        return Err(AppError::Domain(format!(
            "beta must be in [0, 1], got {}",
            params.beta
        )));
    }
    if !params.max_incentive.is_finite() || params.max_incentive < 1.0 {
        return Err(AppError::Domain(format!(
            "max_incentive must be >= 1, got {}",
            params.max_incentive
        )));
    }
    Ok(())
}
