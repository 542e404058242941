use thiserror::Error;

use super::engine::{monthly_rate, project_lumpsum, project_sip, sip_growth_factor};
use super::types::{Comparison, GoalPlan};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("target amount must be a finite, non-negative number (got {0})")]
    InvalidTarget(f64),
    #[error("return rate must be finite and above -100% (got {0})")]
    InvalidRate(f64),
    #[error("time period must be a finite number of years greater than zero (got {0})")]
    InvalidHorizon(f64),
}

pub fn required_contribution(
    target_amount: f64,
    rate_percent: f64,
    horizon_years: f64,
) -> Result<GoalPlan, SolveError> {
    if !target_amount.is_finite() || target_amount < 0.0 {
        return Err(SolveError::InvalidTarget(target_amount));
    }
    if !rate_percent.is_finite() || rate_percent <= -100.0 {
        return Err(SolveError::InvalidRate(rate_percent));
    }
    if !horizon_years.is_finite() || horizon_years <= 0.0 {
        return Err(SolveError::InvalidHorizon(horizon_years));
    }

    let months = horizon_years * 12.0;
    let factor = sip_growth_factor(monthly_rate(rate_percent), months);

    Ok(GoalPlan {
        target_amount,
        rate_percent,
        horizon_years,
        required_contribution: target_amount / factor,
    })
}

pub fn compare(contribution: f64, rate_percent: f64, horizon_years: f64) -> Comparison {
    let sip = project_sip(contribution, rate_percent, horizon_years);
    let lumpsum_amount = contribution * horizon_years * 12.0;
    let lumpsum = project_lumpsum(lumpsum_amount, rate_percent, horizon_years);
    Comparison {
        sip,
        lumpsum,
        lumpsum_amount,
        sip_advantage: sip.total - lumpsum.total,
    }
}
