use super::types::{Mode, ProjectionInputs, ProjectionResult, YearPoint};

const MONTHS_PER_YEAR: f64 = 12.0;

pub fn project(inputs: &ProjectionInputs) -> ProjectionResult {
    match inputs.mode {
        Mode::Sip => project_sip(inputs.contribution, inputs.rate_percent, inputs.horizon_years),
        Mode::Lumpsum => {
            project_lumpsum(inputs.contribution, inputs.rate_percent, inputs.horizon_years)
        }
    }
}

pub fn project_sip(contribution: f64, rate_percent: f64, horizon_years: f64) -> ProjectionResult {
    let months = horizon_years * MONTHS_PER_YEAR;
    let invested = contribution * months;
    let i = monthly_rate(rate_percent);
    let total = if i == 0.0 {
        invested
    } else {
        contribution * (((1.0 + i).powf(months) - 1.0) / i) * (1.0 + i)
    };
    ProjectionResult {
        invested,
        returns: total - invested,
        total,
    }
}

pub fn project_lumpsum(
    contribution: f64,
    rate_percent: f64,
    horizon_years: f64,
) -> ProjectionResult {
    let total = contribution * (1.0 + rate_percent / 100.0).powf(horizon_years);
    ProjectionResult {
        invested: contribution,
        returns: total - contribution,
        total,
    }
}

pub fn yearly_breakdown(inputs: &ProjectionInputs) -> Vec<YearPoint> {
    let whole_years = if inputs.horizon_years.is_finite() && inputs.horizon_years >= 1.0 {
        inputs.horizon_years.floor() as u32
    } else {
        0
    };

    (1..=whole_years)
        .map(|year| {
            let point = project(&ProjectionInputs {
                horizon_years: f64::from(year),
                ..*inputs
            });
            YearPoint {
                year,
                invested: point.invested,
                returns: point.returns,
                total: point.total,
            }
        })
        .collect()
}

pub(crate) fn monthly_rate(rate_percent: f64) -> f64 {
    rate_percent / 100.0 / MONTHS_PER_YEAR
}

// Future value of one unit paid at the start of each of `months` periods.
pub(crate) fn sip_growth_factor(monthly_rate: f64, months: f64) -> f64 {
    if monthly_rate == 0.0 {
        return months;
    }
    (((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate) * (1.0 + monthly_rate)
}
