use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    #[serde(alias = "SIP")]
    Sip,
    #[serde(alias = "LUMPSUM", alias = "lumpSum", alias = "lump-sum")]
    Lumpsum,
}

impl Mode {
    pub fn contribution_label(self) -> &'static str {
        match self {
            Mode::Sip => "Monthly investment",
            Mode::Lumpsum => "Total investment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInputs {
    pub mode: Mode,
    pub contribution: f64,
    pub rate_percent: f64,
    pub horizon_years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub invested: f64,
    pub returns: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPoint {
    pub year: u32,
    pub invested: f64,
    pub returns: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlan {
    pub target_amount: f64,
    pub rate_percent: f64,
    pub horizon_years: f64,
    pub required_contribution: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub sip: ProjectionResult,
    pub lumpsum: ProjectionResult,
    pub lumpsum_amount: f64,
    pub sip_advantage: f64,
}
