use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::{CalculatorConfig, ConfigError};
use crate::core::{Mode, ProjectionInputs};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamId {
    #[serde(alias = "amount", alias = "monthlyInvestment")]
    Contribution,
    #[serde(alias = "rate", alias = "expectedReturn")]
    ReturnRate,
    #[serde(alias = "years", alias = "timePeriod")]
    Horizon,
}

impl ParamId {
    pub const ALL: [ParamId; 3] = [ParamId::Contribution, ParamId::ReturnRate, ParamId::Horizon];

    pub(crate) fn index(self) -> usize {
        match self {
            ParamId::Contribution => 0,
            ParamId::ReturnRate => 1,
            ParamId::Horizon => 2,
        }
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamId::Contribution => "contribution",
            ParamId::ReturnRate => "returnRate",
            ParamId::Horizon => "horizon",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    // min + round((value - min) / step) * step, cleaned to the step's precision, then clamped.
    pub fn snap(&self, value: f64) -> f64 {
        let steps = ((value - self.min) / self.step).round();
        let scale = 10f64.powi(self.decimal_places());
        let snapped = ((self.min + steps * self.step) * scale).round() / scale;
        snapped.clamp(self.min, self.max)
    }

    fn decimal_places(&self) -> i32 {
        decimal_places(self.step).max(decimal_places(self.min))
    }
}

fn decimal_places(value: f64) -> i32 {
    let text = value.to_string();
    text.split_once('.')
        .map_or(0, |(_, fraction)| fraction.len() as i32)
        .min(12)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("{param}: refusing to store {value}, outside [{min}, {max}]")]
    OutOfRange {
        param: ParamId,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Clone, Copy)]
struct Parameter {
    value: f64,
    range: Range,
}

#[derive(Debug, Clone)]
pub struct ParameterStore {
    slots: [Parameter; 3],
}

impl ParameterStore {
    pub fn new(config: &CalculatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let slot = |id: ParamId| {
            let cfg = config.parameter(id);
            Parameter {
                value: cfg.default,
                range: Range {
                    min: cfg.min,
                    max: cfg.max,
                    step: cfg.step,
                },
            }
        };
        Ok(Self {
            slots: ParamId::ALL.map(slot),
        })
    }

    pub fn get(&self, id: ParamId) -> f64 {
        self.slots[id.index()].value
    }

    pub fn range(&self, id: ParamId) -> Range {
        self.slots[id.index()].range
    }

    pub fn set(&mut self, id: ParamId, value: f64) -> Result<(), StoreError> {
        let slot = &mut self.slots[id.index()];
        if !slot.range.contains(value) {
            return Err(StoreError::OutOfRange {
                param: id,
                value,
                min: slot.range.min,
                max: slot.range.max,
            });
        }
        slot.value = value;
        Ok(())
    }

    pub fn inputs(&self, mode: Mode) -> ProjectionInputs {
        ProjectionInputs {
            mode,
            contribution: self.get(ParamId::Contribution),
            rate_percent: self.get(ParamId::ReturnRate),
            horizon_years: self.get(ParamId::Horizon),
        }
    }
}
