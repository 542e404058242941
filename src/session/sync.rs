use serde::Serialize;
use tracing::{debug, warn};

use super::params::{ParamId, ParameterStore, StoreError};
use super::parse::{format_value, parse_in_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncState {
    Idle,
    Editing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SyncEffects {
    pub value: Option<f64>,
    pub text_replaced: bool,
    pub error_changed: Option<bool>,
    pub recompute: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub param: ParamId,
    pub state: SyncState,
    pub text: String,
    pub slider: f64,
    pub has_error: bool,
}

#[derive(Debug, Clone)]
pub struct InputSynchronizer {
    param: ParamId,
    state: SyncState,
    text: String,
    slider: f64,
    has_error: bool,
}

impl InputSynchronizer {
    pub fn new(param: ParamId, store: &ParameterStore) -> Self {
        let value = store.get(param);
        Self {
            param,
            state: SyncState::Idle,
            text: format_value(value),
            slider: value,
            has_error: false,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn slider(&self) -> f64 {
        self.slider
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn view(&self) -> FieldView {
        FieldView {
            param: self.param,
            state: self.state,
            text: self.text.clone(),
            slider: self.slider,
            has_error: self.has_error,
        }
    }

    pub fn slider_moved(
        &mut self,
        position: f64,
        store: &mut ParameterStore,
    ) -> Result<SyncEffects, StoreError> {
        if !position.is_finite() {
            warn!(param = %self.param, position, "ignoring non-finite slider position");
            return Ok(SyncEffects::default());
        }

        // Sliders only produce aligned, in-range positions; snapping is a no-op for them.
        let value = store.range(self.param).snap(position);
        store.set(self.param, value)?;

        self.state = SyncState::Idle;
        self.slider = value;
        self.text = format_value(value);
        Ok(SyncEffects {
            value: Some(value),
            text_replaced: true,
            error_changed: self.set_error(false),
            recompute: true,
        })
    }

    pub fn text_changed(
        &mut self,
        raw: &str,
        store: &mut ParameterStore,
    ) -> Result<SyncEffects, StoreError> {
        self.state = SyncState::Editing;
        self.text = raw.to_string();

        if raw.trim().is_empty() {
            return Ok(SyncEffects {
                error_changed: self.set_error(false),
                ..SyncEffects::default()
            });
        }

        match parse_in_range(raw, &store.range(self.param)) {
            Ok(value) => {
                store.set(self.param, value)?;
                self.slider = value;
                Ok(SyncEffects {
                    value: Some(value),
                    error_changed: self.set_error(false),
                    recompute: true,
                    ..SyncEffects::default()
                })
            }
            Err(err) => {
                debug!(param = %self.param, %err, "edit rejected");
                Ok(SyncEffects {
                    error_changed: self.set_error(true),
                    ..SyncEffects::default()
                })
            }
        }
    }

    pub fn focus_lost(&mut self, store: &mut ParameterStore) -> Result<SyncEffects, StoreError> {
        if self.state == SyncState::Idle {
            return Ok(SyncEffects::default());
        }

        let range = store.range(self.param);
        let effects = match parse_in_range(&self.text, &range) {
            Ok(value) => {
                let snapped = range.snap(value);
                store.set(self.param, snapped)?;
                debug!(param = %self.param, raw = value, snapped, "edit committed");
                SyncEffects {
                    value: Some(snapped),
                    text_replaced: true,
                    error_changed: self.set_error(false),
                    recompute: true,
                }
            }
            Err(err) => {
                debug!(param = %self.param, %err, "edit reverted");
                SyncEffects {
                    text_replaced: true,
                    error_changed: self.set_error(false),
                    ..SyncEffects::default()
                }
            }
        };

        let committed = store.get(self.param);
        self.state = SyncState::Idle;
        self.text = format_value(committed);
        self.slider = committed;
        Ok(effects)
    }

    pub fn focus_gained(&mut self) -> SyncEffects {
        SyncEffects {
            error_changed: self.set_error(false),
            ..SyncEffects::default()
        }
    }

    fn set_error(&mut self, has_error: bool) -> Option<bool> {
        if self.has_error == has_error {
            return None;
        }
        self.has_error = has_error;
        Some(has_error)
    }
}
