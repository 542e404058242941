use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{CalculatorConfig, ConfigError};
use super::params::{ParamId, ParameterStore, StoreError};
use super::scheduler::{ScheduleAction, UpdateScheduler};
use super::sync::{FieldView, InputSynchronizer, SyncEffects};
use crate::core::{Mode, ProjectionResult, project};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InputEvent {
    SliderMoved { param: ParamId, position: f64 },
    TextChanged { param: ParamId, text: String },
    TextFocusLost { param: ParamId },
    TextFocusGained { param: ParamId },
    ModeChanged { mode: Mode },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Notification {
    DisplayValueChanged {
        param: ParamId,
        value: f64,
    },
    ProjectionReady {
        mode: Mode,
        result: ProjectionResult,
    },
    ValidationErrorChanged {
        param: ParamId,
        has_error: bool,
    },
    FieldTextChanged {
        param: ParamId,
        text: String,
        slider: f64,
    },
    ModeLabelChanged {
        mode: Mode,
        label: &'static str,
    },
}

pub trait PresenterPort {
    fn present(&mut self, notification: Notification);
}

impl PresenterPort for Vec<Notification> {
    fn present(&mut self, notification: Notification) {
        self.push(notification);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    Param(ParamId),
    Mode(Mode),
}

#[derive(Debug)]
pub struct Calculator {
    store: ParameterStore,
    fields: [InputSynchronizer; 3],
    mode: Mode,
    scheduler: UpdateScheduler<Recompute>,
}

impl Calculator {
    pub fn new(config: &CalculatorConfig) -> Result<Self, ConfigError> {
        let store = ParameterStore::new(config)?;
        let fields = ParamId::ALL.map(|id| InputSynchronizer::new(id, &store));
        Ok(Self {
            store,
            fields,
            mode: config.initial_mode,
            scheduler: UpdateScheduler::new(config.coalesce_delay()),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn value(&self, id: ParamId) -> f64 {
        self.store.get(id)
    }

    pub fn field(&self, id: ParamId) -> FieldView {
        self.fields[id.index()].view()
    }

    pub fn projection(&self) -> ProjectionResult {
        project(&self.store.inputs(self.mode))
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.deadline()
    }

    pub fn initial_render(&self, port: &mut impl PresenterPort) {
        port.present(Notification::ModeLabelChanged {
            mode: self.mode,
            label: self.mode.contribution_label(),
        });
        for field in &self.fields {
            let view = field.view();
            port.present(Notification::DisplayValueChanged {
                param: view.param,
                value: self.store.get(view.param),
            });
            port.present(Notification::FieldTextChanged {
                param: view.param,
                text: view.text,
                slider: view.slider,
            });
        }
        port.present(Notification::ProjectionReady {
            mode: self.mode,
            result: self.projection(),
        });
    }

    pub fn handle(
        &mut self,
        event: InputEvent,
        now: Duration,
        port: &mut impl PresenterPort,
    ) -> Result<(), StoreError> {
        let (param, effects) = match event {
            InputEvent::SliderMoved { param, position } => {
                let field = &mut self.fields[param.index()];
                (param, field.slider_moved(position, &mut self.store)?)
            }
            InputEvent::TextChanged { param, text } => {
                let field = &mut self.fields[param.index()];
                (param, field.text_changed(&text, &mut self.store)?)
            }
            InputEvent::TextFocusLost { param } => {
                let field = &mut self.fields[param.index()];
                (param, field.focus_lost(&mut self.store)?)
            }
            InputEvent::TextFocusGained { param } => {
                (param, self.fields[param.index()].focus_gained())
            }
            InputEvent::ModeChanged { mode } => {
                self.switch_mode(mode, now, port);
                return Ok(());
            }
        };
        self.apply(param, effects, now, port);
        Ok(())
    }

    pub fn poll(
        &mut self,
        now: Duration,
        port: &mut impl PresenterPort,
    ) -> Option<ProjectionResult> {
        let trigger = self.scheduler.take_due(now)?;
        let result = self.projection();
        debug!(?trigger, mode = ?self.mode, total = result.total, "projection recomputed");
        port.present(Notification::ProjectionReady {
            mode: self.mode,
            result,
        });
        Some(result)
    }

    fn switch_mode(&mut self, mode: Mode, now: Duration, port: &mut impl PresenterPort) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        port.present(Notification::ModeLabelChanged {
            mode,
            label: mode.contribution_label(),
        });
        self.schedule(Recompute::Mode(mode), now);
    }

    fn apply(
        &mut self,
        param: ParamId,
        effects: SyncEffects,
        now: Duration,
        port: &mut impl PresenterPort,
    ) {
        if let Some(value) = effects.value {
            port.present(Notification::DisplayValueChanged { param, value });
        }
        if effects.text_replaced {
            let field = &self.fields[param.index()];
            port.present(Notification::FieldTextChanged {
                param,
                text: field.text().to_string(),
                slider: field.slider(),
            });
        }
        if let Some(has_error) = effects.error_changed {
            port.present(Notification::ValidationErrorChanged { param, has_error });
        }
        if effects.recompute {
            self.schedule(Recompute::Param(param), now);
        }
    }

    fn schedule(&mut self, trigger: Recompute, now: Duration) {
        match self.scheduler.schedule(now, trigger) {
            ScheduleAction::Scheduled { generation } => {
                debug!(?trigger, generation, "recompute scheduled");
            }
            ScheduleAction::Replaced {
                generation,
                superseded,
            } => {
                debug!(?trigger, generation, superseded, "recompute rescheduled");
            }
        }
    }
}
