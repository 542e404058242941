mod calculator;
mod config;
mod params;
mod parse;
mod scheduler;
mod sync;

pub use calculator::{Calculator, InputEvent, Notification, PresenterPort, Recompute};
pub use config::{CalculatorConfig, ConfigError, ParameterConfig};
pub use params::{ParamId, ParameterStore, Range, StoreError};
pub use parse::{
    InputError, ParseError, RangeError, format_value, parse_amount, parse_in_range,
    validate_in_range,
};
pub use scheduler::{ScheduleAction, UpdateScheduler};
pub use sync::{FieldView, InputSynchronizer, SyncEffects, SyncState};
