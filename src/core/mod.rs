mod engine;
mod solver;
mod types;

pub use engine::{project, project_lumpsum, project_sip, yearly_breakdown};
pub use solver::{SolveError, compare, required_contribution};
pub use types::{Comparison, GoalPlan, Mode, ProjectionInputs, ProjectionResult, YearPoint};
