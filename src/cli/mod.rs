mod session;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;
use tokio::io::BufReader;

use crate::core::{
    Comparison, GoalPlan, Mode, ProjectionInputs, ProjectionResult, SolveError, YearPoint,
    compare, project, required_contribution, yearly_breakdown,
};
use crate::session::{
    CalculatorConfig, ConfigError, ParamId, ParameterStore, RangeError, validate_in_range,
};

pub use session::run_session;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("--{flag}: {source}")]
    Input {
        flag: &'static str,
        source: RangeError,
    },
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliMode {
    Sip,
    Lumpsum,
}

impl From<CliMode> for Mode {
    fn from(value: CliMode) -> Self {
        match value {
            CliMode::Sip => Mode::Sip,
            CliMode::Lumpsum => Mode::Lumpsum,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sipcalc",
    about = "SIP and lumpsum investment growth projections"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "JSON file with parameter ranges, defaults and coalescing delay"
    )]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Project the value of a SIP or lumpsum investment")]
    Project(ProjectArgs),
    #[command(about = "Year-by-year growth of a SIP or lumpsum investment")]
    Breakdown(ProjectArgs),
    #[command(about = "Monthly SIP needed to reach a target amount")]
    Goal(GoalArgs),
    #[command(about = "Compare a SIP with a lumpsum of the same total outlay")]
    Compare(CompareArgs),
    #[command(about = "Interactive session: JSON input events on stdin, notifications on stdout")]
    Session(SessionArgs),
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[arg(long, value_enum, default_value_t = CliMode::Sip)]
    mode: CliMode,
    #[arg(long, help = "Monthly SIP amount or one-time lumpsum amount")]
    amount: f64,
    #[arg(long, help = "Expected annual return in percent")]
    rate: f64,
    #[arg(long, help = "Investment period in years")]
    years: f64,
}

#[derive(Args, Debug)]
struct GoalArgs {
    #[arg(long)]
    target: f64,
    #[arg(long, help = "Expected annual return in percent")]
    rate: f64,
    #[arg(long, help = "Investment period in years")]
    years: f64,
}

#[derive(Args, Debug)]
struct CompareArgs {
    #[arg(long, help = "Monthly SIP amount")]
    amount: f64,
    #[arg(long, help = "Expected annual return in percent")]
    rate: f64,
    #[arg(long, help = "Investment period in years")]
    years: f64,
}

#[derive(Args, Debug)]
struct SessionArgs {
    #[arg(long, help = "Override the recompute coalescing delay in milliseconds")]
    delay_ms: Option<u64>,
    #[arg(long, value_enum, help = "Override the initial mode")]
    mode: Option<CliMode>,
}

// Presentation boundary: whole currency units, negative returns floored for chart magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayProjection {
    pub invested: f64,
    pub returns: f64,
    pub total: f64,
}

impl From<ProjectionResult> for DisplayProjection {
    fn from(value: ProjectionResult) -> Self {
        Self {
            invested: value.invested.round(),
            returns: value.returns.max(0.0).round(),
            total: value.total.round(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    mode: Mode,
    contribution: f64,
    rate_percent: f64,
    horizon_years: f64,
    result: ProjectionResult,
    display: DisplayProjection,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BreakdownResponse {
    mode: Mode,
    years: Vec<YearPoint>,
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::load(path)?,
        None => CalculatorConfig::default(),
    };

    match cli.command {
        Command::Project(args) => {
            let inputs = build_inputs(&config, &args)?;
            print_json(&project_response(&inputs))
        }
        Command::Breakdown(args) => {
            let inputs = build_inputs(&config, &args)?;
            print_json(&BreakdownResponse {
                mode: inputs.mode,
                years: yearly_breakdown(&inputs),
            })
        }
        Command::Goal(args) => {
            let plan = goal_plan(&config, &args)?;
            print_json(&plan)
        }
        Command::Compare(args) => {
            let comparison = comparison(&config, &args)?;
            print_json(&comparison)
        }
        Command::Session(args) => {
            if let Some(delay_ms) = args.delay_ms {
                config.coalesce_delay_ms = delay_ms;
            }
            if let Some(mode) = args.mode {
                config.initial_mode = mode.into();
            }
            config.validate()?;
            let stdin = BufReader::new(tokio::io::stdin());
            run_session(&config, stdin, tokio::io::stdout()).await
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn check(
    store: &ParameterStore,
    id: ParamId,
    flag: &'static str,
    value: f64,
) -> Result<f64, CliError> {
    validate_in_range(value, &store.range(id)).map_err(|source| CliError::Input { flag, source })
}

fn build_inputs(config: &CalculatorConfig, args: &ProjectArgs) -> Result<ProjectionInputs, CliError> {
    let store = ParameterStore::new(config)?;
    Ok(ProjectionInputs {
        mode: args.mode.into(),
        contribution: check(&store, ParamId::Contribution, "amount", args.amount)?,
        rate_percent: check(&store, ParamId::ReturnRate, "rate", args.rate)?,
        horizon_years: check(&store, ParamId::Horizon, "years", args.years)?,
    })
}

fn project_response(inputs: &ProjectionInputs) -> ProjectResponse {
    let result = project(inputs);
    ProjectResponse {
        mode: inputs.mode,
        contribution: inputs.contribution,
        rate_percent: inputs.rate_percent,
        horizon_years: inputs.horizon_years,
        result,
        display: result.into(),
    }
}

fn goal_plan(config: &CalculatorConfig, args: &GoalArgs) -> Result<GoalPlan, CliError> {
    let store = ParameterStore::new(config)?;
    let rate = check(&store, ParamId::ReturnRate, "rate", args.rate)?;
    let years = check(&store, ParamId::Horizon, "years", args.years)?;
    Ok(required_contribution(args.target, rate, years)?)
}

fn comparison(config: &CalculatorConfig, args: &CompareArgs) -> Result<Comparison, CliError> {
    let store = ParameterStore::new(config)?;
    let amount = check(&store, ParamId::Contribution, "amount", args.amount)?;
    let rate = check(&store, ParamId::ReturnRate, "rate", args.rate)?;
    let years = check(&store, ParamId::Horizon, "years", args.years)?;
    Ok(compare(amount, rate, years))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn project_args(mode: CliMode, amount: f64, rate: f64, years: f64) -> ProjectArgs {
        ProjectArgs {
            mode,
            amount,
            rate,
            years,
        }
    }

    #[test]
    fn cli_parses_project_subcommand() {
        let cli = Cli::try_parse_from([
            "sipcalc", "project", "--mode", "lumpsum", "--amount", "100000", "--rate", "10",
            "--years", "5",
        ])
        .expect("valid args");
        let Command::Project(args) = cli.command else {
            panic!("expected project command");
        };
        assert_eq!(args.mode, CliMode::Lumpsum);
        assert_approx(args.amount, 100_000.0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_parses_session_overrides() {
        let cli = Cli::try_parse_from([
            "sipcalc",
            "session",
            "--delay-ms",
            "40",
            "--config",
            "calc.json",
        ])
        .expect("valid args");
        let Command::Session(args) = cli.command else {
            panic!("expected session command");
        };
        assert_eq!(args.delay_ms, Some(40));
        assert_eq!(cli.config, Some(PathBuf::from("calc.json")));
    }

    #[test]
    fn build_inputs_rejects_values_outside_configured_ranges() {
        let config = CalculatorConfig::default();

        let err = build_inputs(&config, &project_args(CliMode::Sip, 400.0, 12.0, 10.0))
            .expect_err("amount below minimum");
        assert!(err.to_string().starts_with("--amount"));

        let err = build_inputs(&config, &project_args(CliMode::Sip, 5_000.0, 26.0, 10.0))
            .expect_err("rate above maximum");
        assert!(err.to_string().starts_with("--rate"));

        let err = build_inputs(&config, &project_args(CliMode::Sip, 5_000.0, 12.0, 51.0))
            .expect_err("period above maximum");
        assert!(err.to_string().starts_with("--years"));
    }

    #[test]
    fn project_response_keeps_exact_and_rounded_values() {
        let config = CalculatorConfig::default();
        let inputs = build_inputs(&config, &project_args(CliMode::Sip, 25_000.0, 12.0, 10.0))
            .expect("valid inputs");
        let response = project_response(&inputs);

        assert_approx(response.result.invested, 3_000_000.0);
        assert_eq!(response.display.total, response.result.total.round());
        assert_eq!(response.display.total, 5_808_477.0);
    }

    #[test]
    fn display_projection_floors_negative_returns() {
        let display = DisplayProjection::from(ProjectionResult {
            invested: 1_000.0,
            returns: -120.4,
            total: 879.6,
        });
        assert_eq!(display.returns, 0.0);
        assert_eq!(display.total, 880.0);
    }

    #[test]
    fn goal_and_comparison_validate_inputs() {
        let config = CalculatorConfig::default();
        let plan = goal_plan(
            &config,
            &GoalArgs {
                target: 120_000.0,
                rate: 1.0,
                years: 1.0,
            },
        )
        .expect("valid goal");
        assert!(plan.required_contribution < 10_000.0);

        let err = goal_plan(
            &config,
            &GoalArgs {
                target: -5.0,
                rate: 12.0,
                years: 10.0,
            },
        )
        .expect_err("negative target");
        assert!(matches!(err, CliError::Solve(SolveError::InvalidTarget(_))));

        let result = comparison(
            &config,
            &CompareArgs {
                amount: 1_000.0,
                rate: 8.0,
                years: 3.0,
            },
        )
        .expect("valid comparison");
        assert_approx(result.lumpsum_amount, 36_000.0);
    }
}
