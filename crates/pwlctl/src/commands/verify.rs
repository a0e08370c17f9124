//! Round-trip verification command

use anyhow::Result;
use pwl_codec::{InterpolationMode, Scenario, ScenarioReport};
use tracing::{info, warn};

use super::VerifyArgs;
use crate::error::CliError;
use crate::output;

/// Smallest input depth in the linear sweep.
const SWEEP_MIN_IN: u8 = 9;
/// Smallest output depth in the linear sweep.
const SWEEP_MIN_OUT: u8 = 8;

/// Run the linear sweep and the windowed scenario in each requested mode.
pub fn execute(args: &VerifyArgs, json: bool) -> Result<()> {
    let mut scenarios = Scenario::linear_sweep(SWEEP_MIN_IN, args.max_in, SWEEP_MIN_OUT)
        .map_err(CliError::from)?;
    scenarios.push(Scenario::windowed(args.window_start, args.window_bits).map_err(CliError::from)?);

    let modes: Vec<InterpolationMode> = match args.mode {
        Some(mode) => vec![mode],
        None => InterpolationMode::ALL.to_vec(),
    };

    let reports = run_all(&scenarios, &modes)?;
    output::print_reports(&reports, json);

    let failed = reports.iter().filter(|r| !r.passed()).count();
    if failed > 0 {
        return Err(CliError::VerificationFailed {
            failed,
            total: reports.len(),
        }
        .into());
    }
    info!(runs = reports.len(), "all scenarios within bounds");
    Ok(())
}

fn run_all(scenarios: &[Scenario], modes: &[InterpolationMode]) -> Result<Vec<ScenarioReport>, CliError> {
    let mut reports = Vec::with_capacity(scenarios.len() * modes.len());
    for &mode in modes {
        for scenario in scenarios {
            let report = scenario.run(mode)?;
            if !report.passed() {
                warn!(
                    scenario = %scenario,
                    mode = %mode,
                    max_abs_err = report.stats.max_abs_err,
                    bound = report.max_abs_err_bound,
                    avg_err = report.stats.avg_err,
                    "scenario out of bounds"
                );
            }
            reports.push(report);
        }
    }
    Ok(reports)
}
