//! Response analysis orchestration.
//!
//! Responsibilities:
//!
//! - build the time and frequency grids
//! - run impulse, step and frequency response through a `LinearSystemSolver` (in parallel)
//! - pair samples with their grid points into a `ResponseSet`

pub mod solver;

pub use solver::*;

use tracing::debug;

use crate::domain::{AnalysisConfig, ResponseSet};
use crate::error::AppError;
use crate::math::{linspace, logspace};
use crate::models::TransferFunctionModel;

/// Analyze `model` over `[0, time_bound]` seconds with the default solver and grids.
pub fn analyze(model: &TransferFunctionModel, time_bound: u32) -> Result<ResponseSet, AppError> {
    analyze_with(&StateSpaceSolver, model, time_bound, &AnalysisConfig::default())
}

/// Analyze with an explicit solver and grid configuration.
pub fn analyze_with<S: LinearSystemSolver>(
    solver: &S,
    model: &TransferFunctionModel,
    time_bound: u32,
    config: &AnalysisConfig,
) -> Result<ResponseSet, AppError> {
    if time_bound == 0 {
        return Err(AppError::analysis("time_bound must be a positive number of seconds."));
    }

    let time_grid = linspace(0.0, f64::from(time_bound), config.time_samples);
    let freq_grid = logspace(config.min_decade, config.max_decade, config.frequency_samples);
    debug!(
        order = model.order(),
        time_bound,
        time_samples = time_grid.len(),
        frequency_samples = freq_grid.len(),
        "analyzing transfer function"
    );

    let ((impulse, step), frequency) = rayon::join(
        || {
            rayon::join(
                || solver.impulse(model, &time_grid),
                || solver.step(model, &time_grid),
            )
        },
        || solver.frequency_response(model, &freq_grid),
    );
    let (impulse, step, frequency) = (impulse?, step?, frequency?);

    if impulse.len() != time_grid.len() || step.len() != time_grid.len() || frequency.len() != freq_grid.len() {
        return Err(AppError::analysis("Solver returned a response of unexpected length."));
    }

    Ok(ResponseSet {
        impulse: time_grid.iter().copied().zip(impulse).collect(),
        step: time_grid.iter().copied().zip(step).collect(),
        frequency,
    })
}
