//! Linear-system response solvers.
//!
//! `LinearSystemSolver` is the seam between the analysis pipeline and the
//! numerics. `StateSpaceSolver` is the default implementation: it realizes the
//! transfer function in state-space form and propagates the state exactly
//! between grid points with matrix exponentials.

use nalgebra::{Complex, DMatrix, DVector};

use crate::domain::FrequencyPoint;
use crate::error::AppError;
use crate::math::{expm, unwrap_degrees};
use crate::models::{StateSpace, TransferFunctionModel};

/// Computes the three classical LTI responses for a model.
///
/// Time grids must be uniformly spaced and start at `t = 0`.
pub trait LinearSystemSolver: Sync {
    /// Response to a unit impulse, one amplitude per grid point.
    fn impulse(&self, model: &TransferFunctionModel, time_grid: &[f64]) -> Result<Vec<f64>, AppError>;

    /// Response to a unit step, one amplitude per grid point.
    fn step(&self, model: &TransferFunctionModel, time_grid: &[f64]) -> Result<Vec<f64>, AppError>;

    /// Bode samples, one per angular frequency.
    fn frequency_response(
        &self,
        model: &TransferFunctionModel,
        freq_grid: &[f64],
    ) -> Result<Vec<FrequencyPoint>, AppError>;
}

/// Exact discretization of the controllable canonical realization.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateSpaceSolver;

impl LinearSystemSolver for StateSpaceSolver {
    fn impulse(&self, model: &TransferFunctionModel, time_grid: &[f64]) -> Result<Vec<f64>, AppError> {
        let ss = model.state_space()?;
        let dt = grid_step(time_grid)?;
        let phi = expm(&(&ss.a * dt)).ok_or_else(|| singular("impulse"))?;

        // A unit impulse sets x(0+) = B.
        let mut x = ss.b.clone();
        let mut out = Vec::with_capacity(time_grid.len());
        for _ in time_grid {
            out.push(ss.output(&x));
            x = &phi * &x;
        }
        ensure_finite("impulse", &out)?;
        Ok(out)
    }

    fn step(&self, model: &TransferFunctionModel, time_grid: &[f64]) -> Result<Vec<f64>, AppError> {
        let ss = model.state_space()?;
        let dt = grid_step(time_grid)?;
        let (phi, gamma) = zoh_discretize(&ss, dt)?;

        let mut x = DVector::zeros(ss.order());
        let mut out = Vec::with_capacity(time_grid.len());
        for _ in time_grid {
            out.push(ss.output(&x));
            x = &phi * &x + &gamma;
        }
        ensure_finite("step", &out)?;
        Ok(out)
    }

    fn frequency_response(
        &self,
        model: &TransferFunctionModel,
        freq_grid: &[f64],
    ) -> Result<Vec<FrequencyPoint>, AppError> {
        let values: Vec<Complex<f64>> = freq_grid
            .iter()
            .map(|&w| model.eval(Complex::new(0.0, w)))
            .collect();

        let magnitudes: Vec<f64> = values.iter().map(|h| 20.0 * h.norm().log10()).collect();
        let mut phases: Vec<f64> = values.iter().map(|h| h.arg().to_degrees()).collect();
        unwrap_degrees(&mut phases);

        ensure_finite("magnitude", &magnitudes)?;
        ensure_finite("phase", &phases)?;

        Ok(freq_grid
            .iter()
            .zip(magnitudes.into_iter().zip(phases))
            .map(|(&omega, (magnitude_db, phase_deg))| FrequencyPoint {
                omega,
                magnitude_db,
                phase_deg,
            })
            .collect())
    }
}

/// Zero-order-hold discretization via the augmented exponential
/// `exp([[A, B], [0, 0]] dt) = [[Φ, Γ], [0, I]]`.
fn zoh_discretize(ss: &StateSpace, dt: f64) -> Result<(DMatrix<f64>, DVector<f64>), AppError> {
    let n = ss.order();
    let mut aug = DMatrix::zeros(n + 1, n + 1);
    aug.view_mut((0, 0), (n, n)).copy_from(&(&ss.a * dt));
    aug.view_mut((0, n), (n, 1)).copy_from(&(&ss.b * dt));

    let e = expm(&aug).ok_or_else(|| singular("step"))?;
    let phi = e.view((0, 0), (n, n)).into_owned();
    let gamma = e.view((0, n), (n, 1)).column(0).into_owned();
    Ok((phi, gamma))
}

fn grid_step(time_grid: &[f64]) -> Result<f64, AppError> {
    match time_grid {
        [] => Err(AppError::analysis("Time grid is empty.")),
        [_] => Ok(0.0),
        [t0, t1, ..] => {
            let dt = t1 - t0;
            if dt.is_finite() && dt > 0.0 {
                Ok(dt)
            } else {
                Err(AppError::analysis("Time grid must be strictly increasing."))
            }
        }
    }
}

fn ensure_finite(what: &str, values: &[f64]) -> Result<(), AppError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(AppError::analysis(format!(
            "Non-finite {what} response at sample {idx}; the system is numerically degenerate."
        ))),
        None => Ok(()),
    }
}

fn singular(what: &str) -> AppError {
    AppError::analysis(format!(
        "Singular or non-finite state transition while computing the {what} response."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{linspace, logspace};

    fn first_order() -> TransferFunctionModel {
        TransferFunctionModel::new(vec![1.0], vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn first_order_matches_closed_form() {
        let t = linspace(0.0, 5.0, 101);
        let imp = StateSpaceSolver.impulse(&first_order(), &t).unwrap();
        let stp = StateSpaceSolver.step(&first_order(), &t).unwrap();
        for (i, &ti) in t.iter().enumerate() {
            assert!((imp[i] - (-ti).exp()).abs() < 1e-10, "impulse at {ti}");
            assert!((stp[i] - (1.0 - (-ti).exp())).abs() < 1e-10, "step at {ti}");
        }
    }

    #[test]
    fn underdamped_second_order_step() {
        // w_n = 2, zeta = 0.25: H = 4 / (s^2 + s + 4)
        let tf = TransferFunctionModel::new(vec![4.0], vec![1.0, 1.0, 4.0]).unwrap();
        let t = linspace(0.0, 8.0, 401);
        let y = StateSpaceSolver.step(&tf, &t).unwrap();

        let zeta: f64 = 0.25;
        let wn: f64 = 2.0;
        let wd = wn * (1.0 - zeta * zeta).sqrt();
        for (i, &ti) in t.iter().enumerate() {
            let expected = 1.0
                - (-zeta * wn * ti).exp() * ((wd * ti).cos() + zeta / (1.0 - zeta * zeta).sqrt() * (wd * ti).sin());
            assert!((y[i] - expected).abs() < 1e-9, "t={ti}: {} vs {expected}", y[i]);
        }
    }

    #[test]
    fn first_order_bode() {
        let w = logspace(-2.0, 2.0, 500);
        let resp = StateSpaceSolver.frequency_response(&first_order(), &w).unwrap();
        assert_eq!(resp.len(), 500);
        for p in &resp {
            let mag = -10.0 * (1.0 + p.omega * p.omega).log10();
            let phase = -p.omega.atan().to_degrees();
            assert!((p.magnitude_db - mag).abs() < 1e-9);
            assert!((p.phase_deg - phase).abs() < 1e-9);
        }
    }

    #[test]
    fn third_order_phase_is_unwrapped() {
        // 1/(s+1)^3 phase runs continuously from ~0 to ~-270 degrees.
        let tf = TransferFunctionModel::new(vec![1.0], vec![1.0, 3.0, 3.0, 1.0]).unwrap();
        let w = logspace(-2.0, 2.0, 500);
        let resp = StateSpaceSolver.frequency_response(&tf, &w).unwrap();
        assert!(resp.windows(2).all(|p| (p[1].phase_deg - p[0].phase_deg).abs() < 180.0));
        let last = resp.last().unwrap().phase_deg;
        assert!(last < -260.0 && last > -270.0, "{last}");
    }

    #[test]
    fn diverging_time_response_is_analysis_error() {
        // 1/(s-1): e^t leaves the f64 range near t = 710.
        let tf = TransferFunctionModel::new(vec![1.0], vec![1.0, -1.0]).unwrap();
        let t = linspace(0.0, 1000.0, 1000);
        for err in [
            StateSpaceSolver.impulse(&tf, &t).unwrap_err(),
            StateSpaceSolver.step(&tf, &t).unwrap_err(),
        ] {
            assert_eq!(err.kind(), crate::error::ErrorKind::Analysis);
            assert!(err.message().contains("Non-finite"), "{err}");
        }
    }

    #[test]
    fn pole_on_the_grid_is_analysis_error() {
        // 1/(s^2 + 1) has |H(j1)| = inf; include omega = 1 exactly.
        let tf = TransferFunctionModel::new(vec![1.0], vec![1.0, 0.0, 1.0]).unwrap();
        let err = StateSpaceSolver.frequency_response(&tf, &[0.5, 1.0, 2.0]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Analysis);
    }
}
