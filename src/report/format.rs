//! Terminal formatting for analysis results.
//!
//! We keep formatting code in one place so:
//! - the analysis code stays clean and testable
//! - output changes are localized

use chrono::Local;
use nalgebra::Complex;

use crate::domain::{RequestOutcome, ResponseSet};
use crate::models::TransferFunctionModel;

/// Describe the model alone: H(s), poles, DC gain and stability.
pub fn format_model(model: &TransferFunctionModel) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", model.display_string()));
    out.push_str(&format!("Order: {}\n", model.order()));

    match model.poles() {
        Ok(mut poles) => {
            // Conjugate pairs share a real part up to rounding; order them by imaginary part.
            poles.sort_by(|a, b| {
                if (a.re - b.re).abs() <= 1e-9 * (1.0 + a.re.abs()) {
                    a.im.total_cmp(&b.im)
                } else {
                    a.re.total_cmp(&b.re)
                }
            });
            let list: Vec<String> = poles.iter().map(format_complex).collect();
            out.push_str(&format!("Poles: [{}]\n", list.join(", ")));
            let stable = poles.iter().all(|p| p.re < 0.0);
            out.push_str(&format!("Stable: {}\n", if stable { "yes" } else { "no" }));
        }
        Err(e) => out.push_str(&format!("Poles: unavailable ({e})\n")),
    }

    match model.dc_gain() {
        Some(g) => out.push_str(&format!("DC gain: {g:.6}\n")),
        None => out.push_str("DC gain: unbounded (pole at s = 0)\n"),
    }
    out
}

/// Full run summary: model description plus response diagnostics.
pub fn format_summary(model: &TransferFunctionModel, responses: &ResponseSet) -> String {
    let mut out = String::new();
    out.push_str("=== lti - LTI Response Analysis ===\n");
    out.push_str(&format!("Generated: {}\n", Local::now().format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format_model(model));

    out.push_str(&format!(
        "Time grid: n={} | t=[0, {}] s\n",
        responses.impulse.len(),
        responses.horizon()
    ));
    if let (Some(&(_, imp)), Some(&(_, stp))) = (responses.impulse.last(), responses.step.last()) {
        out.push_str(&format!("Final impulse value: {imp:.6}\n"));
        out.push_str(&format!("Final step value: {stp:.6}\n"));
    }

    if let (Some(first), Some(last)) = (responses.frequency.first(), responses.frequency.last()) {
        let (mag_min, mag_max) = min_max(responses.frequency.iter().map(|p| p.magnitude_db));
        let (ph_min, ph_max) = min_max(responses.frequency.iter().map(|p| p.phase_deg));
        out.push_str(&format!(
            "Frequency grid: n={} | w=[{:.0e}, {:.0e}] rad/s\n",
            responses.frequency.len(),
            first.omega,
            last.omega
        ));
        out.push_str(&format!("Magnitude: [{mag_min:.2}, {mag_max:.2}] dB\n"));
        out.push_str(&format!("Phase: [{ph_min:.2}, {ph_max:.2}] deg\n"));
    }
    out
}

/// One-line-per-field rendering of a request outcome.
pub fn format_outcome(outcome: &RequestOutcome) -> String {
    match outcome {
        RequestOutcome::Success {
            transfer_function,
            plot_filename,
        } => format!("Transfer function: {transfer_function}\nPlot: {plot_filename}\n"),
        RequestOutcome::Failure { error_message } => format!("Error: {error_message}\n"),
    }
}

fn format_complex(c: &Complex<f64>) -> String {
    if c.im.abs() < 1e-12 {
        format!("{:.4}", c.re)
    } else if c.im < 0.0 {
        format!("{:.4}-{:.4}j", c.re, -c.im)
    } else {
        format!("{:.4}+{:.4}j", c.re, c.im)
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    #[test]
    fn model_description_lists_poles() {
        let tf = TransferFunctionModel::new(vec![1.0], vec![1.0, 5.0, 6.0]).unwrap();
        let txt = format_model(&tf);
        assert!(txt.contains("Poles: [-3.0000, -2.0000]"), "{txt}");
        assert!(txt.contains("Stable: yes"));
        assert!(txt.contains("DC gain: 0.166667"));
    }

    #[test]
    fn integrator_has_unbounded_gain() {
        let tf = TransferFunctionModel::new(vec![1.0], vec![1.0, 0.0]).unwrap();
        let txt = format_model(&tf);
        assert!(txt.contains("DC gain: unbounded"));
        assert!(txt.contains("Stable: no"));
    }

    #[test]
    fn complex_poles_are_conjugate_pairs() {
        let tf = TransferFunctionModel::new(vec![1.0], vec![1.0, 2.0, 5.0]).unwrap();
        let txt = format_model(&tf);
        assert!(txt.contains("-1.0000-2.0000j, -1.0000+2.0000j"), "{txt}");
    }

    #[test]
    fn summary_reports_grids() {
        let tf = TransferFunctionModel::new(vec![1.0], vec![1.0, 1.0]).unwrap();
        let r = analyze(&tf, 10).unwrap();
        let txt = format_summary(&tf, &r);
        assert!(txt.contains("Time grid: n=1000 | t=[0, 10] s"));
        assert!(txt.contains("Frequency grid: n=500 | w=[1e-2, 1e2] rad/s"));
    }
}
