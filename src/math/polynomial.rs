//! Polynomial evaluation helpers.
//!
//! Coefficients are always stored highest power first, matching how users
//! type them in.

use nalgebra::Complex;

/// Evaluate a real-coefficient polynomial at a complex point (Horner).
pub fn eval_complex(coefficients: &[f64], s: Complex<f64>) -> Complex<f64> {
    coefficients
        .iter()
        .fold(Complex::new(0.0, 0.0), |acc, &c| acc * s + c)
}

/// Evaluate a real-coefficient polynomial at a real point (Horner).
pub fn eval_real(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}
