//! Matrix exponential by scaling and squaring.
//!
//! The discretized impulse/step recurrences need `e^{AΔt}` for small dense
//! state matrices (system order is the denominator degree, so a handful of
//! rows at most).
//!
//! Implementation choices:
//! - diagonal Padé approximant of degree 6, applied to `A / 2^s` with `s` picked
//!   so that the scaled 1-norm is at most 0.5
//! - the Padé denominator is solved with LU; a singular denominator is
//!   reported as `None` instead of panicking
//! - the result is squared `s` times

use nalgebra::DMatrix;

/// Padé(6,6) coefficients `c_k = (2q-k)! q! / ((2q)! k! (q-k)!)` for `q = 6`.
const PADE6: [f64; 7] = [
    1.0,
    1.0 / 2.0,
    5.0 / 44.0,
    1.0 / 66.0,
    1.0 / 792.0,
    1.0 / 15_840.0,
    1.0 / 665_280.0,
];

/// Scaled norm threshold for the degree-6 approximant.
const THETA: f64 = 0.5;

/// Upper bound on squarings; beyond this the input is far outside any sane range.
const MAX_SQUARINGS: i32 = 64;

/// Compute `e^A` for a square matrix.
///
/// Returns `None` if the input is non-square or non-finite, if the Padé
/// denominator is singular, or if the result is non-finite.
pub fn expm(a: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    if !a.is_square() || a.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let n = a.nrows();
    if n == 0 {
        return Some(DMatrix::zeros(0, 0));
    }

    let norm = one_norm(a);
    let squarings = if norm > THETA {
        (norm / THETA).log2().ceil() as i32
    } else {
        0
    };
    if squarings > MAX_SQUARINGS {
        return None;
    }

    let x = a / 2f64.powi(squarings);
    let identity = DMatrix::<f64>::identity(n, n);

    // Accumulate N(X) and D(X) = N(-X) from the same powers.
    let mut numer = identity.clone() * PADE6[0];
    let mut denom = identity.clone() * PADE6[0];
    let mut power = identity;
    for (k, &c) in PADE6.iter().enumerate().skip(1) {
        power = &power * &x;
        let term = &power * c;
        numer += &term;
        if k % 2 == 0 {
            denom += &term;
        } else {
            denom -= &term;
        }
    }

    let mut result = denom.lu().solve(&numer)?;
    for _ in 0..squarings {
        result = &result * &result;
    }

    if result.iter().all(|v| v.is_finite()) {
        Some(result)
    } else {
        None
    }
}

/// Maximum absolute column sum.
fn one_norm(a: &DMatrix<f64>) -> f64 {
    a.column_iter()
        .map(|col| col.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}
