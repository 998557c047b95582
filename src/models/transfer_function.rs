//! Rational transfer function `H(s) = N(s) / D(s)`.
//!
//! Polynomials are stored in **descending powers** of `s`:
//! - `numerator = [b_m, ..., b_1, b_0]`
//! - `denominator = [a_n, ..., a_1, a_0]`
//!
//! Only strictly proper functions (`m < n`) are accepted, so the realization
//! never has a direct feedthrough term and the impulse response carries no
//! Dirac component.

use nalgebra::{Complex, DMatrix, DVector};

use crate::error::AppError;
use crate::math::{eval_complex, eval_real};

/// State-space realization `dx/dt = A x + B u`, `y = C x` (no feedthrough).
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
    pub c: DVector<f64>,
}

impl StateSpace {
    pub fn order(&self) -> usize {
        self.a.nrows()
    }

    /// Output `y = C x`.
    pub fn output(&self, x: &DVector<f64>) -> f64 {
        self.c.dot(x)
    }
}

/// Immutable, validated SISO transfer function.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunctionModel {
    numerator: Vec<f64>,
    denominator: Vec<f64>,
}

impl TransferFunctionModel {
    /// Build a model from coefficient lists (highest order first).
    pub fn new(numerator: Vec<f64>, denominator: Vec<f64>) -> Result<Self, AppError> {
        if numerator.is_empty() || denominator.is_empty() {
            return Err(AppError::degree_mismatch(
                "Numerator and denominator need at least one coefficient each.",
            ));
        }
        if numerator.len() >= denominator.len() {
            return Err(AppError::improper(format!(
                "Numerator degree must be strictly less than Denominator degree (got {} and {}).",
                numerator.len() - 1,
                denominator.len() - 1
            )));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> &[f64] {
        &self.numerator
    }

    pub fn denominator(&self) -> &[f64] {
        &self.denominator
    }

    /// System order (denominator degree).
    pub fn order(&self) -> usize {
        self.denominator.len() - 1
    }

    /// Canonical rendering with ascending exponents.
    ///
    /// Example: numerator `[1]`, denominator `[1, 5, 6]` renders as
    /// `H(s) = (1.0*s^0) / (6.0*s^0 + 5.0*s^1 + 1.0*s^2)`.
    pub fn display_string(&self) -> String {
        format!(
            "H(s) = ({}) / ({})",
            format_ascending(&self.numerator),
            format_ascending(&self.denominator)
        )
    }

    /// Evaluate `H(s)` at a complex point.
    pub fn eval(&self, s: Complex<f64>) -> Complex<f64> {
        eval_complex(&self.numerator, s) / eval_complex(&self.denominator, s)
    }

    /// `H(0)`, or `None` when the denominator vanishes at zero (pole at the origin).
    pub fn dc_gain(&self) -> Option<f64> {
        let den = eval_real(&self.denominator, 0.0);
        if den == 0.0 {
            return None;
        }
        Some(eval_real(&self.numerator, 0.0) / den)
    }

    /// Controllable canonical realization, normalized by the leading denominator coefficient.
    ///
    /// ```text
    /// A = [ -a_{n-1} -a_{n-2} ... -a_0 ]      B = [1 0 ... 0]^T
    ///     [    1        0     ...   0  ]
    ///     [    ⋮        ⋱           ⋮  ]      C = [b_{n-1} ... b_0]
    ///     [    0       ...    1     0  ]
    /// ```
    pub fn state_space(&self) -> Result<StateSpace, AppError> {
        let lead = self.denominator[0];
        if lead == 0.0 {
            return Err(AppError::analysis(
                "Leading denominator coefficient is zero; the declared degree overstates the system order.",
            ));
        }

        let n = self.order();
        let den: Vec<f64> = self.denominator.iter().map(|v| v / lead).collect();

        // Right-align the numerator against the denominator's trailing n coefficients.
        let mut c = DVector::zeros(n);
        let offset = n - self.numerator.len();
        for (i, v) in self.numerator.iter().enumerate() {
            c[offset + i] = v / lead;
        }

        let mut a = DMatrix::zeros(n, n);
        for j in 0..n {
            a[(0, j)] = -den[j + 1];
        }
        for i in 1..n {
            a[(i, i - 1)] = 1.0;
        }

        let mut b = DVector::zeros(n);
        b[0] = 1.0;

        if a.iter().chain(c.iter()).any(|v| !v.is_finite()) {
            return Err(AppError::analysis(
                "State-space realization has non-finite entries (coefficients out of range).",
            ));
        }

        Ok(StateSpace { a, b, c })
    }

    /// Roots of the denominator (eigenvalues of the realization).
    pub fn poles(&self) -> Result<Vec<Complex<f64>>, AppError> {
        let ss = self.state_space()?;
        Ok(ss.a.complex_eigenvalues().iter().copied().collect())
    }

    /// All poles strictly in the open left half-plane.
    pub fn is_stable(&self) -> Result<bool, AppError> {
        Ok(self.poles()?.iter().all(|p| p.re < 0.0))
    }
}

impl std::fmt::Display for TransferFunctionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_string())
    }
}

/// Reverse to low-order-first and pair each coefficient with its exponent.
fn format_ascending(coefficients: &[f64]) -> String {
    coefficients
        .iter()
        .rev()
        .enumerate()
        .map(|(i, c)| format!("{c:?}*s^{i}"))
        .collect::<Vec<_>>()
        .join(" + ")
}
