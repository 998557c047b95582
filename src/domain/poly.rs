//! Coefficient list validation against a declared polynomial degree.

use crate::error::AppError;

/// Which side of the rational function a coefficient list belongs to.
///
/// Only used to make error messages point at the right input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolynomialRole {
    Numerator,
    Denominator,
}

impl PolynomialRole {
    pub fn label(self) -> &'static str {
        match self {
            PolynomialRole::Numerator => "numerator",
            PolynomialRole::Denominator => "denominator",
        }
    }
}

/// A validated coefficient list, highest-order term first.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialSpec {
    pub declared_degree: usize,
    pub coefficients: Vec<f64>,
}

impl PolynomialSpec {
    /// Parse whitespace-separated coefficients and check them against `declared_degree`.
    pub fn parse(role: PolynomialRole, declared_degree: usize, raw_text: &str) -> Result<Self, AppError> {
        let coefficients = parse_coefficients(role, raw_text)?;

        let expected = declared_degree.checked_add(1).ok_or_else(|| {
            AppError::degree_mismatch(format!(
                "The {} degree {declared_degree} is too large.",
                role.label()
            ))
        })?;
        if coefficients.len() != expected {
            return Err(AppError::degree_mismatch(format!(
                "The number of {} coefficients must match its degree + 1 (degree {declared_degree} expects {expected}, got {}).",
                role.label(),
                coefficients.len()
            )));
        }

        Ok(Self {
            declared_degree,
            coefficients,
        })
    }

    pub fn into_coefficients(self) -> Vec<f64> {
        self.coefficients
    }
}

/// Validate `raw_text` against `declared_degree` and return the coefficients.
pub fn validate(role: PolynomialRole, declared_degree: usize, raw_text: &str) -> Result<Vec<f64>, AppError> {
    PolynomialSpec::parse(role, declared_degree, raw_text).map(PolynomialSpec::into_coefficients)
}

fn parse_coefficients(role: PolynomialRole, raw_text: &str) -> Result<Vec<f64>, AppError> {
    raw_text
        .split_whitespace()
        .map(|token| {
            let value = token.parse::<f64>().map_err(|_| {
                AppError::parse(format!("Invalid {} coefficient '{token}': not a number.", role.label()))
            })?;
            if !value.is_finite() {
                return Err(AppError::parse(format!(
                    "Invalid {} coefficient '{token}': must be finite.",
                    role.label()
                )));
            }
            Ok(value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_matching_count() {
        let coeffs = validate(PolynomialRole::Denominator, 2, " 1  5\t6 ").unwrap();
        assert_eq!(coeffs, vec![1.0, 5.0, 6.0]);
    }

    #[test]
    fn non_numeric_token_is_parse_error() {
        let err = validate(PolynomialRole::Numerator, 1, "a 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.message().contains("'a'"));
    }

    #[test]
    fn non_finite_token_is_parse_error() {
        let err = validate(PolynomialRole::Numerator, 0, "inf").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn count_mismatch_names_the_polynomial() {
        let err = validate(PolynomialRole::Denominator, 2, "1 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegreeMismatch);
        assert!(err.message().contains("denominator"));

        let err = validate(PolynomialRole::Numerator, 0, "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegreeMismatch);
    }

    #[test]
    fn huge_degree_is_mismatch_not_overflow() {
        let err = validate(PolynomialRole::Numerator, usize::MAX, "1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegreeMismatch);
        assert!(err.message().contains("numerator"));
    }

    #[test]
    fn keeps_sign_and_magnitude() {
        let coeffs = validate(PolynomialRole::Numerator, 2, "-0.5 1e-3 250").unwrap();
        assert_eq!(coeffs, vec![-0.5, 0.001, 250.0]);
    }
}
