//! Request pipeline shared by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! parse form -> validate polynomials -> build model -> analyze -> render
//!
//! The CLI (or any other caller) can then focus on presentation.

use tracing::{debug, error};

use crate::analysis::analyze;
use crate::domain::{ParsedRequest, PolynomialRole, RequestForm, RequestOutcome, ResponseSet, validate};
use crate::error::AppError;
use crate::io::{ArtifactId, OutputDir};
use crate::models::TransferFunctionModel;

/// How the plot artifact for a request is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactNaming {
    /// Content-derived name; distinct requests never share a file.
    #[default]
    PerRequest,
    /// The legacy constant name; concurrent requests overwrite each other.
    Fixed,
}

/// All computed outputs of a single request.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub model: TransferFunctionModel,
    pub responses: ResponseSet,
    pub artifact: ArtifactId,
}

/// Parse raw form fields into typed values. Coefficient text is validated later.
pub fn parse_form(form: &RequestForm) -> Result<ParsedRequest, AppError> {
    Ok(ParsedRequest {
        degree_numerator: parse_degree("degree_numerator", form.degree_numerator.as_deref())?,
        numerator: required("numerator", form.numerator.as_deref())?.to_string(),
        degree_denominator: parse_degree("degree_denominator", form.degree_denominator.as_deref())?,
        denominator: required("denominator", form.denominator.as_deref())?.to_string(),
        time_bound: parse_time_bound(form.time_bound.as_deref())?,
    })
}

/// Build only the model from a form (no time horizon needed).
pub fn model_from_form(form: &RequestForm) -> Result<TransferFunctionModel, AppError> {
    let degree_numerator = parse_degree("degree_numerator", form.degree_numerator.as_deref())?;
    let degree_denominator = parse_degree("degree_denominator", form.degree_denominator.as_deref())?;
    let numerator = validate(
        PolynomialRole::Numerator,
        degree_numerator,
        required("numerator", form.numerator.as_deref())?,
    )?;
    let denominator = validate(
        PolynomialRole::Denominator,
        degree_denominator,
        required("denominator", form.denominator.as_deref())?,
    )?;
    TransferFunctionModel::new(numerator, denominator)
}

/// Validate both polynomials and build the transfer function.
pub fn build_model(request: &ParsedRequest) -> Result<TransferFunctionModel, AppError> {
    let numerator = validate(PolynomialRole::Numerator, request.degree_numerator, &request.numerator)?;
    let denominator = validate(PolynomialRole::Denominator, request.degree_denominator, &request.denominator)?;
    TransferFunctionModel::new(numerator, denominator)
}

/// Execute validate -> model -> analyze -> render for one request.
pub fn run_request(
    request: &ParsedRequest,
    output: &OutputDir,
    naming: ArtifactNaming,
) -> Result<RunOutput, AppError> {
    let model = build_model(request)?;
    debug!(transfer_function = %model, "model constructed");

    let responses = analyze(&model, request.time_bound)?;

    let artifact = match naming {
        ArtifactNaming::PerRequest => {
            ArtifactId::for_request(model.numerator(), model.denominator(), request.time_bound)
        }
        ArtifactNaming::Fixed => ArtifactId::fixed(),
    };
    crate::plot::render(&responses, &model.display_string(), &output.artifact_path(&artifact))?;

    Ok(RunOutput {
        model,
        responses,
        artifact,
    })
}

/// Handle a raw request end to end. Never fails: errors become `RequestOutcome::Failure`.
pub fn handle_request(form: &RequestForm, output: &OutputDir, naming: ArtifactNaming) -> RequestOutcome {
    match parse_form(form).and_then(|request| run_request(&request, output, naming)) {
        Ok(run) => RequestOutcome::Success {
            transfer_function: run.model.display_string(),
            plot_filename: run.artifact.filename().to_string(),
        },
        Err(err) => failure(err),
    }
}

/// Convert an error into an outcome, logging the unexpected kinds.
pub fn failure(err: AppError) -> RequestOutcome {
    if err.kind().is_validation() {
        debug!(kind = ?err.kind(), "request rejected: {err}");
    } else {
        error!(kind = ?err.kind(), "request failed: {err}");
    }
    outcome_for(&err)
}

/// The `Failure` outcome for `err`, without logging.
pub fn outcome_for(err: &AppError) -> RequestOutcome {
    RequestOutcome::Failure {
        error_message: err.to_string(),
    }
}

fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    value.ok_or_else(|| AppError::parse(format!("Missing required field: `{name}`.")))
}

fn parse_degree(name: &str, value: Option<&str>) -> Result<usize, AppError> {
    let raw = required(name, value)?.trim();
    raw.parse::<usize>()
        .map_err(|_| AppError::parse(format!("`{name}` must be a non-negative integer, got '{raw}'.")))
}

fn parse_time_bound(value: Option<&str>) -> Result<u32, AppError> {
    let raw = required("time_bound", value)?.trim();
    match raw.parse::<u32>() {
        Ok(t) if t > 0 => Ok(t),
        _ => Err(AppError::parse(format!(
            "`time_bound` must be a positive integer number of seconds, got '{raw}'."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn form(dn: &str, n: &str, dd: &str, d: &str, t: &str) -> RequestForm {
        RequestForm {
            degree_numerator: Some(dn.to_string()),
            numerator: Some(n.to_string()),
            degree_denominator: Some(dd.to_string()),
            denominator: Some(d.to_string()),
            time_bound: Some(t.to_string()),
        }
    }

    fn output() -> (tempfile::TempDir, OutputDir) {
        let tmp = tempfile::tempdir().unwrap();
        let dir = OutputDir::init(tmp.path().join("plots")).unwrap();
        (tmp, dir)
    }

    fn files_in(dir: &OutputDir) -> usize {
        std::fs::read_dir(dir.path()).unwrap().count()
    }

    #[test]
    fn first_order_request_succeeds() {
        let (_tmp, dir) = output();
        let outcome = handle_request(&form("0", "1", "1", "1 1", "10"), &dir, ArtifactNaming::PerRequest);
        match outcome {
            RequestOutcome::Success {
                transfer_function,
                plot_filename,
            } => {
                assert_eq!(transfer_function, "H(s) = (1.0*s^0) / (1.0*s^0 + 1.0*s^1)");
                assert!(dir.path().join(&plot_filename).is_file());
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn second_order_display_string() {
        let (_tmp, dir) = output();
        let outcome = handle_request(&form("0", "1", "2", "1 5 6", "5"), &dir, ArtifactNaming::Fixed);
        assert_eq!(
            outcome,
            RequestOutcome::Success {
                transfer_function: "H(s) = (1.0*s^0) / (6.0*s^0 + 5.0*s^1 + 1.0*s^2)".to_string(),
                plot_filename: "LTI-PLOTS.svg".to_string(),
            }
        );
    }

    #[test]
    fn improper_request_never_reaches_analysis() {
        let (_tmp, dir) = output();
        let request = parse_form(&form("1", "1 2", "0", "1", "10")).unwrap();
        let err = run_request(&request, &dir, ArtifactNaming::Fixed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImproperTransferFunction);
        assert_eq!(files_in(&dir), 0);

        let outcome = handle_request(&form("1", "1 2", "0", "1", "10"), &dir, ArtifactNaming::Fixed);
        assert!(!outcome.is_success());
    }

    #[test]
    fn non_numeric_coefficient_is_reported() {
        let (_tmp, dir) = output();
        let request = parse_form(&form("1", "a 1", "2", "1 2 3", "10")).unwrap();
        assert_eq!(build_model(&request).unwrap_err().kind(), ErrorKind::Parse);

        match handle_request(&form("1", "a 1", "2", "1 2 3", "10"), &dir, ArtifactNaming::Fixed) {
            RequestOutcome::Failure { error_message } => assert!(error_message.contains("'a'")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(files_in(&dir), 0);
    }

    #[test]
    fn degree_mismatch_on_either_side() {
        let r = parse_form(&form("1", "1", "2", "1 2 3", "10")).unwrap();
        assert_eq!(build_model(&r).unwrap_err().kind(), ErrorKind::DegreeMismatch);
        let r = parse_form(&form("0", "1", "2", "1 2", "10")).unwrap();
        assert_eq!(build_model(&r).unwrap_err().kind(), ErrorKind::DegreeMismatch);
    }

    #[test]
    fn oversized_degree_is_rejected() {
        let (_tmp, dir) = output();
        let huge = usize::MAX.to_string();
        let request = parse_form(&form(&huge, "1", "1", "1 1", "10")).unwrap();
        assert_eq!(build_model(&request).unwrap_err().kind(), ErrorKind::DegreeMismatch);

        let outcome = handle_request(&form("0", "1", &huge, "1 1", "10"), &dir, ArtifactNaming::Fixed);
        assert!(!outcome.is_success());
        assert_eq!(files_in(&dir), 0);
    }

    #[test]
    fn unstable_system_over_long_horizon_fails_without_artifact() {
        // 1/(s-1) grows like e^t and overflows long before t = 1000.
        let (_tmp, dir) = output();
        let request = parse_form(&form("0", "1", "1", "1 -1", "1000")).unwrap();
        assert_eq!(run_request(&request, &dir, ArtifactNaming::PerRequest).unwrap_err().kind(), ErrorKind::Analysis);

        match handle_request(&form("0", "1", "1", "1 -1", "1000"), &dir, ArtifactNaming::PerRequest) {
            RequestOutcome::Failure { error_message } => assert!(error_message.contains("Non-finite"), "{error_message}"),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(files_in(&dir), 0);
    }

    #[test]
    fn missing_and_malformed_fields_are_parse_errors() {
        let mut f = form("0", "1", "1", "1 1", "10");
        f.denominator = None;
        let err = parse_form(&f).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.message().contains("denominator"));

        for bad in [
            form("-1", "1", "1", "1 1", "10"),
            form("x", "1", "1", "1 1", "10"),
            form("0", "1", "1", "1 1", "0"),
            form("0", "1", "1", "1 1", "2.5"),
            RequestForm::default(),
        ] {
            assert_eq!(parse_form(&bad).unwrap_err().kind(), ErrorKind::Parse);
        }
    }

    #[test]
    fn distinct_requests_get_distinct_artifacts() {
        let (_tmp, dir) = output();
        let a = handle_request(&form("0", "1", "1", "1 1", "10"), &dir, ArtifactNaming::PerRequest);
        let b = handle_request(&form("0", "1", "1", "1 2", "10"), &dir, ArtifactNaming::PerRequest);
        match (a, b) {
            (
                RequestOutcome::Success { plot_filename: pa, .. },
                RequestOutcome::Success { plot_filename: pb, .. },
            ) => assert_ne!(pa, pb),
            other => panic!("expected two successes, got {other:?}"),
        }
        assert_eq!(files_in(&dir), 2);
    }

    #[test]
    fn zero_leading_denominator_is_analysis_failure() {
        let (_tmp, dir) = output();
        let request = parse_form(&form("0", "1", "1", "0 1", "10")).unwrap();
        let err = run_request(&request, &dir, ArtifactNaming::Fixed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Analysis);
    }
}
