//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the analysis and rendering stages
//! - exported to JSON/CSV
//! - handed back to whatever front-end issued the request

use serde::{Deserialize, Serialize};

/// Number of samples on the impulse/step time grid.
pub const TIME_SAMPLES: usize = 1000;

/// Number of samples on the Bode frequency grid.
pub const FREQUENCY_SAMPLES: usize = 500;

/// Grid settings for a single analysis run.
///
/// The sample counts are fixed regardless of `time_bound`, so very short or
/// very long horizons get correspondingly fine or coarse sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub time_samples: usize,
    pub frequency_samples: usize,
    /// Lowest frequency as a power of ten (rad/s).
    pub min_decade: f64,
    /// Highest frequency as a power of ten (rad/s).
    pub max_decade: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            time_samples: TIME_SAMPLES,
            frequency_samples: FREQUENCY_SAMPLES,
            min_decade: -2.0,
            max_decade: 2.0,
        }
    }
}

/// One Bode sample. Magnitude and phase come from the same complex evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyPoint {
    /// Angular frequency (rad/s).
    pub omega: f64,
    pub magnitude_db: f64,
    pub phase_deg: f64,
}

/// All computed responses of a single analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    /// `(time, amplitude)` samples.
    pub impulse: Vec<(f64, f64)>,
    /// `(time, amplitude)` samples on the same grid as `impulse`.
    pub step: Vec<(f64, f64)>,
    pub frequency: Vec<FrequencyPoint>,
}

impl ResponseSet {
    pub fn magnitude_series(&self) -> Vec<(f64, f64)> {
        self.frequency.iter().map(|p| (p.omega, p.magnitude_db)).collect()
    }

    pub fn phase_series(&self) -> Vec<(f64, f64)> {
        self.frequency.iter().map(|p| (p.omega, p.phase_deg)).collect()
    }

    /// Last time sample of the grid (the analysis horizon).
    pub fn horizon(&self) -> f64 {
        self.impulse.last().map(|&(t, _)| t).unwrap_or(0.0)
    }
}

/// Raw request fields as submitted by a form or CLI.
///
/// Every field is optional text so missing input can be reported as a
/// validation message instead of failing earlier in the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestForm {
    pub degree_numerator: Option<String>,
    pub numerator: Option<String>,
    pub degree_denominator: Option<String>,
    pub denominator: Option<String>,
    pub time_bound: Option<String>,
}

/// Request fields after integer parsing; coefficients are still raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub degree_numerator: usize,
    pub numerator: String,
    pub degree_denominator: usize,
    pub denominator: String,
    pub time_bound: u32,
}

/// Result of handling one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestOutcome {
    Success {
        transfer_function: String,
        plot_filename: String,
    },
    Failure {
        error_message: String,
    },
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success { .. })
    }
}
