//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - coefficient validation (`PolynomialSpec`)
//! - analysis grid settings (`AnalysisConfig`)
//! - computed responses (`ResponseSet`, `FrequencyPoint`)
//! - the request boundary records (`RequestForm`, `RequestOutcome`)

pub mod poly;
pub mod types;

pub use poly::*;
pub use types::*;
