//! Command-line parsing for the LTI response analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the analysis code. Polynomial and horizon fields are taken as
//! raw text so that malformed values are reported by the request pipeline with
//! the same messages any other front-end would get.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::RequestForm;
use crate::io::DEFAULT_OUTPUT_DIR;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lti", version, about = "LTI transfer-function response analyzer")]
pub struct Cli {
    /// Enable debug logging (`RUST_LOG` takes precedence when set).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the transfer function, compute its responses and render the plot.
    Analyze(AnalyzeArgs),
    /// Print the transfer function, poles, DC gain and stability without rendering.
    Describe(PolynomialArgs),
}

/// Numerator/denominator input, as typed by the user.
#[derive(Debug, Args, Clone)]
pub struct PolynomialArgs {
    /// Declared numerator degree.
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub degree_numerator: Option<String>,

    /// Numerator coefficients, highest power first (e.g. "1 2").
    #[arg(long, value_name = "COEFFS", allow_hyphen_values = true)]
    pub numerator: Option<String>,

    /// Declared denominator degree.
    #[arg(long, value_name = "M", allow_hyphen_values = true)]
    pub degree_denominator: Option<String>,

    /// Denominator coefficients, highest power first (e.g. "1 5 6").
    #[arg(long, value_name = "COEFFS", allow_hyphen_values = true)]
    pub denominator: Option<String>,
}

/// Options for a full analysis run.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub polynomials: PolynomialArgs,

    /// Time horizon in whole seconds.
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    pub time_bound: Option<String>,

    /// Directory receiving plot artifacts (created if missing).
    #[arg(long, env = "LTI_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Write to the shared `LTI-PLOTS.svg` name instead of a per-request name.
    #[arg(long)]
    pub fixed_name: bool,

    /// Print the outcome as JSON.
    #[arg(long)]
    pub json: bool,

    /// Export all response samples to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    /// Print a terminal preview of the step response.
    #[arg(long)]
    pub preview: bool,

    /// Preview width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Preview height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

impl PolynomialArgs {
    pub fn to_form(&self) -> RequestForm {
        RequestForm {
            degree_numerator: self.degree_numerator.clone(),
            numerator: self.numerator.clone(),
            degree_denominator: self.degree_denominator.clone(),
            denominator: self.denominator.clone(),
            time_bound: None,
        }
    }
}

impl AnalyzeArgs {
    pub fn to_form(&self) -> RequestForm {
        RequestForm {
            time_bound: self.time_bound.clone(),
            ..self.polynomials.to_form()
        }
    }
}
