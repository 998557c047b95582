//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs logging
//! - parses CLI arguments
//! - creates the output directory once
//! - runs the request pipeline
//! - prints reports/previews and writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{AnalyzeArgs, Command, PolynomialArgs};
use crate::domain::RequestOutcome;
use crate::error::AppError;
use crate::io::OutputDir;

pub mod pipeline;

use pipeline::ArtifactNaming;

/// Entry point for the `lti` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; values may come from the real environment.
    let _ = dotenvy::dotenv();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Describe(args) => handle_describe(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "lti_plots=debug" } else { "lti_plots=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let output = OutputDir::init(&args.output_dir)?;
    info!(dir = %output.path().display(), "output directory ready");

    let naming = if args.fixed_name {
        ArtifactNaming::Fixed
    } else {
        ArtifactNaming::PerRequest
    };

    let form = args.to_form();
    let run = match pipeline::parse_form(&form).and_then(|request| pipeline::run_request(&request, &output, naming)) {
        Ok(run) => run,
        Err(err) => {
            // `main` reports the error on stderr; only the JSON outcome is printed here.
            if args.json {
                print_json(&pipeline::outcome_for(&err))?;
            }
            return Err(err);
        }
    };

    let outcome = RequestOutcome::Success {
        transfer_function: run.model.display_string(),
        plot_filename: run.artifact.filename().to_string(),
    };

    if args.json {
        print_json(&outcome)?;
    } else {
        println!("{}", crate::report::format_summary(&run.model, &run.responses));
        print!("{}", crate::report::format_outcome(&outcome));
        println!("Written to: {}", output.artifact_path(&run.artifact).display());
    }

    if args.preview {
        let preview = crate::plot::render_ascii_series("Step Response", &run.responses.step, args.width, args.height);
        // Keep stdout valid JSON when `--json` is set.
        if args.json {
            eprintln!("{preview}");
        } else {
            println!("{preview}");
        }
    }

    if let Some(path) = &args.export_csv {
        crate::io::write_responses_csv(path, &run.responses)?;
        info!(path = %path.display(), "responses exported");
    }

    Ok(())
}

fn handle_describe(args: PolynomialArgs) -> Result<(), AppError> {
    let model = pipeline::model_from_form(&args.to_form())?;
    print!("{}", crate::report::format_model(&model));
    Ok(())
}

fn print_json(outcome: &RequestOutcome) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(outcome)
        .map_err(|e| AppError::new(crate::error::ErrorKind::Io, format!("Failed to encode outcome JSON: {e}")))?;
    println!("{text}");
    Ok(())
}

/// Rewrite argv so bare flags default to `lti analyze`.
///
/// Rules:
/// - `lti --numerator 1 ...`        -> `lti analyze --numerator 1 ...`
/// - `lti --help/--version/-h/-V`   -> unchanged (show top-level help/version)
/// - `lti -v analyze ...`           -> unchanged (global flag before a subcommand)
/// - `lti`                          -> unchanged (clap prints usage)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let has_subcommand = argv
        .iter()
        .skip(1)
        .any(|a| matches!(a.as_str(), "analyze" | "describe"));
    if has_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "analyze".to_string());
    }
    argv
}
