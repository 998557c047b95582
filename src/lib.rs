//! `lti-plots` library crate.
//!
//! The binary (`lti`) is a thin wrapper around this library so that:
//!
//! - the analysis pipeline is testable without spawning processes
//! - other front-ends (a web form handler, notebooks, etc.) can call
//!   `app::pipeline::handle_request` directly

pub mod analysis;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
