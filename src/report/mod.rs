//! Reporting utilities: formatted terminal output for models, responses and outcomes.

pub mod format;

pub use format::*;
