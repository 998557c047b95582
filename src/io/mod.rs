//! Input/output helpers.
//!
//! - output directory + artifact naming + atomic writes (`output`)
//! - response exports (CSV) (`export`)

pub mod export;
pub mod output;

pub use export::*;
pub use output::*;
