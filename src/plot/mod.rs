//! Plot rendering.
//!
//! - composite 2×2 SVG figure written to disk (`figure`)
//! - fixed-size terminal preview (`ascii`)

pub mod ascii;
pub mod figure;

pub use ascii::*;
pub use figure::*;
