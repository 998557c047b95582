//! Transfer function model.
//!
//! The model is a small immutable value so that analysis and rendering code can
//! stay generic over how it was obtained.

pub mod transfer_function;

pub use transfer_function::*;
