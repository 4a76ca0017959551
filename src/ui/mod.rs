//! ui
//!
//! Output utilities shared by the cli and engine layers.

pub mod output;

pub use output::Verbosity;
