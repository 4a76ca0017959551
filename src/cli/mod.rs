//! cli
//!
//! Command-line interface layer for tkt.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Resolve configuration: load the file source, merge the flag overrides
//!   on top, validate the result
//! - Delegate to the [`crate::engine`] for execution
//!
//! The CLI layer is thin. All repository state changes flow through the
//! engine against a validated [`crate::core::config::ResolvedConfig`];
//! there is no ambient configuration lookup anywhere downstream.

pub mod args;

pub use args::Cli;

use anyhow::{Context as _, Result};

use crate::core::config;
use crate::engine;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Any error returned
/// here turns into a non-zero exit status.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = engine::Context {
        debug: cli.debug,
        quiet: cli.quiet,
    };

    // File source first: without it the run cannot be configured at all.
    let persistent = config::load_file().context("could not load configuration")?;

    // Overrides win per field; the merged result is validated exactly once.
    let resolved = cli
        .overrides()
        .merge(persistent)
        .validate()
        .context("invalid configuration")?;

    engine::run(&ctx, &resolved)?;
    Ok(())
}
