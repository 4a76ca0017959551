//! engine
//!
//! Drives the ordered repository workflow for one ticket:
//! ensure-present -> checkout mainline -> ensure ticket branch -> record.
//!
//! # Design
//!
//! Every step is phrased as "try the forward operation; on failure, try the
//! idempotent recovery operation", so running tkt twice for the same ticket
//! converges to the same repository state (clone-or-pull,
//! create-or-checkout) instead of erroring out. Each fallback is an
//! explicit two-step decision with a named outcome, never boolean
//! short-circuiting, so reporting and tests can tell which branch was
//! taken.
//!
//! # Failure policy
//!
//! - Clone failure is expected (directory usually exists already); its
//!   stderr is suppressed to debug level and pull is tried instead.
//! - Pull failure is non-fatal: a stale-but-present repository is usable.
//! - Mainline checkout failure is a warning; the next step switches
//!   branches itself.
//! - Failing to reach the ticket branch both ways is fatal: the run aborts
//!   before the ticket log is touched, and the process exits non-zero.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::core::config::ResolvedConfig;
use crate::core::ticket_log::{self, TicketRecord};
use crate::git::Git;
use crate::ui::output;
use crate::ui::Verbosity;

/// Execution context derived from global CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct Context {
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// Output verbosity for this run.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// How the local repository came to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoPresence {
    /// Fresh clone into the parent directory
    Cloned,
    /// Clone failed (already present); pull refreshed it
    Pulled,
    /// Clone and pull both failed; proceeding with the stale checkout
    StalePresent,
}

/// Whether the mainline checkout succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainlineOutcome {
    /// Working tree switched to the mainline branch
    CheckedOut,
    /// Checkout failed; reported and tolerated
    Failed,
}

/// How the ticket branch was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOutcome {
    /// Created fresh from the current HEAD
    Created,
    /// Already existed; switched to it
    SwitchedToExisting,
}

/// What one workflow run did, step by step.
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    /// Derived ticket branch name
    pub branch_name: String,
    /// Derived local repository directory
    pub source_dir: PathBuf,
    /// Outcome of the ensure-present step
    pub presence: RepoPresence,
    /// Outcome of the mainline checkout step
    pub mainline: MainlineOutcome,
    /// Outcome of the ensure-branch step
    pub branch: BranchOutcome,
}

/// Run the full start-of-work sequence for one ticket.
///
/// Expects a validated configuration; derivation failures (pattern did not
/// match) abort before any repository mutation.
pub fn run(ctx: &Context, config: &ResolvedConfig) -> Result<WorkflowReport> {
    let verbosity = ctx.verbosity();
    let git = Git::new();

    // Derive everything up front: an extraction error must surface before
    // any side effect.
    let branch_name = config
        .branch_name()
        .context("could not derive a branch name from the ticket URL")?;
    config
        .source_dir()
        .context("could not derive the repository directory from the remote URL")?;

    let presence = ensure_present(&git, config, verbosity)?;
    let mainline = checkout_mainline(&git, config, verbosity)?;
    let branch = ensure_branch(&git, config, &branch_name, verbosity)?;

    let source_dir = config.source_dir()?;
    let record = TicketRecord {
        ticket_name: branch_name.clone(),
        source_dir: source_dir.clone(),
        ticket_url: config.ticket_url.clone(),
        remote_url: config.remote_repository_url.clone(),
    };
    ticket_log::append(&config.ticket_file_path, &record)?;
    output::print(
        format!("updated: {}", config.ticket_file_path.display()),
        verbosity,
    );

    Ok(WorkflowReport {
        branch_name,
        source_dir,
        presence,
        mainline,
        branch,
    })
}

/// Step 1: make sure the local clone exists, refreshing it if it already
/// does. Clone failure is the expected signal that the directory is
/// already there, so its diagnostic is demoted to debug output; pull
/// failure leaves a stale-but-usable checkout behind and the run goes on.
fn ensure_present(
    git: &Git,
    config: &ResolvedConfig,
    verbosity: Verbosity,
) -> Result<RepoPresence> {
    output::print("attempting to clone repository...", verbosity);
    match git.clone_repository(
        &config.local_repository_parent_dir,
        &config.remote_repository_url,
    ) {
        Ok(()) => return Ok(RepoPresence::Cloned),
        Err(err) => output::debug(format!("clone skipped: {}", err), verbosity),
    }

    let repo_dir = config.source_dir()?;
    output::print("attempting to pull repository...", verbosity);
    match git.pull(&repo_dir) {
        Ok(()) => Ok(RepoPresence::Pulled),
        Err(err) => {
            output::debug(format!("pull failed: {}", err), verbosity);
            Ok(RepoPresence::StalePresent)
        }
    }
}

/// Step 2: switch to the mainline branch. Best effort: a failure is
/// reported and tolerated, since the ensure-branch step switches branches
/// itself.
fn checkout_mainline(
    git: &Git,
    config: &ResolvedConfig,
    verbosity: Verbosity,
) -> Result<MainlineOutcome> {
    let repo_dir = config.source_dir()?;
    match git.checkout(&repo_dir, &config.main_branch_name) {
        Ok(()) => Ok(MainlineOutcome::CheckedOut),
        Err(err) => {
            output::warn(
                format!(
                    "could not check out '{}': {}",
                    config.main_branch_name, err
                ),
                verbosity,
            );
            Ok(MainlineOutcome::Failed)
        }
    }
}

/// Step 3: reach the ticket branch, creating it from the current HEAD or
/// switching to it if it already exists. Failing both ways aborts the run
/// before the ticket log is written.
fn ensure_branch(
    git: &Git,
    config: &ResolvedConfig,
    branch_name: &str,
    verbosity: Verbosity,
) -> Result<BranchOutcome> {
    let repo_dir = config.source_dir()?;
    match git.create_branch(&repo_dir, branch_name) {
        Ok(()) => return Ok(BranchOutcome::Created),
        Err(err) => output::debug(format!("branch creation failed: {}", err), verbosity),
    }

    git.checkout(&repo_dir, branch_name)
        .map(|()| BranchOutcome::SwitchedToExisting)
        .with_context(|| {
            format!(
                "could not create or check out ticket branch '{}'",
                branch_name
            )
        })
}
