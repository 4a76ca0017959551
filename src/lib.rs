//! tkt - Start work on a ticket with one command
//!
//! tkt automates the repetitive start-of-work sequence for a ticket-driven
//! workflow: given a ticket URL it derives a branch name, makes sure a local
//! clone of the remote repository exists and is fresh, checks out the
//! configured mainline, creates (or switches to) the ticket branch, and
//! appends a structured record to a tracking file.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, resolves config, delegates to engine)
//! - [`engine`] - Drives the ordered repository workflow (clone-or-pull, mainline, ticket branch)
//! - [`core`] - Configuration resolution, pattern extraction, and the ticket log
//! - [`git`] - Single interface for all Git operations (subprocess wrapper)
//! - [`ui`] - Output formatting utilities
//!
//! # Correctness Invariants
//!
//! 1. Only a validated [`core::config::ResolvedConfig`] reaches the engine
//! 2. Configuration and extraction errors abort before any repository mutation
//! 3. Repository steps are idempotent: running tkt twice for the same ticket
//!    converges to the same branch instead of erroring out
//! 4. The ticket log is append-only; tkt never rewrites existing records

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod ui;
