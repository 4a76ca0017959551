//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. The external `git` binary
//! owns all transport and merge semantics; tkt only decides which
//! subcommands to run, scoped to which directory, and how to interpret
//! their exit status. No other module spawns `git`.
//!
//! # Responsibilities
//!
//! - `clone <url>` into a parent directory
//! - `pull` inside an existing clone
//! - `checkout <branch>` and `checkout -b <branch>`
//!
//! # Invariants
//!
//! - Success is exit status zero, nothing else
//! - Captured stderr travels on [`GitError`]; printing is the caller's call

mod interface;

pub use interface::{Git, GitError};
