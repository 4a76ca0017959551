//! core
//!
//! Configuration resolution, pattern extraction, and the ticket log.
//!
//! # Modules
//!
//! - [`config`] - Layered configuration: load, merge, validate
//! - [`extract`] - One-capture-group pattern extraction
//! - [`ticket_log`] - Append-only tracking file records
//!
//! # Design Principles
//!
//! - Only a validated [`config::ResolvedConfig`] leaves this layer
//! - Derived values (branch name, source directory) are pure functions,
//!   recomputed on demand rather than cached

pub mod config;
pub mod extract;
pub mod ticket_log;
