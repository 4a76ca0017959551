//! core::ticket_log
//!
//! Append-only ticket tracking file.
//!
//! Each run appends one org-mode style block to the configured tracking
//! file. The file is never created here: its existence is part of config
//! validation, so by the time a record is written the path is known good.
//! There is no deduplication either; running tkt twice for the same ticket
//! appends two records, which is the intended append-only history.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from ticket log operations.
#[derive(Debug, Error)]
pub enum TicketLogError {
    #[error("failed to append to ticket file '{path}': {source}")]
    Append {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One record of the tracking file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRecord {
    /// Derived branch name, doubling as the ticket's display name
    pub ticket_name: String,
    /// Local directory the work happens in
    pub source_dir: PathBuf,
    /// URL of the ticket
    pub ticket_url: String,
    /// URL of the remote repository
    pub remote_url: String,
}

impl fmt::Display for TicketRecord {
    /// The fixed on-disk block format, including the trailing blank line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** TODO Ticket: {}", self.ticket_name)?;
        writeln!(f, "   Source: {}", self.source_dir.display())?;
        writeln!(f, "   Ticket: {}", self.ticket_url)?;
        writeln!(f, "   Remote: {}", self.remote_url)?;
        writeln!(f)
    }
}

/// Append one record to the tracking file.
///
/// Opens the file in append mode; the record block is formatted by
/// [`TicketRecord`]'s `Display` impl.
pub fn append(path: &Path, record: &TicketRecord) -> Result<(), TicketLogError> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| TicketLogError::Append {
            path: path.to_path_buf(),
            source: e,
        })?;

    file.write_all(record.to_string().as_bytes())
        .map_err(|e| TicketLogError::Append {
            path: path.to_path_buf(),
            source: e,
        })
}
