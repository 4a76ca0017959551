//! core::config::schema
//!
//! Serde schema for the persistent configuration file.
//!
//! # Format
//!
//! TOML with a single `[main]` table:
//!
//! ```toml
//! [main]
//! local_repository_parent_dir = "~/src"
//! branch_name_regex = ".*/issues/(\\d+)"
//! ticket_file_path = "~/org/tickets.org"
//! # Optional, overridable per invocation:
//! remote_repository_url = "https://example.com/proj/my-repo"
//! main_branch_name = "main"
//! ```
//!
//! Every key is an optional string at the parse level; required-ness is
//! enforced when the file is turned into a
//! [`ConfigSource`](super::ConfigSource), and again when the merged
//! configuration is validated.

use serde::{Deserialize, Serialize};

/// Top-level structure of the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// The `[main]` table.
    pub main: MainSection,
}

/// The `[main]` table of the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MainSection {
    /// Directory under which repositories are cloned
    pub local_repository_parent_dir: Option<String>,

    /// Regex extracting the branch name from a ticket URL (one capture group)
    pub branch_name_regex: Option<String>,

    /// Path to the tracking file that ticket records are appended to
    pub ticket_file_path: Option<String>,

    /// Default ticket URL (rarely useful; normally given on the command line)
    pub ticket_url: Option<String>,

    /// Default remote repository URL
    pub remote_repository_url: Option<String>,

    /// Name of the mainline branch that ticket branches are created from
    pub main_branch_name: Option<String>,
}
