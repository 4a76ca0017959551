//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! tkt is a single-purpose tool, so there are no subcommands: the workflow
//! flags mirror the config file keys one-to-one and override them per
//! invocation. Only `--ticket-url` is mandatory; the run has no meaning
//! without it.

use clap::Parser;

use crate::core::config::ConfigSource;

/// Start work on a new ticket.
#[derive(Parser, Debug)]
#[command(name = "tkt")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
CONFIG FILE:
    Persistent settings live in a TOML file with a [main] table, found at
    $TKT_CONFIG, $XDG_CONFIG_HOME/tkt/config.toml, or
    ~/.config/tkt/config.toml. Every flag below overrides its key of the
    same name for this invocation only.

EXAMPLE:
    tkt --ticket-url https://tracker.example.com/issues/4821")]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// The path under which the git repository will be cloned
    #[arg(long, value_name = "DIR")]
    pub local_repository_parent_dir: Option<String>,

    /// A regular expression used to extract the branch name from the ticket URL
    #[arg(long, value_name = "REGEX")]
    pub branch_name_regex: Option<String>,

    /// The path to the org file where ticket information is appended
    #[arg(long, value_name = "FILE")]
    pub ticket_file_path: Option<String>,

    /// The URL to the ticket
    #[arg(long, value_name = "URL", required = true)]
    pub ticket_url: Option<String>,

    /// The URL to the remote repository that the ticket's work will be done in
    #[arg(long, value_name = "URL")]
    pub remote_repository_url: Option<String>,

    /// The name of the main branch that ticket branches should be created from
    #[arg(long, value_name = "BRANCH")]
    pub main_branch_name: Option<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Build the per-invocation override source from the parsed flags.
    ///
    /// Empty flag values are treated as absent, not as overrides to empty.
    pub fn overrides(&self) -> ConfigSource {
        ConfigSource::from_values(
            self.local_repository_parent_dir.clone(),
            self.branch_name_regex.clone(),
            self.ticket_file_path.clone(),
            self.ticket_url.clone(),
            self.remote_repository_url.clone(),
            self.main_branch_name.clone(),
        )
    }
}
