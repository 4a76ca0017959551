//! core::config
//!
//! Configuration resolution: loading, merging, and validation.
//!
//! # Overview
//!
//! tkt resolves its configuration from two sources per run:
//! - **Persistent**: the config file (TOML, `[main]` table)
//! - **Overrides**: command-line flags for the current invocation
//!
//! # Precedence
//!
//! Overrides win over the persistent file on a per-field basis. An override
//! that is unset or empty is treated as absent, never as an explicit
//! override to empty; the merge is an explicit field-wise rule, not string
//! truthiness.
//!
//! # Config File Locations
//!
//! Searched in order:
//! 1. `$TKT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/tkt/config.toml`
//! 3. `~/.config/tkt/config.toml` (canonical location)
//!
//! Unlike most tools, a missing config file is an error: the workflow
//! cannot run without the required keys.
//!
//! # Lifecycle
//!
//! Both sources are built once, merged once into a [`ResolvedConfig`] via
//! [`ConfigSource::validate`], and the result is immutable for the rest of
//! the run. Nothing downstream of the CLI layer ever sees an unvalidated
//! configuration.

pub mod schema;

pub use schema::{FileConfig, MainSection};

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

use crate::core::extract::{self, ExtractError};

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("config file '{path}' is missing entry: {key}")]
    MissingKey { path: PathBuf, key: &'static str },

    #[error("invalid branch name regex '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("{key} was not configured")]
    MissingValue { key: &'static str },

    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("home directory not found")]
    NoHomeDir,
}

/// One source of configuration values.
///
/// Two instances exist per run: one from the config file, one from the
/// command line. Every field is independently optional; only the merged
/// result enforces required-ness. Empty strings are normalized to `None`
/// at construction so the merge never has to reason about "".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSource {
    pub local_repository_parent_dir: Option<String>,
    pub branch_name_regex: Option<String>,
    pub ticket_file_path: Option<String>,
    pub ticket_url: Option<String>,
    pub remote_repository_url: Option<String>,
    pub main_branch_name: Option<String>,
}

/// Normalize an optional string: empty or whitespace-only becomes `None`.
fn some_nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ConfigSource {
    /// Build a source from raw optional values (command-line overrides).
    ///
    /// Empty values are treated as absent.
    pub fn from_values(
        local_repository_parent_dir: Option<String>,
        branch_name_regex: Option<String>,
        ticket_file_path: Option<String>,
        ticket_url: Option<String>,
        remote_repository_url: Option<String>,
        main_branch_name: Option<String>,
    ) -> Self {
        Self {
            local_repository_parent_dir: some_nonempty(local_repository_parent_dir),
            branch_name_regex: some_nonempty(branch_name_regex),
            ticket_file_path: some_nonempty(ticket_file_path),
            ticket_url: some_nonempty(ticket_url),
            remote_repository_url: some_nonempty(remote_repository_url),
            main_branch_name: some_nonempty(main_branch_name),
        }
    }

    /// Build a source from a parsed config file.
    ///
    /// The persistent store must carry `local_repository_parent_dir`,
    /// `branch_name_regex`, and `ticket_file_path`; a missing or empty
    /// required key is [`ConfigError::MissingKey`]. A branch pattern that
    /// does not compile is rejected here as [`ConfigError::InvalidPattern`]
    /// so the user learns about a broken config file before anything else
    /// happens.
    pub fn from_file(file: FileConfig, path: &Path) -> Result<Self, ConfigError> {
        let main = file.main;

        let require = |value: Option<String>, key: &'static str| {
            some_nonempty(value).ok_or(ConfigError::MissingKey {
                path: path.to_path_buf(),
                key,
            })
        };

        let branch_name_regex = require(main.branch_name_regex, "branch_name_regex")?;
        compile_branch_pattern(&branch_name_regex)?;

        Ok(Self {
            local_repository_parent_dir: Some(require(
                main.local_repository_parent_dir,
                "local_repository_parent_dir",
            )?),
            branch_name_regex: Some(branch_name_regex),
            ticket_file_path: Some(require(main.ticket_file_path, "ticket_file_path")?),
            ticket_url: some_nonempty(main.ticket_url),
            remote_repository_url: some_nonempty(main.remote_repository_url),
            main_branch_name: some_nonempty(main.main_branch_name),
        })
    }

    /// Field-wise left-biased merge: `self` wins wherever it has a value,
    /// otherwise `fallback` is used.
    pub fn merge(self, fallback: ConfigSource) -> ConfigSource {
        fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
            primary.or(fallback)
        }

        ConfigSource {
            local_repository_parent_dir: pick(
                self.local_repository_parent_dir,
                fallback.local_repository_parent_dir,
            ),
            branch_name_regex: pick(self.branch_name_regex, fallback.branch_name_regex),
            ticket_file_path: pick(self.ticket_file_path, fallback.ticket_file_path),
            ticket_url: pick(self.ticket_url, fallback.ticket_url),
            remote_repository_url: pick(
                self.remote_repository_url,
                fallback.remote_repository_url,
            ),
            main_branch_name: pick(self.main_branch_name, fallback.main_branch_name),
        }
    }

    /// Validate the merged source into a [`ResolvedConfig`].
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// 1. remote repository URL present
    /// 2. branch pattern present, compiles, and has exactly one capture group
    /// 3. parent directory exists on the filesystem
    /// 4. ticket file exists on the filesystem
    /// 5. main branch name and ticket URL present
    ///
    /// Path fields have a leading `~` resolved before the existence checks.
    pub fn validate(self) -> Result<ResolvedConfig, ConfigError> {
        let remote_repository_url = self.remote_repository_url.ok_or(ConfigError::MissingValue {
            key: "remote_repository_url",
        })?;

        let pattern = self.branch_name_regex.ok_or(ConfigError::MissingValue {
            key: "branch_name_regex",
        })?;
        let branch_name_regex = compile_branch_pattern(&pattern)?;

        let parent_dir = self
            .local_repository_parent_dir
            .ok_or(ConfigError::MissingValue {
                key: "local_repository_parent_dir",
            })?;
        let local_repository_parent_dir = expand_tilde(&parent_dir)?;
        if !local_repository_parent_dir.is_dir() {
            return Err(ConfigError::DirectoryNotFound {
                path: local_repository_parent_dir,
            });
        }

        let ticket_file = self.ticket_file_path.ok_or(ConfigError::MissingValue {
            key: "ticket_file_path",
        })?;
        let ticket_file_path = expand_tilde(&ticket_file)?;
        if !ticket_file_path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: ticket_file_path,
            });
        }

        let main_branch_name = self.main_branch_name.ok_or(ConfigError::MissingValue {
            key: "main_branch_name",
        })?;
        let ticket_url = self.ticket_url.ok_or(ConfigError::MissingValue {
            key: "ticket_url",
        })?;

        Ok(ResolvedConfig {
            local_repository_parent_dir,
            branch_name_regex,
            ticket_file_path,
            ticket_url,
            remote_repository_url,
            main_branch_name,
        })
    }
}

/// The single validated configuration consumed by the engine.
///
/// Constructed only via [`ConfigSource::validate`]; immutable afterwards.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory under which repositories are cloned (exists, absolute)
    pub local_repository_parent_dir: PathBuf,
    /// Compiled branch-name pattern (exactly one capture group)
    pub branch_name_regex: Regex,
    /// Tracking file that ticket records are appended to (exists)
    pub ticket_file_path: PathBuf,
    /// URL of the ticket being started
    pub ticket_url: String,
    /// URL of the remote repository the work happens in
    pub remote_repository_url: String,
    /// Mainline branch that ticket branches are created from
    pub main_branch_name: String,
}

impl ResolvedConfig {
    /// Derive the ticket branch name from the ticket URL.
    ///
    /// Recomputed on every call; extraction is pure and cheap, and caching
    /// could desynchronize from the URL it was derived from.
    pub fn branch_name(&self) -> Result<String, ExtractError> {
        extract::extract(&self.branch_name_regex, &self.ticket_url)
    }

    /// Derive the local repository directory from the remote URL.
    ///
    /// `<local_repository_parent_dir>/<last path segment of remote URL>`.
    /// Recomputed on every call, same as [`Self::branch_name`].
    pub fn source_dir(&self) -> Result<PathBuf, ExtractError> {
        let dir = extract::repo_dir_name(&self.remote_repository_url)?;
        Ok(self.local_repository_parent_dir.join(dir))
    }
}

/// Compile a branch-name pattern and enforce the one-capture-group arity.
fn compile_branch_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    // captures_len counts the implicit whole-match group 0.
    if regex.captures_len() != 2 {
        return Err(ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: format!(
                "expected exactly one capture group, found {}",
                regex.captures_len() - 1
            ),
        });
    }
    Ok(regex)
}

/// Resolve a leading `~` to the user's home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return dirs::home_dir().ok_or(ConfigError::NoHomeDir);
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}

/// Locate the config file.
///
/// Searched in order: `$TKT_CONFIG`, `$XDG_CONFIG_HOME/tkt/config.toml`,
/// `~/.config/tkt/config.toml`. Returns [`ConfigError::NotFound`] with the
/// most specific location that was tried.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    if let Ok(explicit) = std::env::var("TKT_CONFIG") {
        let path = PathBuf::from(explicit);
        if path.is_file() {
            return Ok(path);
        }
        return Err(ConfigError::NotFound { path });
    }

    if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_home).join("tkt/config.toml");
        if path.is_file() {
            return Ok(path);
        }
    }

    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    let path = home.join(".config/tkt/config.toml");
    if path.is_file() {
        return Ok(path);
    }
    Err(ConfigError::NotFound { path })
}

/// Load the persistent configuration source from the config file.
pub fn load_file() -> Result<ConfigSource, ConfigError> {
    let path = config_file_path()?;
    load_file_from(&path)
}

/// Load the persistent configuration source from an explicit path.
pub fn load_file_from(path: &Path) -> Result<ConfigSource, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    ConfigSource::from_file(file, path)
}
