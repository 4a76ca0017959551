//! git::interface
//!
//! Subprocess wrapper around the external `git` binary.
//!
//! Every invocation is scoped to a working directory via `git -C <dir>` and
//! judged solely by its exit status. Captured stderr rides along on the
//! error so callers can decide whether to surface or suppress it; this
//! module never prints.

use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// Errors from git invocations.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run 'git {args}': {source}")]
    Spawn {
        args: String,
        source: std::io::Error,
    },

    #[error("'git {args}' failed{}: {stderr}", exit_code_suffix(.code))]
    CommandFailed {
        args: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {})", code),
        None => String::new(),
    }
}

/// The single doorway to Git.
///
/// All repository mutations flow through this interface; no other module
/// spawns `git` directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git;

impl Git {
    /// Create a new git interface.
    pub fn new() -> Self {
        Self
    }

    /// Run `git -C <dir> <args>`, capturing output.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<(), GitError> {
        let rendered = args.join(" ");

        let output = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .map_err(|e| GitError::Spawn {
                args: rendered.clone(),
                source: e,
            })?;

        if output.status.success() {
            return Ok(());
        }

        Err(GitError::CommandFailed {
            args: rendered,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    /// `git clone <remote_url>` inside `parent_dir`.
    ///
    /// Fails if the target directory already exists; callers treat that as
    /// the expected signal to fall back to [`Self::pull`].
    pub fn clone_repository(&self, parent_dir: &Path, remote_url: &str) -> Result<(), GitError> {
        self.run(parent_dir, &["clone", remote_url])
    }

    /// `git pull` inside `repo_dir`.
    pub fn pull(&self, repo_dir: &Path) -> Result<(), GitError> {
        self.run(repo_dir, &["pull"])
    }

    /// `git checkout <branch>` inside `repo_dir`.
    pub fn checkout(&self, repo_dir: &Path, branch: &str) -> Result<(), GitError> {
        self.run(repo_dir, &["checkout", branch])
    }

    /// `git checkout -b <branch>` inside `repo_dir`.
    ///
    /// Fails if the branch already exists; callers treat that as the
    /// expected signal to fall back to [`Self::checkout`].
    pub fn create_branch(&self, repo_dir: &Path, branch: &str) -> Result<(), GitError> {
        self.run(repo_dir, &["checkout", "-b", branch])
    }
}
