//! Integration tests for the repository workflow engine.
//!
//! These tests drive the engine against real git repositories: a local
//! "origin" plays the remote, and the engine clones, pulls, and switches
//! branches exactly as it would against a network remote.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use regex::Regex;
use tempfile::TempDir;

use tkt::core::config::ResolvedConfig;
use tkt::engine::{self, BranchOutcome, Context, MainlineOutcome, RepoPresence};

// =============================================================================
// Test Fixtures
// =============================================================================

/// A local origin repository plus the directories one tkt run needs.
struct Workspace {
    _dir: TempDir,
    /// Path of the origin repository (doubles as the remote URL).
    origin: PathBuf,
    /// Parent directory clones land in.
    parent: PathBuf,
    /// The tracking file records are appended to.
    ticket_file: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        let origin = dir.path().join("my-repo");
        fs::create_dir(&origin).unwrap();
        run_git(&origin, &["init", "-b", "main"]);
        run_git(&origin, &["config", "user.email", "test@example.com"]);
        run_git(&origin, &["config", "user.name", "Test User"]);
        fs::write(origin.join("README.md"), "# Test Repo\n").unwrap();
        run_git(&origin, &["add", "README.md"]);
        run_git(&origin, &["commit", "-m", "Initial commit"]);

        let parent = dir.path().join("src");
        fs::create_dir(&parent).unwrap();

        let ticket_file = dir.path().join("tickets.org");
        fs::write(&ticket_file, "").unwrap();

        Self {
            _dir: dir,
            origin,
            parent,
            ticket_file,
        }
    }

    /// The directory the clone of origin lands in.
    fn clone_dir(&self) -> PathBuf {
        self.parent.join("my-repo")
    }

    /// Build a validated configuration for the given ticket URL.
    fn config(&self, ticket_url: &str, pattern: &str) -> ResolvedConfig {
        ResolvedConfig {
            local_repository_parent_dir: self.parent.clone(),
            branch_name_regex: Regex::new(pattern).unwrap(),
            ticket_file_path: self.ticket_file.clone(),
            ticket_url: ticket_url.to_string(),
            remote_repository_url: self.origin.display().to_string(),
            main_branch_name: "main".to_string(),
        }
    }

    fn context(&self) -> Context {
        Context {
            debug: false,
            quiet: true,
        }
    }
}

/// Run a git command in `dir`, panicking on failure.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Name of the branch HEAD points at.
fn current_branch(dir: &Path) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .output()
        .expect("failed to run git");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

const TICKET_URL: &str = "https://tracker.example.com/issues/4821";
const PATTERN: &str = r".*/issues/(\d+)";

// =============================================================================
// Tests
// =============================================================================

#[test]
fn first_run_clones_and_creates_branch() {
    let ws = Workspace::new();
    let config = ws.config(TICKET_URL, PATTERN);

    let report = engine::run(&ws.context(), &config).unwrap();

    assert_eq!(report.branch_name, "4821");
    assert_eq!(report.source_dir, ws.clone_dir());
    assert_eq!(report.presence, RepoPresence::Cloned);
    assert_eq!(report.mainline, MainlineOutcome::CheckedOut);
    assert_eq!(report.branch, BranchOutcome::Created);

    assert!(ws.clone_dir().join(".git").is_dir());
    assert_eq!(current_branch(&ws.clone_dir()), "4821");
}

#[test]
fn second_run_converges_to_same_branch() {
    let ws = Workspace::new();
    let config = ws.config(TICKET_URL, PATTERN);
    let ctx = ws.context();

    engine::run(&ctx, &config).unwrap();
    let report = engine::run(&ctx, &config).unwrap();

    // Clone fails (directory exists); the ticket branch left behind by the
    // first run has no upstream, so pull fails too and the stale checkout
    // is used as-is.
    assert_eq!(report.presence, RepoPresence::StalePresent);
    assert_eq!(report.mainline, MainlineOutcome::CheckedOut);
    assert_eq!(report.branch, BranchOutcome::SwitchedToExisting);
    assert_eq!(current_branch(&ws.clone_dir()), "4821");
}

#[test]
fn existing_clone_on_mainline_is_pulled() {
    let ws = Workspace::new();
    let config = ws.config(TICKET_URL, PATTERN);

    // Pre-existing clone sitting on main, tracking origin/main.
    run_git(&ws.parent, &["clone", &ws.origin.display().to_string()]);

    let report = engine::run(&ws.context(), &config).unwrap();

    assert_eq!(report.presence, RepoPresence::Pulled);
    assert_eq!(report.branch, BranchOutcome::Created);
    assert_eq!(current_branch(&ws.clone_dir()), "4821");
}

#[test]
fn mainline_checkout_failure_is_tolerated() {
    let ws = Workspace::new();
    let mut config = ws.config(TICKET_URL, PATTERN);
    config.main_branch_name = "no-such-mainline".to_string();

    // The mainline checkout fails, is reported, and the run goes on: the
    // ensure-branch step switches branches itself.
    let report = engine::run(&ws.context(), &config).unwrap();

    assert_eq!(report.mainline, MainlineOutcome::Failed);
    assert_eq!(report.branch, BranchOutcome::Created);
    assert_eq!(current_branch(&ws.clone_dir()), "4821");

    // The record was still written.
    let contents = fs::read_to_string(&ws.ticket_file).unwrap();
    assert!(contents.contains("** TODO Ticket: 4821"));
}

#[test]
fn both_runs_append_to_ticket_log() {
    let ws = Workspace::new();
    let config = ws.config(TICKET_URL, PATTERN);
    let ctx = ws.context();

    engine::run(&ctx, &config).unwrap();
    engine::run(&ctx, &config).unwrap();

    let contents = fs::read_to_string(&ws.ticket_file).unwrap();
    assert_eq!(contents.matches("** TODO Ticket: 4821").count(), 2);

    let expected_block = format!(
        "** TODO Ticket: 4821\n   Source: {}\n   Ticket: {}\n   Remote: {}\n\n",
        ws.clone_dir().display(),
        TICKET_URL,
        ws.origin.display()
    );
    assert_eq!(contents, format!("{expected_block}{expected_block}"));
}

#[test]
fn extraction_failure_aborts_before_any_clone() {
    let ws = Workspace::new();
    // Pattern that cannot match the ticket URL.
    let config = ws.config("https://tracker.example.com/pulls/77", PATTERN);

    let err = engine::run(&ws.context(), &config).unwrap_err();
    assert!(err.to_string().contains("branch name"));

    // No repository mutation happened.
    assert!(!ws.clone_dir().exists());
    assert_eq!(fs::read_to_string(&ws.ticket_file).unwrap(), "");
}

#[test]
fn unreachable_branch_skips_log_append() {
    let ws = Workspace::new();
    // The captured name is not a valid git branch name, so both
    // `checkout -b` and `checkout` fail.
    let config = ws.config(
        "https://tracker.example.com/issues/bad..name",
        r".*/issues/(.*)",
    );

    let err = engine::run(&ws.context(), &config).unwrap_err();
    assert!(err.to_string().contains("ticket branch"));

    // The clone happened, but the log was not touched.
    assert!(ws.clone_dir().join(".git").is_dir());
    assert_eq!(fs::read_to_string(&ws.ticket_file).unwrap(), "");
}
