//! core::extract
//!
//! Pattern extraction: derive a single string value from another string via
//! a one-capture-group regular expression.
//!
//! Used in two places:
//! - the configured branch-name pattern applied to the ticket URL
//! - the fixed last-path-segment pattern applied to the remote repository
//!   URL to obtain the local directory name
//!
//! Extraction is a pure function. Callers that need the derived value more
//! than once call back in rather than caching, so a changed input can never
//! desynchronize from a stale derivation.

use regex::Regex;
use thiserror::Error;

/// Pattern matching everything after the final path separator.
///
/// Applied to a remote URL like `https://example.com/proj/my-repo` this
/// captures `my-repo`.
const LAST_PATH_SEGMENT: &str = r".*/(.*)";

/// Errors from pattern extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("the pattern '{pattern}' did not match: '{input}'")]
    NoMatch { pattern: String, input: String },
}

/// Extract the first capture group of `pattern` from `input`.
///
/// # Errors
///
/// Returns [`ExtractError::NoMatch`] when the pattern does not match, or
/// when it matches but the capture group is empty. The error carries both
/// the pattern source and the input so callers can report a precise
/// diagnostic.
pub fn extract(pattern: &Regex, input: &str) -> Result<String, ExtractError> {
    let no_match = || ExtractError::NoMatch {
        pattern: pattern.as_str().to_string(),
        input: input.to_string(),
    };

    let captures = pattern.captures(input).ok_or_else(no_match)?;
    let value = captures.get(1).ok_or_else(no_match)?.as_str();
    if value.is_empty() {
        return Err(no_match());
    }
    Ok(value.to_string())
}

/// Derive the local directory name for a remote repository URL.
///
/// Takes everything after the final `/` of the URL. The fixed pattern is
/// compiled on demand; it is a constant of this module and cannot fail to
/// compile.
pub fn repo_dir_name(remote_url: &str) -> Result<String, ExtractError> {
    let pattern = Regex::new(LAST_PATH_SEGMENT).expect("fixed pattern compiles");
    extract(&pattern, remote_url)
}
