//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations tagbump needs, so the version logic can be tested without a
//! subprocess or a repository on disk.
//!
//! # Overview
//!
//! The primary abstraction is the [TagRepository] trait. The concrete
//! implementations include:
//!
//! - [command::GitCommand]: shells out to the `git` binary with a timeout
//! - [repository::Git2Repository]: uses the `git2` crate directly
//! - [mock::MockRepository]: an in-memory implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use tagbump::git::TagRepository;
//! # fn example<R: TagRepository>(repo: &R) -> tagbump::Result<()> {
//! let latest = repo.latest_tag()?;
//! let commits = repo.commits_since(latest.as_deref())?;
//! println!("{} commit(s) since {:?}", commits.len(), latest);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCommand;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// One line of the "commits since tag" listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Abbreviated commit hash
    pub hash: String,
    /// First line of the commit message
    pub subject: String,
}

impl CommitSummary {
    pub fn new(hash: impl Into<String>, subject: impl Into<String>) -> Self {
        CommitSummary {
            hash: hash.into(),
            subject: subject.into(),
        }
    }

    /// Parse a line of `git log --oneline` output
    pub fn from_oneline(line: &str) -> Option<Self> {
        let line = line.trim_end();
        if line.is_empty() {
            return None;
        }
        match line.split_once(' ') {
            Some((hash, subject)) => Some(CommitSummary::new(hash, subject)),
            None => Some(CommitSummary::new(line, "")),
        }
    }
}

impl fmt::Display for CommitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hash, self.subject)
    }
}

/// Which implementation of [TagRepository] the binary should open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Spawn the `git` binary
    #[default]
    Cli,
    /// Use libgit2 through the `git2` crate
    Libgit2,
}

impl std::str::FromStr for Backend {
    type Err = crate::error::TagBumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cli" | "git" => Ok(Backend::Cli),
            "libgit2" | "git2" => Ok(Backend::Libgit2),
            other => Err(crate::error::TagBumpError::config(format!(
                "unknown backend '{}': expected 'cli' or 'libgit2'",
                other
            ))),
        }
    }
}

/// Tag operations needed to publish a new version
///
/// ## Thread Safety
///
/// Implementors must be `Send`. `Sync` is not required since
/// `git2::Repository` does not provide it.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map their
/// underlying failures to the matching [crate::error::TagBumpError] variant:
/// a missing repository or tool is `RepositoryUnavailable`, an unknown tag
/// during listing is `DiffFailed`, and so on.
///
/// ## Implementations
///
/// - [GitCommand](command::GitCommand): subprocess implementation
/// - [Git2Repository](repository::Git2Repository): libgit2 implementation
/// - [MockRepository](mock::MockRepository): test implementation
pub trait TagRepository: Send {
    /// Get the most recent tag reachable from HEAD
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The latest reachable tag name
    /// * `Ok(None)` - The repository has no tag that describes HEAD
    /// * `Err` - Any other failure (not a repository, tool missing, ...)
    fn latest_tag(&self) -> Result<Option<String>>;

    /// List commits reachable from HEAD but not from `tag`, newest first
    ///
    /// With `None`, every commit reachable from HEAD is listed.
    ///
    /// # Returns
    /// * `Ok(commits)` - Possibly empty list of commits
    /// * `Err` - If the tag does not exist or the history cannot be read
    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitSummary>>;

    /// Create a lightweight tag at HEAD
    ///
    /// # Returns
    /// * `Ok(())` - Tag created
    /// * `Err` - `TagAlreadyExists` for a duplicate name, otherwise `TagCreationFailed`
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push a single tag to a remote
    ///
    /// # Arguments
    /// * `name` - Name of the tag to push
    /// * `remote` - Name of the remote (e.g., "origin")
    fn push_tag(&self, name: &str, remote: &str) -> Result<()>;
}

impl<T: TagRepository + ?Sized> TagRepository for Box<T> {
    fn latest_tag(&self) -> Result<Option<String>> {
        (**self).latest_tag()
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitSummary>> {
        (**self).commits_since(tag)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        (**self).create_tag(name)
    }

    fn push_tag(&self, name: &str, remote: &str) -> Result<()> {
        (**self).push_tag(name, remote)
    }
}

/// Open the repository containing `path` with the chosen backend.
///
/// `timeout` only applies to the subprocess backend.
pub fn open(backend: Backend, path: &Path, timeout: Duration) -> Result<Box<dyn TagRepository>> {
    tracing::debug!(?backend, path = %path.display(), "opening repository");
    match backend {
        Backend::Cli => Ok(Box::new(GitCommand::new(path).with_timeout(timeout))),
        Backend::Libgit2 => Ok(Box::new(Git2Repository::open(path)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_summary_from_oneline() {
        let commit = CommitSummary::from_oneline("a1b2c3d fix: handle empty input\n").unwrap();
        assert_eq!(commit.hash, "a1b2c3d");
        assert_eq!(commit.subject, "fix: handle empty input");
        assert_eq!(commit.to_string(), "a1b2c3d fix: handle empty input");
    }

    #[test]
    fn test_commit_summary_blank_line() {
        assert_eq!(CommitSummary::from_oneline(""), None);
        assert_eq!(CommitSummary::from_oneline("   \n"), None);
    }

    #[test]
    fn test_commit_summary_hash_only() {
        let commit = CommitSummary::from_oneline("a1b2c3d").unwrap();
        assert_eq!(commit.subject, "");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("cli".parse::<Backend>().unwrap(), Backend::Cli);
        assert_eq!("LIBGIT2".parse::<Backend>().unwrap(), Backend::Libgit2);
        assert!("svn".parse::<Backend>().is_err());
        assert_eq!(Backend::default(), Backend::Cli);
    }
}
