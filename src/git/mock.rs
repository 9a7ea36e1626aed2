use crate::error::{Result, TagBumpError};
use crate::git::{CommitSummary, TagRepository};
use std::sync::{Mutex, MutexGuard};

/// Mock repository for testing without actual git operations
///
/// History is linear: commits are kept oldest first and every tag remembers
/// how many commits existed when it was created.
#[derive(Default)]
pub struct MockRepository {
    commits: Vec<CommitSummary>,
    tags: Mutex<Vec<(String, usize)>>,
    pushed: Mutex<Vec<(String, String)>>,
    latest_tag_error: Option<String>,
    create_error: Option<String>,
    push_error: Option<String>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit on top of HEAD
    pub fn add_commit(&mut self, hash: impl Into<String>, subject: impl Into<String>) {
        self.commits.push(CommitSummary::new(hash, subject));
    }

    /// Add a tag pointing at HEAD
    pub fn add_tag(&mut self, name: impl Into<String>) {
        let position = self.commits.len();
        lock(&self.tags).push((name.into(), position));
    }

    /// Make `latest_tag` fail as if the repository could not be read
    pub fn fail_latest_tag(&mut self, message: impl Into<String>) {
        self.latest_tag_error = Some(message.into());
    }

    /// Make `create_tag` fail with the given tool output
    pub fn fail_create(&mut self, message: impl Into<String>) {
        self.create_error = Some(message.into());
    }

    /// Make `push_tag` fail with the given tool output
    pub fn fail_push(&mut self, message: impl Into<String>) {
        self.push_error = Some(message.into());
    }

    /// All tag names in creation order
    pub fn tags(&self) -> Vec<String> {
        lock(&self.tags).iter().map(|(name, _)| name.clone()).collect()
    }

    /// `(tag, remote)` pairs pushed so far
    pub fn pushed(&self) -> Vec<(String, String)> {
        lock(&self.pushed).clone()
    }
}

impl TagRepository for MockRepository {
    fn latest_tag(&self) -> Result<Option<String>> {
        if let Some(message) = &self.latest_tag_error {
            return Err(TagBumpError::unavailable(message.clone()));
        }
        Ok(lock(&self.tags).last().map(|(name, _)| name.clone()))
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitSummary>> {
        let start = match tag {
            Some(tag) => lock(&self.tags)
                .iter()
                .find(|(name, _)| name == tag)
                .map(|(_, position)| *position)
                .ok_or_else(|| TagBumpError::DiffFailed {
                    tag: tag.to_string(),
                    output: format!("fatal: bad revision '{}..HEAD'", tag),
                })?,
            None => 0,
        };

        Ok(self.commits[start..].iter().rev().cloned().collect())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let mut tags = lock(&self.tags);
        if tags.iter().any(|(existing, _)| existing == name) {
            return Err(TagBumpError::TagAlreadyExists {
                tag: name.to_string(),
                output: format!("fatal: tag '{}' already exists", name),
            });
        }
        if let Some(output) = &self.create_error {
            return Err(TagBumpError::TagCreationFailed {
                tag: name.to_string(),
                output: output.clone(),
            });
        }
        tags.push((name.to_string(), self.commits.len()));
        Ok(())
    }

    fn push_tag(&self, name: &str, remote: &str) -> Result<()> {
        if let Some(output) = &self.push_error {
            return Err(TagBumpError::PushRejected {
                tag: name.to_string(),
                remote: remote.to_string(),
                output: output.clone(),
            });
        }
        lock(&self.pushed).push((name.to_string(), remote.to_string()));
        Ok(())
    }
}
