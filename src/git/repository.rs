use crate::error::{Result, TagBumpError};
use crate::git::{CommitSummary, TagRepository};
use git2::{
    Commit, DescribeFormatOptions, DescribeOptions, ErrorClass, ErrorCode, Repository as Git2Repo,
};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            TagBumpError::unavailable(format!(
                "not a git repository ({}): {}",
                path.display(),
                e.message()
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_commit(&self) -> Result<Commit<'_>> {
        let head = self.repo.head().map_err(|e| match e.code() {
            ErrorCode::UnbornBranch => {
                TagBumpError::unavailable("HEAD does not point to a commit yet")
            }
            _ => TagBumpError::unavailable(format!("cannot resolve HEAD: {}", e.message())),
        })?;
        Ok(head.peel_to_commit()?)
    }
}

impl TagRepository for Git2Repository {
    fn latest_tag(&self) -> Result<Option<String>> {
        let head = self.head_commit()?;

        let mut describe_opts = DescribeOptions::new();
        describe_opts.describe_tags();

        let describe = match head.as_object().describe(&describe_opts) {
            Ok(describe) => describe,
            // "no reference found" is a generic error, "no tags can describe" is NotFound
            Err(e) if e.code() == ErrorCode::NotFound || e.class() == ErrorClass::Describe => {
                debug!("no tag describes HEAD: {}", e.message());
                return Ok(None);
            }
            Err(e) => return Err(TagBumpError::unavailable(e.message().to_string())),
        };

        let mut format_opts = DescribeFormatOptions::new();
        format_opts.abbreviated_size(0);
        Ok(Some(describe.format(Some(&format_opts))?))
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitSummary>> {
        let diff_failed = |tag: &str, message: &str| TagBumpError::DiffFailed {
            tag: tag.to_string(),
            output: message.to_string(),
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TIME)?;
        revwalk
            .push_head()
            .map_err(|e| diff_failed(tag.unwrap_or("HEAD"), e.message()))?;

        if let Some(tag) = tag {
            // Handles both lightweight and annotated tags
            let tag_commit = self
                .repo
                .find_reference(&format!("refs/tags/{}", tag))
                .and_then(|reference| reference.peel_to_commit())
                .map_err(|e| diff_failed(tag, e.message()))?;
            revwalk.hide(tag_commit.id())?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            let short_id = commit.as_object().short_id()?;
            commits.push(CommitSummary::new(
                short_id.as_str().unwrap_or_default(),
                commit.summary().unwrap_or_default(),
            ));
        }

        Ok(commits)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self.head_commit()?;

        match self.repo.tag_lightweight(name, head.as_object(), false) {
            Ok(_) => Ok(()),
            Err(e) if e.code() == ErrorCode::Exists => Err(TagBumpError::TagAlreadyExists {
                tag: name.to_string(),
                output: e.message().to_string(),
            }),
            Err(e) => Err(TagBumpError::TagCreationFailed {
                tag: name.to_string(),
                output: e.message().to_string(),
            }),
        }
    }

    fn push_tag(&self, name: &str, remote_name: &str) -> Result<()> {
        let push_rejected = |output: String| TagBumpError::PushRejected {
            tag: name.to_string(),
            remote: remote_name.to_string(),
            output,
        };

        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| push_rejected(format!("no remote named '{}'", remote_name)))?;

        let mut callbacks = git2::RemoteCallbacks::new();
        let mut attempts = 0;
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            // libgit2 keeps asking while credentials fail
            attempts += 1;
            if attempts > 1 {
                return Err(git2::Error::from_str("authentication failed"));
            }

            let username = username_from_url.unwrap_or("git");
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        // The server reports per-ref rejections here rather than as a push error
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| push_rejected(e.message().to_string()))?;

        Ok(())
    }
}
