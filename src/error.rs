use thiserror::Error;

/// Unified error type for tagbump operations
#[derive(Error, Debug)]
pub enum TagBumpError {
    #[error("Invalid version format '{tag}': {reason}")]
    InvalidFormat { tag: String, reason: String },

    #[error("Invalid bump type '{0}': expected one of 'major', 'minor', 'patch'")]
    InvalidBumpType(String),

    #[error("Version overflow: cannot bump {0} any further")]
    VersionOverflow(String),

    #[error("Repository unavailable: {0}")]
    RepositoryUnavailable(String),

    #[error("Failed to list commits since '{tag}': {output}")]
    DiffFailed { tag: String, output: String },

    #[error("Tag '{tag}' already exists: {output}")]
    TagAlreadyExists { tag: String, output: String },

    #[error("Failed to create tag '{tag}': {output}")]
    TagCreationFailed { tag: String, output: String },

    #[error("Failed to push tag '{tag}' to '{remote}': {output}")]
    PushRejected {
        tag: String,
        remote: String,
        output: String,
    },

    #[error("Command `{command}` timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in tagbump
pub type Result<T> = std::result::Result<T, TagBumpError>;

impl TagBumpError {
    /// Create an invalid format error for a tag
    pub fn invalid_format(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        TagBumpError::InvalidFormat {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create a repository error with context
    pub fn unavailable(msg: impl Into<String>) -> Self {
        TagBumpError::RepositoryUnavailable(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagBumpError::Config(msg.into())
    }
}
