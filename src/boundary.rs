use std::fmt;

/// Non-fatal conditions met while preparing a new tag.
/// These are reported to the user and the workflow continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The repository has no tags, so the baseline is used instead
    NoTagsYet { baseline: String },
    /// No commits between the latest tag and HEAD
    NoNewCommits { latest_tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoTagsYet { baseline } => {
                write!(f, "No tags found, starting from '{}'", baseline)
            }
            BoundaryWarning::NoNewCommits { latest_tag } => {
                write!(f, "No changes since '{}'", latest_tag)
            }
        }
    }
}
