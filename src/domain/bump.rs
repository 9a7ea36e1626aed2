use crate::domain::version::Version;
use crate::error::{Result, TagBumpError};
use std::fmt;
use std::str::FromStr;

/// Version bump type requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BumpKind {
    Major,
    Minor,
    #[default]
    Patch,
}

impl FromStr for BumpKind {
    type Err = TagBumpError;

    /// Callers lowercase the input first; matching here is exact.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(TagBumpError::InvalidBumpType(other.to_string())),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        };
        f.write_str(name)
    }
}

impl Version {
    /// Bump version according to bump kind
    ///
    /// - **Major**: major += 1, minor = 0, patch = 0
    /// - **Minor**: minor += 1, patch = 0
    /// - **Patch**: patch += 1
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let overflow = || TagBumpError::VersionOverflow(format!("{} of {}", kind, self.to_tag()));

        let next = match kind {
            BumpKind::Major => Version {
                major: self.major.checked_add(1).ok_or_else(overflow)?,
                minor: 0,
                patch: 0,
            },
            BumpKind::Minor => Version {
                major: self.major,
                minor: self.minor.checked_add(1).ok_or_else(overflow)?,
                patch: 0,
            },
            BumpKind::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch.checked_add(1).ok_or_else(overflow)?,
            },
        };
        Ok(next)
    }
}

/// Computes the next tag name from an existing tag and a bump kind string.
///
/// The tag is parsed before the kind is looked at, so an unparseable tag
/// always reports `InvalidFormat`.
///
/// # Example
/// ```
/// # use tagbump::domain::bump_tag;
/// assert_eq!(bump_tag("v1.2.3", "minor").unwrap(), "v1.3.0");
/// assert!(bump_tag("v1.2", "patch").is_err());
/// ```
pub fn bump_tag(tag: &str, kind: &str) -> Result<String> {
    let version = Version::parse(tag)?;
    let kind: BumpKind = kind.parse()?;
    Ok(version.bump(kind)?.to_tag())
}
