use crate::error::{Result, TagBumpError};
use std::fmt;
use std::str::FromStr;

/// Prefix that every emitted tag carries
pub const TAG_PREFIX: char = 'v';

/// Tag assumed when the repository has no tags yet
pub const BASELINE_TAG: &str = "v0.0.0";

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse version from a tag string (e.g., "v1.2.3" -> Version(1,2,3))
    ///
    /// A single leading `v` is optional on input. Each of the three
    /// dot-separated segments must be a non-empty run of ASCII digits.
    /// Leading zeros are accepted, so "v1.02.3" parses as 1.2.3.
    pub fn parse(tag: &str) -> Result<Self> {
        let clean_tag = tag.strip_prefix(TAG_PREFIX).unwrap_or(tag);

        let parts: Vec<&str> = clean_tag.split('.').collect();
        if parts.len() != 3 {
            return Err(TagBumpError::invalid_format(
                tag,
                format!("expected MAJOR.MINOR.PATCH, found {} segment(s)", parts.len()),
            ));
        }

        let major = parse_segment(tag, "major", parts[0])?;
        let minor = parse_segment(tag, "minor", parts[1])?;
        let patch = parse_segment(tag, "patch", parts[2])?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Canonical tag name, always carrying the `v` prefix
    pub fn to_tag(&self) -> String {
        format!("{}{}", TAG_PREFIX, self)
    }
}

fn parse_segment(tag: &str, name: &str, segment: &str) -> Result<u64> {
    if segment.is_empty() {
        return Err(TagBumpError::invalid_format(
            tag,
            format!("{} version is empty", name),
        ));
    }

    // u64::from_str would accept a leading '+'
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TagBumpError::invalid_format(
            tag,
            format!("{} version '{}' must contain only digits", name, segment),
        ));
    }

    segment.parse::<u64>().map_err(|e| {
        TagBumpError::invalid_format(tag, format!("{} version '{}': {}", name, segment, e))
    })
}

impl FromStr for Version {
    type Err = TagBumpError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
