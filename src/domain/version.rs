use crate::error::{Result, TagBumpError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version representation with optional pre-release suffix.
///
/// Immutable: every transformation returns a new value. Rendered with a
/// canonical `v` prefix (`v1.2.3`, `v1.2.3-beta.1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
}

impl SemanticVersion {
    /// Create a new stable version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Parse a version from a tag string (e.g., "v1.2.3-beta.1" or "1.2.3").
    ///
    /// Build metadata (`+...`) is discarded, the pre-release suffix (`-...`)
    /// is retained. Exactly three numeric components are required; each
    /// segment reports its own error naming the offending substring.
    pub fn parse(tag: &str) -> Result<Self> {
        let clean = tag.trim_start_matches('v').trim_start_matches('V');

        // Strip build metadata before looking for the pre-release suffix
        let clean = match clean.split_once('+') {
            Some((core, _meta)) => core,
            None => clean,
        };

        let (core, prerelease) = match clean.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (clean, None),
        };

        if let Some(pre) = prerelease {
            validate_prerelease(tag, pre)?;
        }

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(TagBumpError::InvalidFormat {
                input: tag.to_string(),
            });
        }

        let major = parts[0]
            .parse::<u64>()
            .map_err(|_| TagBumpError::InvalidMajor {
                segment: parts[0].to_string(),
                input: tag.to_string(),
            })?;
        let minor = parts[1]
            .parse::<u64>()
            .map_err(|_| TagBumpError::InvalidMinor {
                segment: parts[1].to_string(),
                input: tag.to_string(),
            })?;
        let patch = parts[2]
            .parse::<u64>()
            .map_err(|_| TagBumpError::InvalidPatch {
                segment: parts[2].to_string(),
                input: tag.to_string(),
            })?;

        Ok(SemanticVersion {
            major,
            minor,
            patch,
            prerelease: prerelease.map(|p| p.to_string()),
        })
    }

    /// Bump the version, always producing a stable release (pre-release dropped)
    pub fn bump(&self, kind: BumpKind) -> Self {
        match kind {
            BumpKind::Major => SemanticVersion::new(self.major + 1, 0, 0),
            BumpKind::Minor => SemanticVersion::new(self.major, self.minor + 1, 0),
            BumpKind::Patch => SemanticVersion::new(self.major, self.minor, self.patch + 1),
        }
    }

    /// True if `self` has strictly higher precedence than `other`
    pub fn is_newer_than(&self, other: &SemanticVersion) -> bool {
        self.cmp(other) == Ordering::Greater
    }

    /// Strict exclusive containment: `start < self < end`
    pub fn is_between(&self, start: &SemanticVersion, end: &SemanticVersion) -> bool {
        self.cmp(start) == Ordering::Greater && self.cmp(end) == Ordering::Less
    }
}

fn validate_prerelease(input: &str, pre: &str) -> Result<()> {
    let valid = !pre.is_empty()
        && pre.split('.').all(|ident| {
            !ident.is_empty() && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    if valid {
        Ok(())
    } else {
        Err(TagBumpError::InvalidFormat {
            input: input.to_string(),
        })
    }
}

/// Compare two pre-release identifiers: numeric compare numerically,
/// numeric ranks below alphanumeric, otherwise lexical.
fn compare_identifiers(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(na), Ok(nb)) => na.cmp(&nb),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let core = self
            .major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch));
        if core != Ordering::Equal {
            return core;
        }

        match (&self.prerelease, &other.prerelease) {
            (None, None) => Ordering::Equal,
            // A stable release outranks any pre-release at the same core version
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                for (ia, ib) in a.split('.').zip(b.split('.')) {
                    let ord = compare_identifiers(ia, ib);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                // Shared identifiers equal: more identifiers wins
                a.split('.').count().cmp(&b.split('.').count())
            }
        }
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

/// Version bump type selecting which component to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl FromStr for BumpKind {
    type Err = TagBumpError;

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
        match self {
            BumpKind::Major => write!(f, "major"),
            BumpKind::Minor => write!(f, "minor"),
            BumpKind::Patch => write!(f, "patch"),
        }
    }
}
