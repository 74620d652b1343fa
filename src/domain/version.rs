use crate::error::{NextverError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Immutable semantic version with decomposed pre-release and build
/// identifier lists. Every transformation produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Dot-separated pre-release identifiers. Empty means release.
    pub pre_release: Vec<String>,
    /// Dot-separated build metadata identifiers.
    pub build: Vec<String>,
}

impl SemanticVersion {
    /// Create a release version without pre-release or build metadata
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre_release: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Parse a version from a tag string (e.g., "v1.2.3-beta.1" or "1.2.3")
    pub fn parse(tag: &str) -> Result<Self> {
        // Remove 'v' or 'V' prefix
        let clean_tag = tag.trim_start_matches('v').trim_start_matches('V');

        let parsed = semver::Version::parse(clean_tag).map_err(|e| {
            NextverError::version(format!("Invalid version format: '{}': {}", tag, e))
        })?;

        let pre_release = if parsed.pre.is_empty() {
            Vec::new()
        } else {
            parsed.pre.as_str().split('.').map(str::to_owned).collect()
        };
        let build = if parsed.build.is_empty() {
            Vec::new()
        } else {
            parsed
                .build
                .as_str()
                .split('.')
                .map(str::to_owned)
                .collect()
        };

        Ok(SemanticVersion {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre_release,
            build,
        })
    }

    /// Replace the core parts, keeping pre-release and build metadata
    #[must_use]
    pub fn with_core(&self, major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre_release: self.pre_release.clone(),
            build: self.build.clone(),
        }
    }

    /// Replace the pre-release identifiers
    #[must_use]
    pub fn with_pre_release<I, S>(&self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SemanticVersion {
            pre_release: identifiers.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    /// Replace the build metadata identifiers
    #[must_use]
    pub fn with_build<I, S>(&self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SemanticVersion {
            build: identifiers.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    /// True when the version carries pre-release identifiers
    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }

    /// True when major, minor, and patch match
    pub fn core_equals(&self, other: &SemanticVersion) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }

    /// The leading pre-release identifier, conventionally the channel label
    pub fn pre_release_label(&self) -> Option<&str> {
        self.pre_release.first().map(String::as_str)
    }
}

impl FromStr for SemanticVersion {
    type Err = NextverError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

/// The three core version parts a commit message can indicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPart {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionPart::Major => write!(f, "major"),
            VersionPart::Minor => write!(f, "minor"),
            VersionPart::Patch => write!(f, "patch"),
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release.join("."))?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build.join("."))?;
        }
        Ok(())
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| cmp_pre_release(&self.pre_release, &other.pre_release))
            .then_with(|| cmp_build(&self.build, &other.build))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A release sorts above any of its pre-releases.
fn cmp_pre_release(a: &[String], b: &[String]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => cmp_identifiers(a, b),
    }
}

/// Build metadata is a final tiebreak; absent metadata sorts first.
fn cmp_build(a: &[String], b: &[String]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => cmp_identifiers(a, b),
    }
}

/// Identifier-wise precedence: numeric identifiers compare numerically and
/// sort below alphanumeric ones; fewer identifiers sort first when all
/// preceding ones are equal.
fn cmp_identifiers(a: &[String], b: &[String]) -> Ordering {
    for (left, right) in a.iter().zip(b.iter()) {
        let ord = match (left.parse::<u64>(), right.parse::<u64>()) {
            // String tiebreak keeps the ordering consistent with equality
            // for degenerate inputs like "01" vs "1".
            (Ok(l), Ok(r)) => l.cmp(&r).then_with(|| left.cmp(right)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => left.cmp(right),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}
