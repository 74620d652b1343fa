//! Read-only git access for version calculation
//!
//! The engine never touches a repository itself; it consumes a start version
//! and an ordered message stream. This module supplies both through the
//! [Repository] trait, with two implementations:
//!
//! - [repository::GitRepository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: a scripted implementation for testing
//!
//! Most code should depend on the trait rather than a concrete type.
//!
//! ```rust
//! # use nextver::git::{MockRepository, Repository};
//! # fn main() -> nextver::Result<()> {
//! let repo = MockRepository::new("abc123")
//!     .with_tag("v1.0.0")
//!     .with_messages(["feat: add login"]);
//! let tag = repo.latest_version_tag("v")?.unwrap();
//! assert_eq!(tag.version.to_string(), "1.0.0");
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::GitRepository;

use crate::domain::SemanticVersion;
use crate::error::Result;

/// A tag whose name parses as a version under the configured prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    pub name: String,
    pub version: SemanticVersion,
}

/// Read-only repository operations the calculation workflow needs.
///
/// Implementors must be `Send + Sync`. No write operation belongs here; the
/// tool computes versions, it never creates or pushes tags.
pub trait Repository: Send + Sync {
    /// The commit id of HEAD, used as the cache key.
    fn head_id(&self) -> Result<String>;

    /// The highest version tag reachable from HEAD whose name starts with
    /// `prefix` and parses as a semantic version.
    ///
    /// # Returns
    /// * `Ok(Some(VersionTag))` - the start version for the calculation
    /// * `Ok(None)` - no release tag yet; callers seed from 0.0.0
    fn latest_version_tag(&self, prefix: &str) -> Result<Option<VersionTag>>;

    /// Commit messages after `tag_name` up to HEAD in chronological order
    /// (oldest first, replay order). `None` walks the whole history.
    fn messages_since(&self, tag_name: Option<&str>) -> Result<Vec<String>>;
}
