use crate::domain::SemanticVersion;
use crate::error::Result;
use crate::git::{Repository, VersionTag};

/// Scripted repository for testing without actual git operations
pub struct MockRepository {
    head: String,
    tags: Vec<String>,
    messages: Vec<String>,
}

impl MockRepository {
    /// Create a mock repository with the given HEAD id
    pub fn new(head: impl Into<String>) -> Self {
        MockRepository {
            head: head.into(),
            tags: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Add a tag name; every tag counts as reachable from HEAD
    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(name.into());
        self
    }

    /// Script the messages returned after the latest tag, oldest first
    #[must_use]
    pub fn with_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.messages = messages.into_iter().map(Into::into).collect();
        self
    }
}

impl Repository for MockRepository {
    fn head_id(&self) -> Result<String> {
        Ok(self.head.clone())
    }

    fn latest_version_tag(&self, prefix: &str) -> Result<Option<VersionTag>> {
        let mut best: Option<VersionTag> = None;
        for name in &self.tags {
            let Some(stripped) = name.strip_prefix(prefix) else {
                continue;
            };
            let Ok(version) = SemanticVersion::parse(stripped) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| version > b.version) {
                best = Some(VersionTag {
                    name: name.clone(),
                    version,
                });
            }
        }
        Ok(best)
    }

    fn messages_since(&self, _tag_name: Option<&str>) -> Result<Vec<String>> {
        Ok(self.messages.clone())
    }
}
