use crate::config::CacheConfig;
use crate::domain::SemanticVersion;
use crate::error::{NextverError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// One cached computation, keyed by the HEAD commit and the pre-release
/// channel it was computed for.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    head: String,
    channel: String,
    version: String,
    computed_at: u64,
}

/// TOML-backed computed-version cache under the repository's git directory.
/// Stale, mismatched, or corrupt entries are simply recomputed; the cache is
/// never fatal on the read path.
pub struct VersionCache {
    dir: PathBuf,
    ttl: Duration,
}

impl VersionCache {
    pub fn new(git_dir: &Path, config: &CacheConfig) -> Self {
        VersionCache {
            dir: git_dir.join("nextver"),
            ttl: Duration::from_secs(config.ttl_minutes * 60),
        }
    }

    fn entry_path(&self, channel: &str) -> PathBuf {
        let name = if channel.is_empty() {
            "release".to_string()
        } else {
            channel
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect()
        };
        self.dir.join(format!("{}.toml", name))
    }

    /// A still-valid cached version for this HEAD and channel, if any.
    pub fn lookup(&self, head: &str, channel: &str) -> Option<SemanticVersion> {
        let raw = fs::read_to_string(self.entry_path(channel)).ok()?;
        let entry: CacheEntry = toml::from_str(&raw).ok()?;
        if entry.head != head || entry.channel != channel {
            return None;
        }
        // Future-dated entries (clock moved backwards) count as stale
        let age = now_secs().checked_sub(entry.computed_at)?;
        if Duration::from_secs(age) > self.ttl {
            return None;
        }
        SemanticVersion::parse(&entry.version).ok()
    }

    pub fn store(&self, head: &str, channel: &str, version: &SemanticVersion) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let entry = CacheEntry {
            head: head.to_string(),
            channel: channel.to_string(),
            version: version.to_string(),
            computed_at: now_secs(),
        };
        let raw = toml::to_string(&entry)
            .map_err(|e| NextverError::Cache(format!("Cannot serialize cache entry: {}", e)))?;
        fs::write(self.entry_path(channel), raw)?;
        Ok(())
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
