use crate::domain::SemanticVersion;
use crate::error::{NextverError, Result};
use crate::git::{Repository, VersionTag};
use git2::{Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct GitRepository {
    repo: Git2Repo,
}

impl GitRepository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(GitRepository { repo })
    }

    /// The repository's git directory, where the version cache lives
    pub fn git_dir(&self) -> PathBuf {
        self.repo.path().to_path_buf()
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self.repo.head()?;
        head.target()
            .ok_or_else(|| NextverError::repository("HEAD has no target commit"))
    }

    fn tag_oid(&self, name: &str) -> Result<Option<Oid>> {
        let reference_name = format!("refs/tags/{}", name);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => {
                let oid = reference
                    .peel(git2::ObjectType::Commit)
                    .map_err(|e| {
                        NextverError::repository(format!("Cannot peel tag '{}': {}", name, e))
                    })?
                    .id();

                Ok(Some(oid))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(NextverError::repository(format!(
                "Cannot resolve tag '{}': {}",
                name, e
            ))),
        }
    }
}

impl Repository for GitRepository {
    fn head_id(&self) -> Result<String> {
        Ok(self.head_oid()?.to_string())
    }

    fn latest_version_tag(&self, prefix: &str) -> Result<Option<VersionTag>> {
        let head = self.head_oid()?;
        let names = self.repo.tag_names(None)?;

        let mut best: Option<VersionTag> = None;
        for name in names.iter().flatten() {
            let Some(stripped) = name.strip_prefix(prefix) else {
                continue;
            };
            let Ok(version) = SemanticVersion::parse(stripped) else {
                continue;
            };
            let Some(oid) = self.tag_oid(name)? else {
                continue;
            };
            if oid != head && !self.repo.graph_descendant_of(head, oid)? {
                continue;
            }
            if best.as_ref().map_or(true, |b| version > b.version) {
                best = Some(VersionTag {
                    name: name.to_string(),
                    version,
                });
            }
        }

        Ok(best)
    }

    fn messages_since(&self, tag_name: Option<&str>) -> Result<Vec<String>> {
        let stop = match tag_name {
            Some(name) => self.tag_oid(name)?,
            None => None,
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(self.head_oid()?)?;

        let mut messages = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;

            if Some(oid) == stop {
                break;
            }

            let commit = self.repo.find_commit(oid)?;
            messages.push(commit.message().unwrap_or("").to_string());
        }

        messages.reverse();
        Ok(messages)
    }
}

// SAFETY: GitRepository only performs read operations; libgit2's object
// database access is thread-safe for reads.
unsafe impl Sync for GitRepository {}
