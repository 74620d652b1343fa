// tests/integration_test.rs
use std::process::Command;

#[test]
fn test_nextver_help() {
    let output = Command::new("cargo")
        .args(&["run", "--bin", "nextver", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("nextver"));
    assert!(stdout.contains("Compute the next semantic version"));
}

#[cfg(test)]
mod git_workflow_tests {
    use git2::Repository as Git2Repo;
    use nextver::cache::VersionCache;
    use nextver::config::CacheConfig;
    use nextver::domain::{CommitMessage, SemanticVersion};
    use nextver::engine::VersionCalculator;
    use nextver::git::{GitRepository, Repository};
    use nextver::preset::VersioningPreset;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    // Helper function to script a temporary git repo: one tagged release
    // commit followed by one feature commit.
    fn setup_test_repo() -> TempDir {
        let temp_dir = TempDir::new().expect("Could not create temp dir");

        let repo = Git2Repo::init(temp_dir.path()).expect("Could not init git repo");
        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        let content_path = temp_dir.path().join("README.md");
        fs::write(&content_path, b"Initial content\n").expect("Could not write initial file");

        let mut index = repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");

        let commit_id = repo
            .commit(
                Some("HEAD"),
                &repo.signature().expect("Could not get sig"),
                &repo.signature().expect("Could not get sig"),
                "Initial commit",
                &tree,
                &[],
            )
            .expect("Could not create commit");

        repo.tag_lightweight("v1.0.0", &repo.find_object(commit_id, None).unwrap(), false)
            .expect("Could not create tag");

        fs::write(&content_path, b"Updated content\n").expect("Could not write updated file");

        let mut index = repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");

        repo.commit(
            Some("HEAD"),
            &repo.signature().expect("Could not get sig"),
            &repo.signature().expect("Could not get sig"),
            "feat: add new feature",
            &tree,
            &[&repo.find_commit(commit_id).unwrap()],
        )
        .expect("Could not create commit");

        temp_dir
    }

    fn setup_untagged_repo() -> TempDir {
        let temp_dir = TempDir::new().expect("Could not create temp dir");

        let repo = Git2Repo::init(temp_dir.path()).expect("Could not init git repo");
        {
            let mut config = repo.config().expect("Could not get config");
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }

        let content_path = temp_dir.path().join("README.md");
        fs::write(&content_path, b"Initial content\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(
            Some("HEAD"),
            &repo.signature().unwrap(),
            &repo.signature().unwrap(),
            "fix: first commit",
            &tree,
            &[],
        )
        .unwrap();

        temp_dir
    }

    #[test]
    fn test_latest_version_tag() {
        let temp_dir = setup_test_repo();
        let repo = GitRepository::open(temp_dir.path()).expect("Could not open repo");

        let tag = repo
            .latest_version_tag("v")
            .expect("Could not enumerate tags")
            .expect("Should find the release tag");
        assert_eq!(tag.name, "v1.0.0");
        assert_eq!(tag.version, SemanticVersion::new(1, 0, 0));
    }

    #[test]
    fn test_messages_since_tag() {
        let temp_dir = setup_test_repo();
        let repo = GitRepository::open(temp_dir.path()).expect("Could not open repo");

        let messages = repo
            .messages_since(Some("v1.0.0"))
            .expect("Could not walk history");
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("feat: add new feature"));
    }

    #[test]
    fn test_untagged_repo_walks_whole_history() {
        let temp_dir = setup_untagged_repo();
        let repo = GitRepository::open(temp_dir.path()).expect("Could not open repo");

        assert!(repo.latest_version_tag("v").unwrap().is_none());
        let messages = repo.messages_since(None).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("fix: first commit"));

        // The 0.0.0 seed counts as released, so the fix moves the core
        let preset = VersioningPreset::named("conventional-commits").unwrap();
        let calculation = VersionCalculator::new(&preset, SemanticVersion::new(0, 0, 0))
            .calculate(CommitMessage::sequence(messages))
            .unwrap();
        assert_eq!(calculation.version.to_string(), "0.0.1");
        assert!(calculation.contains_patch_increment);
    }

    #[test]
    fn test_full_calculation_from_repo() {
        let temp_dir = setup_test_repo();
        let repo = GitRepository::open(temp_dir.path()).expect("Could not open repo");

        let tag = repo.latest_version_tag("v").unwrap().unwrap();
        let messages = repo.messages_since(Some(&tag.name)).unwrap();

        let preset = VersioningPreset::named("conventional-commits").unwrap();
        let calculation = VersionCalculator::new(&preset, tag.version)
            .calculate(CommitMessage::sequence(messages))
            .unwrap();

        assert_eq!(calculation.version.to_string(), "1.1.0");
        assert!(calculation.contains_minor_increment);
    }

    #[test]
    fn test_cache_round_trip_in_git_dir() {
        let temp_dir = setup_test_repo();
        let repo = GitRepository::open(temp_dir.path()).expect("Could not open repo");
        let head = repo.head_id().unwrap();

        let cache = VersionCache::new(&repo.git_dir(), &CacheConfig::default());
        let version = SemanticVersion::parse("1.1.0").unwrap();
        cache.store(&head, "", &version).expect("Could not store");
        assert_eq!(cache.lookup(&head, ""), Some(version));
        assert_eq!(cache.lookup("0000000000000000", ""), None);
    }
}
