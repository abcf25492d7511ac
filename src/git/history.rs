//! Git history extraction using libgit2
//!
//! Walks every commit reachable from HEAD and converts it into a stream of
//! commit events for the scoring pipeline, using the git2 crate (Rust
//! bindings to libgit2).

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use git2::{Repository, Sort};
use std::path::Path;
use tracing::debug;

use crate::models::CommitEvent;

/// Git history reader for a single repository.
pub struct GitHistory {
    repo: Repository,
}

impl GitHistory {
    /// Open a git repository.
    ///
    /// # Arguments
    /// * `path` - Path to the repository (or any subdirectory)
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .with_context(|| format!("Failed to open git repository at {:?}", path))?;
        debug!("Opened git repository at {:?}", repo.path());
        Ok(Self { repo })
    }

    /// Check if a path is inside a git repository.
    pub fn is_git_repo(path: &Path) -> bool {
        Repository::discover(path).is_ok()
    }

    /// Collect one commit event per commit reachable from HEAD.
    ///
    /// All failures (no HEAD, unreadable odb) surface before any event is
    /// returned, so a caller either gets the repository's full history or
    /// nothing. Author timestamps that don't map to a valid instant fall
    /// back to the epoch, which the scorer skips.
    pub fn commit_events(&self, repo_id: &str) -> Result<Vec<CommitEvent>> {
        let mut revwalk = self
            .repo
            .revwalk()
            .context("Failed to start revision walk")?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk
            .push_head()
            .context("Failed to resolve HEAD (empty repository?)")?;

        let mut events = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let author = commit.author();
            events.push(CommitEvent {
                author: author.email().unwrap_or("").to_string(),
                timestamp: git_time_to_utc(&author.when()),
                repo: repo_id.to_string(),
            });
        }

        debug!("walked {} commits in {}", events.len(), repo_id);
        Ok(events)
    }
}

/// Convert a git timestamp to UTC, falling back to the epoch.
fn git_time_to_utc(time: &git2::Time) -> DateTime<Utc> {
    Utc.timestamp_opt(time.seconds(), 0)
        .single()
        .unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::tempdir;

    fn create_test_repo() -> Result<(tempfile::TempDir, Repository)> {
        let dir = tempdir()?;
        let repo = Repository::init(dir.path())?;

        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;

        Ok((dir, repo))
    }

    /// Commit a file with a given author email and timestamp (seconds).
    fn commit_as(
        repo: &Repository,
        file: &str,
        email: &str,
        when_secs: i64,
    ) -> Result<()> {
        let workdir = repo.workdir().context("bare repo")?;
        std::fs::write(workdir.join(file), format!("content for {}", when_secs))?;

        let tree_id = {
            let mut index = repo.index()?;
            index.add_path(Path::new(file))?;
            index.write()?;
            index.write_tree()?
        };
        let tree = repo.find_tree(tree_id)?;
        let sig = Signature::new("Test User", email, &git2::Time::new(when_secs, 0))?;

        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit()?],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, "test commit", &tree, &parent_refs)?;
        Ok(())
    }

    #[test]
    fn test_open_missing_repo_fails() {
        let dir = tempdir().unwrap();
        assert!(GitHistory::open(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_is_git_repo() -> Result<()> {
        let (dir, _repo) = create_test_repo()?;
        assert!(GitHistory::is_git_repo(dir.path()));

        let non_repo = tempdir()?;
        assert!(!GitHistory::is_git_repo(non_repo.path()));
        Ok(())
    }

    #[test]
    fn test_empty_repo_has_no_head() -> Result<()> {
        let (dir, _repo) = create_test_repo()?;
        let history = GitHistory::open(dir.path())?;
        // no commits yet: HEAD cannot be resolved, nothing is emitted
        assert!(history.commit_events("r").is_err());
        Ok(())
    }

    #[test]
    fn test_commit_events() -> Result<()> {
        let (dir, repo) = create_test_repo()?;
        let base = Utc::now().timestamp();
        commit_as(&repo, "a.txt", "alice@x.com", base - 86_400)?;
        commit_as(&repo, "b.txt", "Bob@Z.com", base)?;

        let history = GitHistory::open(dir.path())?;
        let events = history.commit_events("myrepo")?;
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.repo == "myrepo"));

        let mut authors: Vec<&str> = events.iter().map(|e| e.author.as_str()).collect();
        authors.sort();
        // raw emails are emitted untouched; normalization happens later
        assert_eq!(authors, vec!["Bob@Z.com", "alice@x.com"]);
        assert!(events.iter().all(|e| e.is_scoreable()));
        Ok(())
    }
}
