//! Parallel repository harvest using crossbeam channels
//!
//! Walking a repository's history is I/O-bound and repository-local, so
//! repositories are processed on N worker threads with no shared mutable
//! state. Each worker sends either a repository's complete event batch or
//! a skip record back over a bounded channel; the caller folds batches into
//! the score board sequentially, which keeps the accumulation a single
//! serialized critical section.
//!
//! A repository that fails to open or walk is skipped with a warning and
//! contributes nothing; the remaining repositories are unaffected.

use crossbeam_channel::bounded;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, warn};

use crate::git::GitHistory;
use crate::models::{CommitEvent, SkippedRepo};

/// One successfully walked repository.
pub struct RepoBatch {
    pub repo_id: String,
    pub events: Vec<CommitEvent>,
}

/// Outcome of the harvest phase across all repositories.
pub struct HarvestResult {
    /// Complete event batches, sorted by repository id
    pub batches: Vec<RepoBatch>,
    /// Repositories that could not be processed, sorted by repository id
    pub skipped: Vec<SkippedRepo>,
}

enum Outcome {
    Walked(RepoBatch),
    Skipped(SkippedRepo),
}

/// Walk all repositories in parallel and collect their commit events.
///
/// Batches are all-or-nothing per repository: open and HEAD-resolution
/// failures occur strictly before any event is emitted.
pub fn harvest(repos: &[PathBuf], workers: usize) -> HarvestResult {
    let workers = workers.clamp(1, repos.len().max(1));
    let (path_tx, path_rx) = bounded::<PathBuf>(workers * 2);
    let (outcome_tx, outcome_rx) = bounded::<Outcome>(workers * 2);

    // Producer feeds repository paths
    let paths: Vec<PathBuf> = repos.to_vec();
    let producer = thread::spawn(move || {
        for path in paths {
            if path_tx.send(path).is_err() {
                break;
            }
        }
        // dropping path_tx closes the channel and lets workers drain
    });

    // Workers open and walk one repository at a time
    let mut worker_handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let path_rx = path_rx.clone();
        let outcome_tx = outcome_tx.clone();
        worker_handles.push(thread::spawn(move || {
            for path in path_rx.iter() {
                let outcome = walk_one(&path);
                if outcome_tx.send(outcome).is_err() {
                    break;
                }
            }
        }));
    }
    drop(path_rx);
    drop(outcome_tx);

    // Single consumer collects outcomes
    let mut batches = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcome_rx.iter() {
        match outcome {
            Outcome::Walked(batch) => batches.push(batch),
            Outcome::Skipped(skip) => {
                warn!("skipping repository {}: {}", skip.repo, skip.reason);
                skipped.push(skip);
            }
        }
    }

    let _ = producer.join();
    for handle in worker_handles {
        let _ = handle.join();
    }

    // Arrival order depends on thread scheduling; sort for reproducible output
    batches.sort_by(|a, b| a.repo_id.cmp(&b.repo_id));
    skipped.sort_by(|a, b| a.repo.cmp(&b.repo));

    HarvestResult { batches, skipped }
}

fn walk_one(path: &Path) -> Outcome {
    let repo_id = path.display().to_string();
    debug!("processing repository {}", repo_id);

    let result = GitHistory::open(path).and_then(|history| history.commit_events(&repo_id));
    match result {
        Ok(events) => Outcome::Walked(RepoBatch { repo_id, events }),
        Err(e) => Outcome::Skipped(SkippedRepo {
            repo: repo_id,
            reason: format!("{:#}", e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::Utc;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::tempdir;

    fn repo_with_commit(dir: &Path, email: &str) -> Result<()> {
        let repo = Repository::init(dir)?;
        std::fs::write(dir.join("f.txt"), "x")?;
        let tree_id = {
            let mut index = repo.index()?;
            index.add_path(Path::new("f.txt"))?;
            index.write()?;
            index.write_tree()?
        };
        let tree = repo.find_tree(tree_id)?;
        let sig = Signature::new("Test", email, &git2::Time::new(Utc::now().timestamp(), 0))?;
        repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])?;
        Ok(())
    }

    #[test]
    fn test_harvest_multiple_repos() -> Result<()> {
        let a = tempdir()?;
        let b = tempdir()?;
        repo_with_commit(a.path(), "a@x.com")?;
        repo_with_commit(b.path(), "b@x.com")?;

        let result = harvest(&[a.path().to_path_buf(), b.path().to_path_buf()], 4);
        assert_eq!(result.batches.len(), 2);
        assert!(result.skipped.is_empty());
        assert!(result.batches.iter().all(|batch| batch.events.len() == 1));
        Ok(())
    }

    #[test]
    fn test_failed_repo_is_isolated() -> Result<()> {
        let good = tempdir()?;
        repo_with_commit(good.path(), "good@x.com")?;
        let missing = good.path().join("does-not-exist");

        let result = harvest(&[missing.clone(), good.path().to_path_buf()], 2);
        assert_eq!(result.batches.len(), 1);
        assert_eq!(result.batches[0].events[0].author, "good@x.com");
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].repo, missing.display().to_string());
        Ok(())
    }

    #[test]
    fn test_empty_repo_is_skipped_not_fatal() -> Result<()> {
        let dir = tempdir()?;
        Repository::init(dir.path())?; // no commits, HEAD unresolvable

        let result = harvest(&[dir.path().to_path_buf()], 1);
        assert!(result.batches.is_empty());
        assert_eq!(result.skipped.len(), 1);
        Ok(())
    }
}
