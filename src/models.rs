//! Core data models for Gitowner
//!
//! These models are used throughout the codebase for representing
//! commit events, ranked owners, and the final ownership report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One commit observed while walking a repository's history.
///
/// Produced by the git history reader, one per commit reachable from HEAD.
/// Immutable once produced; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitEvent {
    /// Raw author email as recorded in the commit (not yet normalized)
    pub author: String,
    /// Author timestamp of the commit
    pub timestamp: DateTime<Utc>,
    /// Identifier of the repository this commit came from
    pub repo: String,
}

impl CommitEvent {
    /// Whether this event carries enough data to be scored.
    ///
    /// Commits with an empty author email or a timestamp at (or before)
    /// the Unix epoch are skipped silently: they contribute neither to
    /// scores nor to repository/alias sets.
    pub fn is_scoreable(&self) -> bool {
        !self.author.trim().is_empty() && self.timestamp.timestamp() > 0
    }
}

/// A contributor with their final ranking data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedOwner {
    /// Canonical email this identity was merged into
    pub canonical: String,
    /// Decayed score after the multi-repository bonus
    pub final_score: f64,
    /// Sum of decay weights before any bonus
    pub raw_score: f64,
    /// Number of distinct repositories contributed to
    pub repo_count: usize,
    /// Alias emails folded into this identity (sorted, canonical excluded)
    pub aliases: Vec<String>,
}

/// A repository that could not be processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRepo {
    pub repo: String,
    pub reason: String,
}

/// Full result of one ranking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipReport {
    /// Decay constant in days
    pub tau: f64,
    /// Multiplicative bonus rate per additional repository
    pub bonus_per_repo: f64,
    /// Requested maximum number of owners
    pub limit: usize,
    /// Number of alias mappings in effect
    pub alias_mappings: usize,
    /// Repositories that were walked successfully
    pub repos_analyzed: Vec<String>,
    /// Repositories skipped due to open/walk failures
    pub repos_skipped: Vec<SkippedRepo>,
    /// Ranked owners, best first
    pub owners: Vec<RankedOwner>,
}
