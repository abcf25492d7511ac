//! Decay scoring, cross-repository accumulation, and ranking.
//!
//! The scoring pipeline is a single pass: normalize the author, resolve it
//! through the alias table, then fold the commit's decay weight into that
//! identity's accumulator. Ranking applies the multi-repository bonus and
//! sorts under an explicit total order so results never depend on map
//! iteration order.

use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};

use crate::config::{normalize_email, AliasTable, ConfigError};
use crate::models::{CommitEvent, RankedOwner};

/// Exponential decay weight of a commit at `commit_time` as seen from
/// `observed_at`, with decay constant `tau` in days.
///
/// Negative ages (clock skew, future-dated commits) clamp to zero, so the
/// weight is always in `(0, 1]` and `weight(now) == 1`.
pub fn decay_weight(commit_time: DateTime<Utc>, observed_at: DateTime<Utc>, tau: f64) -> f64 {
    let age_days = (observed_at - commit_time).num_seconds() as f64 / 86_400.0;
    (-age_days.max(0.0) / tau).exp()
}

/// Per-identity running totals built while consuming commit events.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    /// Sum of decay weights across all repositories
    pub raw_score: f64,
    /// Distinct repositories contributed to
    pub repos: BTreeSet<String>,
    /// Distinct raw emails folded into this identity (canonical excluded)
    pub aliases: BTreeSet<String>,
}

/// Run-wide accumulation of scores, keyed by canonical email.
///
/// Owned by the single aggregation phase of a run; per-repository event
/// batches are folded in one at a time, never concurrently.
#[derive(Debug)]
pub struct ScoreBoard {
    tau: f64,
    observed_at: DateTime<Utc>,
    accumulators: HashMap<String, Accumulator>,
}

impl ScoreBoard {
    pub fn new(tau: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            tau,
            observed_at,
            accumulators: HashMap::new(),
        }
    }

    /// Fold one repository's commit events into the run-wide totals.
    ///
    /// Unscoreable events (empty author, epoch timestamp) are skipped
    /// silently and leave no trace in any accumulator.
    pub fn fold_repo(&mut self, events: &[CommitEvent], aliases: &AliasTable) {
        for event in events {
            if !event.is_scoreable() {
                continue;
            }

            let normalized = normalize_email(&event.author);
            let canonical = aliases.resolve(&event.author);
            let weight = decay_weight(event.timestamp, self.observed_at, self.tau);

            let acc = self.accumulators.entry(canonical.clone()).or_default();
            acc.raw_score += weight;
            acc.repos.insert(event.repo.clone());
            if normalized != canonical {
                acc.aliases.insert(normalized);
            }
        }
    }

    /// Number of distinct identities seen so far.
    pub fn identity_count(&self) -> usize {
        self.accumulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulators.is_empty()
    }

    /// Apply the multi-repository bonus and produce the ranked, truncated
    /// owner list.
    ///
    /// The multiplier is `1.0` for a single-repository contributor and
    /// `1.0 + (repos - 1) * bonus_per_repo` beyond that. Ordering is a
    /// total order: final score descending, then repository count
    /// descending, then canonical email ascending. `limit == 0` returns
    /// an empty list.
    pub fn rank(&self, bonus_per_repo: f64, limit: usize) -> Result<Vec<RankedOwner>, ConfigError> {
        if bonus_per_repo < 0.0 {
            return Err(ConfigError::NegativeBonus(bonus_per_repo));
        }

        let mut owners: Vec<RankedOwner> = self
            .accumulators
            .iter()
            .map(|(canonical, acc)| {
                let repo_count = acc.repos.len();
                let multiplier = if repo_count > 1 {
                    1.0 + (repo_count - 1) as f64 * bonus_per_repo
                } else {
                    1.0
                };
                RankedOwner {
                    canonical: canonical.clone(),
                    final_score: acc.raw_score * multiplier,
                    raw_score: acc.raw_score,
                    repo_count,
                    aliases: acc.aliases.iter().cloned().collect(),
                }
            })
            .collect();

        owners.sort_by(|a, b| {
            b.final_score
                .total_cmp(&a.final_score)
                .then_with(|| b.repo_count.cmp(&a.repo_count))
                .then_with(|| a.canonical.cmp(&b.canonical))
        });
        owners.truncate(limit);
        Ok(owners)
    }
}
