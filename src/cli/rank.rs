//! The `rank` command: harvest, score, rank, report.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing::info;

use super::RankArgs;
use crate::config::{AliasTable, RankParams};
use crate::models::OwnershipReport;
use crate::pipeline;
use crate::reporters;
use crate::scoring::ScoreBoard;

/// Default owner count for the bare quick-look invocation.
pub const DEFAULT_COUNT_QUICK: usize = 3;
/// Default owner count for the full `rank` subcommand.
pub const DEFAULT_COUNT_FULL: usize = 10;

pub fn run(args: &RankArgs, workers: usize, default_count: usize) -> Result<()> {
    let params = RankParams {
        tau: args.tau,
        bonus_per_repo: args.bonus_per_repo,
        limit: args.count.unwrap_or(default_count),
    };
    params.validate(&args.repos)?;

    // Aliases load once, before any repository is touched; read-only after
    let aliases = match &args.aliases_file {
        Some(path) => AliasTable::load(path)?,
        None => AliasTable::empty(),
    };

    info!(
        "analyzing {} repositories with tau={} days",
        args.repos.len(),
        params.tau
    );

    let harvest = pipeline::harvest(&args.repos, workers);

    let mut board = ScoreBoard::new(params.tau, Utc::now());
    for batch in &harvest.batches {
        board.fold_repo(&batch.events, &aliases);
    }

    let owners = board.rank(params.bonus_per_repo, params.limit)?;

    let report = OwnershipReport {
        tau: params.tau,
        bonus_per_repo: params.bonus_per_repo,
        limit: params.limit,
        alias_mappings: aliases.len(),
        repos_analyzed: harvest.batches.iter().map(|b| b.repo_id.clone()).collect(),
        repos_skipped: harvest.skipped,
        owners,
    };

    let rendered = reporters::render(&report, &args.format)?;
    write_output(&rendered, args.output.as_deref())
}

fn write_output(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
