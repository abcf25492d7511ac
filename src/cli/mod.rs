//! CLI command definitions and handlers

mod init;
pub(crate) mod rank;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Gitowner - who really owns this code?
///
/// 100% LOCAL - Works on repositories already on disk. No data leaves your machine.
#[derive(Parser, Debug)]
#[command(name = "gitowner")]
#[command(
    version,
    about = "Rank the most likely owners of git repositories by decay-weighted commit activity",
    long_about = "Gitowner walks the commit history of one or more local git repositories \
and ranks contributors by exponentially decayed commit recency, merging aliased \
email addresses and rewarding breadth across repositories.\n\n\
100% LOCAL — Works on repositories already on disk. No data leaves your machine.\n\n\
Run without a subcommand for a quick top-3:\n  \
gitowner path/to/repo",
    after_help = "\
Examples:
  gitowner .                               Quick top-3 for the current repo
  gitowner rank repo1 repo2                Full ranking across two repos
  gitowner rank . --tau 90 --count 5       Emphasize the last ~3 months
  gitowner rank . --aliases-file aliases.toml   Merge aliased emails
  gitowner rank . --format json            JSON output for scripting
  gitowner init                            Write an example aliases.toml",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    #[command(flatten)]
    pub rank_args: RankArgs,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel repository workers (1-64)
    #[arg(long, global = true, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments shared by the bare invocation and the `rank` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    /// Local repository paths to analyze
    #[arg(value_name = "REPO", required = true)]
    pub repos: Vec<PathBuf>,

    /// Temporal decay constant in days
    #[arg(long, default_value_t = 365.0)]
    pub tau: f64,

    /// Number of most likely owners to show (default: 3 quick mode, 10 rank)
    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    /// Multiplicative bonus rate per additional repository
    /// (0.1 means +10% for the 2nd repo)
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub bonus_per_repo: f64,

    /// Optional path to a TOML file defining email aliases
    #[arg(long, value_name = "FILE")]
    pub aliases_file: Option<PathBuf>,

    /// Output format: text, json
    #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank likely owners across one or more repositories
    #[command(after_help = "\
Examples:
  gitowner rank repo1 repo2                    Rank across two repos
  gitowner rank . --count 5                    Show the top 5 owners
  gitowner rank . --tau 90                     Faster decay (recent work dominates)
  gitowner rank . --bonus-per-repo 0.25        Stronger breadth bonus
  gitowner rank . --format json -o owners.json JSON to a file")]
    Rank(RankArgs),

    /// Write an example aliases.toml in the current directory
    Init {
        /// Overwrite an existing aliases.toml
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Rank(args)) => rank::run(&args, cli.workers, rank::DEFAULT_COUNT_FULL),

        Some(Commands::Init { force }) => init::run(force),

        Some(Commands::Version) => {
            println!("gitowner {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }

        // Bare invocation: quick top-3
        None => rank::run(&cli.rank_args, cli.workers, rank::DEFAULT_COUNT_QUICK),
    }
}
