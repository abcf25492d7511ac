//! Gitowner - decay-weighted repository ownership ranking
//!
//! A fast, local-first CLI that walks the commit history of one or more
//! git repositories and ranks the contributors most likely to own them,
//! weighting recent work more heavily than old work.

// Allow dead code for public API methods exposed for tests and future features
#![allow(dead_code)]

pub mod cli;
pub mod config;
pub mod git;
pub mod models;
mod pipeline;
mod reporters;
pub mod scoring;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over --log-level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
