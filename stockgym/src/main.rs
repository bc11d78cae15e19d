//! # StockGym Runner
//!
//! Entry point for the `stockgym` binary.

use anyhow::Result;
use clap::Parser;
use stockgym::app::{self, RunArgs};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Episode summaries are logged at info, so that is the floor without RUST_LOG.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    app::run(&RunArgs::parse())
}
