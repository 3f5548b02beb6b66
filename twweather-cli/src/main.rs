//! Binary crate for the `twweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive dashboard (card ⇄ settings)
//! - Human-friendly, themed card output

use clap::Parser;

mod app;
mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
