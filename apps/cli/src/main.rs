//! docpush CLI — publish handler documentation to a ShowDoc-compatible store.
//!
//! Walks a Markdown documentation tree and upserts each page into the remote
//! store, prints it locally, or both.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
