//! codemat - Software-copyright code material generator
//!
//! codemat:
//! - Walks a source directory for files with accepted suffixes
//! - Concatenates them behind per-file banners
//! - Writes the first and last N lines plus statistics to a report file

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_tracing(cli.quiet, cli.verbose);
    cli::run(cli)
}
