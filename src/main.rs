//! CLI entry point for the board solver

use clap::Parser;
use lazor::io::cli::{Cli, FileProcessor};

fn main() -> lazor::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()?;
    Ok(())
}
