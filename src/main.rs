//! CLI entry point for the patch co-occurrence probability analysis

use clap::Parser;
use patchprob::io::cli::{Cli, FileProcessor};

fn main() -> patchprob::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process().map(|_| ())
}
