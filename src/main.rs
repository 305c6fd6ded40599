//! CLI entry point for the rod puzzle generator

use clap::Parser;
use rodgrid::io::cli::{Cli, PuzzleRunner};

fn main() -> rodgrid::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut runner = PuzzleRunner::new(cli);
    runner.process()
}
