//! CLI entry point for dot-space pattern generation

use clap::Parser;
use dotspace::io::cli::{Cli, Runner};
use dotspace::io::logging::init_logging;

fn main() -> dotspace::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);
    let runner = Runner::new(cli);
    runner.run().map(|_| ())
}
