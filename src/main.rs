//! codegraph-setup CLI entry point.
//!
//! Parses arguments, wires up logging, runs the selected command, and turns
//! any failure into a colored one-line error with exit code 1.

use clap::Parser;
use codegraph_setup::cli::Cli;
use colored::Colorize;

fn main() {
    let cli = Cli::parse();
    cli.init_tracing();

    if let Err(error) = cli.execute() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
