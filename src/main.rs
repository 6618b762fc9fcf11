//! kujo CLI entry point
//!
//! Reads a manifest stream, suffixes opted-in Jobs and prints the result.
//! Errors are printed to stderr and the process exits with status 1.

use clap::Parser;
use kujo::cli;
use kujo::core::error::user_friendly_error;

fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
