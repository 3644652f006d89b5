//! Main entry point for rowdiff CLI

use clap::Parser;
use rowdiff::cli::{setup_logging, Cli};
use rowdiff::commands::execute_command;

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging, raising the filter if verbose was requested
    setup_logging(cli.verbose);

    // Execute the command
    if let Err(e) = execute_command(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
