//! # Festival - Stage Scheduler
//!
//! The main binary for the Festival stage allocator.
//!
//! ## Usage
//!
//! ```bash
//! # Schedule shows from a file
//! festival lineup.txt
//!
//! # Schedule shows from standard input
//! cat lineup.txt | festival
//!
//! # Other commands
//! festival check lineup.txt
//! festival stats --json lineup.txt
//! ```

use clap::Parser;
use festival::{cli, logging};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    logging::init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
