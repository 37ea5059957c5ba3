//! # Festival CLI Module
//!
//! This module implements the CLI interface for Festival.
//!
//! ## Available Commands
//!
//! - `schedule` - Assign shows to stages and print the report (default)
//! - `check` - Validate input without scheduling
//! - `stats` - Print schedule metrics
//!
//! Every command reads from the given file, or from standard input when no
//! file is given. Subcommand names take precedence over the default
//! command's file argument; use `festival -- check` to read a file named
//! `check`.

mod commands;

use crate::config::{Config, Overrides};
use clap::{Parser, Subcommand};
use festival_core::{FestivalError, ReusePolicy};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Festival - stage scheduler
///
/// Assigns shows to the minimum number of stages so that no two shows on one
/// stage overlap. Input lines are `<name> <start> <end>`, end inclusive.
#[derive(Parser, Debug)]
#[command(name = "festival")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json: bool,

    /// Re-check the schedule for validity and minimality before printing
    #[arg(long, global = true)]
    pub verify: bool,

    /// Path to a TOML config file (defaults to $FESTIVAL_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Stage reuse policy: "lowest-id" or "earliest-released"
    #[arg(long, global = true)]
    pub policy: Option<ReusePolicy>,

    /// Prefix marking comment lines in the input
    #[arg(long, global = true)]
    pub comment: Option<String>,

    /// Input file (reads standard input when omitted)
    pub file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assign shows to stages and print the report
    Schedule {
        /// Input file (reads standard input when omitted)
        file: Option<PathBuf>,
    },

    /// Validate input without scheduling
    Check {
        /// Input file (reads standard input when omitted)
        file: Option<PathBuf>,
    },

    /// Print schedule metrics
    Stats {
        /// Input file (reads standard input when omitted)
        file: Option<PathBuf>,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            comment_marker: self.comment.clone(),
            reuse_policy: self.policy,
            json: self.json,
            verify: self.verify,
        }
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), FestivalError> {
    let config = Config::resolve(cli.config.as_deref())?.with_overrides(cli.overrides());
    tracing::debug!(
        policy = %config.reuse_policy,
        output = ?config.output,
        verify = config.verify,
        "Resolved configuration"
    );

    match cli.command {
        Some(Commands::Schedule { file }) => cmd_schedule(file.as_deref(), &config),
        Some(Commands::Check { file }) => cmd_check(file.as_deref(), &config),
        Some(Commands::Stats { file }) => cmd_stats(file.as_deref(), &config),
        None => {
            // No subcommand - schedule by default
            cmd_schedule(cli.file.as_deref(), &config)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("festival").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn bare_file_runs_default_command() {
        let cli = parse(&["lineup.txt"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("lineup.txt")));
    }

    #[test]
    fn global_flag_before_subcommand() {
        let cli = parse(&["--json", "check", "lineup.txt"]);
        assert!(cli.json);
        assert!(cli.file.is_none());
        assert!(matches!(
            cli.command,
            Some(Commands::Check { file: Some(ref f) }) if f.as_path() == std::path::Path::new("lineup.txt")
        ));
    }

    #[test]
    fn valued_options_before_subcommand() {
        let cli = parse(&["--policy", "earliest-released", "--comment", "//", "stats"]);
        assert_eq!(cli.policy, Some(ReusePolicy::EarliestReleased));
        assert_eq!(cli.comment.as_deref(), Some("//"));
        assert!(matches!(cli.command, Some(Commands::Stats { file: None })));
    }

    #[test]
    fn global_flag_after_subcommand() {
        let cli = parse(&["stats", "--verify"]);
        assert!(cli.verify);
        assert!(matches!(cli.command, Some(Commands::Stats { file: None })));
    }

    #[test]
    fn double_dash_reads_file_named_like_subcommand() {
        let cli = parse(&["--", "check"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("check")));
    }
}
