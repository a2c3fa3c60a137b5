//! CLI definition for racr.
//!
//! One positional target plus flags for the command template, worker
//! count, config path, and verbosity.

use clap::Parser;
use std::path::PathBuf;

/// Racr - race concurrent runs of a command until one succeeds
#[derive(Parser, Debug)]
#[command(name = "racr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target value handed to every attempt
    pub target: i64,

    /// Command to race; the target is appended as its last argument
    #[arg(short = 'x', long)]
    pub command: Option<String>,

    /// Number of concurrent workers (default: available CPU cores)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_target_only() {
        let cli = Cli::try_parse_from(["racr", "42"]).unwrap();
        assert_eq!(cli.target, 42);
        assert!(cli.command.is_none());
        assert!(cli.workers.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_cli_missing_target_is_usage_error() {
        let result = Cli::try_parse_from(["racr"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_non_integer_target_is_usage_error() {
        let result = Cli::try_parse_from(["racr", "fifty"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_negative_target_parses() {
        let cli = Cli::try_parse_from(["racr", "--", "-5"]).unwrap();
        assert_eq!(cli.target, -5);
    }

    #[test]
    fn test_cli_command_flag() {
        let cli =
            Cli::try_parse_from(["racr", "42", "-x", "npx tsx level_finder.test.ts"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("npx tsx level_finder.test.ts"));
    }

    #[test]
    fn test_cli_workers_flag() {
        let cli = Cli::try_parse_from(["racr", "42", "-w", "8"]).unwrap();
        assert_eq!(cli.workers, Some(8));
    }

    #[test]
    fn test_cli_config_option() {
        let cli = Cli::try_parse_from(["racr", "42", "-c", "/path/to/racr.yml"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/path/to/racr.yml")));
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["racr", "42", "-v"]).unwrap();
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_help_works() {
        // Verify the command definition is self-consistent
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["racr", "--version"]);
        // Version flag causes early exit with error (expected)
        assert!(result.is_err());
    }
}
