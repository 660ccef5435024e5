//! This file defines the command-line interface (CLI) for the censor binary.
//!
//! With no arguments the binary is a plain stream filter: stdin in, stdout out,
//! every line checked. All flags are optional refinements of that.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use censor_core::MatchPolicy;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "censor",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Strip console.log and console.error lines from source text",
    long_about = "Reads a source payload (stdin by default), drops every line containing a console.log(...) or console.error(...) call, and writes the remaining lines to stdout. With --path, the payload is only censored when the path names the configured target file."
)]
pub struct Cli {
    /// Suppress all log output.
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging for censor crates (overrides RUST_LOG for them).
    #[arg(long, short = 'd', help = "Enable debug logging.", conflicts_with = "quiet")]
    pub debug: bool,

    /// Read input from this file instead of stdin.
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Path associated with the payload; enables path-gated censoring.
    #[arg(long, value_name = "PATH", help = "Only censor when PATH names a configured target file.")]
    pub path: Option<String>,

    /// Path to a YAML configuration file merged over the built-in defaults.
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Overrides the configured line matching policy.
    #[arg(long, value_enum, value_name = "POLICY", help = "Line matching policy (overrides the configuration).")]
    pub policy: Option<PolicyChoice>,

    /// Fail on input that is not valid UTF-8 instead of replacing bad bytes.
    #[arg(long = "strict-utf8", help = "Fail on invalid UTF-8 instead of replacing it.")]
    pub strict_utf8: bool,

    /// Print a summary of removed lines to stderr.
    #[arg(long, help = "Print a summary of removed lines to stderr.")]
    pub summary: bool,

    /// Write the run summary as JSON to this file.
    #[arg(long = "json-summary", value_name = "FILE", help = "Export the run summary to a JSON file.")]
    pub json_summary: Option<PathBuf>,

    /// Print a unified diff instead of the censored payload.
    #[arg(long, short = 'D', help = "Show a unified diff of the changes instead of the output.")]
    pub diff: bool,
}

/// Line matching policy as exposed on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PolicyChoice {
    /// Drop any line containing console.log or console.error.
    Substring,
    /// Drop only lines with a call: console.log( or console.error(.
    CallPattern,
}

impl From<PolicyChoice> for MatchPolicy {
    fn from(choice: PolicyChoice) -> Self {
        match choice {
            PolicyChoice::Substring => MatchPolicy::Substring,
            PolicyChoice::CallPattern => MatchPolicy::CallPattern,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_is_plain_stream_mode() {
        let cli = Cli::try_parse_from(["censor"]).unwrap();
        assert!(cli.path.is_none());
        assert!(cli.policy.is_none());
        assert!(!cli.diff && !cli.summary && !cli.strict_utf8);
    }

    #[test]
    fn parses_policy_and_path() {
        let cli = Cli::try_parse_from(["censor", "--policy", "substring", "--path", "a/b.ts"]).unwrap();
        assert_eq!(cli.policy, Some(PolicyChoice::Substring));
        assert_eq!(MatchPolicy::from(cli.policy.unwrap()), MatchPolicy::Substring);
        assert_eq!(cli.path.as_deref(), Some("a/b.ts"));
    }

    #[test]
    fn quiet_and_debug_conflict() {
        assert!(Cli::try_parse_from(["censor", "-q", "-d"]).is_err());
    }
}
