//! Command-line interface for safehaven.
//!
//! This module provides the CLI structure for the `safehaven` binary.

mod commands;
pub mod handlers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AdminCommand, ConfigCommand, ContactCommand, ContactSendArgs, HelpCommand, HelpStatusArg,
    HelpSubmitArgs, LegalCommand, LegalStatusArg, LegalSubmitArgs, OutputFormat, UrgencyArg,
};

/// safehaven - Confidential intake for counselling and legal help
///
/// Records requests for counselling and legal consultations, and contact
/// messages, in a local database that counsellors and administrators can
/// review and update.
#[derive(Debug, Parser)]
#[command(name = "safehaven")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Counselling requests
    #[command(subcommand)]
    Counselling(HelpCommand),

    /// Legal consultation requests
    #[command(subcommand)]
    Legal(LegalCommand),

    /// Contact messages
    #[command(subcommand)]
    Contact(ContactCommand),

    /// Record counts and data management
    #[command(subcommand)]
    Admin(AdminCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "safehaven");
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(
            parse(&["safehaven", "-q", "admin", "stats"]).verbosity(),
            Verbosity::Quiet
        );
        assert_eq!(
            parse(&["safehaven", "admin", "stats"]).verbosity(),
            Verbosity::Normal
        );
        assert_eq!(
            parse(&["safehaven", "-v", "admin", "stats"]).verbosity(),
            Verbosity::Verbose
        );
        assert_eq!(
            parse(&["safehaven", "-vv", "admin", "stats"]).verbosity(),
            Verbosity::Trace
        );
    }

    #[test]
    fn test_parse_help_submit() {
        let cli = parse(&[
            "safehaven",
            "counselling",
            "submit",
            "--name",
            "Alex",
            "--email",
            "alex@example.org",
            "--phone",
            "0123456789",
            "--message",
            "Need support",
        ]);
        let Command::Counselling(HelpCommand::Submit(args)) = cli.command else {
            panic!("expected counselling submit");
        };
        assert_eq!(args.name, "Alex");
        assert_eq!(args.message, "Need support");
    }

    #[test]
    fn test_parse_help_submit_requires_fields() {
        let result = Cli::try_parse_from(["safehaven", "counselling", "submit", "--name", "Alex"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_help_list_filters() {
        let cli = parse(&[
            "safehaven",
            "counselling",
            "list",
            "--email",
            "alex@example.org",
            "--status",
            "in-progress",
            "--format",
            "json",
        ]);
        assert!(matches!(
            cli.command,
            Command::Counselling(HelpCommand::List {
                email: Some(_),
                status: Some(HelpStatusArg::InProgress),
                format: OutputFormat::Json,
            })
        ));
    }

    #[test]
    fn test_parse_help_status() {
        let cli = parse(&["safehaven", "counselling", "status", "abc", "completed"]);
        assert!(matches!(
            cli.command,
            Command::Counselling(HelpCommand::Status {
                status: HelpStatusArg::Completed,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_help_status_rejects_unknown() {
        let result = Cli::try_parse_from(["safehaven", "counselling", "status", "abc", "archived"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_legal_submit_default_urgency() {
        let cli = parse(&[
            "safehaven",
            "legal",
            "submit",
            "--name",
            "Sam",
            "--email",
            "sam@example.org",
            "--phone",
            "0123456789",
            "--details",
            "Custody",
        ]);
        let Command::Legal(LegalCommand::Submit(args)) = cli.command else {
            panic!("expected legal submit");
        };
        assert_eq!(args.urgency, UrgencyArg::Medium);
    }

    #[test]
    fn test_parse_admin_clear() {
        let cli = parse(&["safehaven", "admin", "clear", "--yes"]);
        assert!(matches!(
            cli.command,
            Command::Admin(AdminCommand::Clear { yes: true })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["safehaven", "-c", "/custom/config.toml", "config", "path"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
