//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::records::{
    HelpStatus, LegalStatus, NewContactMessage, NewHelpRequest, NewLegalRequest, Urgency,
};

/// Counselling request commands.
#[derive(Debug, Subcommand)]
pub enum HelpCommand {
    /// Submit a new request for counselling
    Submit(HelpSubmitArgs),

    /// List help requests
    List {
        /// Only show requests submitted with this email address
        #[arg(short, long)]
        email: Option<String>,

        /// Only show requests with this status
        #[arg(short, long, value_enum)]
        status: Option<HelpStatusArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Set the status of a help request
    Status {
        /// Identifier of the request
        id: String,

        /// New status
        #[arg(value_enum)]
        status: HelpStatusArg,
    },

    /// Move a help request to its next status (pending, in-progress, completed)
    Advance {
        /// Identifier of the request
        id: String,
    },

    /// Save counsellor notes on a help request, replacing earlier notes
    Notes {
        /// Identifier of the request
        id: String,

        /// The notes to save
        notes: String,
    },
}

/// Fields of the help request form.
#[derive(Debug, Args)]
pub struct HelpSubmitArgs {
    /// Your name (may be a first name or alias)
    #[arg(long)]
    pub name: String,

    /// Email address a counsellor can reach you at
    #[arg(long)]
    pub email: String,

    /// Phone number a counsellor can reach you at
    #[arg(long)]
    pub phone: String,

    /// Describe your situation
    #[arg(long)]
    pub message: String,
}

impl From<HelpSubmitArgs> for NewHelpRequest {
    fn from(args: HelpSubmitArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            message: args.message,
        }
    }
}

/// Legal consultation commands.
#[derive(Debug, Subcommand)]
pub enum LegalCommand {
    /// Request a legal consultation
    Submit(LegalSubmitArgs),

    /// List legal requests
    List {
        /// Only show requests with this status
        #[arg(short, long, value_enum)]
        status: Option<LegalStatusArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Set the status of a legal request
    Status {
        /// Identifier of the request
        id: String,

        /// New status
        #[arg(value_enum)]
        status: LegalStatusArg,
    },
}

/// Fields of the legal consultation form.
#[derive(Debug, Args)]
pub struct LegalSubmitArgs {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// Contact email address
    #[arg(long)]
    pub email: String,

    /// Contact phone number
    #[arg(long)]
    pub phone: String,

    /// Describe your legal situation
    #[arg(long)]
    pub details: String,

    /// How urgent the case is
    #[arg(long, value_enum, default_value = "medium")]
    pub urgency: UrgencyArg,
}

impl From<LegalSubmitArgs> for NewLegalRequest {
    fn from(args: LegalSubmitArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            case_details: args.details,
            urgency: args.urgency.into(),
        }
    }
}

/// Contact form commands.
#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Send a message to the team
    Send(ContactSendArgs),

    /// List contact messages
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// Fields of the contact form.
#[derive(Debug, Args)]
pub struct ContactSendArgs {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// Your email address
    #[arg(long)]
    pub email: String,

    /// Subject line
    #[arg(long)]
    pub subject: String,

    /// Message body
    #[arg(long)]
    pub message: String,
}

impl From<ContactSendArgs> for NewContactMessage {
    fn from(args: ContactSendArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            subject: args.subject,
            message: args.message,
        }
    }
}

/// Administration commands.
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Show record counts
    Stats {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Delete every stored request and message
    Clear {
        /// Confirm deletion
        #[arg(short, long)]
        yes: bool,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Help request status argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HelpStatusArg {
    /// Waiting for a counsellor
    Pending,
    /// Being handled
    InProgress,
    /// Closed out
    Completed,
}

impl From<HelpStatusArg> for HelpStatus {
    fn from(arg: HelpStatusArg) -> Self {
        match arg {
            HelpStatusArg::Pending => Self::Pending,
            HelpStatusArg::InProgress => Self::InProgress,
            HelpStatusArg::Completed => Self::Completed,
        }
    }
}

/// Legal request status argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LegalStatusArg {
    /// Not yet looked at
    Pending,
    /// Reviewed by the legal team
    Reviewed,
    /// Closed out
    Completed,
}

impl From<LegalStatusArg> for LegalStatus {
    fn from(arg: LegalStatusArg) -> Self {
        match arg {
            LegalStatusArg::Pending => Self::Pending,
            LegalStatusArg::Reviewed => Self::Reviewed,
            LegalStatusArg::Completed => Self::Completed,
        }
    }
}

/// Urgency argument for legal requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UrgencyArg {
    /// Can wait
    Low,
    /// Soon
    Medium,
    /// As soon as possible
    High,
}

impl From<UrgencyArg> for Urgency {
    fn from(arg: UrgencyArg) -> Self {
        match arg {
            UrgencyArg::Low => Self::Low,
            UrgencyArg::Medium => Self::Medium,
            UrgencyArg::High => Self::High,
        }
    }
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
