//! Command handlers.
//!
//! Each handler runs one subcommand group against a [`RecordStore`] and writes
//! its human-readable output to `out`. Failures are returned as [`Error`] so
//! the binary decides how to report them and which exit code to use.

use std::io::Write;

use tracing::info;

use super::{
    AdminCommand, ConfigCommand, ContactCommand, HelpCommand, LegalCommand, OutputFormat,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::intake::Validator;
use crate::records::{
    ContactMessage, HelpRequest, HelpRequestPatch, HelpStatus, LegalRequest, LegalRequestPatch,
    LegalStatus, NewContactMessage, NewHelpRequest, NewLegalRequest, Timestamp,
};
use crate::store::RecordStore;

/// Run a `counselling` subcommand.
///
/// # Errors
///
/// Returns [`Error::Validation`] for a rejected form, [`Error::NotFound`] for
/// an unknown id, [`Error::AlreadyCompleted`] when advancing a completed
/// request, or any store or output error.
pub fn handle_counselling(
    store: &RecordStore,
    validator: &Validator,
    cmd: HelpCommand,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        HelpCommand::Submit(args) => {
            let draft = NewHelpRequest::from(args);
            validator.check_help_request(&draft)?;
            let request: HelpRequest = store.append(draft)?;
            info!(id = %request.id, "help request submitted");
            writeln!(
                out,
                "Your request has been submitted. A counsellor will contact you soon."
            )?;
            writeln!(out, "Reference: {}", request.id)?;
        }
        HelpCommand::List {
            email,
            status,
            format,
        } => {
            let mut requests = match email {
                Some(email) => store.help_requests_for_email(&email)?,
                None => store.list::<HelpRequest>()?,
            };
            if let Some(status) = status {
                let status = HelpStatus::from(status);
                requests.retain(|r| r.status == status);
            }
            print_help_requests(&requests, format, out)?;
        }
        HelpCommand::Status { id, status } => {
            set_help_status(store, &id, HelpStatus::from(status), out)?;
        }
        HelpCommand::Advance { id } => {
            let requests = store.list::<HelpRequest>()?;
            let current = requests
                .iter()
                .find(|r| r.id == id)
                .ok_or_else(|| help_not_found(&id))?;
            let next = current
                .status
                .next()
                .ok_or_else(|| Error::AlreadyCompleted { id: id.clone() })?;
            set_help_status(store, &id, next, out)?;
        }
        HelpCommand::Notes { id, notes } => {
            validator.check_notes(&notes)?;
            store
                .update::<HelpRequest>(&id, HelpRequestPatch::notes(notes))?
                .ok_or_else(|| help_not_found(&id))?;
            writeln!(out, "Notes saved successfully")?;
        }
    }
    Ok(())
}

fn set_help_status(
    store: &RecordStore,
    id: &str,
    status: HelpStatus,
    out: &mut impl Write,
) -> Result<()> {
    if store
        .update::<HelpRequest>(id, HelpRequestPatch::status(status))?
        .is_none()
    {
        return Err(help_not_found(id));
    }
    writeln!(out, "Status updated to {status}")?;
    Ok(())
}

fn help_not_found(id: &str) -> Error {
    Error::NotFound {
        kind: "help request",
        id: id.to_string(),
    }
}

/// Run a `legal` subcommand.
///
/// # Errors
///
/// Returns [`Error::Validation`] for a rejected form, [`Error::NotFound`] for
/// an unknown id, or any store or output error.
pub fn handle_legal(
    store: &RecordStore,
    validator: &Validator,
    cmd: LegalCommand,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        LegalCommand::Submit(args) => {
            let draft = NewLegalRequest::from(args);
            validator.check_legal_request(&draft)?;
            let request: LegalRequest = store.append(draft)?;
            info!(id = %request.id, urgency = %request.urgency, "legal request submitted");
            writeln!(out, "Legal consultation request submitted successfully")?;
            writeln!(out, "Reference: {}", request.id)?;
        }
        LegalCommand::List { status, format } => {
            let mut requests = store.list::<LegalRequest>()?;
            if let Some(status) = status {
                let status = LegalStatus::from(status);
                requests.retain(|r| r.status == status);
            }
            print_legal_requests(&requests, format, out)?;
        }
        LegalCommand::Status { id, status } => {
            let status = LegalStatus::from(status);
            if store
                .update::<LegalRequest>(&id, LegalRequestPatch::status(status))?
                .is_none()
            {
                return Err(Error::NotFound {
                    kind: "legal request",
                    id,
                });
            }
            writeln!(out, "Status updated to {status}")?;
        }
    }
    Ok(())
}

/// Run a `contact` subcommand.
///
/// # Errors
///
/// Returns [`Error::Validation`] for a rejected form, or any store or output
/// error.
pub fn handle_contact(
    store: &RecordStore,
    validator: &Validator,
    cmd: ContactCommand,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        ContactCommand::Send(args) => {
            let draft = NewContactMessage::from(args);
            validator.check_contact_message(&draft)?;
            let message: ContactMessage = store.append(draft)?;
            info!(id = %message.id, "contact message stored");
            writeln!(out, "Message sent successfully. We'll get back to you soon!")?;
        }
        ContactCommand::List { format } => {
            let messages = store.list::<ContactMessage>()?;
            print_contact_messages(&messages, format, out)?;
        }
    }
    Ok(())
}

/// Run an `admin` subcommand.
///
/// `clear` deletes nothing unless `yes` is set.
///
/// # Errors
///
/// Returns an error if a collection cannot be read or cleared, or output fails.
pub fn handle_admin(store: &RecordStore, cmd: AdminCommand, out: &mut impl Write) -> Result<()> {
    match cmd {
        AdminCommand::Stats { json } => {
            let stats = store.stats()?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
            } else {
                let storage = store.storage().stats()?;
                writeln!(out, "safehaven records")?;
                writeln!(out, "-----------------")?;
                writeln!(
                    out,
                    "Help requests:     {} ({} pending)",
                    stats.help_requests, stats.pending_help_requests
                )?;
                writeln!(
                    out,
                    "Legal requests:    {} ({} pending)",
                    stats.legal_requests, stats.pending_legal_requests
                )?;
                writeln!(out, "Contact messages:  {}", stats.contact_messages)?;
                writeln!(out)?;
                writeln!(out, "Database:          {}", store.storage().path().display())?;
                writeln!(out, "Database size:     {} bytes", storage.db_size_bytes)?;
                if let Some(last) = storage.last_updated {
                    writeln!(out, "Last write:        {}", last.to_rfc3339())?;
                }
            }
        }
        AdminCommand::Clear { yes } => {
            if yes {
                store.clear_all()?;
                writeln!(out, "All data cleared successfully")?;
            } else {
                writeln!(out, "This will permanently delete all requests and messages.")?;
                writeln!(out, "Use --yes to confirm.")?;
            }
        }
    }
    Ok(())
}

/// Run a `config` subcommand.
///
/// # Errors
///
/// Returns the load or validation error for `config validate`, or an output
/// error.
pub fn handle_config(config: &Config, cmd: ConfigCommand, out: &mut impl Write) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
            } else {
                writeln!(out, "Current Configuration")?;
                writeln!(out, "=====================")?;
                writeln!(out)?;
                writeln!(out, "[Storage]")?;
                writeln!(
                    out,
                    "  Database path:      {}",
                    config.database_path().display()
                )?;
                writeln!(out)?;
                writeln!(out, "[Intake]")?;
                writeln!(
                    out,
                    "  Min phone length:   {}",
                    config.intake.min_phone_length
                )?;
                writeln!(out, "  Email pattern:      {}", config.intake.email_pattern)?;
            }
        }
        ConfigCommand::Path => {
            writeln!(out, "{}", Config::default_config_path().display())?;
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            writeln!(out, "Validating configuration: {}", path.display())?;
            Config::load_from(Some(path))?;
            writeln!(out, "Configuration is valid.")?;
        }
    }
    Ok(())
}

fn print_help_requests(
    requests: &[HelpRequest],
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(requests)?)?,
        _ if requests.is_empty() => writeln!(out, "No help requests found.")?,
        OutputFormat::Table => {
            writeln!(
                out,
                "{:<36}  {:<11}  {:<20}  {:<24}  {}",
                "ID", "STATUS", "SUBMITTED", "NAME", "EMAIL"
            )?;
            for r in requests {
                writeln!(
                    out,
                    "{:<36}  {:<11}  {:<20}  {:<24}  {}",
                    r.id,
                    r.status.to_string(),
                    short_time(&r.timestamp),
                    truncate(&r.name, 24),
                    r.email
                )?;
            }
        }
        OutputFormat::Plain => {
            for r in requests {
                writeln!(out, "{} [{}]", r.id, r.status)?;
                writeln!(out, "  Submitted: {}", r.timestamp)?;
                writeln!(out, "  Name:      {}", r.name)?;
                writeln!(out, "  Email:     {}", r.email)?;
                writeln!(out, "  Phone:     {}", r.phone)?;
                writeln!(out, "  Message:   {}", r.message)?;
                if let Some(notes) = &r.counsellor_notes {
                    writeln!(out, "  Notes:     {notes}")?;
                }
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn print_legal_requests(
    requests: &[LegalRequest],
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(requests)?)?,
        _ if requests.is_empty() => writeln!(out, "No legal requests found.")?,
        OutputFormat::Table => {
            writeln!(
                out,
                "{:<36}  {:<9}  {:<7}  {:<20}  {:<24}  {}",
                "ID", "STATUS", "URGENCY", "SUBMITTED", "NAME", "EMAIL"
            )?;
            for r in requests {
                writeln!(
                    out,
                    "{:<36}  {:<9}  {:<7}  {:<20}  {:<24}  {}",
                    r.id,
                    r.status.to_string(),
                    r.urgency.to_string(),
                    short_time(&r.timestamp),
                    truncate(&r.name, 24),
                    r.email
                )?;
            }
        }
        OutputFormat::Plain => {
            for r in requests {
                writeln!(out, "{} [{}, {} urgency]", r.id, r.status, r.urgency)?;
                writeln!(out, "  Submitted: {}", r.timestamp)?;
                writeln!(out, "  Name:      {}", r.name)?;
                writeln!(out, "  Email:     {}", r.email)?;
                writeln!(out, "  Phone:     {}", r.phone)?;
                writeln!(out, "  Details:   {}", r.case_details)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn print_contact_messages(
    messages: &[ContactMessage],
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(messages)?)?,
        _ if messages.is_empty() => writeln!(out, "No contact messages found.")?,
        OutputFormat::Table => {
            writeln!(
                out,
                "{:<36}  {:<20}  {:<24}  {}",
                "ID", "SENT", "FROM", "SUBJECT"
            )?;
            for m in messages {
                writeln!(
                    out,
                    "{:<36}  {:<20}  {:<24}  {}",
                    m.id,
                    short_time(&m.timestamp),
                    truncate(&m.name, 24),
                    m.subject
                )?;
            }
        }
        OutputFormat::Plain => {
            for m in messages {
                writeln!(out, "{} {}", m.id, m.subject)?;
                writeln!(out, "  Sent:    {}", m.timestamp)?;
                writeln!(out, "  From:    {} <{}>", m.name, m.email)?;
                writeln!(out, "  Message: {}", m.message)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn short_time(ts: &Timestamp) -> String {
    ts.instant().format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Shorten `s` to at most `max` characters for table cells.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
