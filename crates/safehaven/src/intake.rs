//! Intake form validation.
//!
//! The record store accepts any well-typed input. Submissions coming from
//! people filling in forms go through [`Validator`] first, which rejects blank
//! fields, malformed email addresses and short phone numbers with messages
//! suitable for showing back to the person.

use regex::Regex;

use crate::config::IntakeConfig;
use crate::error::{Error, Result};
use crate::records::{NewContactMessage, NewHelpRequest, NewLegalRequest};

/// Checks form submissions before they reach the store.
#[derive(Debug, Clone)]
pub struct Validator {
    email: Regex,
    min_phone_length: usize,
}

impl Validator {
    /// Build a validator from intake configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] if the email pattern is not a valid regex.
    pub fn new(config: &IntakeConfig) -> Result<Self> {
        let email = Regex::new(&config.email_pattern).map_err(|e| Error::ConfigValidation {
            message: format!("invalid regex pattern: {e}"),
        })?;
        Ok(Self {
            email,
            min_phone_length: config.min_phone_length,
        })
    }

    /// Validate a counselling request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn check_help_request(&self, draft: &NewHelpRequest) -> Result<()> {
        require("name", &draft.name, "Please enter your name")?;
        self.check_email(&draft.email)?;
        self.check_phone(&draft.phone)?;
        require("message", &draft.message, "Please describe your situation")
    }

    /// Validate a legal consultation request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn check_legal_request(&self, draft: &NewLegalRequest) -> Result<()> {
        require("name", &draft.name, "Please enter your name")?;
        self.check_email(&draft.email)?;
        self.check_phone(&draft.phone)?;
        require(
            "case details",
            &draft.case_details,
            "Please describe your legal situation",
        )
    }

    /// Validate a contact form message. Contact messages carry no phone number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn check_contact_message(&self, draft: &NewContactMessage) -> Result<()> {
        require("name", &draft.name, "Please enter your name")?;
        self.check_email(&draft.email)?;
        require("subject", &draft.subject, "Please enter a subject")?;
        require("message", &draft.message, "Please enter a message")
    }

    /// Validate counsellor notes before saving them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the notes are blank.
    pub fn check_notes(&self, notes: &str) -> Result<()> {
        require("notes", notes, "Please enter notes before saving")
    }

    fn check_email(&self, email: &str) -> Result<()> {
        if email.trim().is_empty() || !self.email.is_match(email) {
            return Err(Error::validation(
                "email",
                "Please enter a valid email address",
            ));
        }
        Ok(())
    }

    fn check_phone(&self, phone: &str) -> Result<()> {
        // Length counts the value as entered, surrounding spaces included.
        if phone.trim().is_empty() || phone.chars().count() < self.min_phone_length {
            return Err(Error::validation(
                "phone",
                format!(
                    "Please enter a valid phone number (minimum {} digits)",
                    self.min_phone_length
                ),
            ));
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, message));
    }
    Ok(())
}
