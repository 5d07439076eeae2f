//! `safehaven` - Local record store for survivor support requests
//!
//! This library keeps counselling requests, legal consultation requests and
//! contact messages in a local database, and provides the intake validation
//! and command-line front end used to submit and manage them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod logging;
pub mod records;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use intake::Validator;
pub use logging::init_logging;
pub use records::{
    Collection, ContactMessage, HelpRequest, HelpRequestPatch, HelpStatus, LegalRequest,
    LegalRequestPatch, LegalStatus, NewContactMessage, NewHelpRequest, NewLegalRequest, Record,
    Timestamp, Updatable, Urgency,
};
pub use storage::{Storage, StorageStats};
pub use store::{RecordStore, StoreStats};
