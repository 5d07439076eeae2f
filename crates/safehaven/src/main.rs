//! `safehaven` - CLI for the safehaven record store
//!
//! This binary provides the command-line front end for submitting counselling
//! and legal requests, sending contact messages, and reviewing or updating
//! stored records.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use safehaven::cli::handlers::{
    handle_admin, handle_config, handle_contact, handle_counselling, handle_legal,
};
use safehaven::cli::{Cli, Command};
use safehaven::{init_logging, Config, RecordStore, Validator};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<safehaven::Error>() {
                // Rejected input gets the plain message, without the cause chain.
                Some(e) if e.is_user_error() => eprintln!("{e}"),
                _ => eprintln!("Error: {err:?}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Counselling(cmd) => handle_counselling(
            &open_store(&config)?,
            &Validator::new(&config.intake)?,
            cmd,
            &mut out,
        )?,
        Command::Legal(cmd) => handle_legal(
            &open_store(&config)?,
            &Validator::new(&config.intake)?,
            cmd,
            &mut out,
        )?,
        Command::Contact(cmd) => handle_contact(
            &open_store(&config)?,
            &Validator::new(&config.intake)?,
            cmd,
            &mut out,
        )?,
        Command::Admin(cmd) => handle_admin(&open_store(&config)?, cmd, &mut out)?,
        Command::Config(cmd) => handle_config(&config, cmd, &mut out)?,
    }
    Ok(())
}

fn open_store(config: &Config) -> anyhow::Result<RecordStore> {
    let db_path = config.database_path();
    RecordStore::open(&db_path)
        .with_context(|| format!("could not open record store at {}", db_path.display()))
}
