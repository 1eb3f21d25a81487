//! CLI command implementations

pub mod demo;
pub mod history;
pub mod list;
pub mod login;
pub mod open;
pub mod register;
pub mod remove;
pub mod show;
pub mod submit;
pub mod users;
pub mod vote;
pub mod whoami;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use factline_core::history::EntryPoint;
use factline_core::FactlineContext;

use crate::output::{self, NavSpinner};

/// Get the factline directory from environment or default
pub fn get_factline_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FACTLINE_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".factline")
    }
}

/// Get or create the factline context
pub fn get_context() -> Result<FactlineContext> {
    let factline_dir = get_factline_dir();

    std::fs::create_dir_all(&factline_dir)
        .with_context(|| format!("Failed to create factline directory: {:?}", factline_dir))?;

    let context = FactlineContext::new(&factline_dir, EntryPoint::Cli)
        .context("Failed to initialize factline context")?;

    // Spinner only when a human is watching
    if atty::is(atty::Stream::Stderr) {
        Ok(context.with_progress(Arc::new(NavSpinner::new())))
    } else {
        Ok(context)
    }
}

/// Record a command in the history log, ignoring failures
/// (logging never breaks a command)
pub fn log_command(context: &FactlineContext, command: &str) {
    let _ = context.history.log_command(command);
}

/// Exit for commands that hit the login guard
pub fn require_login() -> ! {
    output::error("Not logged in. Run 'fl login' first.");
    std::process::exit(1);
}
