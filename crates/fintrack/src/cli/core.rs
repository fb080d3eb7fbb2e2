//! Shared command plumbing: the error type every handler returns and the
//! re-exports handlers reach for.

use thiserror::Error;

pub use crate::cli::shell_context::{CliMode, ShellContext};

#[derive(Debug, Error)]
pub enum CommandError {
    /// Not an error from the user's point of view; unwinds the shell loop.
    #[error("exit requested")]
    ExitRequested,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] fintrack_core::CoreError),
    #[error("prompt failed: {0}")]
    Prompt(String),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

pub type CommandResult = Result<(), CommandError>;

/// Parses `YYYY-MM-DD`, the storage-side date shape.
pub fn parse_date(value: &str) -> Result<chrono::NaiveDate, CommandError> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CommandError::InvalidArguments(format!("invalid date `{value}` (expected YYYY-MM-DD)")))
}

/// Parses `YYYY-MM` into a `(year, month)` pair for report commands.
pub fn parse_month(value: &str) -> Result<(i32, u32), CommandError> {
    let bad = || CommandError::InvalidArguments(format!("invalid month `{value}` (expected YYYY-MM)"));
    let (year, month) = value.trim().split_once('-').ok_or_else(bad)?;
    let year: i32 = year.parse().map_err(|_| bad())?;
    let month: u32 = month.parse().map_err(|_| bad())?;
    if !(1..=12).contains(&month) {
        return Err(bad());
    }
    Ok((year, month))
}

pub fn parse_amount(value: &str) -> Result<f64, CommandError> {
    value
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid amount `{value}`")))
}

pub fn parse_id(value: &str) -> Result<fintrack_domain::RecordId, CommandError> {
    value
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid id `{value}`")))
}

pub fn parse_bool(value: &str) -> Result<bool, CommandError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "invalid toggle `{other}` (expected on/off)"
        ))),
    }
}
