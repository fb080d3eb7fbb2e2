//! The interactive shell: line intake, dispatch, and the session loop.

use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use fintrack_core::LedgerStore;
use fintrack_storage_json::JsonBlobStore;

use crate::cli::commands;
use crate::cli::core::CommandError;
use crate::cli::output;
use crate::cli::registry::CommandRegistry;
use crate::cli::shell_context::{CliMode, ShellContext};
use crate::cli::system_clock::SystemClock;

const PROMPT: &str = "fintrack> ";

/// Environment override for the data directory, used by scripted runs.
pub const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

/// Forces script mode even when stdin looks like a terminal.
pub const SCRIPT_MODE_ENV: &str = "FINTRACK_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CommandError> {
    let data_dir = resolve_data_dir();
    let storage = JsonBlobStore::open(data_dir.clone())?;
    let store = LedgerStore::open(Box::new(storage));

    let mut registry = CommandRegistry::new();
    commands::register_all(&mut registry);

    let scripted = std::env::var_os(SCRIPT_MODE_ENV).is_some() || !std::io::stdin().is_terminal();
    let mode = if scripted {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext {
        mode,
        registry,
        store,
        clock: Arc::new(SystemClock),
        theme: ColorfulTheme::default(),
        data_dir,
        last_command: None,
        running: true,
    };

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn resolve_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fintrack")
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CommandError> {
    output::print_header("fintrack");
    output::print_detail(&format!("data directory: {}", context.data_dir.display()));
    output::print_detail("Type `help` to list commands.");

    let mut editor = DefaultEditor::new()?;
    while context.running {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                handle_line(context, &line);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CommandError> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        handle_line(context, &line?);
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return;
    }

    let tokens = match shell_words::split(trimmed) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::print_error(&format!("could not parse input: {err}"));
            return;
        }
    };
    let Some((name, rest)) = tokens.split_first() else {
        return;
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    debug!(command = %name, args = ?args, "dispatching");
    context.last_command = Some(name.clone());

    let name = name.to_lowercase();
    let Some(handler) = context.registry.handler(&name) else {
        context.suggest_command(&name);
        return;
    };

    match handler(context, &args) {
        Ok(()) => {}
        Err(CommandError::ExitRequested) => context.running = false,
        Err(CommandError::InvalidArguments(message)) => {
            output::print_error(&message);
            if let Some(entry) = context.registry.get(&name) {
                output::print_detail(&format!("usage: {}", entry.usage));
            }
        }
        Err(err) => output::print_error(&format!("{name} failed: {err}")),
    }
}
