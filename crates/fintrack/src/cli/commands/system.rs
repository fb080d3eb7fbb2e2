use std::fs;
use std::path::Path;

use fintrack_export::{collect_events, read_transactions, to_ical, write_transactions};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write calendar or spreadsheet files",
            "export <ical|csv> <path>",
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Import transactions from a CSV export",
            "import <path>",
            cmd_import,
        ),
        CommandEntry::new(
            "reset",
            "Erase all data and restore defaults",
            "reset",
            cmd_reset,
        ),
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (Some(format), Some(path)) = (args.first(), args.get(1)) else {
        return Err(CommandError::InvalidArguments(
            "usage: export <ical|csv> <path>".into(),
        ));
    };
    let store = &context.store;
    let contents = match format.to_lowercase().as_str() {
        "ical" => {
            let events = collect_events(
                store.transactions(),
                store.accounts(),
                store.bills(),
                store.goals(),
            );
            to_ical(&events)
        }
        "csv" => write_transactions(store.transactions(), store.accounts()),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown export format `{other}` (ical|csv)"
            )))
        }
    };
    fs::write(Path::new(path), contents)?;
    output::print_success(&format!("Wrote {path}"));
    Ok(())
}

/// Imported rows land on the first account; the CSV account column is a
/// display name and is not resolved back to an id.
fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(path) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: import <path>".into()));
    };
    let Some(fallback) = context.store.accounts().first().map(|a| a.id) else {
        return Err(CommandError::InvalidArguments(
            "create an account before importing".into(),
        ));
    };
    let csv = fs::read_to_string(Path::new(path))?;
    let drafts = read_transactions(&csv, fallback);
    let count = drafts.len();
    for draft in drafts {
        context.store.create_transaction(draft);
    }
    output::print_success(&format!("Imported {count} transaction(s)"));
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Erase all data? This cannot be undone.")? {
        output::print_info("Cancelled.");
        return Ok(());
    }
    context.store.reset_all();
    output::print_success("All data erased; defaults restored.");
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.command(&name) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(&name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
