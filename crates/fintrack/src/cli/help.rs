use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::print_header("Available commands");
    let entries = registry.list();
    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in entries {
        println!("  {:<width$}  {}", entry.name, entry.description);
    }
    output::print_detail("Use `help <command>` for usage details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::print_header(&format!("Help: {}", entry.name));
    output::print_two_column(&[
        ("description", entry.description.to_string()),
        ("usage", entry.usage.to_string()),
    ]);
}
