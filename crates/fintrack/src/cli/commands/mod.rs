pub mod account;
pub mod bill;
pub mod category;
pub mod goal;
pub mod report;
pub mod settings;
pub mod system;
pub mod transaction;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "account",
    "transaction",
    "category",
    "goal",
    "bill",
    "summary",
    "report",
    "alerts",
    "notify",
    "export",
    "import",
    "settings",
    "reset",
    "help",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(account::definitions());
    commands.extend(transaction::definitions());
    commands.extend(category::definitions());
    commands.extend(goal::definitions());
    commands.extend(bill::definitions());
    commands.extend(report::definitions());
    commands.extend(settings::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}
