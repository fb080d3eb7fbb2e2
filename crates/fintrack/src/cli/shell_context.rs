//! Shared runtime state for CLI interactions and command execution.

use std::{path::PathBuf, sync::Arc};

use dialoguer::{theme::ColorfulTheme, Confirm};

use fintrack_core::{Clock, LedgerStore};

use crate::cli::core::CommandError;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub clock: Arc<dyn Clock>,
    pub theme: ColorfulTheme,
    pub data_dir: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn suggest_command(&self, input: &str) {
        match self.registry.suggest(input) {
            Some(candidate) => {
                output::print_error(&format!("unknown command `{input}`, did you mean `{candidate}`?"))
            }
            None => output::print_error(&format!("unknown command `{input}`; try `help`")),
        }
    }

    /// Asks before a destructive step. Script mode never blocks on a
    /// prompt; piped input is taken as consent.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|err| CommandError::Prompt(err.to_string()))
    }
}
