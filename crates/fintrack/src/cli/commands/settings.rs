use fintrack_domain::{DateFormat, NotificationFrequency, SettingsPatch, Theme};

use crate::cli::core::{parse_bool, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "settings",
        "Show or change preferences",
        "settings [set <key> <value>]",
        cmd_settings,
    )]
}

fn cmd_settings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|a| a.to_lowercase()).as_deref() {
        None | Some("show") => handle_show(context),
        Some("set") => handle_set(context, &args[1..]),
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown settings subcommand `{other}`"
        ))),
    }
}

fn handle_show(context: &mut ShellContext) -> CommandResult {
    let settings = context.store.settings();
    output::print_header("Settings");
    output::print_two_column(&[
        ("theme", settings.theme.to_string()),
        ("currency", settings.currency.clone()),
        ("date-format", settings.date_format.to_string()),
        ("budget-alerts", on_off(settings.budget_alerts)),
        ("bill-reminders", on_off(settings.bill_reminders)),
        ("goal-progress", on_off(settings.goal_progress)),
        ("email-notifications", on_off(settings.email_notifications)),
        ("notification-email", settings.notification_email.clone()),
        ("frequency", settings.notification_frequency.to_string()),
        ("two-factor", on_off(settings.two_factor)),
    ]);
    Ok(())
}

fn handle_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (Some(key), Some(value)) = (args.first(), args.get(1)) else {
        return Err(CommandError::InvalidArguments(
            "usage: settings set <key> <value>".into(),
        ));
    };
    let patch = patch_for(key, value)?;
    context.store.update_settings(patch);
    output::print_success(&format!("Set {key} to {value}"));
    Ok(())
}

fn patch_for(key: &str, value: &str) -> Result<SettingsPatch, CommandError> {
    let mut patch = SettingsPatch::default();
    match key.to_lowercase().as_str() {
        "theme" => {
            patch.theme = Some(Theme::parse(value).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "invalid theme `{value}` (system|light|dark)"
                ))
            })?)
        }
        "currency" => patch.currency = Some(value.to_uppercase()),
        "date-format" => {
            patch.date_format = Some(DateFormat::parse(value).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "invalid date format `{value}` (MM/DD/YYYY|DD/MM/YYYY|YYYY-MM-DD)"
                ))
            })?)
        }
        "budget-alerts" => patch.budget_alerts = Some(parse_bool(value)?),
        "bill-reminders" => patch.bill_reminders = Some(parse_bool(value)?),
        "goal-progress" => patch.goal_progress = Some(parse_bool(value)?),
        "email-notifications" => patch.email_notifications = Some(parse_bool(value)?),
        "notification-email" => patch.notification_email = Some(value.to_string()),
        "frequency" => {
            patch.notification_frequency =
                Some(NotificationFrequency::parse(value).ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "invalid frequency `{value}` (daily|weekly|monthly)"
                    ))
                })?)
        }
        "two-factor" => patch.two_factor = Some(parse_bool(value)?),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown setting `{other}`"
            )))
        }
    }
    Ok(patch)
}

fn on_off(value: bool) -> String {
    if value { "on" } else { "off" }.to_string()
}
