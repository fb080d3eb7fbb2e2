use chrono::Datelike;

use fintrack_core::{Notifier, NotifyError};

use crate::cli::core::{parse_month, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show balances and this month's flow",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "report",
            "Historical breakdowns",
            "report <flow [months]|categories [YYYY-MM]>",
            cmd_report,
        ),
        CommandEntry::new(
            "alerts",
            "Show pending budget alerts and bill reminders",
            "alerts",
            cmd_alerts,
        ),
        CommandEntry::new(
            "notify",
            "Run the notification sweep",
            "notify",
            cmd_notify,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.today();
    let (year, month) = (today.year(), today.month());
    let settings = context.store.settings().clone();
    let store = &context.store;

    output::print_header(&format!("Summary for {year}-{month:02}"));
    output::print_two_column(&[
        (
            "total balance",
            output::format_currency(&settings, store.total_balance()),
        ),
        (
            "income",
            output::format_currency(&settings, store.monthly_income(year, month)),
        ),
        (
            "expenses",
            output::format_currency(&settings, store.monthly_expense(year, month)),
        ),
        (
            "savings rate",
            format!("{:.1}%", store.savings_rate(year, month)),
        ),
    ]);
    Ok(())
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((kind, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: report <flow [months]|categories [YYYY-MM]>".into(),
        ));
    };
    match kind.to_lowercase().as_str() {
        "flow" => report_flow(context, rest),
        "categories" => report_categories(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown report `{other}`"
        ))),
    }
}

/// Income vs expense per month, oldest first.
fn report_flow(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let months = match args.first() {
        Some(value) => value.parse().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid month count `{value}`"))
        })?,
        None => 6,
    };
    let settings = context.store.settings().clone();
    output::print_header(&format!("Cash flow, last {months} month(s)"));
    for row in context.store.monthly_flow(context.today(), months) {
        output::print_info(&format!(
            "{:<10} in {:>12}  out {:>12}  net {:>12}",
            format!("{}-{:02}", row.year, row.month),
            output::format_currency(&settings, row.income),
            output::format_currency(&settings, row.expense),
            output::format_currency(&settings, row.net()),
        ));
    }
    Ok(())
}

fn report_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (year, month) = match args.first() {
        Some(value) => parse_month(value)?,
        None => {
            let today = context.today();
            (today.year(), today.month())
        }
    };
    let settings = context.store.settings().clone();
    let slices = context.store.category_distribution(year, month);
    if slices.is_empty() {
        output::print_info("No categorised spending for that month.");
        return Ok(());
    }
    output::print_header(&format!("Spending by category, {year}-{month:02}"));
    for slice in slices {
        output::print_info(&format!(
            "{:<16} {}",
            slice.category,
            output::format_currency(&settings, slice.spent)
        ));
    }
    Ok(())
}

fn cmd_alerts(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.today();
    let alerts = context.store.budget_alerts(today);
    let reminders = context.store.bill_reminders(today);
    if alerts.is_empty() && reminders.is_empty() {
        output::print_info("Nothing needs attention.");
        return Ok(());
    }
    for alert in &alerts {
        output::print_info(&alert.message());
    }
    for reminder in &reminders {
        output::print_info(&reminder.message());
    }
    Ok(())
}

/// Prints each would-be email to the console; the store decides what is
/// due and honours the notification toggles.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        output::print_info(&format!("[{subject}] {message}"));
        Ok(())
    }
}

fn cmd_notify(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.store.settings().email_notifications {
        output::print_info("Email notifications are off; enable with `settings set email-notifications on`.");
        return Ok(());
    }
    let sent = context
        .store
        .dispatch_notifications(&ConsoleNotifier, context.today());
    output::print_success(&format!("Dispatched {sent} notification(s)"));
    Ok(())
}
