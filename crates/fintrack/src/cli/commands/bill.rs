use fintrack_domain::NewBill;

use crate::cli::core::{parse_amount, parse_date, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "bill",
        "Track upcoming bills",
        "bill <add|list|due> ...",
        cmd_bill,
    )]
}

fn cmd_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: bill <add|list|due>".into(),
        ));
    };
    match action.to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" => handle_list(context),
        "due" => handle_due(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown bill subcommand `{other}`"
        ))),
    }
}

/// `bill add <name> <amount> <due-date>`
fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (Some(name), Some(amount), Some(due)) = (args.first(), args.get(1), args.get(2)) else {
        return Err(CommandError::InvalidArguments(
            "usage: bill add <name> <amount> <YYYY-MM-DD>".into(),
        ));
    };
    let bill = context.store.create_bill(NewBill::new(
        *name,
        parse_amount(amount)?,
        parse_date(due)?,
    ));
    output::print_success(&format!("Created bill #{} `{}`", bill.id, bill.name));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let settings = context.store.settings().clone();
    let bills = context.store.bills();
    if bills.is_empty() {
        output::print_info("No bills tracked.");
        return Ok(());
    }
    output::print_header("Bills");
    for bill in bills {
        output::print_info(&format!(
            "#{:<4} {:<24} {:>12}  due {}",
            bill.id,
            bill.name,
            output::format_currency(&settings, bill.amount),
            output::format_date(&settings, bill.due_date),
        ));
    }
    Ok(())
}

/// `bill due [YYYY-MM-DD]` lists bills due on the given day (today when
/// omitted).
fn handle_due(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let date = match args.first() {
        Some(value) => parse_date(value)?,
        None => context.today(),
    };
    let settings = context.store.settings().clone();
    let due = context.store.bills_on(date);
    if due.is_empty() {
        output::print_info(&format!(
            "Nothing due on {}.",
            output::format_date(&settings, date)
        ));
        return Ok(());
    }
    for bill in due {
        output::print_info(&format!(
            "{:<24} {}",
            bill.name,
            output::format_currency(&settings, bill.amount)
        ));
    }
    Ok(())
}
