use fintrack_domain::{Frequency, NewTransaction, TransactionKind, TransactionPatch};

use crate::cli::core::{
    parse_amount, parse_date, parse_id, CommandError, CommandResult, ShellContext,
};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "transaction",
        "Record and inspect transactions",
        "transaction <add|list|on|edit|remove> ...",
        cmd_transaction,
    )]
}

fn cmd_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction <add|list|on|edit|remove>".into(),
        ));
    };
    match action.to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" => handle_list(context, rest),
        "on" => handle_on(context, rest),
        "edit" => handle_edit(context, rest),
        "remove" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown transaction subcommand `{other}`"
        ))),
    }
}

/// `transaction add <account-id> <type> <amount> <description...>` with
/// optional trailing `--category <name>`, `--date <YYYY-MM-DD>` and
/// `--every <frequency> <times>` flags.
fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut args = args.to_vec();
    let category = take_flag_value(&mut args, "--category")?;
    let date = take_flag_value(&mut args, "--date")?;
    let repeat = take_repeat_flag(&mut args)?;

    if args.len() < 4 {
        return Err(CommandError::InvalidArguments(
            "usage: transaction add <account-id> <income|expense|transfer> <amount> <description> \
             [--category <name>] [--date YYYY-MM-DD] [--every <frequency> <times>]"
                .into(),
        ));
    }
    let account_id = parse_id(args[0])?;
    let kind = TransactionKind::parse(args[1]).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "invalid transaction type `{}` (income|expense|transfer)",
            args[1]
        ))
    })?;
    let amount = parse_amount(args[2])?;
    let description = args[3..].join(" ");
    let date = match date {
        Some(value) => parse_date(&value)?,
        None => context.today(),
    };

    let mut draft = NewTransaction::new(kind, amount, description, account_id, date);
    if let Some(category) = category {
        draft = draft.with_category(category);
    }

    let settings = context.store.settings().clone();
    match repeat {
        Some((frequency, times)) => {
            let created = context.store.create_recurring(draft, frequency, times);
            output::print_success(&format!(
                "Recorded {} {} occurrence(s)",
                created.len(),
                frequency
            ));
        }
        None => {
            let txn = context.store.create_transaction(draft);
            output::print_success(&format!(
                "Recorded transaction #{}: {} {}",
                txn.id,
                txn.description,
                output::format_currency(&settings, txn.amount)
            ));
        }
    }
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(value) => value.parse().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid limit `{value}`"))
        })?,
        None => 10,
    };
    let settings = context.store.settings().clone();
    let recent = context.store.recent_transactions(limit);
    if recent.is_empty() {
        output::print_info("No transactions recorded.");
        return Ok(());
    }
    output::print_header("Recent transactions");
    for txn in recent {
        print_row(&settings, txn);
    }
    Ok(())
}

fn handle_on(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(date) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction on <YYYY-MM-DD>".into(),
        ));
    };
    let date = parse_date(date)?;
    let settings = context.store.settings().clone();
    let matches = context.store.transactions_on(date);
    if matches.is_empty() {
        output::print_info(&format!(
            "No transactions on {}.",
            output::format_date(&settings, date)
        ));
        return Ok(());
    }
    for txn in matches {
        print_row(&settings, txn);
    }
    Ok(())
}

/// `transaction edit <id> <field> <value>`. Edits merge in place: the
/// owning account's balance is never re-derived, matching how creation
/// and deletion are the only balance-moving operations.
fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: transaction edit <id> <type|amount|description|category|account|date> <value>"
                .into(),
        ));
    }
    let id = parse_id(args[0])?;
    let value = args[2..].join(" ");
    let patch = match args[1].to_lowercase().as_str() {
        "type" => TransactionPatch {
            kind: Some(TransactionKind::parse(&value).ok_or_else(|| {
                CommandError::InvalidArguments(format!("invalid transaction type `{value}`"))
            })?),
            ..Default::default()
        },
        "amount" => TransactionPatch {
            amount: Some(parse_amount(&value)?),
            ..Default::default()
        },
        "description" => TransactionPatch {
            description: Some(value),
            ..Default::default()
        },
        "category" => TransactionPatch {
            category: Some(value),
            ..Default::default()
        },
        "account" => TransactionPatch {
            account_id: Some(parse_id(&value)?),
            ..Default::default()
        },
        "date" => TransactionPatch {
            date: Some(parse_date(&value)?),
            ..Default::default()
        },
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown transaction field `{other}`"
            )))
        }
    };

    match context.store.update_transaction(id, patch) {
        Some(txn) => {
            output::print_success(&format!("Updated transaction #{}", txn.id));
            Ok(())
        }
        None => Err(CommandError::InvalidArguments(format!(
            "no transaction with id {id}"
        ))),
    }
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(id) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction remove <id>".into(),
        ));
    };
    let id = parse_id(id)?;
    if context.store.transaction(id).is_none() {
        return Err(CommandError::InvalidArguments(format!(
            "no transaction with id {id}"
        )));
    }
    if !context.confirm("Delete this transaction? Its balance effect will be reversed.")? {
        output::print_info("Cancelled.");
        return Ok(());
    }
    context.store.delete_transaction(id);
    output::print_success(&format!("Deleted transaction #{id}"));
    Ok(())
}

fn print_row(settings: &fintrack_domain::Settings, txn: &fintrack_domain::Transaction) {
    output::print_info(&format!(
        "#{:<4} {}  {:<8} {:<28} {:<14} {}",
        txn.id,
        output::format_date(settings, txn.date),
        txn.kind,
        txn.description,
        txn.category.as_deref().unwrap_or("-"),
        output::format_currency(settings, txn.amount),
    ));
}

fn take_flag_value(args: &mut Vec<&str>, flag: &str) -> Result<Option<String>, CommandError> {
    let Some(index) = args.iter().position(|a| *a == flag) else {
        return Ok(None);
    };
    if index + 1 >= args.len() {
        return Err(CommandError::InvalidArguments(format!(
            "{flag} requires a value"
        )));
    }
    let value = args[index + 1].to_string();
    args.drain(index..=index + 1);
    Ok(Some(value))
}

fn take_repeat_flag(args: &mut Vec<&str>) -> Result<Option<(Frequency, u32)>, CommandError> {
    let Some(index) = args.iter().position(|a| *a == "--every") else {
        return Ok(None);
    };
    if index + 2 >= args.len() {
        return Err(CommandError::InvalidArguments(
            "--every requires <frequency> <times>".into(),
        ));
    }
    let frequency = Frequency::parse(args[index + 1]).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "invalid frequency `{}` (daily|weekly|biweekly|monthly|quarterly|yearly)",
            args[index + 1]
        ))
    })?;
    let times: u32 = args[index + 2].parse().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid repeat count `{}`", args[index + 2]))
    })?;
    args.drain(index..=index + 2);
    Ok(Some((frequency, times)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_stripped_from_positional_args() {
        let mut args = vec!["11", "expense", "45.5", "Dinner", "--category", "Food"];
        let category = take_flag_value(&mut args, "--category").unwrap();
        assert_eq!(category.as_deref(), Some("Food"));
        assert_eq!(args, ["11", "expense", "45.5", "Dinner"]);
    }

    #[test]
    fn repeat_flag_needs_frequency_and_count() {
        let mut args = vec!["11", "expense", "5", "Coffee", "--every", "weekly"];
        assert!(take_repeat_flag(&mut args).is_err());

        let mut args = vec!["11", "expense", "5", "Coffee", "--every", "weekly", "4"];
        let repeat = take_repeat_flag(&mut args).unwrap().unwrap();
        assert_eq!(repeat, (Frequency::Weekly, 4));
        assert_eq!(args, ["11", "expense", "5", "Coffee"]);
    }
}
