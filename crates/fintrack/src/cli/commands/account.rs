use fintrack_domain::{AccountKind, AccountPatch, NewAccount};

use crate::cli::core::{
    parse_amount, parse_id, CommandError, CommandResult, ShellContext,
};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "account",
        "Manage accounts",
        "account <add|list|edit|remove> ...",
        cmd_account,
    )]
}

fn cmd_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: account <add|list|edit|remove>".into(),
        ));
    };
    match action.to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" => handle_list(context),
        "edit" => handle_edit(context, rest),
        "remove" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown account subcommand `{other}`"
        ))),
    }
}

/// `account add <name> <type> <institution> [balance] [credit-limit]`
fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: account add <name> <type> <institution> [balance] [credit-limit]".into(),
        ));
    }
    let kind = AccountKind::parse(args[1]).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "invalid account type `{}` (checking|savings|business|credit|investment|cash)",
            args[1]
        ))
    })?;
    let mut draft = NewAccount::new(args[0], kind, args[2]);
    if let Some(balance) = args.get(3) {
        draft = draft.with_balance(parse_amount(balance)?);
    }
    if let Some(limit) = args.get(4) {
        draft = draft.with_credit_limit(parse_amount(limit)?);
    }

    let account = context.store.create_account(draft);
    output::print_success(&format!("Created account #{} `{}`", account.id, account.name));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let settings = context.store.settings().clone();
    let accounts = context.store.accounts();
    if accounts.is_empty() {
        output::print_info("No accounts yet. Add one with `account add`.");
        return Ok(());
    }
    output::print_header("Accounts");
    for account in accounts {
        let mut line = format!(
            "#{:<4} {:<20} {:<10} {:<18} {}",
            account.id,
            account.name,
            account.kind,
            account.institution,
            output::format_currency(&settings, account.balance),
        );
        if let Some(limit) = account.credit_limit {
            line.push_str(&format!(
                "  (limit {})",
                output::format_currency(&settings, limit)
            ));
        }
        output::print_info(&line);
    }
    let total = context.store.total_balance();
    output::print_detail(&format!(
        "total balance: {}",
        output::format_currency(&settings, total)
    ));
    Ok(())
}

/// `account edit <id> <field> <value>` with one field per invocation.
fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 3 {
        return Err(CommandError::InvalidArguments(
            "usage: account edit <id> <name|type|institution|balance|limit> <value>".into(),
        ));
    }
    let id = parse_id(args[0])?;
    let patch = match args[1].to_lowercase().as_str() {
        "name" => AccountPatch {
            name: Some(args[2].to_string()),
            ..Default::default()
        },
        "type" => AccountPatch {
            kind: Some(AccountKind::parse(args[2]).ok_or_else(|| {
                CommandError::InvalidArguments(format!("invalid account type `{}`", args[2]))
            })?),
            ..Default::default()
        },
        "institution" => AccountPatch {
            institution: Some(args[2].to_string()),
            ..Default::default()
        },
        "balance" => AccountPatch {
            balance: Some(parse_amount(args[2])?),
            ..Default::default()
        },
        "limit" => AccountPatch {
            credit_limit: Some(parse_amount(args[2])?),
            ..Default::default()
        },
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown account field `{other}`"
            )))
        }
    };

    match context.store.update_account(id, patch) {
        Some(account) => {
            output::print_success(&format!("Updated account #{} `{}`", account.id, account.name));
            Ok(())
        }
        None => Err(CommandError::InvalidArguments(format!(
            "no account with id {id}"
        ))),
    }
}

/// Removal cascades: the account's transactions are purged first, without
/// touching any balances, then the account record goes.
fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(id) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: account remove <id>".into(),
        ));
    };
    let id = parse_id(id)?;
    let Some(account) = context.store.account(id) else {
        return Err(CommandError::InvalidArguments(format!(
            "no account with id {id}"
        )));
    };
    let name = account.name.clone();

    if !context.confirm(&format!(
        "Delete account `{name}` and all of its transactions?"
    ))? {
        output::print_info("Cancelled.");
        return Ok(());
    }

    let purged = context.store.purge_account_transactions(id);
    context.store.delete_account(id);
    output::print_success(&format!(
        "Deleted account `{name}` and {purged} transaction(s)"
    ));
    Ok(())
}
