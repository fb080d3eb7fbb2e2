use chrono::Datelike;

use fintrack_domain::{CategoryPatch, NewCategory};

use crate::cli::core::{
    parse_amount, parse_month, CommandError, CommandResult, ShellContext,
};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const DEFAULT_COLOR: &str = "#6b7280";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "Manage spending categories and budgets",
        "category <list|add|budget|clear> ...",
        cmd_category,
    )]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: category <list|add|budget|clear>".into(),
        ));
    };
    match action.to_lowercase().as_str() {
        "list" => handle_list(context, rest),
        "add" => handle_add(context, rest),
        "budget" => handle_budget(context, rest),
        "clear" => handle_clear(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{other}`"
        ))),
    }
}

/// `category list [YYYY-MM]` shows budget progress for the month.
fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (year, month) = match args.first() {
        Some(value) => parse_month(value)?,
        None => {
            let today = context.today();
            (today.year(), today.month())
        }
    };
    let settings = context.store.settings().clone();

    output::print_header(&format!("Budgets for {year}-{month:02}"));
    let rows = context.store.budget_overview(year, month);
    if rows.is_empty() {
        output::print_info("No budgeted categories.");
    }
    for row in rows {
        output::print_info(&format!(
            "{:<16} {:>12} of {:>12}  ({:.1}%, {} left)",
            row.category,
            output::format_currency(&settings, row.spent),
            output::format_currency(&settings, row.budget),
            row.percent,
            output::format_currency(&settings, row.remaining),
        ));
    }

    let unbudgeted: Vec<_> = context
        .store
        .categories()
        .iter()
        .filter(|c| !c.is_budgeted())
        .map(|c| c.name.clone())
        .collect();
    if !unbudgeted.is_empty() {
        output::print_detail(&format!("without budget: {}", unbudgeted.join(", ")));
    }
    Ok(())
}

/// `category add <name> [budget] [color]`
fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: category add <name> [budget] [color]".into(),
        ));
    };
    if context.store.category_by_name(name).is_some() {
        return Err(CommandError::InvalidArguments(format!(
            "category `{name}` already exists"
        )));
    }
    let budget = match args.get(1) {
        Some(value) => parse_amount(value)?,
        None => 0.0,
    };
    let color = args.get(2).copied().unwrap_or(DEFAULT_COLOR);
    let category = context
        .store
        .create_category(NewCategory::new(*name, budget, color));
    output::print_success(&format!(
        "Created category #{} `{}`",
        category.id, category.name
    ));
    Ok(())
}

/// `category budget <name> <amount>`: sets the monthly budget, creating
/// the category on the fly when the name is new.
fn handle_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (Some(name), Some(amount)) = (args.first(), args.get(1)) else {
        return Err(CommandError::InvalidArguments(
            "usage: category budget <name> <amount>".into(),
        ));
    };
    let amount = parse_amount(amount)?;

    if let Some(category) = context.store.category_by_name(name) {
        let id = category.id;
        context.store.update_category(
            id,
            CategoryPatch {
                budget: Some(amount),
                ..Default::default()
            },
        );
        output::print_success(&format!("Set `{name}` budget to {amount:.2}"));
    } else {
        let category = context
            .store
            .create_category(NewCategory::new(*name, amount, DEFAULT_COLOR));
        output::print_success(&format!(
            "Created category #{} `{}` with budget {amount:.2}",
            category.id, category.name
        ));
    }
    Ok(())
}

/// `category clear <name>`: drops the budget to zero. The category stays,
/// so its transactions keep their label.
fn handle_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: category clear <name>".into(),
        ));
    };
    let Some(category) = context.store.category_by_name(name) else {
        return Err(CommandError::InvalidArguments(format!(
            "no category named `{name}`"
        )));
    };
    let id = category.id;
    context.store.update_category(
        id,
        CategoryPatch {
            budget: Some(0.0),
            ..Default::default()
        },
    );
    output::print_success(&format!("Cleared budget for `{name}`"));
    Ok(())
}
