use fintrack_domain::{GoalPatch, NewGoal};

use crate::cli::core::{
    parse_amount, parse_date, parse_id, CommandError, CommandResult, ShellContext,
};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "goal",
        "Track savings goals",
        "goal <add|list|fund|edit|remove> ...",
        cmd_goal,
    )]
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: goal <add|list|fund|edit|remove>".into(),
        ));
    };
    match action.to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" => handle_list(context),
        "fund" => handle_fund(context, rest),
        "edit" => handle_edit(context, rest),
        "remove" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown goal subcommand `{other}`"
        ))),
    }
}

/// `goal add <name> <target> [current] [deadline]`
fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (Some(name), Some(target)) = (args.first(), args.get(1)) else {
        return Err(CommandError::InvalidArguments(
            "usage: goal add <name> <target> [current] [deadline]".into(),
        ));
    };
    let mut draft = NewGoal::new(*name, parse_amount(target)?);
    if let Some(current) = args.get(2) {
        draft = draft.with_current(parse_amount(current)?);
    }
    if let Some(deadline) = args.get(3) {
        draft = draft.with_deadline(parse_date(deadline)?);
    }
    let goal = context.store.create_goal(draft);
    output::print_success(&format!("Created goal #{} `{}`", goal.id, goal.name));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let settings = context.store.settings().clone();
    let goals = context.store.goals();
    if goals.is_empty() {
        output::print_info("No goals yet. Add one with `goal add`.");
        return Ok(());
    }
    output::print_header("Goals");
    for goal in goals {
        let deadline = goal
            .deadline
            .map(|d| output::format_date(&settings, d))
            .unwrap_or_else(|| "-".into());
        output::print_info(&format!(
            "#{:<4} {:<20} {:>12} of {:>12}  ({:.1}%, due {})",
            goal.id,
            goal.name,
            output::format_currency(&settings, goal.current),
            output::format_currency(&settings, goal.target),
            goal.progress_percent(),
            deadline,
        ));
    }
    Ok(())
}

/// `goal fund <id> <amount>` adds to the saved amount.
fn handle_fund(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (Some(id), Some(amount)) = (args.first(), args.get(1)) else {
        return Err(CommandError::InvalidArguments(
            "usage: goal fund <id> <amount>".into(),
        ));
    };
    let id = parse_id(id)?;
    let amount = parse_amount(amount)?;
    let Some(goal) = context.store.goal(id) else {
        return Err(CommandError::InvalidArguments(format!("no goal with id {id}")));
    };
    let current = goal.current + amount;
    let updated = context
        .store
        .update_goal(
            id,
            GoalPatch {
                current: Some(current),
                ..Default::default()
            },
        )
        .ok_or_else(|| CommandError::InvalidArguments(format!("no goal with id {id}")))?;
    output::print_success(&format!(
        "Goal `{}` now at {:.1}%",
        updated.name,
        updated.progress_percent()
    ));
    Ok(())
}

/// `goal edit <id> <field> <value>`
fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 3 {
        return Err(CommandError::InvalidArguments(
            "usage: goal edit <id> <name|target|current|deadline> <value>".into(),
        ));
    }
    let id = parse_id(args[0])?;
    let patch = match args[1].to_lowercase().as_str() {
        "name" => GoalPatch {
            name: Some(args[2].to_string()),
            ..Default::default()
        },
        "target" => GoalPatch {
            target: Some(parse_amount(args[2])?),
            ..Default::default()
        },
        "current" => GoalPatch {
            current: Some(parse_amount(args[2])?),
            ..Default::default()
        },
        "deadline" => GoalPatch {
            deadline: Some(parse_date(args[2])?),
            ..Default::default()
        },
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown goal field `{other}`"
            )))
        }
    };
    match context.store.update_goal(id, patch) {
        Some(goal) => {
            output::print_success(&format!("Updated goal #{} `{}`", goal.id, goal.name));
            Ok(())
        }
        None => Err(CommandError::InvalidArguments(format!("no goal with id {id}"))),
    }
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(id) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: goal remove <id>".into()));
    };
    let id = parse_id(id)?;
    match context.store.delete_goal(id) {
        Some(goal) => {
            output::print_success(&format!("Deleted goal `{}`", goal.name));
            Ok(())
        }
        None => Err(CommandError::InvalidArguments(format!("no goal with id {id}"))),
    }
}
