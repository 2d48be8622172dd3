use crate::cli::core::{parse_amount, CommandError, CommandResult, ShellContext};
use crate::cli::formatters::format_currency;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::services::EntryDraft;
use crate::ledger::{Bucket, IncomeKind};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an entry (monthly ledgers: add to a bucket of the active month)",
            "add <YYYY-MM-DD> <bucket> <amount> [note...] | add <bucket> <amount>",
            cmd_add,
        ),
        CommandEntry::new("delete", "Delete an entry by id", "delete <id>", cmd_delete)
            .with_aliases(&["rm"]),
        CommandEntry::new(
            "income",
            "Set the active month's salary or other income (monthly ledgers)",
            "income <salary|other> <amount>",
            cmd_income,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.ledger_manager.version().is_transactional() {
        add_entry(context, args)
    } else {
        add_to_bucket(context, args)
    }
}

fn add_entry(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, label, amount, note @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: add <YYYY-MM-DD> <bucket> <amount> [note...]".into(),
        ));
    };
    let amount = parse_amount(amount)?;
    let draft = EntryDraft::new(*date, *label, amount, note.join(" "));
    let id = context.ledger_manager.add_entry(draft.clone())?;
    context.view = context.view.after_entry(&draft.date);
    io::print_success(format!(
        "Added {} to {} on {} [{}].",
        format_currency(amount, context.currency()),
        label,
        draft.date,
        id
    ));
    Ok(())
}

fn add_to_bucket(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [bucket, amount] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: add <bucket> <amount>".into(),
        ));
    };
    let bucket: Bucket = bucket.parse().map_err(CommandError::InvalidArguments)?;
    let amount = parse_amount(amount)?;
    let month = context.view.month();
    let total = context.ledger_manager.add_to_bucket(month, bucket, amount)?;
    io::print_success(format!(
        "{} is now {} for {} {}.",
        bucket,
        format_currency(total, context.currency()),
        month.month_name(),
        month.year()
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };
    context.ledger_manager.remove_entry(id)?;
    io::print_success(format!("Deleted entry {}.", id));
    Ok(())
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: income <salary|other> <amount>".into(),
        ));
    };
    let kind = IncomeKind::parse(kind).ok_or_else(|| {
        CommandError::InvalidArguments(format!("unknown income `{}` (salary or other)", kind))
    })?;
    let amount = parse_amount(amount)?;
    let month = context.view.month();
    context.ledger_manager.set_income(month, kind, amount)?;
    io::print_success(format!(
        "Income updated for {} {}.",
        month.month_name(),
        month.year()
    ));
    Ok(())
}
