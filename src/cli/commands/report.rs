use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::formatters::{bar, calendar_grid, format_currency};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::core::services::{AggregationService, MonthSlice, QueryService};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "list",
            "List the month's entries with the current filters",
            "list",
            cmd_list,
        )
        .with_aliases(&["ls"]),
        CommandEntry::new(
            "summary",
            "Show month totals and per-bucket bars",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "calendar",
            "Show per-day totals for the month",
            "calendar",
            cmd_calendar,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let document = context.ledger_manager.document();
    let view = &context.view;
    let month = view.month();
    output_section(format!("{} {}", month.month_name(), month.year()));

    if !document.version().is_transactional() {
        io::print_info("Monthly ledgers keep bucket totals only; use `summary`.");
        return Ok(());
    }

    let entries = QueryService::visible_entries(document, view);
    if entries.is_empty() {
        io::print_info("No entries match.");
        return Ok(());
    }
    for entry in &entries {
        let note = if entry.note().is_empty() {
            String::new()
        } else {
            format!("  {}", entry.note())
        };
        io::print_info(format!(
            "{}  {:<18} {:>12}  [{}]{}",
            entry.date(),
            entry.label(),
            format_currency(entry.amount(), context.currency()),
            entry.id(),
            note
        ));
    }
    io::print_info(format!(
        "{} entr{}, {} total.",
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" },
        format_currency(
            AggregationService::sum_entries(&entries),
            context.currency()
        )
    ));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary =
        AggregationService::month_summary(context.ledger_manager.document(), context.view.month());
    let currency = context.currency();
    output_section(format!(
        "Summary for {} {}",
        summary.month.month_name(),
        summary.month.year()
    ));

    if let (Some(spent), Some(income)) = (summary.spent, summary.income) {
        io::print_info(format!("  Spent        : {}", format_currency(spent, currency)));
        io::print_info(format!("  Income       : {}", format_currency(income, currency)));
    } else {
        io::print_info(format!("  Entries      : {}", summary.count));
    }
    io::print_info(format!(
        "  Total        : {}",
        format_currency(summary.total, currency)
    ));
    io::print_info(format!(
        "  Per day      : {}",
        format_currency(summary.average_per_day, currency)
    ));

    let max = summary
        .groups
        .first()
        .map_or(0.0, |group| group.total);
    if summary.groups.is_empty() {
        io::print_info("  No spending recorded.");
    }
    for group in &summary.groups {
        io::print_info(format!(
            "  {:<18} {:>12}  {}",
            group.label,
            format_currency(group.total, currency),
            bar(group.total, max)
        ));
    }
    Ok(())
}

fn cmd_calendar(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let month = context.view.month();
    let slice = AggregationService::entries_for_month(context.ledger_manager.document(), month);
    output_section(format!("{} {}", month.month_name(), month.year()));
    if let MonthSlice::Monthly { .. } = slice {
        io::print_info("Monthly ledgers have no per-day totals.");
        return Ok(());
    }
    let totals = AggregationService::per_day_totals(slice.entries());
    for line in calendar_grid(month, &totals, context.view.day_filter()) {
        io::print_info(line);
    }
    Ok(())
}
