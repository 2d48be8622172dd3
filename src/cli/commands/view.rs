use crate::cli::core::{
    parse_date, parse_month, parse_month_index, CommandError, CommandResult, ShellContext,
};
use crate::cli::formatters::format_currency;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::today;
use crate::core::services::{AggregationService, Direction, SortKey};
use crate::ledger::{format_date, MonthKey};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "month",
            "Switch the active month",
            "month <year> <1-12|name> | month next|prev",
            cmd_month,
        ),
        CommandEntry::new("today", "Jump to the current month", "today", cmd_today),
        CommandEntry::new(
            "day",
            "Filter the list to one day; the same day again clears it",
            "day <YYYY-MM-DD|clear>",
            cmd_day,
        ),
        CommandEntry::new(
            "search",
            "Filter by bucket or note text; no text clears the search",
            "search [text...]",
            cmd_search,
        ),
        CommandEntry::new(
            "sort",
            "Sort the list",
            "sort <date-asc|date-desc|amount-asc|amount-desc|none>",
            cmd_sort,
        ),
        CommandEntry::new(
            "compare",
            "Compare the month total with another month of the same year",
            "compare [1-12|name]",
            cmd_compare,
        ),
    ]
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let current = context.view.month();
    let month = match args {
        [direction] if direction.eq_ignore_ascii_case("next") => shift(current, 1),
        [direction] if direction.eq_ignore_ascii_case("prev") => shift(current, -1),
        [year, month] => Some(parse_month(year, month)?),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: month <year> <1-12|name> | month next|prev".into(),
            ))
        }
    }
    .ok_or_else(|| CommandError::InvalidArguments("month is out of range".into()))?;

    context.view = context.view.with_month(month);
    announce_month(month);
    Ok(())
}

fn shift(month: MonthKey, delta: i32) -> Option<MonthKey> {
    let absolute = month.year() * 12 + month.month_index() as i32 + delta;
    MonthKey::new(absolute.div_euclid(12), absolute.rem_euclid(12) as u32)
}

fn cmd_today(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.view = context.view.today(today());
    announce_month(context.view.month());
    Ok(())
}

fn announce_month(month: MonthKey) {
    io::print_info(format!("Viewing {} {}.", month.month_name(), month.year()));
}

fn cmd_day(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: day <YYYY-MM-DD|clear>".into(),
        ));
    };
    if raw.eq_ignore_ascii_case("clear") {
        context.view = context.view.clear_day();
        io::print_info("Day filter cleared.");
        return Ok(());
    }
    let date = parse_date(raw)?;
    let month = context.view.month();
    let day = format_date(date);
    if !month.contains(&day) {
        return Err(CommandError::InvalidArguments(format!(
            "{} is outside {} {}; switch months first",
            day,
            month.month_name(),
            month.year()
        )));
    }
    context.view = context.view.toggle_day(day);
    match context.view.day_filter() {
        Some(day) => io::print_info(format!("Showing entries for {}.", day)),
        None => io::print_info("Day filter cleared."),
    }
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let text = args.join(" ");
    context.view = context.view.with_search(text.trim());
    if context.view.search().is_empty() {
        io::print_info("Search cleared.");
    } else {
        io::print_info(format!("Searching for `{}`.", context.view.search()));
    }
    Ok(())
}

fn cmd_sort(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let sort = match args.first() {
        None => None,
        Some(raw) if raw.eq_ignore_ascii_case("none") => None,
        Some(raw) => Some(raw.parse::<SortKey>().map_err(CommandError::InvalidArguments)?),
    };
    context.view = context.view.with_sort(sort);
    match sort {
        Some(key) => io::print_info(format!("Sorting by {}.", key)),
        None => io::print_info("Showing entries in stored order."),
    }
    Ok(())
}

fn cmd_compare(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(raw) = args.first() {
        context.view = context.view.with_compare_month(parse_month_index(raw)?);
    }
    let comparison = AggregationService::compare(
        context.ledger_manager.document(),
        context.view.month(),
        context.view.compare_key(),
    );
    let currency = context.currency();
    let a = comparison.month_a;
    let b = comparison.month_b;
    io::print_info(format!(
        "{} {}: {}",
        a.month_name(),
        a.year(),
        format_currency(comparison.total_a, currency)
    ));
    io::print_info(format!(
        "{} {}: {}",
        b.month_name(),
        b.year(),
        format_currency(comparison.total_b, currency)
    ));
    let magnitude = format_currency(comparison.magnitude(), currency);
    let line = match comparison.direction() {
        Direction::More => format!("{} more than {}.", magnitude, b.month_name()),
        Direction::Less => format!("{} less than {}.", magnitude, b.month_name()),
        Direction::Same => format!("Same as {}.", b.month_name()),
    };
    io::print_info(line);
    Ok(())
}
