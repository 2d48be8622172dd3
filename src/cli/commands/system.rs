use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters::format_currency;
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::core::services::AggregationService;
use crate::ledger::SchemaVersion;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        )
        .with_aliases(&["?"]),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "status",
            "Show the active ledger and view",
            "status",
            cmd_status,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit", "q"]),
    ]
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Budget Planner {}", meta.version));
    io::print_info(format!("  CLI version  : {}", build_info::CLI_VERSION));
    io::print_info(format!("  Latest schema: {}", SchemaVersion::LATEST));
    io::print_info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    io::print_info(format!("  Built at     : {}", meta.timestamp));
    io::print_info(format!("  Target       : {}", meta.target));
    io::print_info(format!("  Profile      : {}", meta.profile));
    io::print_info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(command) = context.command(&command) {
            help::print_command(command);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let manager = &context.ledger_manager;
    let view = &context.view;
    let month = view.month();
    let total = AggregationService::sum(&AggregationService::entries_for_month(
        manager.document(),
        month,
    ));

    output_section("Status");
    io::print_info(format!(
        "  Schema       : {} (key `{}`)",
        manager.version(),
        manager.store().key()
    ));
    io::print_info(format!("  Records      : {}", manager.document().record_count()));
    io::print_info(format!(
        "  Month        : {} {}",
        month.month_name(),
        month.year()
    ));
    io::print_info(format!(
        "  Month total  : {}",
        format_currency(total, context.currency())
    ));
    io::print_info(format!(
        "  Day filter   : {}",
        view.day_filter().unwrap_or("none")
    ));
    let search = if view.search().trim().is_empty() {
        "none"
    } else {
        view.search()
    };
    io::print_info(format!("  Search       : {}", search));
    io::print_info(format!(
        "  Sort         : {}",
        view.sort().map_or("none", |sort| sort.as_str())
    ));
    io::print_info(format!(
        "  Compare with : {} {}",
        view.compare_key().month_name(),
        view.compare_key().year()
    ));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
