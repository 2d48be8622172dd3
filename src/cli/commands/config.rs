use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::today;
use crate::config::Config;
use crate::core::ViewState;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    Config::KEYS.join("|")
                )));
            }
            let value = args[2..].join(" ");
            set_config_value(context, args[1], value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}` (use show or set)",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output_section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {:<18} {}", key, value));
    }
    io::print_info(format!(
        "  {:<18} {}",
        "file",
        context.config_manager.path().display()
    ));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config_manager.save(&updated)?;

    let reopen = updated.schema_version != context.config.schema_version
        || updated.storage_dir != context.config.storage_dir;
    if reopen {
        context.ledger_manager =
            ShellContext::open_ledger(&context.config_manager, &updated).map_err(|err| {
                CommandError::Message(err.to_string())
            })?;
        context.view = ViewState::for_today(today());
        io::print_info(format!(
            "Active ledger is now {} ({} record(s)).",
            context.ledger_manager.version(),
            context.ledger_manager.document().record_count()
        ));
    }

    io::apply_config(&updated);
    context.config = updated;
    io::print_success("Configuration updated.");
    Ok(())
}
