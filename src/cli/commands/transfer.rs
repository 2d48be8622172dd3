use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::today;
use crate::core::services::TransferService;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write the ledger to a JSON backup file",
            "export [path]",
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Replace the ledger with a JSON backup file",
            "import <path>",
            cmd_import,
        ),
        CommandEntry::new(
            "wipe",
            "Delete every entry in the ledger",
            "wipe [--yes]",
            cmd_wipe,
        ),
        CommandEntry::new(
            "clear-month",
            "Delete the active month's data",
            "clear-month [--yes]",
            cmd_clear_month,
        ),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(path) => PathBuf::from(path),
        None => {
            let file_name = TransferService::export_file_name(today());
            match &context.config.export_dir {
                Some(dir) => dir.join(file_name),
                None => PathBuf::from(file_name),
            }
        }
    };
    context.ledger_manager.export_to_path(&path)?;
    io::print_success(format!("Exported ledger to {}.", path.display()));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::InvalidArguments("usage: import <path>".into()));
    };
    let summary = context.ledger_manager.import_path(&PathBuf::from(path))?;
    for step in &summary.migrations {
        io::print_info(format!("Migration: {}", step));
    }
    if summary.dropped > 0 {
        io::print_warning(format!(
            "Skipped {} invalid record(s).",
            summary.dropped
        ));
    }
    io::print_success(format!(
        "Imported {} record(s) from a {} backup.",
        summary.records, summary.source_version
    ));
    Ok(())
}

fn cmd_wipe(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !context.confirm_destructive("Delete ALL data? This cannot be undone.", args)? {
        io::print_info("Wipe cancelled.");
        return Ok(());
    }
    context.ledger_manager.wipe()?;
    context.view = context.view.clear_day();
    io::print_success("All data deleted.");
    Ok(())
}

fn cmd_clear_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = context.view.month();
    let prompt = format!(
        "Delete all data for {} {}?",
        month.month_name(),
        month.year()
    );
    if !context.confirm_destructive(&prompt, args)? {
        io::print_info("Clear cancelled.");
        return Ok(());
    }
    let removed = context.ledger_manager.clear_month(month)?;
    context.view = context.view.clear_day();
    io::print_success(format!(
        "Cleared {} {} ({} record(s) removed).",
        month.month_name(),
        month.year(),
        removed
    ));
    Ok(())
}
