use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::ledger::Bucket;

/// One line per command in registration order, with the bucket names as a reminder.
pub fn print_overview(registry: &CommandRegistry) {
    output_section("Commands");
    let entries = registry.list();
    let width = entries
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);
    for entry in entries {
        io::print_info(format!("  {:<width$}  {}", entry.name, entry.description));
    }
    let buckets: Vec<&str> = Bucket::ALL.iter().map(Bucket::as_str).collect();
    io::print_info(format!("Buckets: {}.", buckets.join(", ")));
    io::print_hint("`help <command>` shows usage. Quote labels containing spaces.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(entry.name);
    io::print_info(entry.description);
    io::print_info(format!("usage: {}", entry.usage));
    if !entry.aliases.is_empty() {
        io::print_info(format!("aliases: {}", entry.aliases.join(", ")));
    }
    if entry.usage.contains("--yes") {
        io::print_hint("Script mode skips this command unless `--yes` is given.");
    }
}
