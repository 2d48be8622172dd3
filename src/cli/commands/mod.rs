pub mod config;
pub mod entry;
pub mod report;
pub mod system;
pub mod transfer;
pub mod view;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(view::definitions());
    commands.extend(report::definitions());
    commands.extend(entry::definitions());
    commands.extend(transfer::definitions());
    commands.extend(config::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_definitions() {
        registry.register(entry);
    }
}
