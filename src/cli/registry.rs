use std::collections::BTreeMap;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub aliases: &'static [&'static str],
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            aliases: &[],
            handler,
        }
    }

    /// Extra names that dispatch to this command.
    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

/// Commands in registration order; lookups accept names and aliases.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<CommandEntry>,
    index: BTreeMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations of a taken name or alias replace the earlier mapping.
    pub fn register(&mut self, entry: CommandEntry) {
        let position = self.commands.len();
        self.index.insert(entry.name, position);
        for alias in entry.aliases {
            self.index.insert(*alias, position);
        }
        self.commands.push(entry);
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.index
            .get(name)
            .and_then(|position| self.commands.get(*position))
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.commands.iter().collect()
    }

    /// Primary names followed by aliases, for completion and suggestions.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands
            .iter()
            .map(|entry| entry.name)
            .chain(self.commands.iter().flat_map(|entry| entry.aliases.iter().copied()))
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn aliases_resolve_to_the_primary_entry() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("list", "List", "list", noop).with_aliases(&["ls"]));
        registry.register(CommandEntry::new("exit", "Exit", "exit", noop));

        assert_eq!(registry.get("ls").map(|entry| entry.name), Some("list"));
        assert!(registry.get("quit").is_none());
        assert_eq!(registry.list().len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["list", "exit", "ls"]);
    }
}
