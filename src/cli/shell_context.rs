use std::sync::Arc;

use chrono::{Local, NaiveDate};
use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::{ledger_manager::LedgerManager, LoadMetadata, ViewState},
    storage::{JsonStorage, LoadSource, RecordStore},
};

use super::{commands, core::CliError, io as cli_io, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger_manager: LedgerManager,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub view: ViewState,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        cli_io::apply_config(&config);
        let ledger_manager = Self::open_ledger(&config_manager, &config)?;

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            registry,
            ledger_manager,
            config_manager,
            config,
            view: ViewState::for_today(today()),
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    /// Opens the record store for the configured schema version and loads it.
    pub(crate) fn open_ledger(
        config_manager: &ConfigManager,
        config: &Config,
    ) -> Result<LedgerManager, CliError> {
        let storage = JsonStorage::in_dir(config_manager.storage_dir(config))?;
        let store = RecordStore::new(Arc::new(storage), config.schema_version);
        let mut manager = LedgerManager::new(store);
        let metadata = manager.load();
        report_load(&metadata);
        Ok(manager)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&super::registry::CommandEntry> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        format!(
            "budget [{} {}]> ",
            self.view.month(),
            self.ledger_manager.version()
        )
    }

    pub fn currency(&self) -> &str {
        &self.config.currency
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn report_load(metadata: &LoadMetadata) {
    if let LoadSource::Migrated { from } = metadata.source {
        cli_io::print_info(format!("Upgraded stored data from schema {}.", from));
        for step in &metadata.migrations {
            cli_io::print_info(format!("Migration: {}", step));
        }
    }
    if metadata.dropped > 0 {
        cli_io::print_warning(format!(
            "Skipped {} stored record(s) that could not be read.",
            metadata.dropped
        ));
    }
}
