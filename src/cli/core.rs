//! Core CLI dispatch, error types and shell context helpers.

use std::io;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use strsim::levenshtein;

use crate::{
    core::services::ServiceError,
    errors::LedgerError,
    ledger::{parse_entry_date, MonthKey},
};

use super::io as cli_io;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Fatal shell error; the binary reports it and exits with status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

/// Per-command failure, reported before the shell reads the next line.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(err) => CommandError::Core(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    /// Asks before a destructive action. Script mode never prompts: it proceeds only
    /// when `--yes` was passed.
    pub(crate) fn confirm_destructive(
        &self,
        prompt: &str,
        args: &[&str],
    ) -> Result<bool, CommandError> {
        if args.iter().any(|arg| matches!(*arg, "--yes" | "-y")) {
            return Ok(true);
        }
        if self.mode == CliMode::Script {
            cli_io::print_warning("Confirmation required; rerun with `--yes` in script mode.");
            return Ok(false);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    parse_entry_date(input).ok_or_else(|| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

// Commas only as thousands separators: `1,234.50` but never `1,5` or `12,34`.
static GROUPED_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?[0-9]{1,3}(,[0-9]{3})+(\.[0-9]+)?$").expect("valid amount pattern")
});

/// Accepts a leading `$` and comma thousands separators; other commas are rejected.
pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    let invalid = || CommandError::InvalidArguments(format!("invalid amount `{}`", input));
    let text = input.trim().trim_start_matches('$');
    if text.contains(',') && !GROUPED_AMOUNT.is_match(text) {
        return Err(invalid());
    }
    text.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(invalid)
}

/// Month index from `1`-`12` or a month name prefix such as `mar`.
pub(crate) fn parse_month_index(input: &str) -> Result<u32, CommandError> {
    if let Ok(number) = input.parse::<u32>() {
        if (1..=12).contains(&number) {
            return Ok(number - 1);
        }
    }
    let needle = input.to_ascii_lowercase();
    if needle.len() >= 3 {
        if let Some(index) = crate::ledger::MONTH_NAMES
            .iter()
            .position(|name| name.to_ascii_lowercase().starts_with(&needle))
        {
            return Ok(index as u32);
        }
    }
    Err(CommandError::InvalidArguments(format!(
        "invalid month `{}` (use 1-12 or a month name)",
        input
    )))
}

pub(crate) fn parse_month(year: &str, month: &str) -> Result<MonthKey, CommandError> {
    let year: i32 = year
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid year `{}`", year)))?;
    let index = parse_month_index(month)?;
    MonthKey::new(year, index)
        .ok_or_else(|| CommandError::InvalidArguments(format!("year {} is out of range", year)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_symbols_and_grouping() {
        assert_eq!(parse_amount("$1,234.50").unwrap(), 1234.5);
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn commas_must_group_thousands() {
        assert_eq!(parse_amount("1,234.50").unwrap(), 1234.5);
        assert_eq!(parse_amount("12,345,678").unwrap(), 12_345_678.0);
        assert_eq!(parse_amount("1234.5").unwrap(), 1234.5);
        for ambiguous in ["1,5", "12,34", "1,2345", ",500", "1,,000", "1.5,000"] {
            assert!(parse_amount(ambiguous).is_err(), "{}", ambiguous);
        }
    }

    #[test]
    fn months_parse_from_numbers_or_names() {
        assert_eq!(parse_month_index("3").unwrap(), 2);
        assert_eq!(parse_month_index("Sept").unwrap(), 8);
        assert!(parse_month_index("13").is_err());
        assert!(parse_month_index("ju").is_err());
        let key = parse_month("2024", "dec").unwrap();
        assert_eq!(key.to_string(), "2024-12");
    }

    #[test]
    fn dates_must_be_real_days() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2023-02-29").is_err());
    }
}
