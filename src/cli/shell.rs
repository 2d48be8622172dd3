use std::{
    borrow::Cow,
    io::{self, BufRead},
    path::PathBuf,
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use tracing::{debug, warn};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output::info as output_info;
use crate::config::Config;
use crate::core::services::SortKey;
use crate::ledger::Bucket;

const SCRIPT_ENV: &str = "BUDGET_PLANNER_CLI_SCRIPT";
const HISTORY_FILE: &str = "history.txt";

/// Starts the shell: line-per-command from stdin when `BUDGET_PLANNER_CLI_SCRIPT`
/// is set, otherwise an interactive prompt.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ShellHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(ShellHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    let history = history_path(context);
    if editor.load_history(&history).is_err() {
        debug!(path = %history.display(), "no shell history yet");
    }

    output_info(format!(
        "Budget Planner ({} ledger). Type `help` for commands.",
        context.ledger_manager.version()
    ));

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                if execute(context, line)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Err(err) = editor.save_history(&history) {
        warn!(path = %history.display(), error = %err, "failed to save shell history");
    }
    Ok(())
}

/// Blank lines and lines starting with `#` are skipped.
fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if execute(context, line)? == LoopControl::Exit || !context.running {
            break;
        }
    }
    Ok(())
}

fn history_path(context: &ShellContext) -> PathBuf {
    context.config_manager.base_dir().join(HISTORY_FILE)
}

/// Runs one line; command failures are reported and do not stop the shell.
fn execute(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match handle_line(context, line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            cli_io::print_warning(format!("Could not parse `{}`: {}", line, err));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    let control = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completes command names, then the fixed argument values some commands take.
struct ShellHelper {
    commands: Vec<String>,
}

impl ShellHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn argument_values(command: &str, position: usize) -> Vec<String> {
        match (command, position) {
            ("sort", 0) => SortKey::ALL
                .iter()
                .map(|key| key.as_str().to_string())
                .chain(["none".to_string()])
                .collect(),
            ("add", 0) | ("add", 1) => Bucket::ALL
                .iter()
                .map(|bucket| quoted(bucket.as_str()))
                .collect(),
            ("month", 0) => vec!["next".into(), "prev".into()],
            ("income", 0) => vec!["salary".into(), "other".into()],
            ("day", 0) => vec!["clear".into()],
            ("config", 0) => vec!["show".into(), "set".into()],
            ("config", 1) => Config::KEYS.iter().map(|key| key.to_string()).collect(),
            ("wipe", 0) | ("clear-month", 0) => vec!["--yes".into()],
            _ => Vec::new(),
        }
    }
}

fn quoted(value: &str) -> String {
    if value.contains(' ') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix.rfind(char::is_whitespace).map_or(0, |idx| idx + 1);
        let needle = prefix[start..].to_ascii_lowercase();
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();

        let candidates: Vec<String> = match words.split_first() {
            None => self.commands.clone(),
            Some((command, args)) => {
                Self::argument_values(&command.to_ascii_lowercase(), args.len())
            }
        };
        let pairs = candidates
            .into_iter()
            .filter(|value| {
                value
                    .trim_start_matches('"')
                    .to_ascii_lowercase()
                    .starts_with(needle.trim_start_matches('"'))
            })
            .map(|value| Pair {
                display: value.clone(),
                replacement: value,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for ShellHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_are_offered_after_sort() {
        let values = ShellHelper::argument_values("sort", 0);
        assert!(values.contains(&"amount-desc".to_string()));
        assert!(values.contains(&"none".to_string()));
    }

    #[test]
    fn bucket_names_with_spaces_are_quoted() {
        let values = ShellHelper::argument_values("add", 1);
        assert!(values.contains(&"\"Health & Finance\"".to_string()));
        assert!(values.contains(&"Food".to_string()));
    }

    #[test]
    fn free_text_arguments_have_no_candidates() {
        assert!(ShellHelper::argument_values("search", 0).is_empty());
        assert!(ShellHelper::argument_values("config", 2).is_empty());
    }
}
