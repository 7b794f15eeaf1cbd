//! Runs one CLI action against a file-backed console

use crate::args::{parse_format, Action, Cli};
use crate::terminal::{StdinConfirmation, TerminalNotifier};
use anyhow::Context;
use std::io::Write;
use std::process::ExitCode;
use tpa_console::{
    AutoConfirm, Command, CommandOutcome, Console, ConsoleError, Notification, Notifier,
    ProgramCard,
};
use tpa_model::{ProgramDraft, ProgramId, ProgramStatus};
use tpa_store::{FileStorage, ProgramQuery, StoreConfig};

/// Result of a completed CLI action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Action succeeded
    Success,
    /// Action was rejected; the reason was already reported
    Failed,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::Failed => ExitCode::FAILURE,
        }
    }
}

/// Execute `cli.command`, writing data output to `out`
///
/// Command failures are reported as notifications and mapped to
/// [`RunStatus::Failed`]. Unknown filter values count as command failures.
///
/// # Errors
/// Returns error for an unparseable status or export format, or if writing
/// output fails
pub fn run(cli: Cli, config: &StoreConfig, out: &mut dyn Write) -> anyhow::Result<RunStatus> {
    config.validate()?;
    let storage = FileStorage::from_config(config);
    tracing::debug!("Using data directory {}", config.data_dir.display());

    let skip_prompt = matches!(cli.command, Action::Delete { yes: true, .. });
    let opened = if skip_prompt {
        Console::open(storage, config, TerminalNotifier, AutoConfirm::yes())
    } else {
        Console::open(storage, config, TerminalNotifier, StdinConfirmation)
    };
    let mut console = match opened {
        Ok(console) => console,
        Err(e) => return Ok(fail(&e)),
    };

    let command = match cli.command {
        Action::Add(fields) => Command::Add(fields.apply_to(ProgramDraft::default())),
        Action::Edit { id, fields } => {
            let id = ProgramId::new(id);
            let current = console
                .store()
                .get(&id)
                .map(ProgramDraft::from)
                .unwrap_or_default();
            Command::Edit {
                id,
                draft: fields.apply_to(current),
            }
        }
        Action::Delete { id, .. } => Command::Delete {
            id: ProgramId::new(id),
        },
        Action::List {
            search,
            status,
            program_type,
            json,
        } => {
            return match ProgramQuery::parse(&search, &status, &program_type) {
                Ok(query) => list(&mut console, query, json, out),
                Err(e) => Ok(fail(&ConsoleError::from(e))),
            };
        }
        Action::Show { id } => return show(&console, &ProgramId::new(id), out),
        Action::Status { id, status } => Command::SetStatus {
            id: ProgramId::new(id),
            status: status
                .parse::<ProgramStatus>()
                .with_context(|| format!("invalid status '{status}'"))?,
        },
        Action::Export {
            format,
            status,
            program_type,
            output,
        } => {
            let format = parse_format(&format)?;
            let query = match ProgramQuery::parse("", &status, &program_type) {
                Ok(query) => query,
                Err(e) => return Ok(fail(&ConsoleError::from(e))),
            };
            let command = Command::Export { format, query };
            return export(&mut console, command, output.as_deref(), out);
        }
        Action::Summary { json } => {
            let Ok(CommandOutcome::Summary(summary)) = console.dispatch(Command::Summary) else {
                return Ok(RunStatus::Failed);
            };
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            } else {
                writeln!(out, "{summary}")?;
            }
            return Ok(RunStatus::Success);
        }
    };

    match console.dispatch(command) {
        Ok(outcome) => {
            print_outcome(&outcome, out)?;
            Ok(RunStatus::Success)
        }
        Err(_) => Ok(RunStatus::Failed),
    }
}

fn list(
    console: &mut Console<FileStorage>,
    query: ProgramQuery,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<RunStatus> {
    let Ok(CommandOutcome::Listed(view)) = console.dispatch(Command::Query(query)) else {
        return Ok(RunStatus::Failed);
    };
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
    } else {
        writeln!(out, "{view}")?;
    }
    Ok(RunStatus::Success)
}

fn show(
    console: &Console<FileStorage>,
    id: &ProgramId,
    out: &mut dyn Write,
) -> anyhow::Result<RunStatus> {
    match console.store().get(id) {
        Some(record) => {
            writeln!(out, "{}", ProgramCard::from(record))?;
            Ok(RunStatus::Success)
        }
        None => {
            TerminalNotifier.notify(Notification::error("Program not found"));
            Ok(RunStatus::Failed)
        }
    }
}

fn export(
    console: &mut Console<FileStorage>,
    command: Command,
    output: Option<&std::path::Path>,
    out: &mut dyn Write,
) -> anyhow::Result<RunStatus> {
    let Ok(CommandOutcome::Exported { body, .. }) = console.dispatch(command) else {
        return Ok(RunStatus::Failed);
    };
    match output {
        Some(path) => std::fs::write(path, body)
            .with_context(|| format!("writing export to {}", path.display()))?,
        None => out.write_all(body.as_bytes())?,
    }
    Ok(RunStatus::Success)
}

fn print_outcome(outcome: &CommandOutcome, out: &mut dyn Write) -> anyhow::Result<()> {
    match outcome {
        CommandOutcome::Added(record) => writeln!(out, "{}", record.id())?,
        CommandOutcome::Updated(record) | CommandOutcome::StatusChanged(record) => {
            writeln!(out, "{}", ProgramCard::from(record))?;
        }
        _ => {}
    }
    Ok(())
}

fn fail(err: &ConsoleError) -> RunStatus {
    tracing::error!("{}", err);
    TerminalNotifier.notify(Notification::error(err.user_message()));
    RunStatus::Failed
}
