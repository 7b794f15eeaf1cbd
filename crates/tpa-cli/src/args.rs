//! Command-line arguments

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tpa_console::ExportFormat;
use tpa_model::ProgramDraft;
use tpa_store::StoreConfig;

/// Manage corporate training programs
#[derive(Debug, Parser)]
#[command(name = "tpa", version, about = "Training program administration")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding persisted programs (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true, default_value_t = false)]
    pub log_json: bool,

    /// Action to run
    #[command(subcommand)]
    pub command: Action,
}

impl Cli {
    /// Resolve configuration: file (or defaults), then `--data-dir`
    ///
    /// # Errors
    /// Returns error if the config file cannot be read or is invalid
    pub fn store_config(&self) -> anyhow::Result<StoreConfig> {
        let config = match &self.config {
            Some(path) => StoreConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => StoreConfig::default(),
        };
        Ok(match &self.data_dir {
            Some(dir) => config.with_data_dir(dir.clone()),
            None => config,
        })
    }
}

/// `tpa` subcommands
#[derive(Debug, Subcommand)]
pub enum Action {
    /// Add a new program
    Add(ProgramFields),
    /// Change fields of an existing program
    Edit {
        /// Program id
        id: String,
        /// Fields to change
        #[command(flatten)]
        fields: ProgramFields,
    },
    /// Delete a program
    Delete {
        /// Program id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// List programs, optionally filtered
    List {
        /// Case-insensitive name search
        #[arg(long, default_value = "")]
        search: String,
        /// Status filter (`all`, `scheduled`, `active`, `completed`)
        #[arg(long, default_value = "all")]
        status: String,
        /// Type filter (`all`, `technical`, `leadership`, ...)
        #[arg(long = "type", default_value = "all")]
        program_type: String,
        /// Print cards as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one program
    Show {
        /// Program id
        id: String,
    },
    /// Advance a program's status
    Status {
        /// Program id
        id: String,
        /// New status (`active` or `completed`)
        status: String,
    },
    /// Export programs
    Export {
        /// `json` or `csv`
        #[arg(long, default_value = "json")]
        format: String,
        /// Status filter
        #[arg(long, default_value = "all")]
        status: String,
        /// Type filter
        #[arg(long = "type", default_value = "all")]
        program_type: String,
        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Headline totals
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Program form fields; absent flags keep their current value on edit
#[derive(Debug, Default, clap::Args)]
pub struct ProgramFields {
    /// Program name
    #[arg(long)]
    pub name: Option<String>,
    /// Program type
    #[arg(long = "type")]
    pub program_type: Option<String>,
    /// Department
    #[arg(long)]
    pub department: Option<String>,
    /// Start date, `YYYY-MM-DD`
    #[arg(long)]
    pub start_date: Option<String>,
    /// Duration in weeks
    #[arg(long, allow_negative_numbers = true)]
    pub duration: Option<i64>,
    /// Participant capacity
    #[arg(long, allow_negative_numbers = true)]
    pub max_participants: Option<i64>,
    /// Cost in rupees
    #[arg(long, allow_negative_numbers = true)]
    pub cost: Option<i64>,
}

impl ProgramFields {
    /// Overlay the given flags onto `draft`
    #[must_use]
    pub fn apply_to(self, mut draft: ProgramDraft) -> ProgramDraft {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(program_type) = self.program_type {
            draft.program_type = program_type;
        }
        if let Some(department) = self.department {
            draft.department = department;
        }
        if let Some(start_date) = self.start_date {
            draft.start_date = start_date;
        }
        draft.duration = self.duration.or(draft.duration);
        draft.max_participants = self.max_participants.or(draft.max_participants);
        draft.program_cost = self.cost.or(draft.program_cost);
        draft
    }
}

/// Parse an export format flag
///
/// # Errors
/// Returns error for anything but `json` or `csv`
pub fn parse_format(raw: &str) -> anyhow::Result<ExportFormat> {
    Ok(raw.parse::<ExportFormat>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_add() {
        let cli = Cli::try_parse_from([
            "tpa",
            "--data-dir",
            "/tmp/x",
            "add",
            "--name",
            "AI Basics",
            "--type",
            "technical",
            "--duration",
            "4",
        ])
        .unwrap();
        let Action::Add(fields) = cli.command else {
            panic!("expected add");
        };
        let draft = fields.apply_to(ProgramDraft::default());
        assert_eq!(draft.name, "AI Basics");
        assert_eq!(draft.program_type, "technical");
        assert_eq!(draft.duration, Some(4));
        assert_eq!(draft.max_participants, None);
        assert_eq!(
            cli.data_dir.as_deref(),
            Some(std::path::Path::new("/tmp/x"))
        );
    }

    #[test]
    fn edit_keeps_unset_fields() {
        let base = ProgramDraft::new("AI Basics").with_duration(4).with_program_cost(10);
        let fields = ProgramFields {
            cost: Some(0),
            ..ProgramFields::default()
        };
        let draft = fields.apply_to(base);
        assert_eq!(draft.name, "AI Basics");
        assert_eq!(draft.duration, Some(4));
        assert_eq!(draft.program_cost, Some(0));
    }

    #[test]
    fn data_dir_overrides_default() {
        let cli = Cli::try_parse_from(["tpa", "summary", "--data-dir", "/srv/tpa"]).unwrap();
        let config = cli.store_config().unwrap();
        assert_eq!(config.data_dir, std::path::PathBuf::from("/srv/tpa"));
        assert_eq!(config.storage_key, "trainingPrograms");
    }
}
