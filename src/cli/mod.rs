// ABOUTME: CLI argument parsing and command routing for aswiz
//
// Provides command-line access to the persisted draft:
// - Inspecting and editing fields (show, set)
// - Checking step rules (validate, steps)
// - Persisting or discarding the draft (save, reset, sync-totals)
// - Walking the pre-assessment system check (system-check)
// - Launching the TUI (tui, default)

pub mod draft;
pub mod system_check;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

use crate::config::AppConfig;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::wizard::AssessmentForm;

/// Assessment draft wizard - build assessments step by step
#[derive(Parser)]
#[command(name = "aswiz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory holding the persisted draft (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep the draft in memory only; nothing is written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

/// Output format for commands
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// Print the current draft
    Show,

    /// Set one draft field from a JSON value
    Set(SetArgs),

    /// Check whether a step (or every step) is complete
    Validate(ValidateArgs),

    /// Write the current draft to storage
    Save,

    /// Discard the draft and remove it from storage
    Reset(ResetArgs),

    /// List the wizard steps and their completion
    Steps,

    /// Recompute total questions and duration from the topics
    SyncTotals,

    /// Walk the camera / microphone / screen / network check
    SystemCheck(SystemCheckArgs),
}

/// Arguments for the set command
#[derive(clap::Args)]
pub struct SetArgs {
    /// Field name as persisted (e.g. jobRole, skills, experienceRange)
    pub field: String,

    /// JSON value; text that is not valid JSON, or fits the field only as text, is taken as a string
    pub value: String,
}

/// Arguments for the validate command
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Step number (1-5); all steps when omitted
    #[arg(long, short)]
    pub step: Option<usize>,
}

/// Arguments for the reset command
#[derive(clap::Args)]
pub struct ResetArgs {
    /// Confirm that the draft should be discarded
    #[arg(long, short)]
    pub yes: bool,
}

/// Arguments for the system-check command
#[derive(clap::Args)]
pub struct SystemCheckArgs {
    /// Checks that passed (camera, microphone, screen, network)
    #[arg(long, value_delimiter = ',')]
    pub granted: Vec<String>,

    /// Checks that failed, optionally with a reason (e.g. camera:blocked by browser)
    #[arg(long)]
    pub denied: Vec<String>,
}

/// Draft form over the store chosen by `--ephemeral` / `--data-dir` / config
pub fn open_form(
    cli_data_dir: Option<&PathBuf>,
    ephemeral: bool,
    config: &AppConfig,
) -> Result<AssessmentForm<Box<dyn KeyValueStore>>> {
    let store = open_store(cli_data_dir, ephemeral, config)?;
    Ok(AssessmentForm::load(store, config.storage.draft_key.clone()))
}

pub fn open_store(
    cli_data_dir: Option<&PathBuf>,
    ephemeral: bool,
    config: &AppConfig,
) -> Result<Box<dyn KeyValueStore>> {
    if ephemeral {
        debug!("Using in-memory draft store");
        return Ok(Box::new(MemoryStore::new()));
    }

    let root = match cli_data_dir {
        Some(dir) => dir.clone(),
        None => config.data_dir()?,
    };
    debug!("Using draft store at {}", root.display());
    Ok(Box::new(FileStore::new(root)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["aswiz", "show", "--format", "json", "--ephemeral"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Show)));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.ephemeral);
    }

    #[test]
    fn test_parse_set_and_system_check() {
        let cli = Cli::try_parse_from(["aswiz", "set", "jobRole", "Data Engineer"]).unwrap();
        match cli.command {
            Some(Commands::Set(args)) => {
                assert_eq!(args.field, "jobRole");
                assert_eq!(args.value, "Data Engineer");
            }
            _ => panic!("expected set"),
        }

        let cli = Cli::try_parse_from([
            "aswiz",
            "system-check",
            "--granted",
            "camera,microphone",
            "--denied",
            "screen:no permission",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::SystemCheck(args)) => {
                assert_eq!(args.granted, vec!["camera", "microphone"]);
                assert_eq!(args.denied, vec!["screen:no permission"]);
            }
            _ => panic!("expected system-check"),
        }
    }

    #[test]
    fn test_no_command_means_tui() {
        let cli = Cli::try_parse_from(["aswiz"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_open_form_uses_cli_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_path_buf();
        let mut form = open_form(Some(&dir), false, &AppConfig::default()).unwrap();
        form.save_draft().unwrap();

        assert!(dir.join("assessmentDraft.json").exists());
    }

    #[test]
    fn test_ephemeral_form_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("drafts");
        let mut form = open_form(Some(&dir), true, &AppConfig::default()).unwrap();
        form.save_draft().unwrap();

        assert!(!dir.exists());
    }
}
