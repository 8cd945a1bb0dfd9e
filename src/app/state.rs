// ABOUTME: Application state for the wizard TUI
// Owns the draft form (behind the step sequencer), overlays, toasts, and key bindings

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{info, warn};

use super::events::AppEvent;
use crate::config::AppConfig;
use crate::models::TopicQuestionKind;
use crate::sequencer::StepSequencer;
use crate::shortcuts::{Shortcut, ShortcutDispatcher};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::wizard::{AssessmentForm, SaveError, WizardStep};

/// Draft form over a type-erased store
pub type DraftForm = AssessmentForm<Box<dyn KeyValueStore>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Wizard,
    CommandPalette,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct ConfirmationDialog {
    pub title: String,
    pub message: String,
    pub warning: Option<String>,
    pub confirm_action: ConfirmAction,
    pub selected_option: bool, // true = Yes, false = No
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ResetDraft,
}

/// Entries offered by the command palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteCommand {
    NextStep,
    PreviousStep,
    SaveDraft,
    ResetDraft,
    SyncTotals,
    JumpTo(WizardStep),
    ToggleHelp,
    Quit,
}

impl PaletteCommand {
    pub fn all() -> Vec<PaletteCommand> {
        let mut commands = vec![
            Self::NextStep,
            Self::PreviousStep,
            Self::SaveDraft,
            Self::SyncTotals,
            Self::ResetDraft,
        ];
        commands.extend(WizardStep::all().iter().copied().map(Self::JumpTo));
        commands.push(Self::ToggleHelp);
        commands.push(Self::Quit);
        commands
    }

    pub fn label(&self) -> String {
        match self {
            Self::NextStep => "Next step".to_string(),
            Self::PreviousStep => "Previous step".to_string(),
            Self::SaveDraft => "Save draft".to_string(),
            Self::ResetDraft => "Reset draft".to_string(),
            Self::SyncTotals => "Recalculate totals".to_string(),
            Self::JumpTo(step) => format!("Go to step {}: {}", step.number(), step.title()),
            Self::ToggleHelp => "Show help".to_string(),
            Self::Quit => "Quit".to_string(),
        }
    }

    /// Event the command triggers
    pub fn event(&self) -> AppEvent {
        match self {
            Self::NextStep => AppEvent::NextStep,
            Self::PreviousStep => AppEvent::PreviousStep,
            Self::SaveDraft => AppEvent::SaveDraft,
            Self::ResetDraft => AppEvent::RequestReset,
            Self::SyncTotals => AppEvent::SyncTotals,
            Self::JumpTo(step) => AppEvent::JumpToStep(step.number()),
            Self::ToggleHelp => AppEvent::ToggleHelp,
            Self::Quit => AppEvent::Quit,
        }
    }
}

/// Command palette query and selection
#[derive(Debug, Clone, Default)]
pub struct CommandPaletteState {
    pub query: String,
    pub selected: usize,
}

impl CommandPaletteState {
    /// Commands whose label contains the query, case-insensitively
    pub fn filtered(&self) -> Vec<PaletteCommand> {
        let needle = self.query.to_lowercase();
        PaletteCommand::all()
            .into_iter()
            .filter(|c| c.label().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn selected_command(&self) -> Option<PaletteCommand> {
        self.filtered().get(self.selected).copied()
    }

    pub fn move_down(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn move_up(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.selected = 0;
    }
}

/// Default key bindings. ctrl+K and meta+K both open the palette.
pub fn default_shortcuts() -> ShortcutDispatcher<AppEvent> {
    ShortcutDispatcher::new()
        .with(Shortcut::new('k', AppEvent::OpenCommandPalette).ctrl().describe("Command palette"))
        .with(Shortcut::new('k', AppEvent::OpenCommandPalette).meta().describe("Command palette"))
        .with(Shortcut::new('s', AppEvent::SaveDraft).ctrl().describe("Save draft"))
        .with(Shortcut::new('r', AppEvent::RequestReset).ctrl().describe("Reset draft"))
        .with(Shortcut::new('n', AppEvent::NextStep).describe("Next step"))
        .with(Shortcut::new('b', AppEvent::PreviousStep).describe("Previous step"))
        .with(Shortcut::new('d', AppEvent::CycleDifficulty).describe("Cycle difficulty"))
        .with(Shortcut::new('t', AppEvent::SyncTotals).describe("Recalculate totals"))
        .with(Shortcut::new('q', AppEvent::Quit).describe("Quit"))
}

pub struct AppState {
    /// Wizard position; the gate is the draft form itself
    pub wizard: StepSequencer<DraftForm>,
    pub current_view: View,
    /// Text being typed on the current step
    pub input: String,
    /// Focus is in the step's text field
    pub input_focused: bool,
    /// Selected row in list steps
    pub selected_index: usize,
    pub confirmation_dialog: Option<ConfirmationDialog>,
    pub palette: CommandPaletteState,
    pub toasts: VecDeque<Toast>,
    pub toast_duration: Duration,
    pub shortcuts: ShortcutDispatcher<AppEvent>,
    pub show_help_footer: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(form: DraftForm, config: &AppConfig) -> Self {
        let mut state = Self {
            wizard: StepSequencer::new(form),
            current_view: View::Wizard,
            input: String::new(),
            input_focused: false,
            selected_index: 0,
            confirmation_dialog: None,
            palette: CommandPaletteState::default(),
            toasts: VecDeque::new(),
            toast_duration: Duration::from_millis(config.ui.toast_duration_ms),
            shortcuts: default_shortcuts(),
            show_help_footer: config.ui.show_help,
            should_quit: false,
        };

        let load_message = state
            .form()
            .load_error()
            .map(|e| format!("Saved draft could not be restored: {e}"));
        if let Some(message) = load_message {
            state.push_toast(ToastKind::Error, message);
        }

        state.enter_step();
        state
    }

    pub fn form(&self) -> &DraftForm {
        self.wizard.gate()
    }

    pub fn form_mut(&mut self) -> &mut DraftForm {
        self.wizard.gate_mut()
    }

    pub fn current_step(&self) -> WizardStep {
        WizardStep::from_number(self.wizard.current_step()).unwrap_or(WizardStep::JobRole)
    }

    /// Whether the current step edits text
    pub fn step_has_text_input(&self) -> bool {
        self.current_step() != WizardStep::Experience
    }

    /// Reset per-step UI state after the step changes
    pub fn enter_step(&mut self) {
        self.selected_index = 0;
        self.input = match self.current_step() {
            WizardStep::JobRole => self.form().draft().job_role.clone(),
            _ => String::new(),
        };
        self.input_focused = self.step_has_text_input();
    }

    /// Number of rows in the current list step
    pub fn list_len(&self) -> usize {
        let draft = self.form().draft();
        match self.current_step() {
            WizardStep::Skills => draft.skills.len(),
            WizardStep::Topics => draft.topics.len(),
            WizardStep::Candidates => draft.candidates.len(),
            WizardStep::JobRole | WizardStep::Experience => 0,
        }
    }

    /// Clamp the selection after the list shrinks
    pub fn clamp_selection(&mut self) {
        let len = self.list_len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toasts.push_back(Toast {
            message: message.into(),
            kind,
            expires_at: Instant::now() + self.toast_duration,
        });
    }

    /// Drop expired toasts
    pub fn prune_toasts(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    pub fn current_toast(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    /// Log and surface a failed write
    pub fn report_save_error(&mut self, error: &SaveError) {
        warn!("Failed to persist draft: {}", error);
        self.push_toast(ToastKind::Error, format!("Could not save draft: {error}"));
    }

    /// Ask for confirmation before erasing the draft
    pub fn show_reset_confirmation(&mut self) {
        self.confirmation_dialog = Some(ConfirmationDialog {
            title: "Reset Draft".to_string(),
            message: "Discard the current assessment draft and start over?".to_string(),
            warning: Some("This cannot be undone".to_string()),
            confirm_action: ConfirmAction::ResetDraft,
            selected_option: false,
        });
    }

    pub fn question_type_for_digit(digit: char) -> Option<TopicQuestionKind> {
        let index = digit.to_digit(10)?.checked_sub(1)?;
        TopicQuestionKind::all().get(index as usize).copied()
    }
}

impl Default for AppState {
    /// State over an in-memory store
    fn default() -> Self {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let config = AppConfig::default();
        let form = AssessmentForm::load(store, config.storage.draft_key.clone());
        Self::new(form, &config)
    }
}

pub struct App {
    pub state: AppState,
}

impl App {
    /// Build the app over the configured file store
    pub fn new(config: &AppConfig) -> Result<Self> {
        let data_dir = config.data_dir()?;
        info!("Using draft storage at {}", data_dir.display());
        let store: Box<dyn KeyValueStore> = Box::new(FileStore::new(data_dir));
        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: Box<dyn KeyValueStore>, config: &AppConfig) -> Self {
        let form = AssessmentForm::load(store, config.storage.draft_key.clone());
        Self {
            state: AppState::new(form, config),
        }
    }

    /// Periodic housekeeping from the event loop
    pub fn tick(&mut self) {
        self.state.prune_toasts(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_starts_on_first_step() {
        let state = AppState::default();
        assert_eq!(state.current_step(), WizardStep::JobRole);
        assert_eq!(state.current_view, View::Wizard);
        assert!(state.input_focused);
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn test_corrupt_draft_surfaces_toast() {
        let store: Box<dyn KeyValueStore> =
            Box::new(MemoryStore::with_entry("assessmentDraft", "[]"));
        let app = App::with_store(store, &AppConfig::default());

        let toast = app.state.current_toast().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(toast.message.contains("could not be restored"));
    }

    #[test]
    fn test_app_uses_configured_data_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.storage.data_dir = Some(temp_dir.path().to_path_buf());

        let mut app = App::new(&config).unwrap();
        app.state.form_mut().save_draft().unwrap();

        assert!(temp_dir.path().join("assessmentDraft.json").exists());
    }

    #[test]
    fn test_palette_filter_and_wraparound() {
        let mut palette = CommandPaletteState {
            query: "step".to_string(),
            selected: 0,
        };
        let filtered = palette.filtered();
        assert!(filtered.contains(&PaletteCommand::NextStep));
        assert!(!filtered.contains(&PaletteCommand::Quit));

        palette.move_up();
        assert_eq!(palette.selected, filtered.len() - 1);
        palette.move_down();
        assert_eq!(palette.selected, 0);
    }

    #[test]
    fn test_prune_toasts() {
        let mut state = AppState::default();
        state.toast_duration = Duration::from_millis(0);
        state.push_toast(ToastKind::Info, "hi");
        state.prune_toasts(Instant::now() + Duration::from_millis(1));
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn test_question_type_digits() {
        assert_eq!(AppState::question_type_for_digit('1'), Some(TopicQuestionKind::Mcq));
        assert_eq!(AppState::question_type_for_digit('4'), Some(TopicQuestionKind::PseudoCode));
        assert_eq!(AppState::question_type_for_digit('0'), None);
        assert_eq!(AppState::question_type_for_digit('5'), None);
    }
}
