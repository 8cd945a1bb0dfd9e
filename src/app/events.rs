// ABOUTME: Event handling system for keyboard input and wizard actions

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

use crate::app::state::{AppState, ConfirmAction, ToastKind, View};
use crate::models::{Candidate, ExperienceLabel, ExperienceRange, Topic, TopicQuestionKind};
use crate::shortcuts::KeyPress;
use crate::wizard::{DraftUpdate, WizardStep};

/// Questions enabled by default on a freshly added topic
const DEFAULT_TOPIC_QUESTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    // Command palette
    OpenCommandPalette,
    CloseCommandPalette,
    PaletteUp,
    PaletteDown,
    PaletteSelect,
    PaletteInputChar(char),
    PaletteBackspace,
    // Navigation
    NextStep,
    PreviousStep,
    JumpToStep(usize),
    // Draft lifecycle
    SaveDraft,
    RequestReset,
    SyncTotals,
    // Confirmation dialog events
    ConfirmationToggle,  // Switch between Yes/No
    ConfirmationConfirm, // Confirm action
    ConfirmationCancel,  // Cancel dialog
    // Text field
    FocusInput,
    BlurInput,
    InputChar(char),
    InputBackspace,
    SubmitInput,
    // List steps
    SelectNext,
    SelectPrevious,
    RemoveSelected,
    // Experience and topics
    AdjustMin(i32),
    AdjustMax(i32),
    AdjustCount(i32),
    ToggleQuestionType(TopicQuestionKind),
    CycleDifficulty,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        if key_event.kind == KeyEventKind::Release {
            return None;
        }

        // Handle confirmation dialog first (highest priority)
        if state.confirmation_dialog.is_some() {
            return match key_event.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => Some(AppEvent::ConfirmationToggle),
                KeyCode::Enter => Some(AppEvent::ConfirmationConfirm),
                KeyCode::Esc => Some(AppEvent::ConfirmationCancel),
                _ => None,
            };
        }

        if state.current_view == View::Help {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        if state.current_view == View::CommandPalette {
            return Self::handle_palette_keys(key_event);
        }

        // Ctrl+C always quits
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Quit);
        }

        if let Some(press) = KeyPress::from_key_event(&key_event, state.input_focused) {
            if let Some(event) = state.shortcuts.dispatch(&press) {
                debug!("Shortcut {:?} -> {:?}", press, event);
                return Some(event.clone());
            }
        }

        if state.input_focused {
            return Self::handle_text_input_keys(key_event);
        }

        Self::handle_step_keys(key_event, state)
    }

    fn handle_palette_keys(key_event: KeyEvent) -> Option<AppEvent> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Esc => Some(AppEvent::CloseCommandPalette),
            KeyCode::Char('k') if ctrl => Some(AppEvent::CloseCommandPalette),
            KeyCode::Up => Some(AppEvent::PaletteUp),
            KeyCode::Down | KeyCode::Tab => Some(AppEvent::PaletteDown),
            KeyCode::Enter => Some(AppEvent::PaletteSelect),
            KeyCode::Backspace => Some(AppEvent::PaletteBackspace),
            KeyCode::Char(c) if !ctrl => Some(AppEvent::PaletteInputChar(c)),
            _ => None,
        }
    }

    fn handle_text_input_keys(key_event: KeyEvent) -> Option<AppEvent> {
        let plain = !key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);
        match key_event.code {
            KeyCode::Esc | KeyCode::Tab => Some(AppEvent::BlurInput),
            KeyCode::Enter => Some(AppEvent::SubmitInput),
            KeyCode::Backspace => Some(AppEvent::InputBackspace),
            KeyCode::Char(c) if plain => Some(AppEvent::InputChar(c)),
            _ => None,
        }
    }

    fn handle_step_keys(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        let step = state.current_step();
        let is_list_step = matches!(
            step,
            WizardStep::Skills | WizardStep::Topics | WizardStep::Candidates
        );

        match key_event.code {
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Tab if state.step_has_text_input() => Some(AppEvent::FocusInput),
            KeyCode::Right | KeyCode::Enter => Some(AppEvent::NextStep),
            KeyCode::Left => Some(AppEvent::PreviousStep),
            KeyCode::Up if step == WizardStep::Experience => Some(AppEvent::AdjustMax(1)),
            KeyCode::Down if step == WizardStep::Experience => Some(AppEvent::AdjustMax(-1)),
            KeyCode::Up if is_list_step => Some(AppEvent::SelectPrevious),
            KeyCode::Down if is_list_step => Some(AppEvent::SelectNext),
            KeyCode::Char('+') if step == WizardStep::Experience => Some(AppEvent::AdjustMin(1)),
            KeyCode::Char('-') if step == WizardStep::Experience => Some(AppEvent::AdjustMin(-1)),
            KeyCode::Char('+') if step == WizardStep::Topics => Some(AppEvent::AdjustCount(1)),
            KeyCode::Char('-') if step == WizardStep::Topics => Some(AppEvent::AdjustCount(-1)),
            KeyCode::Char(c @ '1'..='4') if step == WizardStep::Topics => {
                AppState::question_type_for_digit(c).map(AppEvent::ToggleQuestionType)
            }
            KeyCode::Delete | KeyCode::Backspace if is_list_step => Some(AppEvent::RemoveSelected),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        debug!("Processing {:?} on step {}", event, state.wizard.current_step());

        match event {
            AppEvent::Quit => {
                info!("Quit requested");
                state.should_quit = true;
            }
            AppEvent::ToggleHelp => {
                state.current_view = if state.current_view == View::Help {
                    View::Wizard
                } else {
                    View::Help
                };
            }
            AppEvent::OpenCommandPalette => {
                state.palette.clear();
                state.current_view = View::CommandPalette;
            }
            AppEvent::CloseCommandPalette => {
                state.palette.clear();
                state.current_view = View::Wizard;
            }
            AppEvent::PaletteUp => state.palette.move_up(),
            AppEvent::PaletteDown => state.palette.move_down(),
            AppEvent::PaletteInputChar(c) => {
                state.palette.query.push(c);
                state.palette.selected = 0;
            }
            AppEvent::PaletteBackspace => {
                state.palette.query.pop();
                state.palette.selected = 0;
            }
            AppEvent::PaletteSelect => {
                let command = state.palette.selected_command();
                state.palette.clear();
                state.current_view = View::Wizard;
                if let Some(command) = command {
                    Self::process_event(command.event(), state);
                }
            }
            AppEvent::NextStep => Self::next_step(state),
            AppEvent::PreviousStep => {
                if state.wizard.go_back() {
                    state.enter_step();
                }
            }
            AppEvent::JumpToStep(number) => {
                if state.wizard.jump_to(number) {
                    state.enter_step();
                } else if let Some(blocking) = state.form().first_incomplete_step() {
                    state.push_toast(
                        ToastKind::Info,
                        format!("Complete step {} first: {}", blocking.number(), blocking.requirement()),
                    );
                }
            }
            AppEvent::SaveDraft => match state.form_mut().save_draft() {
                Ok(receipt) => state.push_toast(
                    ToastKind::Success,
                    format!("Draft saved ({} bytes)", receipt.bytes),
                ),
                Err(e) => state.report_save_error(&e),
            },
            AppEvent::RequestReset => state.show_reset_confirmation(),
            AppEvent::SyncTotals => match state.form_mut().sync_derived_totals() {
                Ok(()) => {
                    let draft = state.form().draft();
                    let message = format!(
                        "{} questions, about {} minutes",
                        draft.total_questions, draft.estimated_duration
                    );
                    state.push_toast(ToastKind::Info, message);
                }
                Err(e) => state.report_save_error(&e),
            },
            AppEvent::ConfirmationToggle => {
                if let Some(dialog) = &mut state.confirmation_dialog {
                    dialog.selected_option = !dialog.selected_option;
                }
            }
            AppEvent::ConfirmationConfirm => {
                if let Some(dialog) = state.confirmation_dialog.take() {
                    if dialog.selected_option {
                        match dialog.confirm_action {
                            ConfirmAction::ResetDraft => Self::reset_draft(state),
                        }
                    }
                }
            }
            AppEvent::ConfirmationCancel => state.confirmation_dialog = None,
            AppEvent::FocusInput => state.input_focused = state.step_has_text_input(),
            AppEvent::BlurInput => state.input_focused = false,
            AppEvent::InputChar(c) => {
                state.input.push(c);
                if state.current_step() == WizardStep::JobRole {
                    let role = state.input.clone();
                    Self::apply(state, DraftUpdate::JobRole(role));
                }
            }
            AppEvent::InputBackspace => {
                state.input.pop();
                if state.current_step() == WizardStep::JobRole {
                    let role = state.input.clone();
                    Self::apply(state, DraftUpdate::JobRole(role));
                }
            }
            AppEvent::SubmitInput => Self::submit_input(state),
            AppEvent::SelectNext => {
                let len = state.list_len();
                if len > 0 {
                    state.selected_index = (state.selected_index + 1).min(len - 1);
                }
            }
            AppEvent::SelectPrevious => {
                state.selected_index = state.selected_index.saturating_sub(1);
            }
            AppEvent::RemoveSelected => Self::remove_selected(state),
            AppEvent::AdjustMin(delta) => {
                let range = &state.form().draft().experience_range;
                let min = range.min.saturating_add(delta).max(0);
                let updated = ExperienceRange {
                    min,
                    max: range.max,
                    label: ExperienceLabel::for_years(min),
                };
                Self::apply(state, DraftUpdate::ExperienceRange(updated));
            }
            AppEvent::AdjustMax(delta) => {
                let range = &state.form().draft().experience_range;
                let updated = ExperienceRange {
                    min: range.min,
                    max: range.max.saturating_add(delta).max(0),
                    label: range.label,
                };
                Self::apply(state, DraftUpdate::ExperienceRange(updated));
            }
            AppEvent::AdjustCount(delta) => {
                let index = state.selected_index;
                let mut topics = state.form().draft().topics.clone();
                if let Some(topic) = topics.get_mut(index) {
                    for kind in TopicQuestionKind::all() {
                        let cfg = topic.question_types.get_mut(*kind);
                        if cfg.enabled {
                            cfg.count = cfg.count.saturating_add_signed(delta);
                        }
                    }
                    Self::apply(state, DraftUpdate::Topics(topics));
                }
            }
            AppEvent::ToggleQuestionType(kind) => {
                let index = state.selected_index;
                let mut topics = state.form().draft().topics.clone();
                if let Some(topic) = topics.get_mut(index) {
                    let cfg = topic.question_types.get_mut(kind);
                    cfg.enabled = !cfg.enabled;
                    if cfg.enabled && cfg.count == 0 {
                        cfg.count = DEFAULT_TOPIC_QUESTIONS;
                    }
                    Self::apply(state, DraftUpdate::Topics(topics));
                }
            }
            AppEvent::CycleDifficulty => {
                let next = state.form().draft().difficulty.cycle();
                Self::apply(state, DraftUpdate::Difficulty(next));
            }
        }
    }

    /// Route a field update through the form, surfacing write failures as toasts
    fn apply(state: &mut AppState, update: DraftUpdate) {
        if let Err(e) = state.form_mut().update_field(update) {
            state.report_save_error(&e);
        }
    }

    fn next_step(state: &mut AppState) {
        if state.wizard.advance() {
            state.enter_step();
            return;
        }

        let step = state.current_step();
        if !state.form().validate_step(step.number()) {
            state.push_toast(ToastKind::Info, step.requirement());
        } else if state.form().is_complete() {
            state.push_toast(ToastKind::Success, "All steps complete, draft is ready");
        } else if let Some(blocking) = state.form().first_incomplete_step() {
            state.push_toast(
                ToastKind::Info,
                format!("Step {} still needs attention: {}", blocking.number(), blocking.requirement()),
            );
        }
    }

    fn reset_draft(state: &mut AppState) {
        match state.form_mut().reset_form() {
            Ok(()) => state.push_toast(ToastKind::Info, "Draft reset"),
            Err(e) => state.report_save_error(&e),
        }
        state.wizard.reset();
        state.enter_step();
    }

    fn submit_input(state: &mut AppState) {
        let text = state.input.trim().to_string();
        let step = state.current_step();

        if step == WizardStep::JobRole || text.is_empty() {
            Self::next_step(state);
            return;
        }

        let draft = state.form().draft();
        let update = match step {
            WizardStep::Skills => {
                if draft.skills.iter().any(|s| s.eq_ignore_ascii_case(&text)) {
                    state.push_toast(ToastKind::Info, format!("'{text}' is already listed"));
                    return;
                }
                let mut skills = draft.skills.clone();
                skills.push(text);
                DraftUpdate::Skills(skills)
            }
            WizardStep::Topics => {
                let mut topics = draft.topics.clone();
                topics.push(Topic::new(text).with_type(TopicQuestionKind::Mcq, DEFAULT_TOPIC_QUESTIONS));
                DraftUpdate::Topics(topics)
            }
            WizardStep::Candidates => {
                let Some(candidate) = Candidate::parse(&text) else {
                    state.push_toast(
                        ToastKind::Error,
                        "Enter a name and e-mail, e.g. Ada <ada@example.com>",
                    );
                    return;
                };
                if draft
                    .candidates
                    .iter()
                    .any(|c| c.email.eq_ignore_ascii_case(&candidate.email))
                {
                    state.push_toast(ToastKind::Info, format!("{} is already invited", candidate.email));
                    return;
                }
                let mut candidates = draft.candidates.clone();
                candidates.push(candidate);
                DraftUpdate::Candidates(candidates)
            }
            WizardStep::JobRole | WizardStep::Experience => return,
        };

        Self::apply(state, update);
        state.input.clear();
        state.selected_index = state.list_len().saturating_sub(1);
    }

    fn remove_selected(state: &mut AppState) {
        let index = state.selected_index;
        let draft = state.form().draft();
        let update = match state.current_step() {
            WizardStep::Skills if index < draft.skills.len() => {
                let mut skills = draft.skills.clone();
                skills.remove(index);
                DraftUpdate::Skills(skills)
            }
            WizardStep::Topics if index < draft.topics.len() => {
                let mut topics = draft.topics.clone();
                topics.remove(index);
                DraftUpdate::Topics(topics)
            }
            WizardStep::Candidates if index < draft.candidates.len() => {
                let mut candidates = draft.candidates.clone();
                candidates.remove(index);
                DraftUpdate::Candidates(candidates)
            }
            _ => return,
        };

        Self::apply(state, update);
        state.clamp_selection();
    }
}
