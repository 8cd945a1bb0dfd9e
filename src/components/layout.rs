// ABOUTME: Main layout component: status bar, wizard body, key menu bar, and overlays

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::{
    CommandPaletteComponent, ConfirmationDialogComponent, HelpComponent, ToastComponent,
    WizardViewComponent,
};
use crate::app::{state::View, AppState};

const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);

pub struct LayoutComponent {
    wizard_view: WizardViewComponent,
    command_palette: CommandPaletteComponent,
    confirmation_dialog: ConfirmationDialogComponent,
    help: HelpComponent,
    toast: ToastComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            wizard_view: WizardViewComponent::new(),
            command_palette: CommandPaletteComponent::new(),
            confirmation_dialog: ConfirmationDialogComponent::new(),
            help: HelpComponent::new(),
            toast: ToastComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();
        let footer_height = if state.show_help_footer { 3 } else { 0 };

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),             // Top status bar
                Constraint::Min(0),                // Wizard
                Constraint::Length(footer_height), // Bottom menu bar
            ])
            .split(area);

        self.render_top_bar(frame, main_layout[0], state);
        self.wizard_view.render(frame, main_layout[1], state);
        if state.show_help_footer {
            self.render_bottom_menu_bar(frame, main_layout[2], state);
        }

        match state.current_view {
            View::Wizard => {}
            View::CommandPalette => self.command_palette.render(frame, area, state),
            View::Help => self.help.render(frame, area, state),
        }

        self.confirmation_dialog.render(frame, area, state);
        self.toast.render(frame, area, state);
    }

    fn render_top_bar(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let form = state.form();
        let saved = match form.last_saved_at() {
            Some(at) => format!("saved {}", at.with_timezone(&chrono::Local).format("%H:%M:%S")),
            None => "not saved this session".to_string(),
        };

        let role = form.draft().job_role.trim();
        let title = if role.is_empty() { "Untitled assessment" } else { role };

        let line = Line::from(vec![
            Span::styled(
                "Assessment Wizard",
                Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", Style::default().fg(SUBDUED_BORDER)),
            Span::styled(title.to_string(), Style::default().fg(SOFT_WHITE)),
            Span::styled("  │  ", Style::default().fg(SUBDUED_BORDER)),
            Span::styled(saved, Style::default().fg(MUTED_GRAY)),
        ]);

        let bar = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(SUBDUED_BORDER)),
        );
        frame.render_widget(bar, area);
    }

    fn render_bottom_menu_bar(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(GOLD).add_modifier(Modifier::BOLD));
        let label = |l: &'static str| Span::styled(l, Style::default().fg(MUTED_GRAY));

        let spans = if state.input_focused {
            vec![
                key("Enter"),
                label(" add/continue  "),
                key("Tab"),
                label(" leave field  "),
                key("Ctrl+K"),
                label(" commands  "),
                key("Ctrl+C"),
                label(" quit"),
            ]
        } else {
            vec![
                key("n/→"),
                label(" next  "),
                key("b/←"),
                label(" back  "),
                key("Tab"),
                label(" edit  "),
                key("Ctrl+S"),
                label(" save  "),
                key("Ctrl+K"),
                label(" commands  "),
                key("?"),
                label(" help  "),
                key("q"),
                label(" quit"),
            ]
        };

        let menu = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(SUBDUED_BORDER)),
        );
        frame.render_widget(menu, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
