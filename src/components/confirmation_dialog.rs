// ABOUTME: Confirmation dialog component for yes/no prompts such as resetting the draft

use crate::app::state::{AppState, ConfirmationDialog};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct ConfirmationDialogComponent;

impl ConfirmationDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(dialog) = &state.confirmation_dialog else {
            return;
        };

        let width = 60.min(area.width.saturating_sub(4));
        let height = (if dialog.warning.is_some() { 10 } else { 7 }).min(area.height);
        let dialog_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        // Clear only the dialog area so the wizard stays visible behind it
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(dialog.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let mut constraints = Vec::new();
        if dialog.warning.is_some() {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(1));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let mut next = 0;
        if let Some(warning_text) = &dialog.warning {
            let warning = Paragraph::new(warning_text.as_str())
                .style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(warning, chunks[0]);
            next = 1;
        }

        let message = Paragraph::new(dialog.message.as_str())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White));
        frame.render_widget(message, chunks[next]);

        self.render_buttons(frame, chunks[next + 1], dialog);
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect, dialog: &ConfirmationDialog) {
        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let selected = Style::default().fg(Color::Black).bg(Color::White);
        let idle = Style::default().fg(Color::White);

        let yes = Paragraph::new("Yes")
            .style(if dialog.selected_option { selected } else { idle })
            .alignment(Alignment::Center);
        let no = Paragraph::new("No")
            .style(if dialog.selected_option { idle } else { selected })
            .alignment(Alignment::Center);

        frame.render_widget(yes, buttons[0]);
        frame.render_widget(no, buttons[1]);
    }
}

impl Default for ConfirmationDialogComponent {
    fn default() -> Self {
        Self::new()
    }
}
