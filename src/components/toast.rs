// ABOUTME: Transient notification shown in the top-right corner

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::state::{AppState, ToastKind};

const TOAST_WIDTH: u16 = 50;

pub struct ToastComponent;

impl ToastComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(toast) = state.current_toast() else {
            return;
        };

        let (icon, color) = match toast.kind {
            ToastKind::Info => ("ℹ ", Color::Rgb(100, 149, 237)),
            ToastKind::Success => ("✓ ", Color::Rgb(100, 200, 100)),
            ToastKind::Error => ("✗ ", Color::Rgb(230, 100, 100)),
        };

        let width = TOAST_WIDTH.min(area.width);
        let toast_area = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y: area.y + 1,
            width,
            height: 3.min(area.height.saturating_sub(1)),
        };

        frame.render_widget(Clear, toast_area);
        let body = Paragraph::new(Line::from(vec![
            Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(toast.message.as_str()),
        ]))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(body, toast_area);
    }
}

impl Default for ToastComponent {
    fn default() -> Self {
        Self::new()
    }
}
