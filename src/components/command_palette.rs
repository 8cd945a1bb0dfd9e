// ABOUTME: Command palette overlay with a filter query and selectable command list

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::centered_rect;
use crate::app::AppState;

pub struct CommandPaletteComponent;

impl CommandPaletteComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let popup_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Command Palette ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let query = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{}▏", state.palette.query)),
        ]));
        frame.render_widget(query, chunks[0]);

        let commands = state.palette.filtered();
        if commands.is_empty() {
            let empty = Paragraph::new("No matching commands").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, chunks[2]);
            return;
        }

        let items: Vec<ListItem> = commands.iter().map(|c| ListItem::new(c.label())).collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(state.palette.selected.min(commands.len() - 1)));
        frame.render_stateful_widget(list, chunks[2], &mut list_state);
    }
}

impl Default for CommandPaletteComponent {
    fn default() -> Self {
        Self::new()
    }
}
