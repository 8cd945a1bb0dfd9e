// ABOUTME: Help overlay listing registered shortcuts and per-step keys

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use super::centered_rect;
use crate::app::AppState;

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let popup_area = centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let mut help_items = vec![ListItem::new("Shortcuts:").style(heading)];
        help_items.extend(
            state
                .shortcuts
                .shortcuts()
                .iter()
                .map(|s| ListItem::new(format!("  {s}"))),
        );
        help_items.push(ListItem::new("  (only Ctrl+K / Meta+K work while typing)").style(Style::default().fg(Color::DarkGray)));

        help_items.extend([
            ListItem::new(""),
            ListItem::new("Editing:").style(heading),
            ListItem::new("  Tab        Focus / leave the text field"),
            ListItem::new("  Enter      Add entry, or continue when empty"),
            ListItem::new("  ↑/↓        Select entry (max years on Experience)"),
            ListItem::new("  +/-        Min years, or question count on a topic"),
            ListItem::new("  1-4        Toggle MCQ / Coding / Subjective / Pseudo-code"),
            ListItem::new("  Del        Remove selected entry"),
            ListItem::new(""),
            ListItem::new("Navigation:").style(heading),
            ListItem::new("  →/←        Next / previous step"),
            ListItem::new(""),
            ListItem::new("General:").style(heading),
            ListItem::new("  ?          Toggle this help"),
            ListItem::new("  Ctrl+C     Force quit"),
        ]);

        let help_list = List::new(help_items).block(
            Block::default()
                .title("Help - Press ? or Esc to close")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(help_list, popup_area);
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}
