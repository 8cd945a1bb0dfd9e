// ABOUTME: UI components for the wizard TUI: step view, palette, dialogs, help, and toasts

pub mod command_palette;
pub mod confirmation_dialog;
pub mod help;
pub mod layout;
pub mod toast;
pub mod wizard_view;

pub use command_palette::CommandPaletteComponent;
pub use confirmation_dialog::ConfirmationDialogComponent;
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use toast::ToastComponent;
pub use wizard_view::WizardViewComponent;

use ratatui::prelude::*;

/// Rect of `percent_x` by `percent_y` centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
