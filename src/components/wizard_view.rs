// ABOUTME: Wizard step view: header with progress, the current step's editor, and a validation hint

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::AppState;
use crate::models::{AssessmentDraft, TopicQuestionKind};
use crate::wizard::WizardStep;

const ACCENT: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const OK_GREEN: Color = Color::Rgb(100, 200, 100);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);

pub struct WizardViewComponent;

impl WizardViewComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Step title
                Constraint::Length(3), // Progress
                Constraint::Min(5),    // Step body
                Constraint::Length(3), // Hint
            ])
            .split(area);

        self.render_header(frame, chunks[0], state);
        self.render_progress(frame, chunks[1], state);

        let step = state.current_step();
        let draft = state.form().draft();
        match step {
            WizardStep::JobRole => self.render_job_role(frame, chunks[2], state),
            WizardStep::Skills => {
                let items = draft.skills.iter().map(|s| ListItem::new(s.as_str())).collect();
                self.render_list_step(frame, chunks[2], state, items, "New skill");
            }
            WizardStep::Experience => self.render_experience(frame, chunks[2], draft),
            WizardStep::Topics => {
                let items = draft.topics.iter().map(|t| ListItem::new(topic_line(t))).collect();
                self.render_list_step(frame, chunks[2], state, items, "New topic");
            }
            WizardStep::Candidates => {
                let items = draft
                    .candidates
                    .iter()
                    .map(|c| ListItem::new(c.to_string()))
                    .collect();
                self.render_list_step(frame, chunks[2], state, items, "Name <email>");
            }
        }

        self.render_hint(frame, chunks[3], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let step = state.current_step();
        let title = Line::from(vec![
            Span::styled(
                format!(" Step {} of {} ", step.number(), state.wizard.total_steps()),
                Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                state.wizard.current_title(),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(step.description(), Style::default().fg(MUTED_GRAY)),
        ]);

        let header = Paragraph::new(title).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT)),
        );
        frame.render_widget(header, area);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let progress = state.wizard.progress();
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(OK_GREEN).bg(Color::Rgb(30, 30, 40)))
            .ratio((progress / 100.0).clamp(0.0, 1.0))
            .label(format!("{progress:.0}%"));
        frame.render_widget(gauge, area);
    }

    fn render_job_role(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        frame.render_widget(input_box(state, "Job role"), chunks[0]);

        let draft = state.form().draft();
        let summary = vec![
            Line::from(vec![
                Span::styled("Difficulty: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(draft.difficulty.to_string(), Style::default().fg(SOFT_WHITE)),
                Span::styled("  (d to change)", Style::default().fg(MUTED_GRAY)),
            ]),
            Line::from(vec![
                Span::styled("Questions: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(draft.total_questions.to_string(), Style::default().fg(SOFT_WHITE)),
                Span::styled("  Duration: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(
                    format!("{} min", draft.estimated_duration),
                    Style::default().fg(SOFT_WHITE),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(summary), chunks[1]);
    }

    fn render_list_step(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        items: Vec<ListItem>,
        placeholder: &str,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        frame.render_widget(input_box(state, placeholder), chunks[0]);

        let count = items.len();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Added ({count})")),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(if state.input_focused { MUTED_GRAY } else { OK_GREEN }),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        if count > 0 {
            list_state.select(Some(state.selected_index.min(count - 1)));
        }
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }

    fn render_experience(&self, frame: &mut Frame, area: Rect, draft: &AssessmentDraft) {
        let range = &draft.experience_range;
        let value_style = if range.is_valid() {
            Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("Minimum years: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(range.min.to_string(), value_style),
                Span::styled("   (+/-)", Style::default().fg(MUTED_GRAY)),
            ]),
            Line::from(vec![
                Span::styled("Maximum years: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(range.max.to_string(), value_style),
                Span::styled("   (↑/↓)", Style::default().fg(MUTED_GRAY)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Level: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(range.label.as_str(), Style::default().fg(GOLD)),
            ]),
        ];

        let body = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Experience range"),
        );
        frame.render_widget(body, area);
    }

    fn render_hint(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let step = state.current_step();
        let (text, style) = if state.form().validate_step(step.number()) {
            ("✓ Ready to continue".to_string(), Style::default().fg(OK_GREEN))
        } else {
            (format!("• {}", step.requirement()), Style::default().fg(GOLD))
        };

        let hint = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(hint, area);
    }
}

impl Default for WizardViewComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn input_box<'a>(state: &'a AppState, placeholder: &'a str) -> Paragraph<'a> {
    let (text, style) = if state.input.is_empty() && !state.input_focused {
        (placeholder.to_string(), Style::default().fg(MUTED_GRAY))
    } else if state.input_focused {
        (format!("{}▏", state.input), Style::default().fg(SOFT_WHITE))
    } else {
        (state.input.clone(), Style::default().fg(SOFT_WHITE))
    };

    let border = if state.input_focused { GOLD } else { MUTED_GRAY };
    Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(placeholder),
    )
}

fn topic_line(topic: &crate::models::Topic) -> String {
    let kinds: Vec<String> = TopicQuestionKind::all()
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let cfg = topic.question_types.get(*kind);
            if cfg.enabled {
                format!("[{}] {} x{}", i + 1, kind.label(), cfg.count)
            } else {
                format!("[{}] -", i + 1)
            }
        })
        .collect();
    format!("{:<20} {}", topic.name, kinds.join("  "))
}
