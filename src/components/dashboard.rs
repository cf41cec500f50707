//! Dashboard: product summary, AI suggestions and campaign summary

use crate::action::Action;
use crate::component::Component;
use crate::components::input::{edit_text, move_focus};
use crate::components::layout::{calculate_screen_layout, field_lines, help_bar, screen_title};
use crate::model::{CampaignDraft, FormRecord, Route, Suggestions};
use crate::services::storage::{self, KeyValueStore, LAST_CAMPAIGN_KEY, LAST_PAYLOAD_KEY};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::rc::Rc;

/// Fields editable from the summary card
pub const SUMMARY_FIELDS: [(&str, &str); 6] = [
    ("name", "Name"),
    ("category", "Category"),
    ("description", "Description"),
    ("price", "Price"),
    ("location", "Location"),
    ("target", "Target"),
];

struct SummaryEdit {
    record: FormRecord,
    focus: usize,
}

pub struct DashboardComponent {
    store: Rc<dyn KeyValueStore>,
    payload: Option<FormRecord>,
    suggestions: Option<Suggestions>,
    campaign: Option<CampaignDraft>,
    edit: Option<SummaryEdit>,
}

impl DashboardComponent {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        let mut dashboard = Self {
            store,
            payload: None,
            suggestions: None,
            campaign: None,
            edit: None,
        };
        dashboard.reload();
        dashboard
    }

    /// Re-read the stored payload and campaign
    pub fn reload(&mut self) {
        self.payload = storage::load_or_none::<FormRecord>(self.store.as_ref(), LAST_PAYLOAD_KEY)
            .filter(|p| !p.is_empty());
        self.suggestions = self.payload.as_ref().map(Suggestions::from_payload);
        self.campaign = storage::load_or_none(self.store.as_ref(), LAST_CAMPAIGN_KEY);
        self.edit = None;
    }

    fn begin_edit(&mut self) {
        if let Some(payload) = &self.payload {
            self.edit = Some(SummaryEdit {
                record: payload.clone(),
                focus: 0,
            });
        }
    }

    /// Write the edited record back as the last payload
    fn save_edit(&mut self) {
        let Some(edit) = self.edit.take() else {
            return;
        };
        storage::save_best_effort(self.store.as_ref(), LAST_PAYLOAD_KEY, &edit.record);
        self.suggestions = Some(Suggestions::from_payload(&edit.record));
        self.payload = Some(edit.record);
        tracing::info!("product summary updated from dashboard");
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.save_edit(),
            KeyCode::Esc => self.edit = None,
            KeyCode::Tab | KeyCode::Down => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.focus = move_focus(edit.focus, SUMMARY_FIELDS.len(), true);
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.focus = move_focus(edit.focus, SUMMARY_FIELDS.len(), false);
                }
            }
            _ => {
                if let Some(edit) = self.edit.as_mut() {
                    let (name, _) = SUMMARY_FIELDS[edit.focus];
                    let mut value = edit.record.get(name).unwrap_or("").to_string();
                    if edit_text(&mut value, key, None) {
                        edit.record.set(name, value);
                    }
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn summary_lines(&self) -> Vec<Line<'static>> {
        if let Some(edit) = &self.edit {
            let mut lines = Vec::new();
            for (i, (name, label)) in SUMMARY_FIELDS.iter().enumerate() {
                lines.extend(field_lines(
                    label,
                    edit.record.get(name).unwrap_or(""),
                    i == edit.focus,
                    None,
                    "",
                ));
            }
            return lines;
        }

        let Some(payload) = &self.payload else {
            return vec![
                Line::from(""),
                Line::from("No product yet."),
                Line::from(Span::styled(
                    "Press c to create your first campaign.",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
        };

        SUMMARY_FIELDS
            .iter()
            .map(|(name, label)| {
                Line::from(vec![
                    Span::styled(format!("{:<12}", label), Style::default().fg(Color::Cyan)),
                    Span::raw(payload.get(name).unwrap_or("—").to_string()),
                ])
            })
            .collect()
    }

    fn suggestion_lines(s: &Suggestions) -> Vec<Line<'static>> {
        let heading = |text: &str| {
            Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
        };
        let mut lines = vec![heading("Headlines")];
        lines.extend(s.headlines.iter().map(|h| Line::from(format!("• {}", h))));
        lines.push(Line::from(""));
        lines.push(heading("Descriptions"));
        lines.extend(s.descriptions.iter().map(|d| Line::from(format!("• {}", d))));
        lines.push(Line::from(""));
        lines.push(heading("Audience"));
        lines.push(Line::from(s.audience.clone()));
        lines.push(Line::from(Span::styled(
            s.audience_tags.join(" · "),
            Style::default().fg(Color::Magenta),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("CTA  ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("[ {} ]", s.cta),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
        ]));
        lines
    }

    fn campaign_lines(&self, s: &Suggestions) -> Vec<Line<'static>> {
        let label = |text: &str| Span::styled(format!("{:<11}", text), Style::default().fg(Color::Cyan));
        let mut lines = vec![
            Line::from(Span::styled(
                s.summary_headline.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(s.summary_description.clone()),
            Line::from(""),
            Line::from(vec![label("Age range"), Span::raw(s.age_range.clone())]),
            Line::from(vec![label("Interests"), Span::raw(s.interests.join(", "))]),
            Line::from(""),
        ];
        match &self.campaign {
            Some(draft) => {
                lines.push(Line::from(vec![
                    label("Draft"),
                    Span::raw(draft.campaign_name.clone()),
                ]));
                lines.push(Line::from(Span::styled(
                    "Press r to review",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            None => lines.push(Line::from(Span::styled(
                "No campaign generated. Press g to generate.",
                Style::default().fg(Color::DarkGray),
            ))),
        }
        lines
    }
}

impl Component for DashboardComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.edit.is_some() {
            self.handle_edit_key(key);
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Char('c') => Some(Action::Navigate(Route::CreateCampaign)),
            KeyCode::Char('g') => Some(Action::Navigate(Route::GenerateCampaign)),
            KeyCode::Char('r') => Some(Action::Navigate(Route::CampaignReview)),
            KeyCode::Char('e') => {
                self.begin_edit();
                None
            }
            KeyCode::Char('l') => Some(Action::OpenLogin),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_screen_layout(area, 3, false);
        frame.render_widget(
            screen_title("adpatterns", "Your product and campaign at a glance"),
            layout.header,
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(layout.body);

        let summary_title = if self.edit.is_some() {
            " Product (editing) "
        } else {
            " Product "
        };
        frame.render_widget(
            Paragraph::new(self.summary_lines())
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(summary_title)),
            columns[0],
        );

        let empty = || {
            vec![Line::from(Span::styled(
                "Submit a product to see suggestions.",
                Style::default().fg(Color::DarkGray),
            ))]
        };
        let (suggestions, campaign) = match &self.suggestions {
            Some(s) => (Self::suggestion_lines(s), self.campaign_lines(s)),
            None => (empty(), empty()),
        };
        frame.render_widget(
            Paragraph::new(suggestions)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" AI Suggestions ")),
            columns[1],
        );
        frame.render_widget(
            Paragraph::new(campaign)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Campaign Summary ")),
            columns[2],
        );

        let help = if self.edit.is_some() {
            " Tab/↑↓: Field | Enter: Save | Esc: Cancel"
        } else {
            " c: Create | g: Generate | r: Review | e: Edit summary | l: Login | ?: Help | q: Quit"
        };
        frame.render_widget(help_bar(help), layout.help);
        Ok(())
    }
}

#[cfg(test)]
impl DashboardComponent {
    pub fn payload(&self) -> Option<&FormRecord> {
        self.payload.as_ref()
    }

    pub fn suggestions(&self) -> Option<&Suggestions> {
        self.suggestions.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }
}
