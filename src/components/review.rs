//! Campaign review screen
//!
//! Edits go straight into the in-memory draft and are written back to
//! storage after every change.

use crate::action::Action;
use crate::component::Component;
use crate::components::input::{cycle_option, edit_text};
use crate::components::layout::{calculate_screen_layout, help_bar, screen_title, truncate_to_width};
use crate::model::campaign::CTA_OPTIONS;
use crate::model::{CampaignDraft, DraftField, Route};
use crate::services::storage::{self, KeyValueStore, LAST_CAMPAIGN_KEY};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::rc::Rc;

pub const MSG_REGENERATE_ALL: &str = "Regenerated all creatives (demo)";
pub const MSG_PUBLISH: &str = "Campaign published (demo)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReviewRow {
    Field(DraftField),
    Cta,
    Image,
}

fn rows() -> Vec<ReviewRow> {
    let mut rows: Vec<ReviewRow> = DraftField::all().iter().copied().map(ReviewRow::Field).collect();
    rows.push(ReviewRow::Cta);
    rows.push(ReviewRow::Image);
    rows
}

pub struct ReviewComponent {
    store: Rc<dyn KeyValueStore>,
    draft: Option<CampaignDraft>,
    rows: Vec<ReviewRow>,
    list_state: ListState,
    /// Text buffer while a field is being edited
    editing: Option<String>,
    headline_edit: bool,
    description_edit: bool,
    error: Option<String>,
}

impl ReviewComponent {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        let draft = storage::load_or_none(store.as_ref(), LAST_CAMPAIGN_KEY);
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            store,
            draft,
            rows: rows(),
            list_state,
            editing: None,
            headline_edit: false,
            description_edit: false,
            error: None,
        }
    }

    fn selected_row(&self) -> ReviewRow {
        self.rows[self.list_state.selected().unwrap_or(0).min(self.rows.len() - 1)]
    }

    fn select_next(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((i + 1).min(self.rows.len() - 1)));
    }

    fn select_previous(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(1)));
    }

    fn edit_toggle(&self, field: DraftField) -> bool {
        match field {
            DraftField::Headline => self.headline_edit,
            DraftField::Description => self.description_edit,
            _ => true,
        }
    }

    /// Apply a change to the draft and persist it
    fn modify(&mut self, change: impl FnOnce(&mut CampaignDraft)) {
        if let Some(draft) = self.draft.as_mut() {
            change(draft);
            storage::save_best_effort(self.store.as_ref(), LAST_CAMPAIGN_KEY, &*draft);
        }
    }

    fn toggle_creative_edit(&mut self) {
        match self.selected_row() {
            ReviewRow::Field(DraftField::Headline) => self.headline_edit = !self.headline_edit,
            ReviewRow::Field(DraftField::Description) => {
                self.description_edit = !self.description_edit
            }
            _ => {}
        }
    }

    fn begin_edit(&mut self) {
        let Some(draft) = self.draft.as_ref() else {
            return;
        };
        match self.selected_row() {
            ReviewRow::Field(field) if self.edit_toggle(field) => {
                self.editing = Some(field.read(draft));
                self.error = None;
            }
            ReviewRow::Field(_) => {
                self.error = Some("Press t to enable editing for this field".to_string());
            }
            ReviewRow::Image => self.modify(CampaignDraft::simulate_image),
            ReviewRow::Cta => {}
        }
    }

    fn commit_edit(&mut self) {
        let ReviewRow::Field(field) = self.selected_row() else {
            self.editing = None;
            return;
        };
        let Some(text) = self.editing.clone() else {
            return;
        };
        let Some(draft) = self.draft.as_mut() else {
            self.editing = None;
            return;
        };
        if field.write(draft, &text) {
            storage::save_best_effort(self.store.as_ref(), LAST_CAMPAIGN_KEY, &*draft);
            self.editing = None;
            self.error = None;
        } else {
            self.error = Some(format!("{} must be a whole number", field.label()));
        }
    }

    fn cycle_cta(&mut self, forward: bool) {
        self.modify(|draft| {
            draft.creative.cta = cycle_option(&CTA_OPTIONS, &draft.creative.cta, forward).to_string();
        });
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Esc => {
                self.editing = None;
                self.error = None;
            }
            _ => {
                if let Some(buffer) = self.editing.as_mut() {
                    edit_text(buffer, key, None);
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn row_value(&self, row: ReviewRow, draft: &CampaignDraft) -> String {
        match row {
            ReviewRow::Field(field) => field.read(draft),
            ReviewRow::Cta => format!("◀ {} ▶", draft.creative.cta),
            ReviewRow::Image => draft
                .creative
                .image
                .clone()
                .unwrap_or_else(|| "(none) Enter to simulate".to_string()),
        }
    }

    fn row_label(row: ReviewRow) -> &'static str {
        match row {
            ReviewRow::Field(field) => field.label(),
            ReviewRow::Cta => "Call to Action",
            ReviewRow::Image => "Image",
        }
    }

    fn draw_fields(&mut self, frame: &mut Frame, area: Rect, draft: &CampaignDraft) {
        let value_width = area.width.saturating_sub(22) as usize;
        let selected = self.list_state.selected();
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let is_selected = selected == Some(i);
                let value = match (&self.editing, is_selected) {
                    (Some(buffer), true) => format!("{}_", buffer),
                    _ => self.row_value(*row, draft),
                };
                let lock = match row {
                    ReviewRow::Field(f) if f.is_creative_text() && !self.edit_toggle(*f) => " 🔒",
                    _ => "",
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<16}", Self::row_label(*row)),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(truncate_to_width(&value, value_width)),
                    Span::styled(lock, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Campaign "))
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_preview(&self, frame: &mut Frame, area: Rect, draft: &CampaignDraft) {
        let mut lines = vec![
            Line::from(Span::styled(
                draft.campaign_name.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                draft.creative.headline.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(draft.creative.description.clone()),
            Line::from(""),
        ];
        if let Some(image) = &draft.creative.image {
            lines.push(Line::from(Span::styled(
                format!("[image] {}", image),
                Style::default().fg(Color::Magenta),
            )));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("[ {} ]", draft.creative.cta),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{} · {}-{} · {} · {}/day",
                draft.adset.location,
                draft.adset.age_min,
                draft.adset.age_max,
                draft.adset.gender,
                draft.budget_daily
            ),
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Ad Preview ")),
            area,
        );
    }
}

impl Component for ReviewComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing.is_some() {
            self.handle_editing_key(key);
            return Ok(None);
        }
        if self.draft.is_none() {
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::Navigate(Route::Dashboard)),
                KeyCode::Char('g') => Some(Action::Navigate(Route::GenerateCampaign)),
                _ => None,
            });
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::Navigate(Route::Dashboard)),
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                None
            }
            KeyCode::Enter => {
                self.begin_edit();
                None
            }
            KeyCode::Char('t') => {
                self.toggle_creative_edit();
                None
            }
            KeyCode::Left | KeyCode::Right if self.selected_row() == ReviewRow::Cta => {
                self.cycle_cta(key.code == KeyCode::Right);
                None
            }
            KeyCode::Char('h') => {
                self.modify(CampaignDraft::regenerate_headline);
                None
            }
            KeyCode::Char('d') => {
                self.modify(CampaignDraft::regenerate_description);
                None
            }
            KeyCode::Char('i') => {
                self.modify(CampaignDraft::simulate_image);
                None
            }
            KeyCode::Char('R') => Some(Action::Notify(MSG_REGENERATE_ALL.to_string())),
            KeyCode::Char('p') => Some(Action::Notify(MSG_PUBLISH.to_string())),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_screen_layout(area, 3, true);
        frame.render_widget(
            screen_title("Review Campaign", "Fine-tune your campaign before publishing"),
            layout.header,
        );

        let Some(draft) = self.draft.clone() else {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from("No campaign generated yet."),
                    Line::from(Span::styled(
                        "Press g to generate one from your product.",
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
                .alignment(ratatui::layout::Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
                layout.body,
            );
            frame.render_widget(help_bar(" g: Generate | Esc: Dashboard"), layout.help);
            return Ok(());
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(layout.body);
        self.draw_fields(frame, chunks[0], &draft);
        self.draw_preview(frame, chunks[1], &draft);

        if let (Some(status), Some(error)) = (layout.status, &self.error) {
            frame.render_widget(
                Paragraph::new(Span::styled(error.clone(), Style::default().fg(Color::Red))),
                status,
            );
        }

        let help = if self.editing.is_some() {
            " Enter: Save | Esc: Cancel"
        } else {
            " ↑↓: Select | Enter: Edit | t: Toggle creative edit | h/d: Regenerate | ←→: CTA | i: Image | R: Regenerate all | p: Publish | Esc: Back"
        };
        frame.render_widget(help_bar(help), layout.help);
        Ok(())
    }
}

#[cfg(test)]
impl ReviewComponent {
    pub fn draft(&self) -> Option<&CampaignDraft> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::campaign::HEADLINE_TEMPLATES;
    use crate::model::FormRecord;
    use crate::services::storage::{load_json, save_json, MemoryStore};
    use crossterm::event::KeyModifiers;

    fn press(c: &mut ReviewComponent, code: KeyCode) -> Option<Action> {
        c.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn seeded() -> (Rc<MemoryStore>, ReviewComponent) {
        let store = Rc::new(MemoryStore::new());
        let mut form = FormRecord::new();
        form.set("name", "Tee");
        let draft = CampaignDraft::from_payload(&form);
        save_json(store.as_ref(), LAST_CAMPAIGN_KEY, &draft).unwrap();
        let review = ReviewComponent::new(store.clone());
        (store, review)
    }

    fn stored(store: &MemoryStore) -> CampaignDraft {
        load_json(store, LAST_CAMPAIGN_KEY).unwrap().unwrap()
    }

    fn select(c: &mut ReviewComponent, row: ReviewRow) {
        let idx = c.rows.iter().position(|r| *r == row).unwrap();
        c.list_state.select(Some(idx));
    }

    #[test]
    fn test_empty_state_without_draft() {
        let mut review = ReviewComponent::new(Rc::new(MemoryStore::new()));
        assert!(review.draft().is_none());
        assert_eq!(
            press(&mut review, KeyCode::Char('g')),
            Some(Action::Navigate(Route::GenerateCampaign))
        );
    }

    #[test]
    fn test_edit_campaign_name_persists() {
        let (store, mut review) = seeded();
        press(&mut review, KeyCode::Enter);
        assert!(review.is_editing());
        press(&mut review, KeyCode::Char('!'));
        press(&mut review, KeyCode::Enter);
        assert!(!review.is_editing());
        assert_eq!(stored(&store).campaign_name, "Tee — Campaign!");
    }

    #[test]
    fn test_invalid_age_keeps_editing() {
        let (store, mut review) = seeded();
        select(&mut review, ReviewRow::Field(DraftField::AgeMin));
        press(&mut review, KeyCode::Enter);
        press(&mut review, KeyCode::Char('x'));
        press(&mut review, KeyCode::Enter);
        assert!(review.is_editing());
        assert!(review.error.is_some());
        assert_eq!(stored(&store).adset.age_min, 18);

        press(&mut review, KeyCode::Esc);
        assert!(!review.is_editing());
    }

    #[test]
    fn test_headline_needs_edit_toggle() {
        let (store, mut review) = seeded();
        select(&mut review, ReviewRow::Field(DraftField::Headline));
        press(&mut review, KeyCode::Enter);
        assert!(!review.is_editing());

        press(&mut review, KeyCode::Char('t'));
        press(&mut review, KeyCode::Enter);
        assert!(review.is_editing());
        press(&mut review, KeyCode::Backspace);
        press(&mut review, KeyCode::Enter);
        assert_eq!(stored(&store).creative.headline, "Tee: Special Offe");
    }

    #[test]
    fn test_regenerate_headline_uses_templates() {
        let (store, mut review) = seeded();
        press(&mut review, KeyCode::Char('h'));
        let headline = stored(&store).creative.headline;
        assert!(HEADLINE_TEMPLATES.contains(&headline.as_str()));
    }

    #[test]
    fn test_cta_cycles_and_image_simulates() {
        let (store, mut review) = seeded();
        select(&mut review, ReviewRow::Cta);
        press(&mut review, KeyCode::Right);
        assert_eq!(stored(&store).creative.cta, "Learn More");
        press(&mut review, KeyCode::Left);
        press(&mut review, KeyCode::Left);
        assert_eq!(stored(&store).creative.cta, "Book Now");

        select(&mut review, ReviewRow::Image);
        press(&mut review, KeyCode::Enter);
        assert!(stored(&store).creative.image.is_some());
    }

    #[test]
    fn test_publish_and_regenerate_all_only_notify() {
        let (store, mut review) = seeded();
        let before = stored(&store);
        assert_eq!(
            press(&mut review, KeyCode::Char('p')),
            Some(Action::Notify(MSG_PUBLISH.to_string()))
        );
        assert_eq!(
            press(&mut review, KeyCode::Char('R')),
            Some(Action::Notify(MSG_REGENERATE_ALL.to_string()))
        );
        assert_eq!(stored(&store), before);
    }

    #[test]
    fn test_edits_survive_storage_outage() {
        let (store, mut review) = seeded();
        store.set_unavailable(true);
        press(&mut review, KeyCode::Char('i'));
        assert!(review.draft().and_then(|d| d.creative.image.as_ref()).is_some());
    }
}
