//! Campaign generation screen
//!
//! Idle → Loading → Done. The draft is derived from the last submitted
//! product form once the simulated generation delay fires.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{calculate_screen_layout, help_bar, screen_title};
use crate::model::{CampaignDraft, FormRecord, Route};
use crate::services::delay::{self, Delay};
use crate::services::storage::{self, KeyValueStore, LAST_CAMPAIGN_KEY, LAST_PAYLOAD_KEY};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const GENERATE_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerateState {
    #[default]
    Idle,
    Loading,
    Done,
}

pub struct GenerateComponent {
    store: Rc<dyn KeyValueStore>,
    state: GenerateState,
    pending: Option<Delay>,
    /// Product name from the stored payload, if any
    product_name: Option<String>,
}

impl GenerateComponent {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        let product_name = storage::load_or_none::<FormRecord>(store.as_ref(), LAST_PAYLOAD_KEY)
            .and_then(|form| form.non_empty("name").map(str::to_string));
        Self {
            store,
            state: GenerateState::Idle,
            pending: None,
            product_name,
        }
    }

    /// Start generating. Ignored while already loading.
    pub fn generate_at(&mut self, now: Instant) {
        if self.state == GenerateState::Loading {
            return;
        }
        self.state = GenerateState::Loading;
        self.pending = Some(Delay::starting_at(now, GENERATE_DELAY));
    }

    /// Finish generation when due. Returns true once the draft is stored.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !delay::poll_slot(&mut self.pending, now) {
            return false;
        }
        let payload: FormRecord =
            storage::load_or_none(self.store.as_ref(), LAST_PAYLOAD_KEY).unwrap_or_default();
        let draft = CampaignDraft::from_payload(&payload);
        storage::save_best_effort(self.store.as_ref(), LAST_CAMPAIGN_KEY, &draft);
        tracing::info!(campaign = %draft.campaign_name, "campaign draft generated");
        self.state = GenerateState::Done;
        true
    }

    fn body(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("")];
        match &self.product_name {
            Some(name) => lines.push(Line::from(vec![
                Span::raw("Product: "),
                Span::styled(
                    name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ])),
            None => lines.push(Line::from(Span::styled(
                "No product submitted yet. Defaults will be used.",
                Style::default().fg(Color::DarkGray),
            ))),
        }
        lines.push(Line::from(""));
        let (text, style) = match self.state {
            GenerateState::Idle => (
                "Press Enter to generate your campaign",
                Style::default().fg(Color::Cyan),
            ),
            GenerateState::Loading => (
                "Generating campaign…",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            ),
            GenerateState::Done => (
                "✓ Campaign generated",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        };
        lines.push(Line::from(Span::styled(text, style)));
        lines
    }
}

impl Component for GenerateComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Char('g') => {
                self.generate_at(Instant::now());
                None
            }
            KeyCode::Esc => Some(Action::Navigate(Route::Dashboard)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.tick(Instant::now()) {
            return Ok(Some(Action::CampaignGenerated));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_screen_layout(area, 3, false);
        frame.render_widget(
            screen_title("Generate Campaign", "Build a draft from your product details"),
            layout.header,
        );
        frame.render_widget(
            Paragraph::new(self.body())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL)),
            layout.body,
        );
        frame.render_widget(help_bar(" Enter: Generate | Esc: Dashboard"), layout.help);
        Ok(())
    }
}

impl Drop for GenerateComponent {
    fn drop(&mut self) {
        delay::cancel_slot(&mut self.pending);
    }
}

#[cfg(test)]
impl GenerateComponent {
    pub fn state(&self) -> GenerateState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{load_json, save_json, MemoryStore};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_builds_draft_from_payload() {
        let store = Rc::new(MemoryStore::new());
        let mut form = FormRecord::new();
        form.set("name", "Tee");
        form.set("location", "Pune");
        save_json(store.as_ref(), LAST_PAYLOAD_KEY, &form).unwrap();

        let mut screen = GenerateComponent::new(store.clone());
        let t0 = Instant::now();
        screen.generate_at(t0);
        assert_eq!(screen.state(), GenerateState::Loading);
        assert!(!screen.tick(t0 + Duration::from_millis(500)));

        assert!(screen.tick(t0 + GENERATE_DELAY));
        assert_eq!(screen.state(), GenerateState::Done);

        let draft: CampaignDraft = load_json(store.as_ref(), LAST_CAMPAIGN_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(draft.campaign_name, "Tee — Campaign");
        assert_eq!(draft.adset.location, "Pune");
    }

    #[test]
    fn test_generate_without_payload_uses_defaults() {
        let store = Rc::new(MemoryStore::new());
        let mut screen = GenerateComponent::new(store.clone());
        let t0 = Instant::now();
        screen.generate_at(t0);
        screen.tick(t0 + GENERATE_DELAY);

        let draft: CampaignDraft = load_json(store.as_ref(), LAST_CAMPAIGN_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(draft.campaign_name, "New Campaign");
    }

    #[test]
    fn test_storage_failure_still_completes() {
        let store = Rc::new(MemoryStore::new());
        store.set_unavailable(true);
        let mut screen = GenerateComponent::new(store.clone());
        let t0 = Instant::now();
        screen.generate_at(t0);
        assert!(screen.tick(t0 + GENERATE_DELAY));
        assert_eq!(screen.state(), GenerateState::Done);
    }

    #[test]
    fn test_dropping_screen_cancels_generation() {
        let store = Rc::new(MemoryStore::new());
        let mut screen = GenerateComponent::new(store.clone());
        screen.generate_at(Instant::now());
        drop(screen);
        assert_eq!(store.peek(LAST_CAMPAIGN_KEY), None);
    }
}
