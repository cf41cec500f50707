//! Product form screen: renders the step wizard and routes keys into it

use crate::action::Action;
use crate::component::Component;
use crate::components::input::{cycle_option, edit_text, move_focus};
use crate::components::layout::{calculate_screen_layout, field_lines, help_bar, screen_title};
use crate::model::wizard::StepDefinition;
use crate::model::{NavDirection, Route, StepKind, WizardController};
use crate::services::storage::KeyValueStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::rc::Rc;
use std::time::Instant;

pub const PRODUCT_TYPES: [&str; 2] = ["Product", "Service"];

pub const CATEGORIES: [&str; 8] = [
    "Clothing",
    "Education",
    "Restaurant",
    "Software",
    "Health",
    "Beauty",
    "Home",
    "Electronics",
];

pub const DESCRIPTION_MAX_CHARS: usize = 280;

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text { max_chars: Option<usize> },
    Select(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
struct FieldSpec {
    name: &'static str,
    label: &'static str,
    placeholder: &'static str,
    kind: FieldKind,
}

const fn text(name: &'static str, label: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        placeholder,
        kind: FieldKind::Text { max_chars: None },
    }
}

static PRODUCT_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        name: "productType",
        label: "Type",
        placeholder: "",
        kind: FieldKind::Select(&PRODUCT_TYPES),
    },
    text("name", "Name *", "e.g. Organic Cotton Tee"),
    FieldSpec {
        name: "category",
        label: "Category",
        placeholder: "",
        kind: FieldKind::Select(&CATEGORIES),
    },
];

static DESCRIPTION_FIELDS: [FieldSpec; 2] = [
    FieldSpec {
        name: "description",
        label: "Description *",
        placeholder: "What makes it special?",
        kind: FieldKind::Text {
            max_chars: Some(DESCRIPTION_MAX_CHARS),
        },
    },
    text("price", "Price *", "e.g. ₹999"),
];

static AUDIENCE_FIELDS: [FieldSpec; 4] = [
    text("location", "Location *", "e.g. Mumbai, India"),
    text("ageMin", "Min age", "18"),
    text("ageMax", "Max age", "45"),
    text("target", "Target audience", "e.g. College students 18-24"),
];

fn fields_for(kind: StepKind) -> &'static [FieldSpec] {
    match kind {
        StepKind::ProductInfo => &PRODUCT_FIELDS,
        StepKind::Description => &DESCRIPTION_FIELDS,
        StepKind::Audience => &AUDIENCE_FIELDS,
        StepKind::Review | StepKind::Complete => &[],
    }
}

pub struct ProductFormComponent {
    wizard: WizardController,
    focus: usize,
}

impl ProductFormComponent {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self::with_controller(WizardController::new(store))
    }

    pub fn with_controller(wizard: WizardController) -> Self {
        Self { wizard, focus: 0 }
    }

    /// Still collecting input (not submitted, not complete)
    pub fn is_in_progress(&self) -> bool {
        !self.wizard.is_complete() && !self.wizard.is_submitting()
    }

    fn fields(&self) -> &'static [FieldSpec] {
        fields_for(self.wizard.current_step().kind)
    }

    fn focused_field(&self) -> Option<FieldSpec> {
        self.fields().get(self.focus).copied()
    }

    fn on_step_changed(&mut self) {
        self.focus = 0;
    }

    /// Enter on the current step: advance, submit, or leave when complete
    fn confirm(&mut self) -> Option<Action> {
        if self.wizard.is_complete() {
            return Some(Action::Navigate(Route::Dashboard));
        }
        if self.wizard.is_submit_step() {
            self.wizard.submit();
            return None;
        }
        if self.wizard.advance() {
            self.on_step_changed();
        } else if let Some(idx) = self
            .fields()
            .iter()
            .position(|f| self.wizard.error_for(f.name).is_some())
        {
            self.focus = idx;
        }
        None
    }

    fn back(&mut self) -> Option<Action> {
        if self.wizard.current_index() == 0 {
            return Some(Action::Navigate(Route::Dashboard));
        }
        if self.wizard.retreat() {
            self.on_step_changed();
        }
        None
    }

    fn edit_focused(&mut self, key: KeyEvent) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let current = self.wizard.form().get(field.name).unwrap_or("").to_string();
        match field.kind {
            FieldKind::Select(options) => {
                let forward = match key.code {
                    KeyCode::Right | KeyCode::Char(' ') => true,
                    KeyCode::Left => false,
                    _ => return,
                };
                let next = cycle_option(options, &current, forward);
                self.wizard.update_field(field.name, next);
            }
            FieldKind::Text { max_chars } => {
                let mut value = current;
                if edit_text(&mut value, key, max_chars) {
                    self.wizard.update_field(field.name, value);
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn progress_line(&self) -> Line<'static> {
        let current = self.wizard.current_index();
        let mut spans = Vec::new();
        for (i, step) in self.wizard.steps().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
            }
            let (marker, style) = if i < current {
                ("✓", Style::default().fg(Color::Green))
            } else if i == current {
                (
                    "●",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )
            } else {
                ("○", Style::default().fg(Color::DarkGray))
            };
            spans.push(Span::styled(format!("{} {}", marker, step.label), style));
        }
        let arrow = match self.wizard.direction() {
            NavDirection::Forward => "  ▶",
            NavDirection::Backward => "  ◀",
        };
        spans.push(Span::styled(arrow, Style::default().fg(Color::DarkGray)));
        Line::from(spans)
    }

    fn field_body(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, field) in self.fields().iter().enumerate() {
            let value = self.wizard.form().get(field.name).unwrap_or("");
            let shown = match field.kind {
                FieldKind::Select(_) => format!("◀ {} ▶", value),
                FieldKind::Text {
                    max_chars: Some(max),
                } => format!("{}  ({}/{})", value, value.chars().count(), max),
                FieldKind::Text { max_chars: None } => value.to_string(),
            };
            lines.extend(field_lines(
                field.label,
                &shown,
                i == self.focus,
                self.wizard.error_for(field.name),
                field.placeholder,
            ));
            lines.push(Line::from(""));
        }
        lines
    }

    fn review_body(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            "Check your details before submitting:",
            Style::default().fg(Color::DarkGray),
        ))];
        lines.push(Line::from(""));
        for (name, value) in self.wizard.form().iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", name), Style::default().fg(Color::Cyan)),
                Span::raw(value.to_string()),
            ]));
        }
        lines.push(Line::from(""));
        let checkbox = if self.wizard.consent { "[x]" } else { "[ ]" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("▶ {} ", checkbox),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw("I agree to the terms of service"),
        ]));
        if self.wizard.is_submitting() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Submitting…",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }

    fn complete_body(&self) -> Vec<Line<'static>> {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "✓ Your product has been submitted!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Open the dashboard to see AI suggestions and generate a campaign."),
            Line::from(""),
            Line::from(Span::styled(
                "[ Go to Dashboard ]",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
        ]
    }

    fn help_text(&self) -> &'static str {
        match self.wizard.current_step().kind {
            StepKind::Complete => " Enter: Go to dashboard",
            StepKind::Review => " Space: Toggle consent | Enter: Submit | Esc: Back",
            _ => " Tab/↑↓: Field | ←→: Change option | Enter: Next | Esc: Back",
        }
    }
}

impl Component for ProductFormComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.wizard.is_submitting() {
            return Ok(None);
        }
        let count = self.fields().len();
        let action = match key.code {
            KeyCode::Enter => self.confirm(),
            KeyCode::Esc => self.back(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = move_focus(self.focus, count, true);
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = move_focus(self.focus, count, false);
                None
            }
            KeyCode::Char(' ') if self.wizard.current_step().kind == StepKind::Review => {
                self.wizard.consent = !self.wizard.consent;
                None
            }
            _ => {
                self.edit_focused(key);
                None
            }
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.wizard.tick(Instant::now()) {
            self.on_step_changed();
            return Ok(Some(Action::Notify("Product details saved".to_string())));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_screen_layout(area, 3, true);
        frame.render_widget(
            screen_title("Create Campaign", "Tell us about what you are selling"),
            layout.header,
        );

        let step: &StepDefinition = self.wizard.current_step();
        let body = match step.kind {
            StepKind::Review => self.review_body(),
            StepKind::Complete => self.complete_body(),
            _ => self.field_body(),
        };
        let title = format!(
            " Step {} of {}: {} ",
            self.wizard.current_index() + 1,
            self.wizard.steps().len(),
            step.label
        );
        frame.render_widget(
            Paragraph::new(body)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(title)),
            layout.body,
        );

        if let Some(status) = layout.status {
            frame.render_widget(Paragraph::new(self.progress_line()), status);
        }
        frame.render_widget(help_bar(self.help_text()), layout.help);
        Ok(())
    }
}

#[cfg(test)]
impl ProductFormComponent {
    pub fn wizard(&self) -> &WizardController {
        &self.wizard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{MemoryStore, LAST_PAYLOAD_KEY};
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn press(c: &mut ProductFormComponent, code: KeyCode) -> Option<Action> {
        c.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_str(c: &mut ProductFormComponent, s: &str) {
        for ch in s.chars() {
            press(c, KeyCode::Char(ch));
        }
    }

    fn component(store: Rc<MemoryStore>) -> ProductFormComponent {
        ProductFormComponent::with_controller(
            WizardController::new(store).with_submit_delay(Duration::ZERO),
        )
    }

    #[test]
    fn test_select_cycles_product_type() {
        let mut c = component(Rc::new(MemoryStore::new()));
        press(&mut c, KeyCode::Right);
        assert_eq!(c.wizard().form().get("productType"), Some("Service"));
        press(&mut c, KeyCode::Left);
        assert_eq!(c.wizard().form().get("productType"), Some("Product"));
    }

    #[test]
    fn test_enter_with_missing_name_focuses_error() {
        let mut c = component(Rc::new(MemoryStore::new()));
        press(&mut c, KeyCode::Enter);
        assert_eq!(c.wizard().current_index(), 0);
        assert!(c.wizard().error_for("name").is_some());
        assert_eq!(c.focus, 1);

        type_str(&mut c, "Tee");
        assert!(c.wizard().error_for("name").is_none());
        press(&mut c, KeyCode::Enter);
        assert_eq!(c.wizard().current_index(), 1);
        assert_eq!(c.focus, 0);
    }

    #[test]
    fn test_description_is_capped() {
        let mut c = component(Rc::new(MemoryStore::new()));
        c.wizard.update_field("name", "Tee");
        press(&mut c, KeyCode::Enter);
        type_str(&mut c, &"x".repeat(DESCRIPTION_MAX_CHARS + 10));
        assert_eq!(
            c.wizard().form().get("description").map(|d| d.chars().count()),
            Some(DESCRIPTION_MAX_CHARS)
        );
    }

    #[test]
    fn test_esc_on_first_step_leaves() {
        let mut c = component(Rc::new(MemoryStore::new()));
        assert_eq!(
            press(&mut c, KeyCode::Esc),
            Some(Action::Navigate(Route::Dashboard))
        );
    }

    #[test]
    fn test_full_flow_submits_and_completes() {
        let store = Rc::new(MemoryStore::new());
        let mut c = component(store.clone());

        c.wizard.update_field("name", "Tee");
        press(&mut c, KeyCode::Enter);
        c.wizard.update_field("description", "Soft");
        c.wizard.update_field("price", "₹999");
        press(&mut c, KeyCode::Enter);
        c.wizard.update_field("location", "Pune");
        press(&mut c, KeyCode::Enter);
        assert!(c.wizard().is_submit_step());

        press(&mut c, KeyCode::Char(' '));
        assert!(c.wizard().consent);

        press(&mut c, KeyCode::Enter);
        assert!(c.wizard().is_submitting());
        assert!(store.peek(LAST_PAYLOAD_KEY).is_some());
        assert_eq!(press(&mut c, KeyCode::Esc), None);

        let notice = c.update(Action::Tick).unwrap();
        assert!(matches!(notice, Some(Action::Notify(_))));
        assert!(c.wizard().is_complete());
        assert_eq!(
            press(&mut c, KeyCode::Enter),
            Some(Action::Navigate(Route::Dashboard))
        );
    }
}
