//! Help dialog: keyboard shortcuts per screen and the declared API endpoints

use crate::action::Action;
use crate::component::Component;
use crate::services::ApiEndpoints;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
    endpoints: Vec<(&'static str, String)>,
}

impl HelpDialog {
    pub fn new(api: &ApiEndpoints) -> Self {
        Self {
            scroll_offset: 0,
            endpoints: api.table(),
        }
    }
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1) => {
                Some(Action::CloseModal)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin / 2,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin),
        );
        frame.render_widget(Clear, dialog_area);

        let content = build_help_content(&self.endpoints);
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        let max_scroll = total.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

fn build_help_content(endpoints: &[(&'static str, String)]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            Style::default().fg(Color::DarkGray),
        )));
    };

    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:14}", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    add_section(&mut lines, "Everywhere");
    add_shortcut(&mut lines, "F1", "Show this help");
    add_shortcut(&mut lines, "Ctrl+l", "Open login");
    add_shortcut(&mut lines, "Ctrl+c", "Quit immediately");

    add_section(&mut lines, "Dashboard");
    add_shortcut(&mut lines, "c", "Create campaign (product form)");
    add_shortcut(&mut lines, "g", "Generate campaign from last product");
    add_shortcut(&mut lines, "r", "Review generated campaign");
    add_shortcut(&mut lines, "e", "Edit product summary");
    add_shortcut(&mut lines, "l", "Login");
    add_shortcut(&mut lines, "?", "Help");
    add_shortcut(&mut lines, "q", "Quit");

    add_section(&mut lines, "Product Form");
    add_shortcut(&mut lines, "Tab / ↑↓", "Move between fields");
    add_shortcut(&mut lines, "← →", "Change option");
    add_shortcut(&mut lines, "Enter", "Next step / Submit");
    add_shortcut(&mut lines, "Esc", "Previous step");
    add_shortcut(&mut lines, "Space", "Toggle consent (review step)");

    add_section(&mut lines, "Campaign Review");
    add_shortcut(&mut lines, "↑↓ / j k", "Select field");
    add_shortcut(&mut lines, "Enter", "Edit field / Save edit");
    add_shortcut(&mut lines, "h / d", "Regenerate headline / description");
    add_shortcut(&mut lines, "← →", "Change call to action");
    add_shortcut(&mut lines, "i", "Simulate AI image");
    add_shortcut(&mut lines, "R", "Regenerate all");
    add_shortcut(&mut lines, "p", "Publish");
    add_shortcut(&mut lines, "Esc", "Back to dashboard");

    add_section(&mut lines, "API Endpoints (not called)");
    for (name, url) in endpoints {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:24}", name),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(url.clone(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_endpoints() {
        let api = ApiEndpoints::new("http://api.test");
        let dialog = HelpDialog::new(&api);
        let text: Vec<String> = build_help_content(&dialog.endpoints)
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert!(text.iter().any(|l| l.contains("http://api.test/api/auth/login/json")));
        assert!(text.iter().any(|l| l.contains("Campaign Review")));
    }
}
