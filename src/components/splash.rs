//! Splash screen shown briefly at startup

use crate::action::Action;
use crate::component::Component;
use crate::services::delay::Delay;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const SPLASH_DURATION: Duration = Duration::from_millis(1500);
const ACCENT: Color = Color::Rgb(99, 102, 241);

const LOGO: [&str; 6] = [
    "    ###    ######      ######     ###    ######## ######## ######## ",
    "   ## ##   ##   ##     ##   ##   ## ##      ##       ##    ##       ",
    "  ##   ##  ##    ##    ######   ##   ##     ##       ##    ######   ",
    "  #######  ##    ##    ##       #######     ##       ##    ##       ",
    "  ##   ##  ##   ##     ##       ##   ##     ##       ##    ##       ",
    "  ##   ##  ######      ##       ##   ##     ##       ##    ######## ",
];

pub struct SplashComponent {
    timer: Option<Delay>,
}

impl Default for SplashComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SplashComponent {
    pub fn new() -> Self {
        Self { timer: None }
    }

    fn poll_complete(&mut self, now: Instant) -> bool {
        self.timer.as_mut().is_some_and(|t| t.poll(now))
    }
}

impl Component for SplashComponent {
    fn init(&mut self) -> Result<()> {
        self.timer = Some(Delay::after(SPLASH_DURATION));
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(t) = self.timer.as_mut() {
            t.cancel();
        }
        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::ForceQuit)),
            _ => Ok(Some(Action::SplashComplete)),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.poll_complete(Instant::now()) {
            return Ok(Some(Action::SplashComplete));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let bg = Color::Rgb(0, 0, 0);
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

        let logo_height = LOGO.len() as u16;
        let logo_width = LOGO.first().map(|l| l.len()).unwrap_or(0) as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((area.height.saturating_sub(logo_height + 4)) / 2),
                Constraint::Length(logo_height),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let logo: Vec<Line> = LOGO
            .iter()
            .map(|line| {
                Line::from(
                    line.chars()
                        .map(|c| {
                            let style = if c == '#' {
                                Style::default().fg(ACCENT).bg(bg)
                            } else {
                                Style::default().fg(bg).bg(bg)
                            };
                            Span::styled(c.to_string(), style)
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let logo_x = area.x + (area.width.saturating_sub(logo_width)) / 2;
        frame.render_widget(
            Paragraph::new(logo),
            Rect::new(logo_x, chunks[1].y, logo_width.min(area.width), logo_height),
        );

        let subtitle = "Create ad campaigns from a product description";
        let subtitle_width = subtitle.len() as u16;
        let subtitle_x = area.x + (area.width.saturating_sub(subtitle_width)) / 2;
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                subtitle,
                Style::default()
                    .fg(Color::DarkGray)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC),
            ))),
            Rect::new(subtitle_x, chunks[3].y, subtitle_width.min(area.width), 1),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_splash_completes_once() {
        let mut splash = SplashComponent::new();
        let start = Instant::now();
        splash.timer = Some(Delay::starting_at(start, SPLASH_DURATION));

        assert!(!splash.poll_complete(start));
        assert!(splash.poll_complete(start + SPLASH_DURATION));
        assert!(!splash.poll_complete(start + SPLASH_DURATION * 2));
    }

    #[test]
    fn test_any_key_skips_and_q_quits() {
        let mut splash = SplashComponent::new();
        splash.init().unwrap();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            splash.handle_key_event(enter).unwrap(),
            Some(Action::SplashComplete)
        );
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(splash.handle_key_event(q).unwrap(), Some(Action::ForceQuit));
    }
}
