//! Login modal: renders a [`LoginFlow`] and feeds it keys

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::input::edit_text;
use crate::model::{LoginFlow, LoginMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

const OTP_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum EmailFocus {
    #[default]
    Email,
    Password,
}

#[derive(Default)]
pub struct LoginDialog {
    flow: LoginFlow,
    email_focus: EmailFocus,
}

impl LoginDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.flow.open();
        self.email_focus = EmailFocus::Email;
    }

    pub fn close(&mut self) {
        self.flow.close();
    }

    pub fn is_open(&self) -> bool {
        self.flow.is_open()
    }

    fn busy(&self) -> bool {
        self.flow.sending || self.flow.verifying
    }

    fn handle_choose(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('e') | KeyCode::Char('1') => self.flow.choose_email(),
            KeyCode::Char('p') | KeyCode::Char('2') => self.flow.choose_phone(),
            KeyCode::Esc => return Some(Action::CloseModal),
            _ => {}
        }
        None
    }

    fn handle_email(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.flow.go_back(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.email_focus = match self.email_focus {
                    EmailFocus::Email => EmailFocus::Password,
                    EmailFocus::Password => EmailFocus::Email,
                };
            }
            KeyCode::Enter => self.flow.submit_email(Instant::now()),
            _ => {
                let buffer = match self.email_focus {
                    EmailFocus::Email => &mut self.flow.email,
                    EmailFocus::Password => &mut self.flow.password,
                };
                edit_text(buffer, key, None);
            }
        }
    }

    fn handle_phone(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.flow.go_back(),
            KeyCode::Enter if !self.busy() => self.flow.submit_phone(Instant::now()),
            _ if self.busy() => {}
            _ => {
                edit_text(&mut self.flow.phone, key, None);
            }
        }
    }

    fn handle_otp(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.flow.go_back(),
            KeyCode::Enter if !self.busy() => self.flow.verify_otp(Instant::now()),
            KeyCode::Char(c) if !c.is_ascii_digit() => {}
            _ if self.busy() => {}
            _ => {
                edit_text(&mut self.flow.otp, key, Some(OTP_LEN));
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn input_line(label: &str, value: &str, focused: bool) -> Line<'static> {
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let cursor = if focused { "_" } else { "" };
        Line::from(vec![
            Span::styled(format!("{:<10}", label), style),
            Span::raw(format!("{}{}", value, cursor)),
        ])
    }

    fn body(&self) -> Vec<Line<'static>> {
        let flow = &self.flow;
        let mut lines = vec![Line::from("")];
        match flow.mode {
            LoginMode::Choose => {
                lines.push(Line::from("How would you like to sign in?"));
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled(" e ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("Email & password"),
                ]));
                lines.push(Line::from(vec![
                    Span::styled(" p ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("Phone & OTP"),
                ]));
            }
            LoginMode::Email => {
                lines.push(Self::input_line(
                    "Email",
                    &flow.email,
                    self.email_focus == EmailFocus::Email,
                ));
                let masked = "•".repeat(flow.password.chars().count());
                lines.push(Self::input_line(
                    "Password",
                    &masked,
                    self.email_focus == EmailFocus::Password,
                ));
            }
            LoginMode::Phone => {
                lines.push(Self::input_line("Phone", &flow.phone, !flow.sending));
                if flow.sending {
                    lines.push(Line::from(Span::styled(
                        "Sending OTP…",
                        Style::default().fg(Color::Yellow),
                    )));
                }
            }
            LoginMode::Otp => {
                lines.push(Self::input_line("OTP", &flow.otp, !flow.verifying));
                if let Some(code) = flow.generated_otp() {
                    lines.push(Line::from(Span::styled(
                        format!("Demo code: {}", code),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                if flow.verifying {
                    lines.push(Line::from(Span::styled(
                        "Verifying…",
                        Style::default().fg(Color::Yellow),
                    )));
                }
            }
            LoginMode::Success => {
                lines.push(Line::from(Span::styled(
                    "✓ Signed in",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )));
            }
        }

        if let Some(message) = &flow.message {
            let color = if flow.mode == LoginMode::Success {
                Color::Green
            } else if message.starts_with("OTP sent") {
                Color::Cyan
            } else {
                Color::Red
            };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(message.clone(), Style::default().fg(color))));
        }
        lines
    }

    fn hint(&self) -> &'static str {
        match self.flow.mode {
            LoginMode::Choose => "e/p: Choose | Esc: Close",
            LoginMode::Email => "Tab: Switch field | Enter: Login | Esc: Back",
            LoginMode::Phone => "Enter: Send OTP | Esc: Back",
            LoginMode::Otp => "Enter: Verify | Esc: Back",
            LoginMode::Success => "Esc: Close",
        }
    }
}

impl Component for LoginDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.flow.mode {
            LoginMode::Choose => self.handle_choose(key),
            LoginMode::Email => {
                self.handle_email(key);
                None
            }
            LoginMode::Phone => {
                self.handle_phone(key);
                None
            }
            LoginMode::Otp => {
                self.handle_otp(key);
                None
            }
            LoginMode::Success => match key.code {
                KeyCode::Esc | KeyCode::Enter => Some(Action::CloseModal),
                _ => None,
            },
        };
        Ok(action)
    }

    /// Returns `CloseModal` when the flow closed itself after a login
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.flow.tick(Instant::now()) {
            return Ok(Some(Action::CloseModal));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 52, 14);
        frame.render_widget(Clear, popup_area);

        let mut lines = self.body();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.hint(),
            Style::default().fg(Color::DarkGray),
        )));

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title(" Login ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
impl LoginDialog {
    pub fn flow(&self) -> &LoginFlow {
        &self.flow
    }
}
