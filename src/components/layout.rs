//! Layout calculations and small rendering helpers shared by screens

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Areas of a full screen: title, body, optional status line, help bar
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Split a screen into header, body, optional status and help bar
pub fn calculate_screen_layout(area: Rect, header_height: u16, has_status: bool) -> ScreenLayout {
    let mut constraints = vec![Constraint::Length(header_height), Constraint::Min(0)];
    if has_status {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let (status, help) = if has_status {
        (Some(chunks[2]), chunks[3])
    } else {
        (None, chunks[2])
    };

    ScreenLayout {
        header: chunks[0],
        body: chunks[1],
        status,
        help,
    }
}

/// Cut `text` to at most `max_width` terminal columns, adding an ellipsis
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Bordered help bar with dimmed key hints
pub fn help_bar(text: &str) -> Paragraph<'_> {
    Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )]))
    .block(Block::default().borders(Borders::ALL))
}

/// Title block used at the top of every screen
pub fn screen_title<'a>(title: &'a str, subtitle: &'a str) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::DarkGray))),
    ])
    .block(Block::default().borders(Borders::BOTTOM))
}

/// "label: value" row, highlighted when focused, with an optional error
pub fn field_lines(
    label: &str,
    value: &str,
    focused: bool,
    error: Option<&str>,
    placeholder: &str,
) -> Vec<Line<'static>> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let marker = if focused { "▶ " } else { "  " };

    let value_span = if value.is_empty() && !focused {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        let cursor = if focused { "_" } else { "" };
        let style = if error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        Span::styled(format!("{}{}", value, cursor), style)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(marker.to_string(), label_style),
            Span::styled(label.to_string(), label_style),
        ]),
        Line::from(vec![Span::raw("    "), value_span]),
    ];
    if let Some(error) = error {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(error.to_string(), Style::default().fg(Color::Red)),
        ]));
    }
    lines
}
