//! Text editing and option cycling for form fields

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Apply a typing key to `buffer`. Returns true when the buffer changed.
///
/// `max_chars` mirrors an input's maxlength: extra characters are dropped.
pub fn edit_text(buffer: &mut String, key: KeyEvent, max_chars: Option<usize>) -> bool {
    match key.code {
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            if max_chars.is_some_and(|max| buffer.chars().count() >= max) {
                return false;
            }
            buffer.push(c);
            true
        }
        _ => false,
    }
}

/// Next (or previous) option after `current`, wrapping around.
/// Unknown values start from the first option.
pub fn cycle_option<'a>(options: &[&'a str], current: &str, forward: bool) -> &'a str {
    if options.is_empty() {
        return "";
    }
    let len = options.len();
    let next = match options.iter().position(|o| *o == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    options[next]
}

/// Move a focus index by one, wrapping within `count`
pub fn move_focus(focus: usize, count: usize, forward: bool) -> usize {
    if count == 0 {
        return 0;
    }
    if forward {
        (focus + 1) % count
    } else {
        (focus + count - 1) % count
    }
}
