//! Component trait - shared interface for screens and dialogs
//!
//! A component owns its screen state, turns keys into Actions and renders
//! itself. Cross-screen effects (navigation, modals, notices) go through
//! Actions handled by the App.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

pub trait Component {
    /// Called once after construction
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Handle a key event, returning an optional Action
    ///
    /// Components with text fields edit their own buffers here; only
    /// effects outside the component become Actions.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// React to an Action routed from the App (mostly `Tick`)
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render into `area`
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
