//! Action enum - All possible application actions
//!
//! Components turn key events into Actions; the App processes them to
//! update state. Typing into fields is handled inside the owning component
//! and never becomes an Action.

use crate::model::Route;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for delays and the splash timer
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,
    /// Transition from splash to the dashboard
    SplashComplete,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Switch to another screen
    Navigate(Route),
    /// A campaign draft was generated and stored
    CampaignGenerated,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    OpenLogin,
    /// Close the top modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Status
    // ─────────────────────────────────────────────────────────────────────────
    /// Show a transient notice in the status line
    Notify(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::Navigate(route) => write!(f, "Navigate({})", route.title()),
            Action::CampaignGenerated => write!(f, "CampaignGenerated"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenLogin => write!(f, "OpenLogin"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::Notify(msg) => write!(f, "Notify({})", msg),
        }
    }
}
