//! Root application component
//!
//! App owns the current route, the modal stack and the screen components.
//! It coordinates between them; campaign logic lives in the model layer.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    DashboardComponent, GenerateComponent, HelpDialog, LoginDialog, ProductFormComponent,
    QuitDialog, ReviewComponent, SplashComponent,
};
use crate::model::modal::{Modal, ModalStack};
use crate::model::{AppMode, Route};
use crate::services::{ApiEndpoints, KeyValueStore};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};
use std::rc::Rc;

pub struct App {
    pub mode: AppMode,
    pub route: Route,
    pub modals: ModalStack,
    pub should_quit: bool,
    /// Transient notice shown under the current screen
    pub status_message: Option<String>,

    store: Rc<dyn KeyValueStore>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub dashboard: DashboardComponent,
    /// Screens below are mounted only while their route is active
    pub product_form: Option<ProductFormComponent>,
    pub generate: Option<GenerateComponent>,
    pub review: Option<ReviewComponent>,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub login: LoginDialog,
}

impl App {
    pub fn new(store: Rc<dyn KeyValueStore>, api: &ApiEndpoints, show_splash: bool) -> App {
        App {
            mode: if show_splash {
                AppMode::Splash
            } else {
                AppMode::Running
            },
            route: Route::Dashboard,
            modals: ModalStack::new(),
            should_quit: false,
            status_message: None,
            dashboard: DashboardComponent::new(store.clone()),
            store,
            splash: SplashComponent::new(),
            product_form: None,
            generate: None,
            review: None,
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog::new(api),
            login: LoginDialog::new(),
        }
    }

    /// Switch screens. The screen being left is dropped, which cancels any
    /// delay it still had pending.
    fn navigate(&mut self, route: Route) {
        tracing::info!(from = self.route.title(), to = route.title(), "navigate");
        self.product_form = None;
        self.generate = None;
        self.review = None;
        self.status_message = None;

        match route {
            Route::Dashboard => self.dashboard.reload(),
            Route::CreateCampaign => {
                self.product_form = Some(ProductFormComponent::new(self.store.clone()))
            }
            Route::GenerateCampaign => {
                self.generate = Some(GenerateComponent::new(self.store.clone()))
            }
            Route::CampaignReview => self.review = Some(ReviewComponent::new(self.store.clone())),
        }
        self.route = route;
    }

    /// The component drawn for the current route
    fn screen(&mut self) -> &mut dyn Component {
        match self.route {
            Route::CreateCampaign => {
                if let Some(c) = self.product_form.as_mut() {
                    return c;
                }
            }
            Route::GenerateCampaign => {
                if let Some(c) = self.generate.as_mut() {
                    return c;
                }
            }
            Route::CampaignReview => {
                if let Some(c) = self.review.as_mut() {
                    return c;
                }
            }
            Route::Dashboard => {}
        }
        &mut self.dashboard
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::Login => self.login.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
            Modal::Login => self.login.draw(frame, area),
        }
    }

    fn close_top_modal(&mut self) {
        if self.modals.pop() == Some(Modal::Login) {
            self.login.close();
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        if self.mode == AppMode::Splash {
            self.splash.init()?;
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        match self.mode {
            AppMode::Splash => self.splash.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    return self.handle_modal_key_event(&modal, key);
                }
                match key.code {
                    KeyCode::F(1) => Ok(Some(Action::OpenHelp)),
                    KeyCode::Char('l') if ctrl => Ok(Some(Action::OpenLogin)),
                    _ => self.screen().handle_key_event(key),
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.mode == AppMode::Splash {
                    return self.splash.update(Action::Tick);
                }
                if self.login.is_open() && self.login.update(Action::Tick)?.is_some() {
                    self.modals.remove(&Modal::Login);
                }
                return self.screen().update(Action::Tick);
            }
            Action::SplashComplete => {
                self.mode = AppMode::Running;
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::Navigate(route) => self.navigate(route),
            Action::CampaignGenerated => {
                self.navigate(Route::CampaignReview);
                self.status_message = Some("Campaign generated".to_string());
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.wizard_in_progress = self
                    .product_form
                    .as_ref()
                    .is_some_and(|f| f.is_in_progress());
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                if self.modals.top() != Some(&Modal::Help) {
                    self.help_dialog.scroll_offset = 0;
                    self.modals.push(Modal::Help);
                }
            }
            Action::OpenLogin => {
                if !self.login.is_open() {
                    self.login.open();
                    self.modals.push(Modal::Login);
                }
            }
            Action::CloseModal => self.close_top_modal(),

            Action::Notify(message) => {
                tracing::info!(%message, "notice");
                self.status_message = Some(message);
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if self.mode == AppMode::Splash {
            return self.splash.draw(frame, area);
        }

        let screen_area = match &self.status_message {
            Some(message) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)])
                    .split(area);
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        format!(" {}", message),
                        Style::default().fg(Color::Green),
                    )),
                    chunks[1],
                );
                chunks[0]
            }
            None => area,
        };
        self.screen().draw(frame, screen_area)?;

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LoginMode;
    use crate::services::MemoryStore;

    fn app() -> App {
        App::new(Rc::new(MemoryStore::new()), &ApiEndpoints::default(), false)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_splash_mode_follows_config() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        let with = App::new(store.clone(), &ApiEndpoints::default(), true);
        assert_eq!(with.mode, AppMode::Splash);
        assert_eq!(app().mode, AppMode::Running);
    }

    #[test]
    fn test_navigation_mounts_and_drops_screens() {
        let mut app = app();
        app.update(Action::Navigate(Route::CreateCampaign)).unwrap();
        assert_eq!(app.route, Route::CreateCampaign);
        assert!(app.product_form.is_some());

        app.update(Action::Navigate(Route::Dashboard)).unwrap();
        assert!(app.product_form.is_none());
        assert_eq!(app.route, Route::Dashboard);
    }

    #[test]
    fn test_campaign_generated_opens_review() {
        let mut app = app();
        app.update(Action::Navigate(Route::GenerateCampaign)).unwrap();
        app.update(Action::CampaignGenerated).unwrap();
        assert_eq!(app.route, Route::CampaignReview);
        assert!(app.generate.is_none());
        assert!(app.review.is_some());
        assert_eq!(app.status_message.as_deref(), Some("Campaign generated"));
    }

    #[test]
    fn test_modal_receives_keys_first() {
        let mut app = app();
        app.update(Action::OpenQuitDialog).unwrap();
        let action = app.handle_key_event(key(KeyCode::Char('c'))).unwrap();
        assert_eq!(action, None);
        let action = app.handle_key_event(key(KeyCode::Char('y'))).unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
    }

    #[test]
    fn test_closing_login_modal_resets_flow() {
        let mut app = app();
        app.update(Action::OpenLogin).unwrap();
        assert!(app.login.is_open());
        assert_eq!(app.modals.top(), Some(&Modal::Login));

        let action = app.handle_key_event(key(KeyCode::Char('e'))).unwrap();
        assert_eq!(action, None);
        assert_eq!(app.login.flow().mode, LoginMode::Email);

        app.update(Action::CloseModal).unwrap();
        assert!(!app.login.is_open());
        assert!(app.modals.is_empty());
        assert_eq!(app.login.flow().mode, LoginMode::Choose);
    }

    #[test]
    fn test_global_shortcuts() {
        let mut app = app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key_event(ctrl_c).unwrap(), Some(Action::ForceQuit));
        assert_eq!(
            app.handle_key_event(key(KeyCode::F(1))).unwrap(),
            Some(Action::OpenHelp)
        );
        app.update(Action::OpenHelp).unwrap();
        app.update(Action::OpenHelp).unwrap();
        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_quit_dialog_flags_wizard_in_progress() {
        let mut app = app();
        app.update(Action::Navigate(Route::CreateCampaign)).unwrap();
        app.update(Action::OpenQuitDialog).unwrap();
        assert!(app.quit_dialog.wizard_in_progress);
    }
}
