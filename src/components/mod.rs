//! UI Components
//!
//! Screens (dashboard, product form, generate, review) and modal dialogs.
//! Each owns its state and talks to the App through Actions.

pub mod dashboard;
pub mod generate;
pub mod help_dialog;
pub mod input;
pub mod layout;
pub mod login_dialog;
pub mod quit_dialog;
pub mod review;
pub mod splash;
pub mod wizard;

pub use dashboard::DashboardComponent;
pub use generate::GenerateComponent;
pub use help_dialog::HelpDialog;
pub use layout::centered_popup;
pub use login_dialog::LoginDialog;
pub use quit_dialog::QuitDialog;
pub use review::ReviewComponent;
pub use splash::SplashComponent;
pub use wizard::ProductFormComponent;
