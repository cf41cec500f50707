//! Model layer
//!
//! - `FormRecord` / `WizardController` - the product form and its steps
//! - `suggestions` - keyword heuristics over the submitted form
//! - `CampaignDraft` - the generated campaign edited on the review screen
//! - `LoginFlow` - simulated login modal state
//! - `ModalStack` - modal overlay management

pub mod campaign;
pub mod form;
pub mod login;
pub mod modal;
pub mod suggestions;
pub mod ui;
pub mod wizard;

pub use campaign::{CampaignDraft, DraftField};
pub use form::FormRecord;
pub use login::{LoginFlow, LoginMode};
pub use suggestions::Suggestions;
pub use ui::{AppMode, Route};
pub use wizard::{NavDirection, StepKind, WizardController};
