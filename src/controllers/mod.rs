//! View-state controllers, one per dashboard screen.
//!
//! Every remote call site sets its own in-progress flag, and clears it on
//! success and failure alike. Errors are logged and swallowed here; nothing
//! propagates past a controller.

pub mod app_details;
pub mod create_project;
pub mod login;
pub mod project;
pub mod saml;
pub mod subscriptions;

pub use app_details::{AppDetails, AppTab};
pub use create_project::{CreateProjectWizard, WizardStage};
pub use login::{logout, LoginField, LoginPage};
pub use project::{BootstrapState, ProjectShell};
pub use saml::SamlCallback;
pub use subscriptions::Subscriptions;
