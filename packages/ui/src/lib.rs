//! This crate contains all shared UI for the workspace.

mod auth;
pub use auth::{use_auth, AuthState, SessionProvider, SignInButton, SignOutButton};

mod login_form;
pub use login_form::LoginForm;

pub mod login_state;
pub use login_state::{LoginStatus, PendingRedirect};

pub mod navigation;
