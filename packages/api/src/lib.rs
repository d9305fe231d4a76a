//! # API crate — shared fullstack server functions for sign-in
//!
//! Defines every Dioxus server function the web frontend calls, the client-safe models
//! they exchange, and behind the `server` feature the authentication machinery.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`models`] | — | `Credential`, `UserRecord`, `ProviderId`, `SignInResponse` |
//! | `auth` | `server` | Credentials and GitHub providers, the `Authenticator`, password hashing, sessions |
//! | `settings` | `server` | Layered configuration (`config.toml`, environment) |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub that simply
//! forwards the call over HTTP.
//!
//! - `sign_in_credentials` — verify an email/password pair and open a session
//! - `get_sign_in_url` — start a delegated (GitHub) sign-in
//! - `get_current_user` — read the signed-in user from the session
//! - `sign_out` — clear the session

use dioxus::prelude::*;

#[cfg(feature = "server")]
pub mod auth;
pub mod models;
#[cfg(feature = "server")]
pub mod settings;

pub use models::{Credential, ProviderId, SignInResponse, UserRecord, INVALID_CREDENTIALS};

#[cfg(feature = "server")]
type AuthenticatorExt = axum::Extension<std::sync::Arc<auth::Authenticator>>;

/// Verify a credential with the local provider.
///
/// Rejections are not errors: they come back as a [`SignInResponse`] carrying the
/// message to show. `ServerFnError` is reserved for failures to reach or use the session.
#[cfg(feature = "server")]
#[post("/api/auth/callback/credentials", session: tower_sessions::Session, authenticator: AuthenticatorExt)]
pub async fn sign_in_credentials(
    credential: Option<Credential>,
    redirect: bool,
) -> Result<SignInResponse, ServerFnError> {
    match authenticator.authorize(ProviderId::Credentials, credential.as_ref()) {
        Ok(user) => {
            auth::store_user(&session, &user)
                .await
                .map_err(|e| ServerFnError::new(e.to_string()))?;
            tracing::info!(user_id = %user.id, "Credentials sign-in accepted");
            Ok(SignInResponse::accepted(authenticator.callback_url(), redirect))
        }
        Err(e) => {
            tracing::info!("Credentials sign-in rejected: {}", e);
            Ok(SignInResponse::rejected(e.to_string()))
        }
    }
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/callback/credentials")]
pub async fn sign_in_credentials(
    credential: Option<Credential>,
    redirect: bool,
) -> Result<SignInResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Get the authorization URL for a delegated provider.
#[cfg(feature = "server")]
#[get("/api/auth/signin/:provider", authenticator: AuthenticatorExt)]
pub async fn get_sign_in_url(provider: String) -> Result<String, ServerFnError> {
    let id: ProviderId = provider.parse().map_err(|e: String| ServerFnError::new(e))?;
    authenticator.sign_in_url(id).await.map_err(|e| {
        tracing::error!("Failed to start {} sign-in: {}", id, e);
        ServerFnError::new(e.to_string())
    })
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/signin/:provider")]
pub async fn get_sign_in_url(provider: String) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Get the signed-in user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/session", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserRecord>, ServerFnError> {
    auth::current_user(&session)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/session")]
pub async fn get_current_user() -> Result<Option<UserRecord>, ServerFnError> {
    Ok(None)
}

/// Sign out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/signout", session: tower_sessions::Session)]
pub async fn sign_out() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signout")]
pub async fn sign_out() -> Result<(), ServerFnError> {
    Ok(())
}
