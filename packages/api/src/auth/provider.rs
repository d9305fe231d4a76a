//! # Sign-in providers and the authenticator
//!
//! [`AuthProvider`] is the sign-in capability with its two shapes:
//!
//! - [`AuthProvider::Credentials`] verifies an email/password pair locally.
//! - [`AuthProvider::GitHub`] hands verification to GitHub through a redirect/callback
//!   exchange.
//!
//! Both produce the same [`AuthResult`]. [`Authenticator`] is built once at startup from
//! [`Settings`], shared with request handlers through an axum `Extension`, and routes
//! each request to the right provider.

use std::sync::Arc;

use super::config::OAuthConfig;
use super::credentials::{CredentialsProvider, IdentityStore, StaticIdentityStore};
use super::github::GitHubOAuth;
use super::state::PendingStates;
use super::{AuthError, AuthResult};
use crate::models::{Credential, ProviderId};
use crate::settings::Settings;

/// Where users land after signing in, and the sign-in page itself.
pub const CALLBACK_URL: &str = "/";

/// A configured sign-in method.
#[derive(Clone)]
pub enum AuthProvider {
    Credentials(CredentialsProvider),
    GitHub(GitHubOAuth),
}

impl AuthProvider {
    pub fn id(&self) -> ProviderId {
        match self {
            AuthProvider::Credentials(_) => ProviderId::Credentials,
            AuthProvider::GitHub(_) => ProviderId::GitHub,
        }
    }
}

pub struct Authenticator {
    providers: Vec<AuthProvider>,
    pending: PendingStates,
}

impl Authenticator {
    pub fn new(providers: Vec<AuthProvider>) -> Self {
        Self {
            providers,
            pending: PendingStates::new(),
        }
    }

    /// Credentials backed by `identities`, plus GitHub as configured in `settings`.
    pub fn with_identities(
        settings: &Settings,
        identities: Arc<dyn IdentityStore>,
    ) -> Result<Self, AuthError> {
        let github = GitHubOAuth::new(OAuthConfig::github(settings)?);
        if !github.is_configured() {
            tracing::warn!("GITHUB_ID is empty, GitHub sign-in is disabled");
        }

        Ok(Self::new(vec![
            AuthProvider::GitHub(github),
            AuthProvider::Credentials(CredentialsProvider::new(identities)),
        ]))
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AuthError> {
        let identities = StaticIdentityStore::from_settings(settings.credentials.as_ref())?;
        Self::with_identities(settings, Arc::new(identities))
    }

    pub fn providers(&self) -> &[AuthProvider] {
        &self.providers
    }

    pub fn callback_url(&self) -> &str {
        CALLBACK_URL
    }

    fn provider(&self, id: ProviderId) -> Result<&AuthProvider, AuthError> {
        self.providers
            .iter()
            .find(|provider| provider.id() == id)
            .ok_or_else(|| AuthError::UnknownProvider(id.to_string()))
    }

    /// Verify a credential with a local provider.
    pub fn authorize(&self, id: ProviderId, credential: Option<&Credential>) -> AuthResult {
        match self.provider(id)? {
            AuthProvider::Credentials(provider) => provider.authorize(credential),
            AuthProvider::GitHub(_) => Err(AuthError::UnsupportedFlow(id)),
        }
    }

    /// Start a delegated sign-in and return the provider URL to send the browser to.
    pub async fn sign_in_url(&self, id: ProviderId) -> Result<String, AuthError> {
        match self.provider(id)? {
            AuthProvider::GitHub(github) => github.authorization_url(&self.pending).await,
            AuthProvider::Credentials(_) => Err(AuthError::UnsupportedFlow(id)),
        }
    }

    /// Finish a delegated sign-in from the provider's callback parameters.
    pub async fn complete_sign_in(&self, id: ProviderId, code: &str, state: &str) -> AuthResult {
        match self.provider(id)? {
            AuthProvider::GitHub(github) => github.exchange_code(&self.pending, code, state).await,
            AuthProvider::Credentials(_) => Err(AuthError::UnsupportedFlow(id)),
        }
    }
}
