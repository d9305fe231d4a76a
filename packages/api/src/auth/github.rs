//! # GitHub OAuth 2.0 implementation
//!
//! Delegates identity verification to GitHub with the Authorization Code flow and PKCE.
//!
//! ## Types
//!
//! - [`GitHubUser`] / [`GitHubEmail`] — deserialization targets for the GitHub REST API
//!   responses (`/user` and `/user/emails`).
//! - [`ConfiguredClient`] — a fully-typed `oauth2::Client` alias with auth and token
//!   endpoints set.
//! - [`GitHubOAuth`] — the public handler that wraps an [`OAuthConfig`].
//!
//! ## Flow
//!
//! 1. **[`authorization_url`](GitHubOAuth::authorization_url)** — builds an authorization
//!    URL requesting the `read:user` and `user:email` scopes, generates a random PKCE
//!    challenge, and parks the CSRF state + verifier in [`PendingStates`].
//!
//! 2. **[`exchange_code`](GitHubOAuth::exchange_code)** — called from the
//!    `/api/auth/callback/github` route in the `web` crate. It:
//!    - Takes the matching pending state (single use, expiry checked).
//!    - Exchanges the authorization code + PKCE verifier for an access token.
//!    - Fetches the profile from `api.github.com/user`; if no email is public, falls
//!      back to `/user/emails` and picks the primary verified address.
//!    - Maps the profile onto a [`UserRecord`].

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use reqwest::Client;
use serde::Deserialize;

use super::config::OAuthConfig;
use super::state::PendingStates;
use super::{AuthError, AuthResult};
use crate::models::{ProviderId, UserRecord};

const USER_AGENT: &str = "signin-web";

/// GitHub user info from API.
#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: i64,
    login: String,
    email: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

impl GitHubUser {
    fn into_record(self, email: String) -> UserRecord {
        UserRecord {
            id: self.id.to_string(),
            name: self.name.or(Some(self.login)),
            email,
            image: self.avatar_url,
            provider: ProviderId::GitHub,
        }
    }
}

/// GitHub email info from API.
#[derive(Debug, Deserialize)]
struct GitHubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// GitHub OAuth handler.
#[derive(Debug, Clone)]
pub struct GitHubOAuth {
    config: OAuthConfig,
}

impl GitHubOAuth {
    pub fn new(config: OAuthConfig) -> Self {
        Self { config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Generate the authorization URL with PKCE and remember its state.
    pub async fn authorization_url(&self, pending: &PendingStates) -> Result<String, AuthError> {
        if !self.is_configured() {
            return Err(AuthError::NotConfigured(ProviderId::GitHub));
        }

        let client = self.create_client();
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("read:user".to_string()))
            .add_scope(Scope::new("user:email".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        pending
            .insert(
                csrf_state.secret().clone(),
                ProviderId::GitHub,
                pkce_verifier.secret().clone(),
            )
            .await?;

        Ok(auth_url.to_string())
    }

    /// Exchange an authorization code for a token and resolve the GitHub user.
    pub async fn exchange_code(
        &self,
        pending: &PendingStates,
        code: &str,
        state: &str,
    ) -> AuthResult {
        let pkce_verifier = pending
            .take(state, ProviderId::GitHub)
            .await
            .ok_or(AuthError::InvalidState)?;

        // Token endpoint must not follow redirects
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::OAuth(e.to_string()))?;

        let token_result = self
            .create_client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
            .request_async(&http_client)
            .await
            .map_err(|e| AuthError::OAuth(format!("Token exchange failed: {}", e)))?;

        let access_token = token_result.access_token().secret();
        let api_client = Client::new();

        let github_user: GitHubUser = api_client
            .get("https://api.github.com/user")
            .bearer_auth(access_token)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))?;

        let email = match github_user.email.clone() {
            Some(email) => email,
            None => {
                let emails: Vec<GitHubEmail> = api_client
                    .get("https://api.github.com/user/emails")
                    .bearer_auth(access_token)
                    .header("User-Agent", USER_AGENT)
                    .send()
                    .await
                    .map_err(|e| AuthError::OAuth(e.to_string()))?
                    .json()
                    .await
                    .map_err(|e| AuthError::OAuth(e.to_string()))?;

                primary_email(emails)
                    .ok_or_else(|| AuthError::OAuth("No verified primary email found".to_string()))?
            }
        };

        tracing::info!(github_id = github_user.id, "GitHub sign-in completed");
        Ok(github_user.into_record(email))
    }
}

fn primary_email(emails: Vec<GitHubEmail>) -> Option<String> {
    emails
        .into_iter()
        .find(|e| e.primary && e.verified)
        .map(|e| e.email)
}
