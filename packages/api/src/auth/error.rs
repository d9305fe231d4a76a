//! Authentication errors.

use thiserror::Error;

use crate::models::{ProviderId, INVALID_CREDENTIALS};

/// Outcome of verification: the accepted user or the reason for rejection.
pub type AuthResult = Result<crate::models::UserRecord, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. The two cases are never told apart.
    #[error("{}", INVALID_CREDENTIALS)]
    InvalidCredentials,

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Provider {0} does not support this sign-in flow")]
    UnsupportedFlow(ProviderId),

    #[error("Provider {0} is not configured")]
    NotConfigured(ProviderId),

    #[error("Invalid or expired OAuth state")]
    InvalidState,

    #[error("Too many sign-ins in progress, try again later")]
    TooManyPending,

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// Short code passed back to the sign-in page as `?error=<code>`.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "CredentialsSignin",
            AuthError::UnknownProvider(_)
            | AuthError::NotConfigured(_)
            | AuthError::PasswordHash(_)
            | AuthError::Config(_) => "Configuration",
            AuthError::UnsupportedFlow(_)
            | AuthError::InvalidState
            | AuthError::OAuth(_) => "OAuthCallback",
            AuthError::TooManyPending => "OAuthSignin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_opaque() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(AuthError::InvalidCredentials.code(), "CredentialsSignin");
        assert_eq!(AuthError::InvalidState.code(), "OAuthCallback");
        assert_eq!(
            AuthError::NotConfigured(ProviderId::GitHub).code(),
            "Configuration"
        );
        assert_eq!(AuthError::TooManyPending.code(), "OAuthSignin");
    }
}
