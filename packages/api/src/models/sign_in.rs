//! Reply of the credentials sign-in call.

use serde::{Deserialize, Serialize};

/// Message used whenever a credential is rejected. It never says which field was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Outcome of a sign-in attempt as seen by the client: either an error string or success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignInResponse {
    pub ok: bool,
    pub error: Option<String>,
    /// Where the client should navigate now. Only set on success when the caller
    /// asked for a redirect.
    pub url: Option<String>,
}

impl SignInResponse {
    pub fn accepted(callback_url: &str, redirect: bool) -> Self {
        Self {
            ok: true,
            error: None,
            url: redirect.then(|| callback_url.to_string()),
        }
    }

    /// A rejection. Empty messages are replaced so the form always has something to show.
    pub fn rejected(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            INVALID_CREDENTIALS.to_string()
        } else {
            message
        };
        Self {
            ok: false,
            error: Some(message),
            url: None,
        }
    }

    /// The rejection message, if this response is not a success.
    pub fn failure(&self) -> Option<&str> {
        match (&self.error, self.ok) {
            (Some(error), _) => Some(error.as_str()),
            (None, false) => Some(INVALID_CREDENTIALS),
            (None, true) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_sets_url_only_when_redirecting() {
        let quiet = SignInResponse::accepted("/", false);
        assert!(quiet.ok);
        assert_eq!(quiet.url, None);
        assert_eq!(quiet.failure(), None);

        let redirecting = SignInResponse::accepted("/", true);
        assert_eq!(redirecting.url.as_deref(), Some("/"));
    }

    #[test]
    fn test_rejected_never_has_empty_message() {
        let response = SignInResponse::rejected("  ");
        assert!(!response.ok);
        assert_eq!(response.failure(), Some(INVALID_CREDENTIALS));
        assert_eq!(response.url, None);
    }

    #[test]
    fn test_not_ok_without_error_is_a_failure() {
        let response = SignInResponse {
            ok: false,
            error: None,
            url: None,
        };
        assert_eq!(response.failure(), Some(INVALID_CREDENTIALS));
    }
}
