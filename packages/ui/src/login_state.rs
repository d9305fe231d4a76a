//! # Login form state machine
//!
//! The form moves `Idle → Pending → Failed | SignedIn`. Starting a new submission leaves
//! `Failed` for `Pending` (or `Idle` if a field is empty), neither of which carries a
//! message, so whatever the previous attempt showed is cleared before the next result
//! arrives. `SignedIn` is terminal.
//!
//! [`LoginStatus::resolve`] turns the outcome of the sign-in call into the next status
//! and, on the first success only, a single [`PendingRedirect`] for the caller to run.

use std::time::Duration;

use api::{Credential, SignInResponse, INVALID_CREDENTIALS};

/// Delay between showing the success message and leaving the page.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Page loaded after a successful sign-in.
pub const HOME: &str = "/";

pub const SUCCESS_MESSAGE: &str = "Signed in! Redirecting...";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoginStatus {
    #[default]
    Idle,
    Pending,
    Failed(String),
    SignedIn(String),
}

/// A navigation to run once, after a delay.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRedirect {
    pub to: String,
    pub after: Duration,
}

impl LoginStatus {
    /// Status shown when the page is opened with `?error=<code>`.
    pub fn from_error_code(code: &str) -> Self {
        if code.is_empty() {
            LoginStatus::Idle
        } else {
            LoginStatus::Failed(describe_error_code(code).to_string())
        }
    }

    /// Start a submission from the raw form fields.
    ///
    /// Any previous message is cleared. Returns the credential to send, or `None` when
    /// nothing should be sent: a field is empty (status back to `Idle`), a request is
    /// already in flight, or the user is signed in and the redirect is on its way (both
    /// leave the status unchanged).
    pub fn submit(&self, email: &str, password: &str) -> (Self, Option<Credential>) {
        if !self.can_submit() {
            return (self.clone(), None);
        }
        match Credential::from_form(email, password) {
            Some(credential) => (LoginStatus::Pending, Some(credential)),
            None => (LoginStatus::Idle, None),
        }
    }

    /// Apply the result of the sign-in call. Transport failures are shown the same way
    /// as rejections. Once signed in the status no longer changes, so at most one
    /// redirect is ever handed out.
    pub fn resolve(
        &self,
        outcome: Result<SignInResponse, String>,
    ) -> (Self, Option<PendingRedirect>) {
        if self.is_signed_in() {
            return (self.clone(), None);
        }

        let failure = match &outcome {
            Ok(response) => response.failure().map(str::to_string),
            Err(e) => Some(e.clone()),
        };

        match failure {
            Some(message) => (LoginStatus::Failed(non_empty(message)), None),
            None => (
                LoginStatus::SignedIn(SUCCESS_MESSAGE.to_string()),
                Some(PendingRedirect {
                    to: HOME.to_string(),
                    after: REDIRECT_DELAY,
                }),
            ),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoginStatus::Pending)
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, LoginStatus::SignedIn(_))
    }

    /// Whether the submit button accepts clicks.
    pub fn can_submit(&self) -> bool {
        !self.is_pending() && !self.is_signed_in()
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoginStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match self {
            LoginStatus::SignedIn(message) => Some(message),
            _ => None,
        }
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        INVALID_CREDENTIALS.to_string()
    } else {
        message
    }
}

/// Readable text for the error codes the OAuth callback puts in the query string.
pub fn describe_error_code(code: &str) -> &'static str {
    match code {
        "CredentialsSignin" => INVALID_CREDENTIALS,
        "OAuthCallback" => "Could not sign in with GitHub. Please try again.",
        "OAuthSignin" => "Too many sign-ins in progress. Please try again shortly.",
        "Configuration" => "Sign-in is not available right now.",
        _ => "Sign-in failed. Please try again.",
    }
}
