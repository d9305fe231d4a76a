//! User-supplied email/password pair.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Email and password submitted from the login form.
///
/// Lives for a single sign-in attempt. Comparison against stored identities is
/// exact: no trimming, no case folding.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Build a credential from form input, or `None` when either field is empty.
    pub fn from_form(email: &str, password: &str) -> Option<Self> {
        if email.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self::new(email, password))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_password() {
        let credential = Credential::new("x@x.com", "hunter2");
        let debug = format!("{:?}", credential);
        assert!(debug.contains("x@x.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_from_form_requires_both_fields() {
        assert!(Credential::from_form("", "").is_none());
        assert!(Credential::from_form("x@x.com", "").is_none());
        assert!(Credential::from_form("", "secret").is_none());
        assert_eq!(
            Credential::from_form("x@x.com", "secret"),
            Some(Credential::new("x@x.com", "secret"))
        );
    }

    #[test]
    fn test_from_form_keeps_input_verbatim() {
        let credential = Credential::from_form(" X@x.com ", " pw ").unwrap();
        assert_eq!(credential.email, " X@x.com ");
        assert_eq!(credential.password, " pw ");
    }
}
