//! # Authenticated user record
//!
//! [`UserRecord`] is the identity handed back by every sign-in path, whether the
//! local credentials check or a delegated OAuth provider. It is
//! `Serialize + Deserialize + PartialEq` so it can cross the server/client boundary
//! through Dioxus server functions and be stored in the session as-is.
//!
//! The helper [`UserRecord::display_name`] returns the user's name or falls back to
//! their email address.

use serde::{Deserialize, Serialize};

use super::ProviderId;

/// User identity returned on a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    /// Avatar URL.
    pub image: Option<String>,
    pub provider: ProviderId,
}

impl UserRecord {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}
