//! Sign-in provider identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies a sign-in method. The string form is used in URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Local email + password check.
    Credentials,
    /// GitHub OAuth.
    GitHub,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Credentials => "credentials",
            ProviderId::GitHub => "github",
        }
    }

    /// Human-readable provider name for buttons and messages.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderId::Credentials => "Credentials",
            ProviderId::GitHub => "GitHub",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credentials" => Ok(ProviderId::Credentials),
            "github" => Ok(ProviderId::GitHub),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for id in [ProviderId::Credentials, ProviderId::GitHub] {
            assert_eq!(id.to_string().parse::<ProviderId>(), Ok(id));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "google".parse::<ProviderId>(),
            Err("Unknown provider: google".to_string())
        );
        assert!("GitHub".parse::<ProviderId>().is_err());
    }
}
