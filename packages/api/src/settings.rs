//! # Server settings
//!
//! Settings are layered with the `config` crate: built-in defaults, then an optional
//! `config.toml` in the working directory, then environment variables split on `_`
//! (`GITHUB_ID` → `github.id`). A `.env` file is loaded first via `dotenvy`.
//!
//! | Key | Environment | Default |
//! |-----|-------------|---------|
//! | `auth.url` | `AUTH_URL` | `http://localhost:8080` |
//! | `github.id` | `GITHUB_ID` | `""` |
//! | `github.secret` | `GITHUB_SECRET` | `""` |
//! | `credentials.email` | `CREDENTIALS_EMAIL` | unset |
//! | `credentials.password` | `CREDENTIALS_PASSWORD` | unset |
//! | `credentials.id` | `CREDENTIALS_ID` | `"1"` |
//! | `credentials.name` | `CREDENTIALS_NAME` | unset |
//! | `credentials.image` | `CREDENTIALS_IMAGE` | unset |
//!
//! The `credentials` section is the development identity for the local sign-in path.
//! Leave it unset and the credentials provider rejects everyone.

use std::collections::HashMap;
use std::fmt;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    /// Public base URL of this server, used to build OAuth redirect URLs.
    pub url: String,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".into(),
        }
    }
}

#[derive(Clone, Deserialize, Default)]
pub struct GitHub {
    pub id: String,
    pub secret: String,
}

impl fmt::Debug for GitHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHub")
            .field("id", &self.id)
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Development identity accepted by the credentials provider.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    #[serde(default = "default_user_id")]
    pub id: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

fn default_user_id() -> String {
    "1".into()
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("image", &self.image)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub github: GitHub,
    pub credentials: Option<Credentials>,
}

impl Settings {
    /// Load settings from `.env`, `config.toml` and the process environment.
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(None)
    }

    /// Load settings from the given variables instead of the process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::build(Some(vars))
    }

    fn build(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("auth.url", "http://localhost:8080")?
            .set_default("github.id", "")?
            .set_default("github.secret", "")?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().separator("_").source(vars))
            .build()?;

        config.try_deserialize()
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.auth.url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_vars(HashMap::new()).unwrap();
        assert_eq!(settings.auth.url, "http://localhost:8080");
        assert_eq!(settings.github.id, "");
        assert_eq!(settings.github.secret, "");
        assert!(settings.credentials.is_none());
    }

    #[test]
    fn test_environment_overrides() {
        let settings = Settings::from_vars(vars(&[
            ("AUTH_URL", "https://signin.example.com/"),
            ("GITHUB_ID", "client-id"),
            ("GITHUB_SECRET", "client-secret"),
        ]))
        .unwrap();
        assert_eq!(settings.base_url(), "https://signin.example.com");
        assert_eq!(settings.github.id, "client-id");
        assert_eq!(settings.github.secret, "client-secret");
    }

    #[test]
    fn test_credentials_section() {
        let settings = Settings::from_vars(vars(&[
            ("CREDENTIALS_EMAIL", "andreohenriqueleite@gmail.com"),
            ("CREDENTIALS_PASSWORD", "123"),
            ("CREDENTIALS_NAME", "Andreuu"),
        ]))
        .unwrap();
        let credentials = settings.credentials.unwrap();
        assert_eq!(credentials.email, "andreohenriqueleite@gmail.com");
        assert_eq!(credentials.password, "123");
        assert_eq!(credentials.id, "1");
        assert_eq!(credentials.name.as_deref(), Some("Andreuu"));
        assert_eq!(credentials.image, None);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let settings = Settings::from_vars(vars(&[
            ("GITHUB_SECRET", "client-secret"),
            ("CREDENTIALS_EMAIL", "x@x.com"),
            ("CREDENTIALS_PASSWORD", "hunter2"),
        ]))
        .unwrap();
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("client-secret"));
        assert!(!debug.contains("hunter2"));
    }
}
