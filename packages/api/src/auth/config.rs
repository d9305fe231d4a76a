//! OAuth client configuration built from [`Settings`].

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use super::AuthError;
use crate::settings::Settings;

/// Path GitHub sends the user back to after consent.
pub const GITHUB_CALLBACK_PATH: &str = "/api/auth/callback/github";

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
}

impl OAuthConfig {
    /// GitHub OAuth config. Id and secret may be empty; see [`OAuthConfig::is_configured`].
    pub fn github(settings: &Settings) -> Result<Self, AuthError> {
        Ok(Self {
            client_id: ClientId::new(settings.github.id.clone()),
            client_secret: ClientSecret::new(settings.github.secret.clone()),
            auth_url: AuthUrl::new("https://github.com/login/oauth/authorize".to_string())
                .map_err(|e| AuthError::Config(e.to_string()))?,
            token_url: TokenUrl::new("https://github.com/login/oauth/access_token".to_string())
                .map_err(|e| AuthError::Config(e.to_string()))?,
            redirect_url: RedirectUrl::new(format!(
                "{}{}",
                settings.base_url(),
                GITHUB_CALLBACK_PATH
            ))
            .map_err(|e| AuthError::Config(e.to_string()))?,
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.as_str().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_redirect_url_uses_base_url() {
        let mut vars = HashMap::new();
        vars.insert("AUTH_URL".to_string(), "https://signin.example.com/".to_string());
        vars.insert("GITHUB_ID".to_string(), "client-id".to_string());
        let settings = Settings::from_vars(vars).unwrap();

        let config = OAuthConfig::github(&settings).unwrap();
        assert!(config.is_configured());
        assert_eq!(
            config.redirect_url.as_str(),
            "https://signin.example.com/api/auth/callback/github"
        );
    }

    #[test]
    fn test_empty_client_id_is_not_configured() {
        let config = OAuthConfig::github(&Settings::from_vars(HashMap::new()).unwrap()).unwrap();
        assert!(!config.is_configured());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut vars = HashMap::new();
        vars.insert("AUTH_URL".to_string(), "not a url".to_string());
        let settings = Settings::from_vars(vars).unwrap();
        assert!(matches!(
            OAuthConfig::github(&settings),
            Err(AuthError::Config(_))
        ));
    }
}
