//! # Local email + password sign-in
//!
//! [`IdentityStore`] is the lookup seam: given a [`Credential`] it returns the matching
//! [`UserRecord`], or `None`. [`StaticIdentityStore`] backs it with identities fixed at
//! startup (the development identity from [`Settings`](crate::settings::Settings)); a
//! database-backed store would implement the same trait.
//!
//! [`CredentialsProvider`] wraps a store and applies the verifier contract:
//!
//! - no credential → reject
//! - email and password both match exactly → the stored user
//! - anything else → reject with [`AuthError::InvalidCredentials`]

use std::sync::Arc;

use super::password::{hash_password, verify_password};
use super::{AuthError, AuthResult};
use crate::models::{Credential, ProviderId, UserRecord};
use crate::settings::Credentials as CredentialsSettings;

/// Looks up the user a credential belongs to.
pub trait IdentityStore: Send + Sync {
    fn verify(&self, credential: &Credential) -> Option<UserRecord>;
}

/// Stand-in hash checked when no identity has the submitted email, so an unknown email
/// costs the same Argon2 work as a wrong password. Uses the default Argon2id parameters.
const UNKNOWN_EMAIL_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

struct StaticIdentity {
    email: String,
    password_hash: String,
    user: UserRecord,
}

/// Identities fixed at startup. Passwords are kept as Argon2 hashes.
#[derive(Default)]
pub struct StaticIdentityStore {
    identities: Vec<StaticIdentity>,
}

impl StaticIdentityStore {
    /// A store that accepts nobody.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add an identity. Emails are unique: a second identity with the same email is rejected.
    pub fn insert(&mut self, email: &str, password: &str, user: UserRecord) -> Result<(), AuthError> {
        if self.identities.iter().any(|identity| identity.email == email) {
            return Err(AuthError::Config(format!(
                "duplicate identity for {}",
                email
            )));
        }
        self.identities.push(StaticIdentity {
            email: email.to_string(),
            password_hash: hash_password(password)?,
            user,
        });
        Ok(())
    }

    pub fn with_identity(mut self, email: &str, password: &str, user: UserRecord) -> Result<Self, AuthError> {
        self.insert(email, password, user)?;
        Ok(self)
    }

    /// Build the store from the optional `credentials` settings section.
    pub fn from_settings(settings: Option<&CredentialsSettings>) -> Result<Self, AuthError> {
        let Some(credentials) = settings else {
            tracing::warn!("No credentials identity configured, local sign-in will reject everyone");
            return Ok(Self::empty());
        };

        let user = UserRecord {
            id: credentials.id.clone(),
            name: credentials.name.clone(),
            email: credentials.email.clone(),
            image: credentials.image.clone().filter(|image| !image.is_empty()),
            provider: ProviderId::Credentials,
        };
        Self::empty().with_identity(&credentials.email, &credentials.password, user)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl StaticIdentityStore {
    fn find(&self, email: &str) -> Option<&StaticIdentity> {
        self.identities.iter().find(|identity| identity.email == email)
    }

    /// The hash a candidate password is checked against. Every lookup gets one.
    fn hash_for(&self, email: &str) -> &str {
        self.find(email)
            .map(|identity| identity.password_hash.as_str())
            .unwrap_or(UNKNOWN_EMAIL_HASH)
    }
}

impl IdentityStore for StaticIdentityStore {
    fn verify(&self, credential: &Credential) -> Option<UserRecord> {
        let hash = self.hash_for(&credential.email);
        let matches = match verify_password(&credential.password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!("Password hash for {} is unusable: {}", credential.email, e);
                false
            }
        };

        if !matches {
            return None;
        }
        self.find(&credential.email)
            .map(|identity| identity.user.clone())
    }
}

/// The local sign-in provider.
#[derive(Clone)]
pub struct CredentialsProvider {
    store: Arc<dyn IdentityStore>,
}

impl CredentialsProvider {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    pub fn authorize(&self, credential: Option<&Credential>) -> AuthResult {
        let Some(credential) = credential else {
            return Err(AuthError::InvalidCredentials);
        };
        self.store
            .verify(credential)
            .ok_or(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "andreohenriqueleite@gmail.com";
    const PASSWORD: &str = "123";

    fn andreuu() -> UserRecord {
        UserRecord {
            id: "1".to_string(),
            name: Some("Andreuu".to_string()),
            email: EMAIL.to_string(),
            image: Some("https://example.com/avatar.jpg".to_string()),
            provider: ProviderId::Credentials,
        }
    }

    fn provider() -> CredentialsProvider {
        let store = StaticIdentityStore::empty()
            .with_identity(EMAIL, PASSWORD, andreuu())
            .unwrap();
        CredentialsProvider::new(Arc::new(store))
    }

    #[test]
    fn test_accepts_configured_pair() {
        let provider = provider();
        let user = provider
            .authorize(Some(&Credential::new(EMAIL, PASSWORD)))
            .unwrap();
        assert_eq!(user, andreuu());
        assert_eq!(user.id, "1");
        assert_eq!(user.display_name(), "Andreuu");
    }

    #[test]
    fn test_rejects_any_difference() {
        let provider = provider();
        let attempts = [
            Credential::new("x@x.com", "wrong"),
            Credential::new(EMAIL, "wrong"),
            Credential::new("x@x.com", PASSWORD),
            Credential::new("AndreoHenriqueLeite@gmail.com", PASSWORD),
            Credential::new(" andreohenriqueleite@gmail.com", PASSWORD),
            Credential::new(EMAIL, "123 "),
            Credential::new("", ""),
        ];
        for credential in attempts {
            assert!(
                matches!(
                    provider.authorize(Some(&credential)),
                    Err(AuthError::InvalidCredentials)
                ),
                "{:?} should be rejected",
                credential
            );
        }
    }

    #[test]
    fn test_rejects_absent_credential() {
        assert!(matches!(
            provider().authorize(None),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_unknown_email_is_checked_against_a_real_hash() {
        let store = StaticIdentityStore::empty()
            .with_identity(EMAIL, PASSWORD, andreuu())
            .unwrap();

        let hash = store.hash_for("x@x.com");
        assert_eq!(hash, UNKNOWN_EMAIL_HASH);
        // Parses and verifies like a stored hash instead of failing fast
        assert!(matches!(verify_password("wrong", hash), Ok(false)));
        assert!(matches!(verify_password(PASSWORD, hash), Ok(false)));

        assert_ne!(store.hash_for(EMAIL), UNKNOWN_EMAIL_HASH);
        assert_eq!(store.verify(&Credential::new("x@x.com", PASSWORD)), None);
    }

    #[test]
    fn test_empty_store_rejects_everyone() {
        let provider = CredentialsProvider::new(Arc::new(StaticIdentityStore::empty()));
        assert!(provider
            .authorize(Some(&Credential::new(EMAIL, PASSWORD)))
            .is_err());
    }

    #[test]
    fn test_duplicate_email_is_refused() {
        let store = StaticIdentityStore::empty()
            .with_identity(EMAIL, PASSWORD, andreuu())
            .unwrap();
        let result = store.with_identity(EMAIL, "other", andreuu());
        assert!(matches!(result, Err(AuthError::Config(_))));
    }

    #[test]
    fn test_from_settings() {
        let settings = CredentialsSettings {
            email: EMAIL.to_string(),
            password: PASSWORD.to_string(),
            id: "1".to_string(),
            name: Some("Andreuu".to_string()),
            image: None,
        };
        let store = StaticIdentityStore::from_settings(Some(&settings)).unwrap();
        assert_eq!(store.len(), 1);
        let user = store.verify(&Credential::new(EMAIL, PASSWORD)).unwrap();
        assert_eq!(user.name.as_deref(), Some("Andreuu"));
        assert_eq!(user.provider, ProviderId::Credentials);

        assert!(StaticIdentityStore::from_settings(None).unwrap().is_empty());
    }
}
