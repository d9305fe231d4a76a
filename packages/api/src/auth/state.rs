//! In-memory store for OAuth sign-ins that are waiting for their callback.
//!
//! Each entry maps the CSRF `state` sent to the provider to the PKCE verifier needed
//! for the code exchange. Entries are single use and expire after [`STATE_TTL`]. At most
//! [`MAX_PENDING`] live entries are kept; further sign-ins are refused until some expire
//! or complete.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::AuthError;
use crate::models::ProviderId;

/// How long a user has to finish the provider's consent screen.
pub const STATE_TTL: Duration = Duration::from_secs(10 * 60);

pub const MAX_PENDING: usize = 1024;

struct PendingSignIn {
    provider: ProviderId,
    pkce_verifier: String,
    expires_at: Instant,
}

pub struct PendingStates {
    ttl: Duration,
    capacity: usize,
    entries: Mutex<HashMap<String, PendingSignIn>>,
}

impl Default for PendingStates {
    fn default() -> Self {
        Self::with_limits(STATE_TTL, MAX_PENDING)
    }
}

impl PendingStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Remember a state/verifier pair. Expired entries are dropped on the way; if the
    /// store is still full the pair is refused.
    pub async fn insert(
        &self,
        state: String,
        provider: ProviderId,
        pkce_verifier: String,
    ) -> Result<(), AuthError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, pending| pending.expires_at > now);
        if entries.len() >= self.capacity {
            tracing::warn!(pending = entries.len(), "Refusing OAuth sign-in, too many pending");
            return Err(AuthError::TooManyPending);
        }
        entries.insert(
            state,
            PendingSignIn {
                provider,
                pkce_verifier,
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }

    /// Remove the entry for `state` and return its verifier if it is still valid for
    /// `provider`. A state can be taken at most once.
    pub async fn take(&self, state: &str, provider: ProviderId) -> Option<String> {
        let pending = self.entries.lock().await.remove(state)?;
        if pending.provider != provider || pending.expires_at <= Instant::now() {
            return None;
        }
        Some(pending.pkce_verifier)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_take_is_single_use() {
        let states = PendingStates::new();
        states
            .insert("abc".into(), ProviderId::GitHub, "verifier".into())
            .await
            .unwrap();

        assert_eq!(
            states.take("abc", ProviderId::GitHub).await.as_deref(),
            Some("verifier")
        );
        assert_eq!(states.take("abc", ProviderId::GitHub).await, None);
    }

    #[tokio::test]
    async fn test_unknown_state() {
        let states = PendingStates::new();
        assert_eq!(states.take("missing", ProviderId::GitHub).await, None);
    }

    #[tokio::test]
    async fn test_wrong_provider_consumes_state() {
        let states = PendingStates::new();
        states
            .insert("abc".into(), ProviderId::GitHub, "verifier".into())
            .await
            .unwrap();

        assert_eq!(states.take("abc", ProviderId::Credentials).await, None);
        assert_eq!(states.take("abc", ProviderId::GitHub).await, None);
    }

    #[tokio::test]
    async fn test_expired_state_is_rejected_and_purged() {
        let ttl = Duration::from_millis(5);
        let states = PendingStates::with_limits(ttl, MAX_PENDING);
        states
            .insert("old".into(), ProviderId::GitHub, "v1".into())
            .await
            .unwrap();
        tokio::time::sleep(ttl * 4).await;
        assert_eq!(states.take("old", ProviderId::GitHub).await, None);

        states
            .insert("a".into(), ProviderId::GitHub, "v2".into())
            .await
            .unwrap();
        tokio::time::sleep(ttl * 4).await;
        states
            .insert("b".into(), ProviderId::GitHub, "v3".into())
            .await
            .unwrap();
        assert_eq!(states.len().await, 1);
        assert_eq!(
            states.take("b", ProviderId::GitHub).await.as_deref(),
            Some("v3")
        );
    }

    #[tokio::test]
    async fn test_full_store_refuses_new_states() {
        let states = PendingStates::with_limits(STATE_TTL, 2);
        for state in ["a", "b"] {
            states
                .insert(state.into(), ProviderId::GitHub, "v".into())
                .await
                .unwrap();
        }

        let refused = states
            .insert("c".into(), ProviderId::GitHub, "v".into())
            .await;
        assert!(matches!(refused, Err(AuthError::TooManyPending)));
        assert_eq!(states.len().await, 2);

        // Completing a sign-in frees a slot
        assert!(states.take("a", ProviderId::GitHub).await.is_some());
        states
            .insert("c".into(), ProviderId::GitHub, "v".into())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_expired_states_do_not_count_against_capacity() {
        let ttl = Duration::from_millis(5);
        let states = PendingStates::with_limits(ttl, 1);
        states
            .insert("a".into(), ProviderId::GitHub, "v".into())
            .await
            .unwrap();
        tokio::time::sleep(ttl * 4).await;
        states
            .insert("b".into(), ProviderId::GitHub, "v".into())
            .await
            .unwrap();
        assert_eq!(states.len().await, 1);
    }
}
