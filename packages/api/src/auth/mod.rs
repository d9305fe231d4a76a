//! Authentication: local credentials, GitHub OAuth, and session helpers.

mod config;
mod credentials;
mod error;
mod github;
mod password;
mod provider;
mod session;
mod state;

pub use config::{OAuthConfig, GITHUB_CALLBACK_PATH};
pub use credentials::{CredentialsProvider, IdentityStore, StaticIdentityStore};
pub use error::{AuthError, AuthResult};
pub use github::GitHubOAuth;
pub use password::{hash_password, verify_password};
pub use provider::{AuthProvider, Authenticator, CALLBACK_URL};
pub use session::{current_user, store_user, SESSION_USER_KEY};
pub use state::{PendingStates, MAX_PENDING, STATE_TTL};
