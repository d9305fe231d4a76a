//! Data models shared between the client and the server.

mod credential;
mod provider;
mod sign_in;
mod user;

pub use credential::Credential;
pub use provider::ProviderId;
pub use sign_in::{SignInResponse, INVALID_CREDENTIALS};
pub use user::UserRecord;
