//! Session keys and helpers.

use tower_sessions::Session;

use crate::models::UserRecord;

/// Key for storing the signed-in user in the session.
pub const SESSION_USER_KEY: &str = "user";

/// Remember `user` as the session's signed-in user.
pub async fn store_user(session: &Session, user: &UserRecord) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, user).await
}

/// The session's signed-in user, if any.
pub async fn current_user(session: &Session) -> Result<Option<UserRecord>, tower_sessions::session::Error> {
    session.get(SESSION_USER_KEY).await
}
