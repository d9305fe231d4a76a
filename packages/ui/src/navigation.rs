//! Full-page navigation helpers.

use std::time::Duration;

use crate::login_state::PendingRedirect;

/// Load `url` in the current window.
pub fn navigate_to(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                tracing::error!("Failed to navigate to {}: {:?}", url, e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("Navigation to {} skipped outside the browser", url);
    }
}

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Wait out the redirect delay, then navigate. Not cancellable.
pub async fn follow(redirect: PendingRedirect) {
    sleep(redirect.after).await;
    navigate_to(&redirect.to);
}
