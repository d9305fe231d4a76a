//! Session context and sign-in/out buttons for the UI.

use api::{ProviderId, UserRecord};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_brands_icons::FaGithub;
use dioxus_free_icons::Icon;

use crate::navigation::navigate_to;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserRecord>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that loads the session's user once on mount.
/// Wrap your app with this component to enable [`use_auth`].
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    let _ = use_resource(move || async move {
        let user = match api::get_current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Failed to load session: {}", e);
                None
            }
        };
        auth_state.set(AuthState {
            user,
            loading: false,
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button that starts a delegated sign-in with `provider`.
#[component]
pub fn SignInButton(
    provider: ProviderId,
    #[props(default = "".to_string())] class: String,
    /// Called with a message when the sign-in URL cannot be obtained.
    onerror: Option<EventHandler<String>>,
) -> Element {
    let mut loading = use_signal(|| false);
    let name = provider.label();

    let onclick = move |evt: MouseEvent| {
        // Keep the click from submitting a surrounding form
        evt.prevent_default();
        async move {
            loading.set(true);
            match api::get_sign_in_url(provider.as_str().to_string()).await {
                Ok(url) => navigate_to(&url),
                Err(e) => {
                    tracing::error!("Failed to get sign-in URL: {}", e);
                    loading.set(false);
                    if let Some(handler) = onerror {
                        handler.call(format!("Could not reach {}. Please try again.", name));
                    }
                }
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            disabled: loading(),
            onclick: onclick,
            if provider == ProviderId::GitHub {
                Icon { width: 16, height: 16, icon: FaGithub }
            }
            if loading() {
                "Redirecting..."
            } else {
                "Sign in with {name}"
            }
        }
    }
}

/// Button to sign out the current user.
#[component]
pub fn SignOutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        match api::sign_out().await {
            Ok(()) => {
                auth_state.set(AuthState {
                    user: None,
                    loading: false,
                });
                navigate_to(crate::login_state::HOME);
            }
            Err(e) => tracing::error!("Failed to sign out: {}", e),
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
