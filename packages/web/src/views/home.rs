//! Home page: the sign-in form, or the signed-in user's card.

use api::UserRecord;
use dioxus::prelude::*;
use ui::{use_auth, LoginForm, SignOutButton};

/// Home page component. `error` is the code the OAuth callback redirects back with.
#[component]
pub fn Home(error: String) -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        div {
            class: "page",

            if state.loading {
                p { class: "muted", "Loading..." }
            } else if let Some(user) = state.user {
                UserCard { user }
            } else {
                LoginForm { error_code: error }
            }
        }
    }
}

#[component]
fn UserCard(user: UserRecord) -> Element {
    let name = user.display_name().to_string();

    rsx! {
        div {
            class: "login-card",

            if let Some(image) = user.image {
                img { class: "avatar", src: "{image}", alt: "" }
            }
            h1 { class: "login-title", "Welcome, {name}" }
            p { class: "login-description", "{user.email}" }

            SignOutButton { class: "btn btn-outline" }
        }
    }
}
