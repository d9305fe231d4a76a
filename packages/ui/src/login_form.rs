//! Email/password login form with a GitHub alternative.

use api::ProviderId;
use dioxus::prelude::*;

use crate::auth::SignInButton;
use crate::login_state::LoginStatus;
use crate::navigation;

/// Login form. `error_code` seeds the form with the error passed back by an OAuth
/// callback (`?error=<code>`).
#[component]
pub fn LoginForm(#[props(default)] error_code: String) -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut status = use_signal(move || LoginStatus::from_error_code(&error_code));

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            // Fields are `required`; an empty one only gets here on programmatic submits
            let (next, credential) = status.peek().submit(&email(), &password());
            status.set(next);
            let Some(credential) = credential else {
                return;
            };

            let outcome = api::sign_in_credentials(Some(credential), false)
                .await
                .map_err(|e| e.to_string());
            let (next, redirect) = status.peek().resolve(outcome);
            status.set(next);

            if let Some(redirect) = redirect {
                navigation::follow(redirect).await;
            }
        });
    };

    let current = status();

    rsx! {
        div {
            class: "login-card",

            h1 { class: "login-title", "Sign in" }
            p {
                class: "login-description",
                "Enter your email below to sign in to your account"
            }

            form {
                onsubmit: handle_login,
                class: "login-form",

                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    name: "email",
                    r#type: "email",
                    placeholder: "you@example.com",
                    required: true,
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    name: "password",
                    r#type: "password",
                    required: true,
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: !current.can_submit(),
                    if current.is_pending() { "Signing in..." } else { "Sign in" }
                }

                SignInButton {
                    provider: ProviderId::GitHub,
                    class: "btn btn-outline",
                    onerror: move |message: String| {
                        if !status.peek().is_signed_in() {
                            status.set(LoginStatus::Failed(message));
                        }
                    },
                }

                if let Some(err) = current.error() {
                    div { class: "message message-error", "{err}" }
                }

                if let Some(message) = current.success() {
                    div { class: "message message-success", "{message}" }
                }
            }
        }
    }
}
