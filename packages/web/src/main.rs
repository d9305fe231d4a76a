use dioxus::prelude::*;

use ui::SessionProvider;
use views::Home;

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/?:error")]
    Home { error: String },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                eprintln!("Failed to start tokio runtime: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = runtime.block_on(launch_server()) {
            tracing::error!("Server stopped: {}", e);
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> Result<(), Box<dyn std::error::Error>> {
    use std::sync::Arc;

    use axum::routing::get;
    use axum::Extension;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = api::settings::Settings::new()?;
    let authenticator = Arc::new(api::auth::Authenticator::from_settings(&settings)?);

    // Session layer configuration
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(settings.base_url().starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    let router = axum::Router::new()
        .route(api::auth::GITHUB_CALLBACK_PATH, get(github_callback))
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(Extension(authenticator))
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

#[cfg(feature = "server")]
#[derive(Debug, serde::Deserialize)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// GitHub sends the browser here after consent. Both outcomes land on `/`.
#[cfg(feature = "server")]
async fn github_callback(
    axum::extract::Query(params): axum::extract::Query<CallbackParams>,
    axum::Extension(authenticator): axum::Extension<std::sync::Arc<api::auth::Authenticator>>,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    use api::auth::{store_user, AuthError};
    use api::ProviderId;
    use axum::response::Redirect;

    let failed = |e: AuthError| {
        tracing::error!("GitHub sign-in failed: {}", e);
        Redirect::to(&format!("{}?error={}", authenticator.callback_url(), e.code()))
    };

    if let Some(error) = params.error {
        return failed(AuthError::OAuth(error));
    }
    let (Some(code), Some(state)) = (params.code, params.state) else {
        return failed(AuthError::InvalidState);
    };

    match authenticator
        .complete_sign_in(ProviderId::GitHub, &code, &state)
        .await
    {
        Ok(user) => {
            if let Err(e) = store_user(&session, &user).await {
                return failed(AuthError::OAuth(format!("Failed to set session: {}", e)));
            }
            Redirect::to(authenticator.callback_url())
        }
        Err(e) => failed(e),
    }
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            Router::<Route> {}
        }
    }
}
