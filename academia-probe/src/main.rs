use std::{env, sync::Arc};

use academia::{
    CredentialExchangeClient, Credentials, NavigationHistory, NotificationCenter, RequestAugmenter,
    ReqwestTransport, RouteGuard, Secret, SessionStorage, SessionStore, Settings,
    adapters::config::env::{LOGIN_IDENTIFIER_ENV_VAR, LOGIN_SECRET_ENV_VAR},
    init_tracing,
};
use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;

/// Wires the session core together from configuration and exercises it once against the backend.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Load configuration
    let config = Settings::load()?;

    // Local surfaces
    let storage = SessionStorage::from_settings(&config.storage)?;
    let navigation = NavigationHistory::starting_at(&config.navigation.landing_view);
    let notifications = NotificationCenter::new();

    let store = Arc::new(
        SessionStore::hydrate(storage, navigation.clone())
            .with_login_view(&config.navigation.login_view),
    );

    // Backend client
    let http_client = HttpClient::builder()
        .timeout(config.api.timeout())
        .build()?;
    let transport = ReqwestTransport::new(&config.api.base_url, http_client)?;
    let api = Arc::new(RequestAugmenter::new(
        transport,
        Arc::clone(&store),
        notifications.clone(),
    ));

    let client = CredentialExchangeClient::new(api, Arc::clone(&store));
    let guard = RouteGuard::new(Arc::clone(&store), navigation.clone())
        .with_policy(config.navigation.admission_policy());

    match store.current() {
        Some(identity) => tracing::info!(
            user_id = %identity.id(),
            role = %identity.role(),
            "Persisted session found"
        ),
        None => tracing::info!("No persisted session"),
    }

    match (env::var(LOGIN_IDENTIFIER_ENV_VAR), env::var(LOGIN_SECRET_ENV_VAR)) {
        (Ok(identifier), Ok(secret)) => {
            let credentials = Credentials::new(identifier, Secret::new(secret));
            match client.login(&credentials).await {
                Ok(session) => tracing::info!(role = %session.role(), "Signed in"),
                Err(e) => tracing::warn!(error = %e, kind = ?e.kind(), "Sign-in failed"),
            }
        }
        _ if store.is_authenticated() => match client.refresh_profile().await {
            Ok(session) => tracing::info!(role = %session.role(), "Profile refreshed"),
            Err(e) => tracing::warn!(error = %e, kind = ?e.kind(), "Profile refresh failed"),
        },
        _ => tracing::info!("Set {LOGIN_IDENTIFIER_ENV_VAR} and {LOGIN_SECRET_ENV_VAR} to sign in"),
    }

    for path in ["/dashboard", "/courses", "/admin"] {
        let admission = guard.can_activate_path(path);
        tracing::info!(path, allowed = admission.is_allowed(), "Route check");
    }

    tracing::info!(
        location = %navigation.current(),
        unread_notifications = notifications.unread_count(),
        "Probe finished"
    );

    Ok(())
}
