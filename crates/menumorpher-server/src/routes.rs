//! HTTP routes.
//!
//! - `GET /`: login link
//! - `GET /login`: redirect to Google's consent screen
//! - `GET /callback`: code exchange, menu chain, summary
//! - `GET /health`: liveness

use axum::Router;
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::routing::get;
use serde::Deserialize;
use tracing::{debug, info, warn};

use menumorpher_core::LoginSummary;
use menumorpher_providers::ProviderError;
use menumorpher_providers::chain;
use menumorpher_providers::google::BusinessClient;

use crate::error::{ServerError, ServerResult};
use crate::persist;
use crate::state::{AppState, SharedState};

const INDEX_HTML: &str = r#"<html><body><a href="/login">Google Log In</a></body></html>"#;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/health", get(health))
        .with_state(state.into_shared())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "ok"
}

async fn login(State(state): State<SharedState>) -> Redirect {
    let url = state.oauth.authorization_url(state.login_state.as_str());
    debug!("redirecting to consent screen: {}", url);
    Redirect::temporary(&url)
}

/// Query parameters Google appends to the redirect URL.
#[derive(Debug, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

async fn callback(
    State(state): State<SharedState>,
    Query(params): Query<CallbackParams>,
) -> ServerResult<String> {
    if let Some(error) = params.error {
        return Err(ServerError::bad_request(format!(
            "Authorization denied: {}",
            error
        )));
    }

    let code = match params.code.as_deref() {
        Some(code) if !code.is_empty() => code,
        _ => return Err(ServerError::bad_request("No code in the request")),
    };

    state.login_state.verify(params.state.as_deref())?;

    let token = state.oauth.exchange_code(code).await?;
    if token.is_expired() {
        return Err(
            ProviderError::authentication("received an already expired access token")
                .with_endpoint("token")
                .into(),
        );
    }
    let google = state.oauth.config();
    if !token.has_scopes(&google.scopes) {
        warn!(
            "granted scopes {:?} do not cover requested {:?}",
            token.scopes, google.scopes
        );
    }

    let client = BusinessClient::new(google, &token.access_token)?;
    let result = chain::fetch_menus(&client).await?;

    let saved_to = match state.menu_output {
        Some(ref path) => {
            persist::save_menu(path, &result.raw_menus).await?;
            Some(path.as_path())
        }
        None => None,
    };

    info!(
        "login completed for {} / {}",
        result.account.name, result.location.name
    );

    Ok(LoginSummary {
        account: &result.account,
        locations: &result.locations,
        location: &result.location,
        menus: &result.menus,
        saved_to,
    }
    .to_string())
}
