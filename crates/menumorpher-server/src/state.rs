//! Application state shared by all requests.

use std::path::PathBuf;
use std::sync::Arc;

use menumorpher_providers::ProviderResult;
use menumorpher_providers::google::{GoogleConfig, LoginState, OAuthClient};

/// Built once at startup and never mutated.
#[derive(Debug)]
pub struct AppState {
    /// OAuth client, carrying the Google configuration.
    pub oauth: OAuthClient,
    /// CSRF token sent as `state` on every login.
    pub login_state: LoginState,
    /// Where to write the raw menu JSON, if anywhere.
    pub menu_output: Option<PathBuf>,
}

/// Handle passed to every axum handler.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Creates the state with a freshly generated login state token.
    pub fn new(google: GoogleConfig, menu_output: Option<PathBuf>) -> ProviderResult<Self> {
        Ok(Self {
            oauth: OAuthClient::new(google)?,
            login_state: LoginState::generate(),
            menu_output,
        })
    }

    /// Replaces the login state token.
    pub fn with_login_state(mut self, state: LoginState) -> Self {
        self.login_state = state;
        self
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(self)
    }
}
