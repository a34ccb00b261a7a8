//! OAuth 2.0 authorization-code flow for a web server client.
//!
//! # Flow Overview
//!
//! 1. `/login` redirects the browser to [`OAuthClient::authorization_url`]
//! 2. The user grants permission; Google redirects to the configured
//!    callback URL with `code` and `state`
//! 3. The callback checks `state` with [`LoginState::verify`]
//! 4. [`OAuthClient::exchange_code`] trades the code for an access token

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng as _;
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};

use super::config::GoogleConfig;
use super::tokens::{TokenInfo, TokenResponse};

/// Random bytes in a login state token, before base64 encoding.
const STATE_LENGTH: usize = 16;

/// OAuth client for Google APIs.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: GoogleConfig,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Creates a new OAuth client from the Google configuration.
    pub fn new(config: GoogleConfig) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the configuration this client was built from.
    pub fn config(&self) -> &GoogleConfig {
        &self.config
    }

    /// Builds the Google consent page URL, asking for offline access.
    pub fn authorization_url(&self, state: &str) -> String {
        let scope = self.config.scopes.join(" ");

        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&\
            state={}&access_type=offline&prompt=consent",
            self.config.endpoints.auth_url,
            urlencoding::encode(&self.config.credentials.client_id),
            urlencoding::encode(&self.config.redirect_url),
            urlencoding::encode(&scope),
            urlencoding::encode(state),
        )
    }

    /// Exchanges an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> ProviderResult<TokenInfo> {
        let credentials = &self.config.credentials;
        let params = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_url.as_str()),
        ];

        debug!("exchanging authorization code at {}", self.config.endpoints.token_url);

        let response = self
            .http_client
            .post(&self.config.endpoints.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                ProviderError::network(format!("token exchange request failed: {}", e))
                    .with_endpoint("token")
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ProviderError::network(format!("failed to read response: {}", e)).with_endpoint("token")
        })?;

        if !status.is_success() {
            return Err(ProviderError::authentication(format!(
                "token exchange failed ({}): {}",
                status, body
            ))
            .with_endpoint("token"));
        }

        let token_response: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("invalid token response: {}", e))
                .with_endpoint("token")
        })?;

        info!("successfully obtained tokens");
        Ok(TokenInfo::from_response(token_response, &self.config.scopes))
    }
}

/// CSRF token round-tripped through the consent screen as `state`.
///
/// One token is generated per process at startup and never changes, so the
/// server keeps no per-login state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginState(String);

impl LoginState {
    /// Generates a random state token.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let bytes: Vec<u8> = (0..STATE_LENGTH).map(|_| rng.random()).collect();
        Self(URL_SAFE_NO_PAD.encode(&bytes))
    }

    /// Wraps a known value, e.g. from configuration or tests.
    pub fn fixed(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks the `state` parameter Google sent back.
    pub fn verify(&self, received: Option<&str>) -> ProviderResult<()> {
        match received {
            Some(state) if state == self.0 => Ok(()),
            Some(_) => Err(ProviderError::bad_request(
                "OAuth state mismatch - possible CSRF attack",
            )),
            None => Err(ProviderError::bad_request("missing state in callback")),
        }
    }
}
