//! OAuth token information.
//!
//! Tokens live only for the duration of one callback request; nothing is
//! written to disk.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Response from Google's token endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Information about an OAuth token set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    /// The access token for API requests.
    pub access_token: String,

    /// Present when offline access was granted.
    pub refresh_token: Option<String>,

    /// Token type, normally `Bearer`.
    pub token_type: String,

    /// When the access token expires.
    pub expires_at: Option<DateTime<Utc>>,

    /// The OAuth scopes that were granted.
    pub scopes: Vec<String>,
}

impl TokenInfo {
    /// Creates a new token info from OAuth response data.
    ///
    /// When the response carries no `scope`, the requested scopes are assumed.
    pub(crate) fn from_response(response: TokenResponse, requested: &[String]) -> Self {
        let scopes = match response.scope {
            Some(ref granted) => granted.split_whitespace().map(String::from).collect(),
            None => requested.to_vec(),
        };

        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type: response.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_at: response
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
            scopes,
        }
    }

    /// Returns true if the access token is already expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }

    /// Returns true if the token has the required scopes.
    pub fn has_scopes(&self, required: &[String]) -> bool {
        required.iter().all(|scope| self.scopes.contains(scope))
    }
}
