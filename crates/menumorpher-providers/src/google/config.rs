//! Google OAuth and Business Profile configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// OAuth 2.0 credentials for Google API access.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    /// The OAuth 2.0 client ID from Google Cloud Console.
    pub client_id: String,
    /// The OAuth 2.0 client secret from Google Cloud Console.
    pub client_secret: String,
}

/// Structure of Google's OAuth credentials JSON file.
///
/// Accepts the Cloud Console download (`web` or `installed` section) as well
/// as a flat `client_id`/`client_secret` object.
#[derive(Debug, Deserialize)]
struct GoogleCredentialsFile {
    web: Option<NestedCredentials>,
    installed: Option<NestedCredentials>,
    client_id: Option<String>,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NestedCredentials {
    client_id: String,
    client_secret: String,
}

impl OAuthCredentials {
    /// Creates new OAuth credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Loads OAuth credentials from a Google Cloud Console JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("failed to read credentials file: {}", e))?;
        Self::from_json(&content)
    }

    /// Parses OAuth credentials from a Google credentials JSON string.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let file: GoogleCredentialsFile = serde_json::from_str(json)
            .map_err(|e| format!("failed to parse credentials JSON: {}", e))?;

        // A web server client is the usual case here, so prefer that section.
        if let Some(creds) = file.web.or(file.installed) {
            return Ok(Self::new(creds.client_id, creds.client_secret));
        }

        if let (Some(client_id), Some(client_secret)) = (file.client_id, file.client_secret) {
            return Ok(Self::new(client_id, client_secret));
        }

        Err("credentials file must contain a 'web'/'installed' section or 'client_id'/'client_secret' at root level".to_string())
    }

    /// Validates that the credentials appear to be correctly formatted.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.client_id.is_empty() {
            return Err("client_id is required");
        }
        if !self.client_id.ends_with(".apps.googleusercontent.com") {
            return Err("client_id should end with .apps.googleusercontent.com");
        }
        if self.client_secret.is_empty() {
            return Err("client_secret is required");
        }
        Ok(())
    }
}

/// Base URLs of every upstream the server talks to.
///
/// Only tests point these anywhere but Google.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    /// OAuth consent page.
    pub auth_url: String,
    /// OAuth token endpoint.
    pub token_url: String,
    /// Account Management API (`/v1/accounts`).
    pub account_management: String,
    /// Business Information API (`/v1/{account}/locations`).
    pub business_information: String,
    /// Legacy My Business API (`/v4/.../foodMenus`).
    pub my_business: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            account_management: "https://mybusinessaccountmanagement.googleapis.com".to_string(),
            business_information: "https://mybusinessbusinessinformation.googleapis.com"
                .to_string(),
            my_business: "https://mybusiness.googleapis.com".to_string(),
        }
    }
}

impl ApiEndpoints {
    /// Routes every endpoint to a single base URL, as a mock server would serve them.
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            auth_url: format!("{}/o/oauth2/v2/auth", base),
            token_url: format!("{}/token", base),
            account_management: base.to_string(),
            business_information: base.to_string(),
            my_business: base.to_string(),
        }
    }
}

/// Configuration for Google access.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// OAuth credentials for API access.
    pub credentials: OAuthCredentials,

    /// Where Google sends the user back after consent.
    ///
    /// Defaults to `http://localhost:8080/callback`.
    pub redirect_url: String,

    /// OAuth scopes to request.
    ///
    /// Defaults to `["https://www.googleapis.com/auth/business.manage"]`.
    pub scopes: Vec<String>,

    /// `readMask` sent with the locations request.
    pub location_read_mask: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string for API requests.
    pub user_agent: String,

    /// Upstream base URLs.
    pub endpoints: ApiEndpoints,
}

impl GoogleConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Scope granting access to Business Profile data.
    pub const DEFAULT_SCOPE: &'static str = "https://www.googleapis.com/auth/business.manage";

    /// Default redirect URL, served by the `/callback` route.
    pub const DEFAULT_REDIRECT_URL: &'static str = "http://localhost:8080/callback";

    /// Only the resource name is needed to chain into the menu lookup.
    pub const DEFAULT_READ_MASK: &'static str = "name";

    /// Creates a new Google configuration with the given credentials.
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self {
            credentials,
            redirect_url: Self::DEFAULT_REDIRECT_URL.to_string(),
            scopes: vec![Self::DEFAULT_SCOPE.to_string()],
            location_read_mask: Self::DEFAULT_READ_MASK.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("menumorpher/{}", env!("CARGO_PKG_VERSION")),
            endpoints: ApiEndpoints::default(),
        }
    }

    /// Sets the redirect URL.
    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = url.into();
        self
    }

    /// Sets the OAuth scopes.
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Sets the locations `readMask`.
    pub fn with_location_read_mask(mut self, mask: impl Into<String>) -> Self {
        self.location_read_mask = mask.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the upstream endpoints.
    pub fn with_endpoints(mut self, endpoints: ApiEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.credentials
            .validate()
            .map_err(|e| format!("invalid credentials: {}", e))?;

        if self.scopes.is_empty() {
            return Err("at least one OAuth scope is required".to_string());
        }

        if self.location_read_mask.trim().is_empty() {
            return Err("location read mask must not be empty".to_string());
        }

        url::Url::parse(&self.redirect_url)
            .map_err(|e| format!("invalid redirect URL '{}': {}", self.redirect_url, e))?;

        Ok(())
    }
}
