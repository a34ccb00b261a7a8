//! Google Business Profile API client.
//!
//! Low-level HTTP access to the three listing endpoints the menu chain
//! needs: accounts, locations of an account, and food menus of a location.

use serde::de::DeserializeOwned;
use tracing::debug;

use menumorpher_core::{Accounts, Locations, Menus};

use crate::api::{BoxFuture, BusinessApi, FoodMenus};
use crate::error::{ProviderError, ProviderResult};

use super::config::{ApiEndpoints, GoogleConfig};

/// Google Business Profile API client bound to one access token.
#[derive(Debug, Clone)]
pub struct BusinessClient {
    http_client: reqwest::Client,
    access_token: String,
    endpoints: ApiEndpoints,
    read_mask: String,
}

impl BusinessClient {
    /// Creates a client for the given access token.
    pub fn new(config: &GoogleConfig, access_token: impl Into<String>) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            http_client,
            access_token: access_token.into(),
            endpoints: config.endpoints.clone(),
            read_mask: config.location_read_mask.clone(),
        })
    }

    /// Lists the accounts the token has access to.
    pub async fn list_accounts(&self) -> ProviderResult<Accounts> {
        let url = format!("{}/v1/accounts", self.endpoints.account_management);
        let (accounts, _) = self.get_json("accounts", &url, &[]).await?;
        Ok(accounts)
    }

    /// Lists the locations of an account (`accounts/{id}`).
    pub async fn list_locations(&self, account: &str) -> ProviderResult<Locations> {
        let url = format!(
            "{}/v1/{}/locations",
            self.endpoints.business_information, account
        );
        let (locations, _) = self
            .get_json("locations", &url, &[("readMask", self.read_mask.as_str())])
            .await?;
        Ok(locations)
    }

    /// Fetches the food menus of a location, keeping the raw body.
    pub async fn list_food_menus(&self, account: &str, location: &str) -> ProviderResult<FoodMenus> {
        let url = format!(
            "{}/v4/{}/foodMenus",
            self.endpoints.my_business,
            food_menus_parent(account, location)
        );
        let (menus, raw): (Menus, String) = self.get_json("foodMenus", &url, &[]).await?;
        Ok(FoodMenus { menus, raw })
    }

    /// Performs an authenticated GET and decodes the JSON body.
    ///
    /// Returns the decoded value together with the raw body text.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> ProviderResult<(T, String)> {
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let err = if e.is_timeout() {
                    ProviderError::network("request timeout")
                } else if e.is_connect() {
                    ProviderError::network(format!("connection failed: {}", e))
                } else {
                    ProviderError::network(format!("request failed: {}", e))
                };
                err.with_endpoint(endpoint)
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(ProviderError::rate_limited(format!(
                "rate limit exceeded{}",
                retry_after
                    .map(|s| format!(", retry after {} seconds", s))
                    .unwrap_or_default()
            ))
            .with_endpoint(endpoint));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(
                ProviderError::authentication("access token expired or invalid")
                    .with_endpoint(endpoint),
            );
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = match status {
                reqwest::StatusCode::FORBIDDEN => {
                    ProviderError::authorization(format!("access denied: {}", body))
                }
                reqwest::StatusCode::NOT_FOUND => {
                    ProviderError::not_found(format!("{} not found: {}", url, body))
                }
                _ => ProviderError::server(format!("API error ({}): {}", status, body)),
            };
            return Err(err.with_endpoint(endpoint));
        }

        let body = response.text().await.map_err(|e| {
            ProviderError::network(format!("failed to read response: {}", e))
                .with_endpoint(endpoint)
        })?;
        debug!("{} response body: {}", endpoint, body);

        let value = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse response: {}", e))
                .with_endpoint(endpoint)
        })?;

        Ok((value, body))
    }
}

impl BusinessApi for BusinessClient {
    fn accounts(&self) -> BoxFuture<'_, ProviderResult<Accounts>> {
        Box::pin(self.list_accounts())
    }

    fn locations<'a>(&'a self, account: &'a str) -> BoxFuture<'a, ProviderResult<Locations>> {
        Box::pin(self.list_locations(account))
    }

    fn food_menus<'a>(
        &'a self,
        account: &'a str,
        location: &'a str,
    ) -> BoxFuture<'a, ProviderResult<FoodMenus>> {
        Box::pin(self.list_food_menus(account, location))
    }
}

/// Resource path owning the food menus of a location.
///
/// The Business Information API names locations `locations/{id}`, while the
/// v4 endpoint wants `accounts/{a}/locations/{l}`. A location name that is
/// already account-qualified is used unchanged.
pub fn food_menus_parent(account: &str, location: &str) -> String {
    if location.starts_with("accounts/") {
        location.to_string()
    } else {
        format!("{}/{}", account, location)
    }
}
