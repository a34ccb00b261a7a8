//! Server error types.
//!
//! Every error that reaches a handler becomes a plain-text response carrying
//! the underlying message: 400 when the incoming request is at fault, 500
//! otherwise.

use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use menumorpher_providers::{ProviderError, ProviderErrorCode};

use crate::config::ConfigError;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error (bind, accept, ...).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// OAuth or Business Profile API failure.
    #[error("{}", describe_provider_error(.0))]
    Provider(#[from] ProviderError),

    /// The callback request itself is unusable.
    #[error("{message}")]
    BadRequest { message: String },

    /// Writing the menu file failed.
    #[error("failed to save menu to {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ServerError {
    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// HTTP status reported to the browser.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Provider(err) if err.code().is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Phrases a provider error the way the callback reports it.
fn describe_provider_error(err: &ProviderError) -> String {
    let what = match err.endpoint() {
        Some("token") => return format!("Failed to exchange token: {}", err.message()),
        Some("foodMenus") => "menus",
        Some(endpoint) => endpoint,
        None => return err.to_string(),
    };

    if err.code() == ProviderErrorCode::EmptyResult {
        format!("No {} found", what)
    } else {
        format!("Failed to get {}: {}", what, err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!("{}", message);
        } else {
            warn!("{}", message);
        }

        (status, message).into_response()
    }
}
