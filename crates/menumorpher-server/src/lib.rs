//! Web server: Google login, chained Business Profile fetch, menu persistence.
//!
//! The browser flow is `/` → `/login` → Google consent → `/callback`. The
//! callback exchanges the code for an access token, walks accounts,
//! locations and food menus, saves the raw menu JSON and answers with a
//! plain-text summary.
//!
//! # Example
//!
//! ```rust,no_run
//! use menumorpher_server::{ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::load(None)?;
//!     serve(&config).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
mod config;
mod error;
mod persist;
mod routes;
mod secret;
mod signals;
mod state;

pub use config::{ConfigError, GoogleSettings, ServerConfig, ServerSettings};
pub use error::{ServerError, ServerResult};
pub use persist::save_menu;
pub use routes::router;
pub use signals::shutdown_signal;
pub use state::{AppState, SharedState};

use tracing::info;

/// Binds the listen address and serves until a shutdown signal arrives.
pub async fn serve(config: &ServerConfig) -> ServerResult<()> {
    let google = config.to_google_config()?;
    let menu_output = config.server.menu_output_path().map(|p| p.to_path_buf());
    let redirect_url = google.redirect_url.clone();

    let state = AppState::new(google, menu_output)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    let addr = listener.local_addr()?;
    info!("Starting server on http://{}", addr);
    info!("Google will redirect back to {}", redirect_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}
