//! Google OAuth and Business Profile API access.
//!
//! - [`OAuthClient`] builds the consent URL and exchanges codes for tokens
//! - [`BusinessClient`] lists accounts, locations and food menus

mod client;
mod config;
mod oauth;
mod tokens;

pub use client::{BusinessClient, food_menus_parent};
pub use config::{ApiEndpoints, GoogleConfig, OAuthCredentials};
pub use oauth::{LoginState, OAuthClient};
pub use tokens::TokenInfo;
