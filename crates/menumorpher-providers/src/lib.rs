//! Google OAuth and Business Profile API access.
//!
//! ```text
//! OAuthClient ──token──▶ BusinessClient ──▶ BusinessApi
//!                                              │
//!                                              ▼ chain::fetch_menus()
//!                  accounts ─name─▶ locations ─name─▶ foodMenus
//! ```
//!
//! # Example
//!
//! ```ignore
//! use menumorpher_providers::{chain, google::BusinessClient};
//!
//! let client = BusinessClient::new(&config, token.access_token)?;
//! let result = chain::fetch_menus(&client).await?;
//! println!("{}", result.location.name);
//! ```

pub mod api;
pub mod chain;
pub mod error;
pub mod google;

pub use api::{BoxFuture, BusinessApi, FoodMenus};
pub use chain::{MenuChain, fetch_menus};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
