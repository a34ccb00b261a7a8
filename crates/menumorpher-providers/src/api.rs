//! BusinessApi trait definition.
//!
//! [`BusinessApi`] is the seam between the menu chain and the HTTP client:
//! the chain only needs the three list operations, so tests can drive it
//! with canned responses.

use std::future::Future;
use std::pin::Pin;

use menumorpher_core::{Accounts, Locations, Menus};

use crate::error::ProviderResult;

/// A boxed future that is Send.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Decoded food menus together with the exact body Google returned.
#[derive(Debug, Clone, Default)]
pub struct FoodMenus {
    pub menus: Menus,
    /// Raw JSON body, persisted as-is.
    pub raw: String,
}

/// The listing operations the menu chain is built from.
pub trait BusinessApi: Send + Sync {
    /// Lists the accounts visible to the caller.
    fn accounts(&self) -> BoxFuture<'_, ProviderResult<Accounts>>;

    /// Lists the locations of `account` (`accounts/{id}`).
    fn locations<'a>(&'a self, account: &'a str) -> BoxFuture<'a, ProviderResult<Locations>>;

    /// Fetches the food menus of `location` under `account`.
    fn food_menus<'a>(
        &'a self,
        account: &'a str,
        location: &'a str,
    ) -> BoxFuture<'a, ProviderResult<FoodMenus>>;
}
