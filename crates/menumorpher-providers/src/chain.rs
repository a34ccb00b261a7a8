//! The accounts → locations → food menus chain.
//!
//! Each step takes the first entry of the previous listing and uses its
//! resource name as the parent of the next request. An empty listing stops
//! the chain with [`ProviderErrorCode::EmptyResult`](crate::ProviderErrorCode::EmptyResult).

use tracing::info;

use menumorpher_core::{Account, Accounts, Location, Locations, Menu, Menus};

use crate::api::BusinessApi;
use crate::error::{ProviderError, ProviderResult};

/// What one full pass of the chain produced.
#[derive(Debug, Clone)]
pub struct MenuChain {
    /// The account whose name fed the locations lookup.
    pub account: Account,
    /// Every location returned for the account.
    pub locations: Vec<Location>,
    /// The location whose name fed the menus lookup.
    pub location: Location,
    /// The first menu.
    pub menu: Menu,
    /// All menus of the location.
    pub menus: Menus,
    /// Raw food menus body.
    pub raw_menus: String,
}

/// Takes the first account, failing on an empty list.
pub fn first_account(accounts: &Accounts) -> ProviderResult<&Account> {
    accounts
        .accounts
        .first()
        .ok_or_else(|| ProviderError::empty_result("no accounts found").with_endpoint("accounts"))
}

/// Takes the first location, failing on an empty list.
pub fn first_location(locations: &Locations) -> ProviderResult<&Location> {
    locations.locations.first().ok_or_else(|| {
        ProviderError::empty_result("no locations found").with_endpoint("locations")
    })
}

/// Takes the first menu, failing on an empty list.
pub fn first_menu(menus: &Menus) -> ProviderResult<&Menu> {
    menus
        .menus
        .first()
        .ok_or_else(|| ProviderError::empty_result("no menus found").with_endpoint("foodMenus"))
}

/// Runs the whole chain against `api`.
pub async fn fetch_menus(api: &dyn BusinessApi) -> ProviderResult<MenuChain> {
    let accounts = api.accounts().await?;
    let account = first_account(&accounts)?.clone();
    info!("Found account: {}", account.name);

    let locations = api.locations(&account.name).await?;
    let location = first_location(&locations)?.clone();
    info!(
        "Location ID: '{}' | Account ID '{}' ({} locations)",
        location.name,
        account.name,
        locations.locations.len()
    );

    let food_menus = api.food_menus(&account.name, &location.name).await?;
    let menu = first_menu(&food_menus.menus)?.clone();
    info!(
        "Found {} menus for {}, first has {} items",
        food_menus.menus.menus.len(),
        location.name,
        menu.item_count()
    );

    Ok(MenuChain {
        account,
        locations: locations.locations,
        location,
        menu,
        menus: food_menus.menus,
        raw_menus: food_menus.raw,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::api::{BoxFuture, FoodMenus};
    use crate::error::ProviderErrorCode;
    use menumorpher_core::{Label, MenuCategory};

    /// Canned listings; records every call in order.
    #[derive(Default)]
    struct FakeApi {
        accounts: Vec<Account>,
        locations: Vec<Location>,
        menus: Vec<Menu>,
        fail_locations: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn full() -> Self {
            Self {
                accounts: vec![Account::new("accounts/1"), Account::new("accounts/2")],
                locations: vec![Location::new("locations/10"), Location::new("locations/11")],
                menus: vec![Menu {
                    sections: vec![MenuCategory {
                        labels: vec![Label::new("Mains")],
                        items: vec![],
                    }],
                }],
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl BusinessApi for FakeApi {
        fn accounts(&self) -> BoxFuture<'_, ProviderResult<Accounts>> {
            self.record("accounts".to_string());
            let accounts = Accounts {
                accounts: self.accounts.clone(),
                next_page_token: None,
            };
            Box::pin(async move { Ok(accounts) })
        }

        fn locations<'a>(&'a self, account: &'a str) -> BoxFuture<'a, ProviderResult<Locations>> {
            self.record(format!("locations:{}", account));
            let result = if self.fail_locations {
                Err(ProviderError::server("API error (500): boom").with_endpoint("locations"))
            } else {
                Ok(Locations {
                    locations: self.locations.clone(),
                    next_page_token: None,
                })
            };
            Box::pin(async move { result })
        }

        fn food_menus<'a>(
            &'a self,
            account: &'a str,
            location: &'a str,
        ) -> BoxFuture<'a, ProviderResult<FoodMenus>> {
            self.record(format!("menus:{}:{}", account, location));
            let menus = Menus {
                name: None,
                menus: self.menus.clone(),
            };
            let raw = serde_json::to_string(&menus).unwrap();
            Box::pin(async move { Ok(FoodMenus { menus, raw }) })
        }
    }

    #[test]
    fn first_account_extracts_name() {
        let accounts = Accounts {
            accounts: vec![Account::new("accounts/42")],
            next_page_token: None,
        };
        assert_eq!(first_account(&accounts).unwrap().name, "accounts/42");
    }

    #[test]
    fn first_helpers_fail_on_empty_lists() {
        let err = first_account(&Accounts::default()).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::EmptyResult);
        assert_eq!(err.to_string(), "[accounts] empty_result: no accounts found");

        let err = first_location(&Locations::default()).unwrap_err();
        assert_eq!(err.message(), "no locations found");

        let err = first_menu(&Menus::default()).unwrap_err();
        assert_eq!(err.message(), "no menus found");
    }

    #[tokio::test]
    async fn chain_feeds_ids_forward_in_order() {
        let api = FakeApi::full();

        let chain = fetch_menus(&api).await.unwrap();

        assert_eq!(chain.account.name, "accounts/1");
        assert_eq!(chain.location.name, "locations/10");
        assert_eq!(chain.locations.len(), 2);
        assert_eq!(chain.menu.sections[0].display_name(), Some("Mains"));
        assert_eq!(
            api.calls(),
            vec![
                "accounts".to_string(),
                "locations:accounts/1".to_string(),
                "menus:accounts/1:locations/10".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn chain_stops_on_empty_accounts() {
        let api = FakeApi {
            accounts: vec![],
            ..FakeApi::full()
        };

        let err = fetch_menus(&api).await.unwrap_err();

        assert_eq!(err.code(), ProviderErrorCode::EmptyResult);
        assert_eq!(err.endpoint(), Some("accounts"));
        assert_eq!(api.calls(), vec!["accounts".to_string()]);
    }

    #[tokio::test]
    async fn chain_stops_on_empty_locations() {
        let api = FakeApi {
            locations: vec![],
            ..FakeApi::full()
        };

        let err = fetch_menus(&api).await.unwrap_err();

        assert_eq!(err.endpoint(), Some("locations"));
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn chain_fails_on_empty_menus() {
        let api = FakeApi {
            menus: vec![],
            ..FakeApi::full()
        };

        let err = fetch_menus(&api).await.unwrap_err();

        assert_eq!(err.code(), ProviderErrorCode::EmptyResult);
        assert_eq!(err.endpoint(), Some("foodMenus"));
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn chain_propagates_upstream_errors() {
        let api = FakeApi {
            fail_locations: true,
            ..FakeApi::full()
        };

        let err = fetch_menus(&api).await.unwrap_err();

        assert_eq!(err.code(), ProviderErrorCode::ServerError);
        assert!(!api.calls().iter().any(|c| c.starts_with("menus")));
    }
}
