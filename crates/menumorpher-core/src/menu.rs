//! Business listing records.
//!
//! These mirror the JSON shapes returned by the Google Business Profile
//! APIs (account management, business information and the v4 food menus
//! endpoint). They carry no invariants of their own; list envelopes decode a
//! missing key as an empty list because Google omits empty repeated fields.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A business account, e.g. `accounts/1234567890`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Resource name, used as the account identifier.
    pub name: String,
    /// Human-readable account name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    /// Account type (`PERSONAL`, `LOCATION_GROUP`, ...).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_name: None,
            account_type: None,
        }
    }
}

/// Response envelope of the accounts list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accounts {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// A business location, e.g. `locations/987654321`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Resource name, used as the location identifier.
    pub name: String,
    /// Business name, present only when the read mask asks for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
        }
    }
}

/// Response envelope of the locations list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locations {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// A monetary amount.
///
/// `units` is an int64 in the upstream schema, which Google serializes as a
/// JSON string; plain numbers are accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub currency_code: String,
    #[serde(default, deserialize_with = "int_or_string")]
    pub units: i64,
    #[serde(default)]
    pub nanos: i32,
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = (self.nanos / 10_000_000).abs();
        let sign = if self.units < 0 || self.nanos < 0 { "-" } else { "" };
        write!(
            f,
            "{} {}{}.{:02}",
            self.currency_code,
            sign,
            self.units.abs(),
            cents
        )
    }
}

fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Attributes of a menu item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
}

/// A localized label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl Label {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            description: None,
            language_code: None,
        }
    }
}

/// Returns the first label's display name.
fn first_display_name(labels: &[Label]) -> Option<&str> {
    labels.first().map(|l| l.display_name.as_str())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl MenuItem {
    pub fn display_name(&self) -> Option<&str> {
        first_display_name(&self.labels)
    }
}

/// A menu section ("Starters", "Drinks", ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl MenuCategory {
    pub fn display_name(&self) -> Option<&str> {
        first_display_name(&self.labels)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub sections: Vec<MenuCategory>,
}

impl Menu {
    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

/// Response envelope of the food menus endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menus {
    /// Resource name (`accounts/*/locations/*/foodMenus`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub menus: Vec<Menu>,
}
