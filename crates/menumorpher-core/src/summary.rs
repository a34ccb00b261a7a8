//! Plain-text summary written back to the browser after a login.

use std::fmt;
use std::path::Path;

use crate::menu::{Account, Location, Menus};

const UNNAMED: &str = "(unnamed)";

/// Everything the callback learned, borrowed for rendering.
#[derive(Debug, Clone, Copy)]
pub struct LoginSummary<'a> {
    pub account: &'a Account,
    pub locations: &'a [Location],
    pub location: &'a Location,
    pub menus: &'a Menus,
    /// Where the raw menu JSON was written, if anywhere.
    pub saved_to: Option<&'a Path>,
}

impl fmt::Display for LoginSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Login Completed.")?;

        write!(f, "Account: {}", self.account.name)?;
        if let Some(ref display) = self.account.account_name {
            write!(f, " ({})", display)?;
        }
        writeln!(f)?;

        let names: Vec<&str> = self.locations.iter().map(|l| l.name.as_str()).collect();
        writeln!(f, "Found locations: {}", names.join(", "))?;

        write!(f, "Location: {}", self.location.name)?;
        if let Some(ref title) = self.location.title {
            write!(f, " ({})", title)?;
        }
        writeln!(f)?;

        writeln!(f, "Menus: {}", self.menus.menus.len())?;
        for (idx, menu) in self.menus.menus.iter().enumerate() {
            writeln!(
                f,
                "  Menu {}: {} sections, {} items",
                idx + 1,
                menu.sections.len(),
                menu.item_count()
            )?;
            for section in &menu.sections {
                writeln!(f, "    {}", section.display_name().unwrap_or(UNNAMED))?;
                for item in &section.items {
                    let name = item.display_name().unwrap_or(UNNAMED);
                    match item.attributes.price {
                        Some(ref price) => writeln!(f, "      - {}: {}", name, price)?,
                        None => writeln!(f, "      - {}", name)?,
                    }
                }
            }
        }

        if let Some(path) = self.saved_to {
            writeln!(f, "Menu saved to {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{Attributes, Label, Menu, MenuCategory, MenuItem, Price};

    fn sample_menus() -> Menus {
        Menus {
            name: None,
            menus: vec![Menu {
                sections: vec![MenuCategory {
                    labels: vec![Label::new("Tacos")],
                    items: vec![
                        MenuItem {
                            labels: vec![Label::new("Al Pastor")],
                            attributes: Attributes {
                                price: Some(Price {
                                    currency_code: "USD".to_string(),
                                    units: 3,
                                    nanos: 500_000_000,
                                }),
                            },
                        },
                        MenuItem {
                            labels: vec![],
                            attributes: Attributes::default(),
                        },
                    ],
                }],
            }],
        }
    }

    #[test]
    fn renders_full_summary() {
        let mut account = Account::new("accounts/1");
        account.account_name = Some("Taqueria Uno".to_string());
        let locations = vec![Location::new("locations/2"), Location::new("locations/3")];
        let menus = sample_menus();

        let summary = LoginSummary {
            account: &account,
            locations: &locations,
            location: &locations[0],
            menus: &menus,
            saved_to: Some(Path::new("menu.json")),
        };

        insta::assert_snapshot!(summary.to_string().trim_end(), @r"
        Login Completed.
        Account: accounts/1 (Taqueria Uno)
        Found locations: locations/2, locations/3
        Location: locations/2
        Menus: 1
          Menu 1: 1 sections, 2 items
            Tacos
              - Al Pastor: USD 3.50
              - (unnamed)
        Menu saved to menu.json
        ");
    }

    #[test]
    fn omits_save_line_when_not_persisted() {
        let account = Account::new("accounts/1");
        let location = Location {
            name: "locations/2".to_string(),
            title: Some("Downtown".to_string()),
        };
        let locations = vec![location.clone()];
        let menus = Menus {
            name: None,
            menus: vec![Menu::default()],
        };

        let text = LoginSummary {
            account: &account,
            locations: &locations,
            location: &location,
            menus: &menus,
            saved_to: None,
        }
        .to_string();

        assert!(text.contains("Location: locations/2 (Downtown)"));
        assert!(text.contains("Menu 1: 0 sections, 0 items"));
        assert!(!text.contains("saved"));
    }
}
