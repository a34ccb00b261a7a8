//! Core types: business listing records, login summaries, tracing

pub mod menu;
pub mod summary;
pub mod tracing;

pub use menu::{
    Account, Accounts, Attributes, Label, Location, Locations, Menu, MenuCategory, MenuItem,
    Menus, Price,
};
pub use summary::LoginSummary;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
