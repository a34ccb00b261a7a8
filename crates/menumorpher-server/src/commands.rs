//! `config` subcommands.

use crate::config::{ConfigError, ServerConfig};
use crate::error::ServerResult;

/// Prints the configuration as TOML with plain-text secrets masked.
pub fn dump(config: &ServerConfig) -> ServerResult<()> {
    let toml_str = toml::to_string_pretty(&config.redacted())
        .map_err(|e| ConfigError::Invalid(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ServerConfig::default_path().display());
    println!("{}", toml_str);
    Ok(())
}

/// Resolves credentials and validates the resulting Google configuration.
pub fn validate(config: &ServerConfig) -> ServerResult<()> {
    let google = config.to_google_config()?;
    println!("Google credentials are valid.");
    println!("Redirect URL: {}", google.redirect_url);
    match config.server.menu_output_path() {
        Some(path) => println!("Menu output: {}", path.display()),
        None => println!("Menu output: disabled"),
    }
    println!("Configuration is valid.");
    Ok(())
}

/// Shows the configuration file path.
pub fn path() -> ServerResult<()> {
    println!("config: {}", ServerConfig::default_path().display());
    Ok(())
}
