//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ServerConfig;

/// menumorpher - Google Business Profile food menus after a Google login
#[derive(Debug, Parser)]
#[command(name = "menumorpher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "MENUMORPHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Address to listen on
    #[arg(long, env = "MENUMORPHER_LISTEN")]
    pub listen: Option<String>,

    // --- Credentials ---
    /// OAuth client ID
    #[arg(long, env = "CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Path to a credentials JSON downloaded from the Google Cloud Console
    #[arg(long)]
    pub credentials_file: Option<PathBuf>,

    /// Callback URL registered with Google
    #[arg(long)]
    pub redirect_url: Option<String>,

    // --- Output ---
    /// Where to write the raw menu JSON
    #[arg(long, conflicts_with = "no_save")]
    pub menu_output: Option<PathBuf>,

    /// Do not write the menu JSON to disk
    #[arg(long)]
    pub no_save: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Layers command-line values over `config`.
    pub fn apply_overrides(&self, config: &mut ServerConfig) {
        if let Some(ref listen) = self.listen {
            config.server.listen = listen.clone();
        }
        if let Some(ref id) = self.client_id {
            config.google.client_id = Some(id.clone());
        }
        if let Some(ref secret) = self.client_secret {
            config.google.client_secret = Some(secret.clone());
        }
        if let Some(ref path) = self.credentials_file {
            config.google.credentials_file = Some(path.clone());
        }
        if let Some(ref url) = self.redirect_url {
            config.google.redirect_url = Some(url.clone());
        }
        if let Some(ref path) = self.menu_output {
            config.server.menu_output = path.clone();
        }
        if self.no_save {
            config.server.menu_output = PathBuf::new();
        }
    }
}

/// Available commands. Without one the server starts.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration, secrets masked
    Dump,
    /// Check that credentials resolve and the configuration is usable
    Validate,
    /// Show the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_serve() {
        let cli = Cli::try_parse_from(["menumorpher"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn config_subcommands_parse() {
        let cli = Cli::try_parse_from(["menumorpher", "config", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Validate
            })
        ));
    }

    #[test]
    fn flags_override_file_values() {
        let cli = Cli::try_parse_from([
            "menumorpher",
            "--listen",
            "0.0.0.0:9000",
            "--client-id",
            "flag.apps.googleusercontent.com",
            "--client-secret",
            "flag-secret",
            "--redirect-url",
            "https://menus.example.com/callback",
            "--menu-output",
            "/tmp/menus/out.json",
        ])
        .unwrap();

        let mut config = ServerConfig::default();
        config.google.client_id = Some("file.apps.googleusercontent.com".to_string());
        cli.apply_overrides(&mut config);

        assert_eq!(config.server.listen, "0.0.0.0:9000");
        assert_eq!(
            config.google.client_id.as_deref(),
            Some("flag.apps.googleusercontent.com")
        );
        assert_eq!(config.google.client_secret.as_deref(), Some("flag-secret"));
        assert_eq!(
            config.google.redirect_url.as_deref(),
            Some("https://menus.example.com/callback")
        );
        assert_eq!(
            config.server.menu_output_path(),
            Some(std::path::Path::new("/tmp/menus/out.json"))
        );
    }

    #[test]
    fn unset_flags_keep_file_values() {
        let cli = Cli::try_parse_from(["menumorpher"]).unwrap();
        let mut config = ServerConfig::default();
        config.server.listen = "127.0.0.1:3000".to_string();

        cli.apply_overrides(&mut config);

        assert_eq!(config.server.listen, "127.0.0.1:3000");
        assert!(config.server.menu_output_path().is_some());
    }

    #[test]
    fn no_save_disables_menu_output() {
        let cli = Cli::try_parse_from(["menumorpher", "--no-save"]).unwrap();
        let mut config = ServerConfig::default();

        cli.apply_overrides(&mut config);

        assert!(config.server.menu_output_path().is_none());
    }

    #[test]
    fn no_save_conflicts_with_menu_output() {
        let result = Cli::try_parse_from(["menumorpher", "--no-save", "--menu-output", "x.json"]);
        assert!(result.is_err());
    }
}
