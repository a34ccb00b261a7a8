//! Server configuration.
//!
//! Settings live in `~/.config/menumorpher/config.toml` by default:
//!
//! ```toml
//! [server]
//! listen = "127.0.0.1:8080"
//! menu_output = "menu.json"   # "" disables writing
//!
//! [google]
//! client_id = "env::CLIENT_ID"
//! client_secret = "pass::google/menumorpher"
//! ```
//!
//! Credential values support secret references (see [`crate::secret`]).
//! Command-line flags and `CLIENT_ID`/`CLIENT_SECRET` override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use menumorpher_providers::google::{GoogleConfig, OAuthCredentials};

/// Errors raised while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Google credentials not found: {0}")]
    MissingCredentials(String),

    #[error("failed to resolve {field}: {message}")]
    Secret { field: &'static str, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub google: GoogleSettings,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the web server binds to.
    pub listen: String,

    /// Where the raw food menus JSON is written. Empty disables writing.
    pub menu_output: PathBuf,

    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,

    /// `readMask` for the locations request.
    pub location_read_mask: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8080".to_string(),
            menu_output: PathBuf::from("menu.json"),
            timeout_secs: GoogleConfig::DEFAULT_TIMEOUT_SECS,
            location_read_mask: GoogleConfig::DEFAULT_READ_MASK.to_string(),
        }
    }
}

impl ServerSettings {
    /// The menu output path, or `None` when writing is disabled.
    pub fn menu_output_path(&self) -> Option<&Path> {
        if self.menu_output.as_os_str().is_empty() {
            None
        } else {
            Some(&self.menu_output)
        }
    }
}

/// `[google]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    /// OAuth client ID (supports `pass::` and `env::` prefixes).
    pub client_id: Option<String>,

    /// OAuth client secret (supports `pass::` and `env::` prefixes).
    pub client_secret: Option<String>,

    /// Google Cloud Console credentials JSON, used when the inline values are unset.
    pub credentials_file: Option<PathBuf>,

    /// OAuth redirect URL; must match the one registered with Google.
    pub redirect_url: Option<String>,

    /// OAuth scopes; empty means the Business Profile management scope.
    pub scopes: Vec<String>,
}

impl GoogleSettings {
    /// Resolves OAuth credentials.
    ///
    /// Priority (highest to lowest):
    /// 1. inline `client_id` + `client_secret` (secret references expanded)
    /// 2. `credentials_file`
    pub fn resolve_credentials(&self) -> Result<OAuthCredentials, ConfigError> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) => {
                let id = crate::secret::resolve(id).map_err(|message| ConfigError::Secret {
                    field: "client_id",
                    message,
                })?;
                let secret =
                    crate::secret::resolve(secret).map_err(|message| ConfigError::Secret {
                        field: "client_secret",
                        message,
                    })?;
                Ok(OAuthCredentials::new(id, secret))
            }
            (Some(_), None) if self.credentials_file.is_none() => Err(
                ConfigError::MissingCredentials("client_secret is not set".to_string()),
            ),
            (None, Some(_)) if self.credentials_file.is_none() => Err(
                ConfigError::MissingCredentials("client_id is not set".to_string()),
            ),
            _ => match self.credentials_file {
                Some(ref path) => OAuthCredentials::from_file(path).map_err(|e| {
                    ConfigError::MissingCredentials(format!("{}: {}", path.display(), e))
                }),
                None => Err(ConfigError::MissingCredentials(format!(
                    "set CLIENT_ID and CLIENT_SECRET, or add to {}:\n  \
                     [google]\n  \
                     client_id = \"YOUR_ID.apps.googleusercontent.com\"\n  \
                     client_secret = \"YOUR_SECRET\"",
                    ServerConfig::default_path().display()
                ))),
            },
        }
    }
}

impl ServerConfig {
    /// Loads configuration from `path`, or from the default path if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("menumorpher")
            .join("config.toml")
    }

    /// Builds and validates the provider configuration.
    pub fn to_google_config(&self) -> Result<GoogleConfig, ConfigError> {
        let credentials = self.google.resolve_credentials()?;

        let mut config = GoogleConfig::new(credentials)
            .with_timeout(Duration::from_secs(self.server.timeout_secs))
            .with_location_read_mask(&self.server.location_read_mask);

        if let Some(ref url) = self.google.redirect_url {
            config = config.with_redirect_url(url);
        }
        if !self.google.scopes.is_empty() {
            config = config.with_scopes(self.google.scopes.clone());
        }

        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Copy of the configuration that is safe to print.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if let Some(ref secret) = copy.google.client_secret
            && !secret.starts_with("env::")
            && !secret.starts_with("pass::")
        {
            copy.google.client_secret = Some("********".to_string());
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn inline_settings() -> GoogleSettings {
        GoogleSettings {
            client_id: Some("test-id.apps.googleusercontent.com".to_string()),
            client_secret: Some("test-secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.listen, "127.0.0.1:8080");
        assert_eq!(
            config.server.menu_output_path(),
            Some(Path::new("menu.json"))
        );
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.server.location_read_mask, "name");
    }

    #[test]
    fn empty_menu_output_disables_writing() {
        let config: ServerConfig = toml::from_str("[server]\nmenu_output = \"\"\n").unwrap();
        assert!(config.server.menu_output_path().is_none());
    }

    #[test]
    fn resolve_inline_credentials() {
        let creds = inline_settings().resolve_credentials().unwrap();
        assert_eq!(creds.client_id, "test-id.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "test-secret");
    }

    #[test]
    fn resolve_env_references() {
        unsafe {
            std::env::set_var("_MM_TEST_CLIENT_ID", "env-id.apps.googleusercontent.com");
            std::env::set_var("_MM_TEST_CLIENT_SECRET", "env-secret");
        }

        let settings = GoogleSettings {
            client_id: Some("env::_MM_TEST_CLIENT_ID".to_string()),
            client_secret: Some("env::_MM_TEST_CLIENT_SECRET".to_string()),
            ..Default::default()
        };
        let creds = settings.resolve_credentials().unwrap();
        assert_eq!(creds.client_id, "env-id.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "env-secret");

        unsafe {
            std::env::remove_var("_MM_TEST_CLIENT_ID");
            std::env::remove_var("_MM_TEST_CLIENT_SECRET");
        }
    }

    #[test]
    fn unresolvable_secret_names_the_field() {
        let settings = GoogleSettings {
            client_secret: Some("env::_MM_TEST_UNSET_SECRET_98765".to_string()),
            ..inline_settings()
        };
        let err = settings.resolve_credentials().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Secret {
                field: "client_secret",
                ..
            }
        ));
    }

    #[test]
    fn missing_secret_errors() {
        let settings = GoogleSettings {
            client_secret: None,
            ..inline_settings()
        };
        let err = settings.resolve_credentials().unwrap_err();
        assert!(err.to_string().contains("client_secret"));
    }

    #[test]
    fn nothing_configured_errors() {
        let err = GoogleSettings::default().resolve_credentials().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials(_)));
        assert!(err.to_string().contains("CLIENT_ID"));
    }

    #[test]
    fn credentials_file_fallback() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"web": {{"client_id": "file-id.apps.googleusercontent.com", "client_secret": "file-secret"}}}}"#
        )
        .unwrap();

        let settings = GoogleSettings {
            credentials_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let creds = settings.resolve_credentials().unwrap();
        assert_eq!(creds.client_id, "file-id.apps.googleusercontent.com");
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
listen = "0.0.0.0:9000"
menu_output = "out/menus.json"
location_read_mask = "name,title"

[google]
client_id = "toml-id.apps.googleusercontent.com"
client_secret = "toml-secret"
redirect_url = "http://localhost:9000/callback"
"#
        )
        .unwrap();

        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:9000");
        assert_eq!(config.server.timeout_secs, 30);

        let google = config.to_google_config().unwrap();
        assert_eq!(google.redirect_url, "http://localhost:9000/callback");
        assert_eq!(google.location_read_mask, "name,title");
        assert_eq!(google.scopes, vec![GoogleConfig::DEFAULT_SCOPE.to_string()]);
    }

    #[test]
    fn load_missing_explicit_file_errors() {
        let err = ServerConfig::load(Some(Path::new("/nonexistent/menumorpher.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_toml_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[server\nlisten = ").unwrap();
        let err = ServerConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_client_id_is_rejected() {
        let config = ServerConfig {
            google: GoogleSettings {
                client_id: Some("not-a-google-client".to_string()),
                ..inline_settings()
            },
            ..Default::default()
        };
        let err = config.to_google_config().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn redacted_hides_plain_secrets_only() {
        let mut config = ServerConfig {
            google: inline_settings(),
            ..Default::default()
        };
        assert_eq!(
            config.redacted().google.client_secret.as_deref(),
            Some("********")
        );

        config.google.client_secret = Some("env::CLIENT_SECRET".to_string());
        assert_eq!(
            config.redacted().google.client_secret.as_deref(),
            Some("env::CLIENT_SECRET")
        );
    }
}
